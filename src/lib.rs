//! MenuForge: a desktop builder for deeply nested Shopify navigation menus.
//!
//! The Shopify admin caps menu editing at two levels; the `menuCreate`
//! GraphQL mutation accepts three. MenuForge lets a merchant compose the
//! full three-level structure locally, from their store's real collections
//! and pages, and pushes it in one call.
//!
//! The crate is split into the pure application layer ([`app`]), the
//! Shopify boundary ([`gateway`]) and the FLTK widgets ([`ui`]). Everything
//! the tests care about lives in the first two.

pub mod app;
pub mod gateway;
pub mod ui;
