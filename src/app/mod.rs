//! Application layer: the menu forest, its controllers and the session.
//!
//! # Structure
//!
//! - `tree.rs` - the id-addressed menu forest and its mutations
//! - `selection.rs` / `drag.rs` - interaction state over the forest
//! - `export.rs` - wire-shape conversion and depth validation
//! - `catalog.rs` - store resources the user builds links from
//! - `session.rs` - auth lifecycle and on-disk caching
//! - `state.rs` - main application coordinator

pub mod catalog;
pub mod drag;
pub mod error;
pub mod export;
pub mod messages;
pub mod selection;
pub mod session;
pub mod state;
pub mod tree;

// Re-exports for convenient external access
pub use catalog::{ResourceCatalog, ResourceItem, ResourceKind};
pub use drag::DragReorder;
pub use error::{AppError, Result};
pub use export::{export_forest, ExportedItem, DEPTH_LIMIT_MESSAGE, MAX_NESTING_DEPTH};
pub use messages::Message;
pub use selection::Selection;
pub use session::{AuthSession, StoredAuth, StoredCreds};
pub use state::{AppState, PushStatus};
pub use tree::{Forest, LinkKind, MenuNode, NodeEdit, NodeId};
