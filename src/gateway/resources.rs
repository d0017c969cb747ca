use serde::Deserialize;

use crate::app::catalog::{ResourceItem, ResourceKind};

use super::{GatewayError, StoreAuth, admin_graphql, require_auth};

const COLLECTIONS_QUERY: &str = "\
{
  collections(first: 250) {
    edges { node { id title handle productsCount { count } } }
  }
}";

const PAGES_QUERY: &str = "\
{
  pages(first: 250) {
    edges { node { id title handle } }
  }
}";

#[derive(Deserialize)]
struct Connection<N> {
    edges: Vec<Edge<N>>,
}

#[derive(Deserialize)]
struct Edge<N> {
    node: N,
}

#[derive(Deserialize)]
struct CollectionsData {
    collections: Connection<CollectionNode>,
}

#[derive(Deserialize)]
struct CollectionNode {
    id: String,
    title: String,
    handle: String,
    #[serde(rename = "productsCount")]
    products_count: Option<ProductsCount>,
}

#[derive(Deserialize)]
struct ProductsCount {
    count: u64,
}

#[derive(Deserialize)]
struct PagesData {
    pages: Connection<PageNode>,
}

#[derive(Deserialize)]
struct PageNode {
    id: String,
    title: String,
    handle: String,
}

/// Read the store's collections, flattened out of the connection envelope.
pub fn fetch_collections(auth: Option<&StoreAuth>) -> Result<Vec<ResourceItem>, GatewayError> {
    let auth = require_auth(auth)?;
    let data: CollectionsData = admin_graphql(auth, COLLECTIONS_QUERY, None::<()>)?;
    Ok(data
        .collections
        .edges
        .into_iter()
        .map(|edge| ResourceItem {
            id: edge.node.id,
            title: edge.node.title,
            handle: edge.node.handle,
            kind: ResourceKind::Collection,
            products_count: Some(edge.node.products_count.map(|c| c.count).unwrap_or(0)),
        })
        .collect())
}

/// Read the store's pages, tagged with their kind so callers can merge the
/// two arrays into one catalog.
pub fn fetch_pages(auth: Option<&StoreAuth>) -> Result<Vec<ResourceItem>, GatewayError> {
    let auth = require_auth(auth)?;
    let data: PagesData = admin_graphql(auth, PAGES_QUERY, None::<()>)?;
    Ok(data
        .pages
        .edges
        .into_iter()
        .map(|edge| ResourceItem {
            id: edge.node.id,
            title: edge.node.title,
            handle: edge.node.handle,
            kind: ResourceKind::Page,
            products_count: None,
        })
        .collect())
}
