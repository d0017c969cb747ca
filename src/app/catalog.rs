use serde::{Deserialize, Serialize};

use super::tree::LinkKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceKind {
    Collection,
    Page,
}

/// A linkable store record (collection or page) fetched from Shopify.
/// Consumed read-only to construct new leaf menu nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceItem {
    pub id: String,
    pub title: String,
    pub handle: String,
    pub kind: ResourceKind,
    pub products_count: Option<u64>,
}

impl ResourceItem {
    /// Storefront path for a menu entry pointing at this resource.
    pub fn url_path(&self) -> String {
        match self.kind {
            ResourceKind::Collection => format!("/collections/{}", self.handle),
            ResourceKind::Page => format!("/pages/{}", self.handle),
        }
    }

    pub fn link_kind(&self) -> LinkKind {
        match self.kind {
            ResourceKind::Collection => LinkKind::Collection,
            ResourceKind::Page => LinkKind::Page,
        }
    }
}

/// The merged collections + pages list shown in the left panel.
/// Replaced wholesale on every fetch; never mutated by the tree engine.
#[derive(Debug, Clone, Default)]
pub struct ResourceCatalog {
    items: Vec<ResourceItem>,
}

impl ResourceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_items(&mut self, items: Vec<ResourceItem>) {
        self.items = items;
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[ResourceItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Case-insensitive title search, preserving fetch order.
    pub fn filtered(&self, search: &str) -> Vec<&ResourceItem> {
        let needle = search.trim().to_lowercase();
        self.items
            .iter()
            .filter(|item| needle.is_empty() || item.title.to_lowercase().contains(&needle))
            .collect()
    }
}
