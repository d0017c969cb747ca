use serde::{Deserialize, Serialize};

use super::error::{AppError, Result};
use super::tree::{Forest, LinkKind, NodeId};

/// Shopify's navigation feature accepts at most three levels of nesting,
/// counting the root level as depth 1.
pub const MAX_NESTING_DEPTH: usize = 3;

/// Shown verbatim whenever an export exceeds the platform limit; the
/// gateway produces the same message from its own re-validation.
pub const DEPTH_LIMIT_MESSAGE: &str =
    "Menu is too deep! Shopify only allows 3 levels of nesting.";

/// A menu entry in the wire shape the platform expects. Carries no internal
/// node identifier; that key means nothing outside this editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedItem {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: LinkKind,
    pub url: String,
    #[serde(rename = "resourceId", skip_serializing_if = "Option::is_none", default)]
    pub resource_id: Option<String>,
    #[serde(default)]
    pub items: Vec<ExportedItem>,
}

/// Convert the forest into exportable records, enforcing the depth bound.
///
/// The outcome is binary: either the whole forest formats within the limit,
/// or the export aborts with a depth-exceeded error and produces nothing.
/// Runs in full before any network call.
pub fn export_forest(forest: &Forest) -> Result<Vec<ExportedItem>> {
    export_level(forest, forest.roots(), 1)
}

fn export_level(forest: &Forest, ids: &[NodeId], depth: usize) -> Result<Vec<ExportedItem>> {
    if depth > MAX_NESTING_DEPTH {
        return Err(AppError::Validation(DEPTH_LIMIT_MESSAGE.to_string()));
    }
    ids.iter()
        .map(|id| {
            let node = forest.node(*id).ok_or_else(|| {
                AppError::Validation("The menu structure is no longer consistent.".to_string())
            })?;
            let items = if node.children.is_empty() {
                Vec::new()
            } else {
                export_level(forest, &node.children, depth + 1)?
            };
            Ok(ExportedItem {
                title: node.title.clone(),
                kind: node.kind,
                url: node.url.clone(),
                resource_id: node.resource_id.clone(),
                items,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::catalog::{ResourceItem, ResourceKind};

    fn collection(title: &str, handle: &str) -> ResourceItem {
        ResourceItem {
            id: format!("gid://shopify/Collection/{}", handle),
            title: title.to_string(),
            handle: handle.to_string(),
            kind: ResourceKind::Collection,
            products_count: None,
        }
    }

    #[test]
    fn test_export_within_limit() {
        let forest = Forest::new();
        let (forest, men) = forest.add_root_group("Men");
        let (forest, shirts) = forest.add_child(men, &collection("Shirts", "shirts")).unwrap();
        let (forest, _) = forest
            .add_child(shirts, &collection("Casual Shirts", "casual-shirts"))
            .unwrap();

        let items = export_forest(&forest).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Men");
        assert_eq!(items[0].items[0].url, "/collections/shirts");
        assert_eq!(items[0].items[0].items[0].title, "Casual Shirts");
    }

    #[test]
    fn test_depth_four_aborts_whole_export() {
        let forest = Forest::new();
        let (forest, men) = forest.add_root_group("Men");
        let (forest, shirts) = forest.add_child(men, &collection("Shirts", "shirts")).unwrap();
        let (forest, casual) = forest
            .add_child(shirts, &collection("Casual Shirts", "casual-shirts"))
            .unwrap();
        let (forest, _) = forest
            .add_child(casual, &collection("Linen", "linen"))
            .unwrap();

        let err = export_forest(&forest).unwrap_err();
        match err {
            AppError::Validation(msg) => assert_eq!(msg, DEPTH_LIMIT_MESSAGE),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_output_has_no_internal_ids() {
        let forest = Forest::new();
        let (forest, men) = forest.add_root_group("Men");
        let (forest, _) = forest.add_child(men, &collection("Shirts", "shirts")).unwrap();

        let items = export_forest(&forest).unwrap();
        let json = serde_json::to_string(&items).unwrap();
        assert!(!json.contains("\"id\""));
        // Wire field names, not internal ones
        assert!(json.contains("\"type\":\"HTTP\""));
        assert!(json.contains("\"type\":\"COLLECTION\""));
        assert!(json.contains("\"resourceId\""));
    }

    #[test]
    fn test_resource_id_omitted_when_absent() {
        let forest = Forest::new();
        let (forest, _) = forest.add_root_group("Men");

        let items = export_forest(&forest).unwrap();
        let json = serde_json::to_string(&items).unwrap();
        assert!(!json.contains("resourceId"));
        assert!(json.contains("\"items\":[]"));
    }

    #[test]
    fn test_exported_item_round_trips() {
        let item = ExportedItem {
            title: "Men".to_string(),
            kind: LinkKind::Http,
            url: "#".to_string(),
            resource_id: None,
            items: vec![ExportedItem {
                title: "Shirts".to_string(),
                kind: LinkKind::Collection,
                url: "/collections/shirts".to_string(),
                resource_id: Some("gid://shopify/Collection/1".to_string()),
                items: Vec::new(),
            }],
        };
        let json = serde_json::to_string(&item).unwrap();
        let parsed: ExportedItem = serde_json::from_str(&json).unwrap();
        assert_eq!(item, parsed);
    }
}
