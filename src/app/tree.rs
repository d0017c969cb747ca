use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::catalog::ResourceItem;
use super::error::{AppError, Result};

/// Stable identifier of a menu node, unique across the whole forest for
/// the node's lifetime. Purely a local editing key; never exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u64);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a menu entry links to, named the way the Shopify menu API names it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LinkKind {
    Http,
    Collection,
    Page,
}

/// One navigation entry: a title, a link target and an ordered child list.
/// Children are ids into the owning forest's arena; no parent pointers are
/// kept, so a node cannot hold a stale back-reference across snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuNode {
    pub id: NodeId,
    pub title: String,
    pub kind: LinkKind,
    pub url: String,
    pub resource_id: Option<String>,
    pub children: Vec<NodeId>,
}

/// Editable fields of a node. The id is immutable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeEdit {
    pub title: Option<String>,
    pub url: Option<String>,
}

/// The navigation structure being built: an ordered sequence of root nodes
/// over an id-addressed arena.
///
/// Every mutating operation takes `&self` and returns a fresh `Forest`, so
/// a caller holding an earlier snapshot never observes a half-applied
/// change. The id counter travels with the forest, which keeps identifiers
/// unique across any sequence of adds and deletes.
#[derive(Debug, Clone, PartialEq)]
pub struct Forest {
    nodes: BTreeMap<NodeId, MenuNode>,
    roots: Vec<NodeId>,
    next_id: u64,
}

impl Default for Forest {
    fn default() -> Self {
        Self::new()
    }
}

impl Forest {
    pub fn new() -> Self {
        Self {
            nodes: BTreeMap::new(),
            roots: Vec::new(),
            next_id: 1,
        }
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn node(&self, id: NodeId) -> Option<&MenuNode> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn alloc_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Append a new group at the root level. The placeholder target (`#`)
    /// stays until the user edits the node.
    pub fn add_root_group(&self, title: &str) -> (Forest, NodeId) {
        let mut next = self.clone();
        let id = next.alloc_id();
        next.nodes.insert(
            id,
            MenuNode {
                id,
                title: title.to_string(),
                kind: LinkKind::Http,
                url: "#".to_string(),
                resource_id: None,
                children: Vec::new(),
            },
        );
        next.roots.push(id);
        (next, id)
    }

    /// Build a leaf from a store resource and append it under `anchor`,
    /// wherever in the forest that anchor currently lives.
    pub fn add_child(&self, anchor: NodeId, resource: &ResourceItem) -> Result<(Forest, NodeId)> {
        if !self.contains(anchor) {
            return Err(AppError::UserAction(
                "The selected menu item no longer exists.".to_string(),
            ));
        }
        let mut next = self.clone();
        let id = next.alloc_id();
        next.nodes.insert(
            id,
            MenuNode {
                id,
                title: resource.title.clone(),
                kind: resource.link_kind(),
                url: resource.url_path(),
                resource_id: Some(resource.id.clone()),
                children: Vec::new(),
            },
        );
        if let Some(parent) = next.nodes.get_mut(&anchor) {
            parent.children.push(id);
        }
        Ok((next, id))
    }

    /// Merge editable fields into the node with this id, located by full
    /// search. A no-op if the id no longer exists.
    pub fn update_node(&self, id: NodeId, edit: &NodeEdit) -> Forest {
        let mut next = self.clone();
        if let Some(node) = next.nodes.get_mut(&id) {
            if let Some(ref title) = edit.title {
                node.title = title.clone();
            }
            if let Some(ref url) = edit.url {
                node.url = url.clone();
            }
        }
        next
    }

    /// Remove the node and its entire subtree. Returns the new forest and
    /// every removed id, so callers can clear selection state that pointed
    /// into the deleted subtree.
    pub fn delete_node(&self, id: NodeId) -> (Forest, Vec<NodeId>) {
        if !self.contains(id) {
            return (self.clone(), Vec::new());
        }
        let removed = self.subtree_ids(id);
        let mut next = self.clone();
        next.roots.retain(|r| *r != id);
        for node in next.nodes.values_mut() {
            node.children.retain(|c| *c != id);
        }
        for gone in &removed {
            next.nodes.remove(gone);
        }
        (next, removed)
    }

    /// Relocate `source` (subtree intact) to immediately precede `target`
    /// within the target's current sibling list.
    ///
    /// The cycle check runs before any mutation: dropping a node onto
    /// itself or one of its own descendants would detach the subtree from
    /// the forest, so it is rejected outright. Both the detach and the
    /// splice locate their positions by full search; if either fails the
    /// previous forest is returned untouched via the error path.
    pub fn move_before(&self, source: NodeId, target: NodeId) -> Result<Forest> {
        if source == target || self.subtree_ids(source).contains(&target) {
            return Err(AppError::UserAction(
                "Cannot drop an item onto itself or its own sub-items.".to_string(),
            ));
        }
        let mut next = self.clone();
        if !next.detach(source) {
            return Err(AppError::UserAction(
                "The dragged item no longer exists.".to_string(),
            ));
        }
        // Locate the target only after the detach: removing the source may
        // have shifted positions within a shared sibling list.
        if next.roots.contains(&target) {
            let idx = next.roots.iter().position(|r| *r == target).unwrap_or(0);
            next.roots.insert(idx, source);
            return Ok(next);
        }
        let parent = next
            .nodes
            .values()
            .find(|n| n.children.contains(&target))
            .map(|n| n.id);
        match parent {
            Some(parent_id) => {
                if let Some(parent) = next.nodes.get_mut(&parent_id) {
                    let idx = parent.children.iter().position(|c| *c == target).unwrap_or(0);
                    parent.children.insert(idx, source);
                }
                Ok(next)
            }
            None => Err(AppError::UserAction(
                "The drop target no longer exists.".to_string(),
            )),
        }
    }

    /// Remove `id` from whichever list currently holds it (roots or some
    /// node's children), leaving the node and its subtree in the arena.
    fn detach(&mut self, id: NodeId) -> bool {
        if let Some(idx) = self.roots.iter().position(|r| *r == id) {
            self.roots.remove(idx);
            return true;
        }
        for node in self.nodes.values_mut() {
            if let Some(idx) = node.children.iter().position(|c| *c == id) {
                node.children.remove(idx);
                return true;
            }
        }
        false
    }

    /// Preorder ids of the subtree rooted at `id`, including `id` itself.
    pub fn subtree_ids(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if !self.contains(current) {
                continue;
            }
            out.push(current);
            if let Some(node) = self.nodes.get(&current) {
                for child in node.children.iter().rev() {
                    stack.push(*child);
                }
            }
        }
        out
    }

    /// All ids in the forest, in arena order. Used by the uniqueness tests
    /// and the tree-view rebuild.
    pub fn ids(&self) -> Vec<NodeId> {
        self.nodes.keys().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::catalog::{ResourceItem, ResourceKind};
    use std::collections::HashSet;

    fn shirts() -> ResourceItem {
        ResourceItem {
            id: "gid://shopify/Collection/42".to_string(),
            title: "Shirts".to_string(),
            handle: "shirts".to_string(),
            kind: ResourceKind::Collection,
            products_count: Some(8),
        }
    }

    fn about_page() -> ResourceItem {
        ResourceItem {
            id: "gid://shopify/Page/7".to_string(),
            title: "About".to_string(),
            handle: "about".to_string(),
            kind: ResourceKind::Page,
            products_count: None,
        }
    }

    #[test]
    fn test_add_root_group_defaults() {
        let forest = Forest::new();
        let (forest, id) = forest.add_root_group("Men");
        let node = forest.node(id).unwrap();
        assert_eq!(node.title, "Men");
        assert_eq!(node.kind, LinkKind::Http);
        assert_eq!(node.url, "#");
        assert!(node.resource_id.is_none());
        assert!(node.children.is_empty());
        assert_eq!(forest.roots(), &[id]);
    }

    #[test]
    fn test_add_child_from_resource() {
        let forest = Forest::new();
        let (forest, men) = forest.add_root_group("Men");
        let (forest, child) = forest.add_child(men, &shirts()).unwrap();

        let node = forest.node(child).unwrap();
        assert_eq!(node.url, "/collections/shirts");
        assert_eq!(node.kind, LinkKind::Collection);
        assert_eq!(node.resource_id.as_deref(), Some("gid://shopify/Collection/42"));
        assert_eq!(forest.node(men).unwrap().children, vec![child]);

        let (forest, page_child) = forest.add_child(men, &about_page()).unwrap();
        assert_eq!(forest.node(page_child).unwrap().url, "/pages/about");
        assert_eq!(forest.node(page_child).unwrap().kind, LinkKind::Page);
    }

    #[test]
    fn test_add_child_missing_anchor_rejected() {
        let forest = Forest::new();
        let err = forest.add_child(NodeId(99), &shirts()).unwrap_err();
        assert!(matches!(err, AppError::UserAction(_)));
    }

    #[test]
    fn test_ids_stay_unique_across_adds_and_deletes() {
        let forest = Forest::new();
        let (forest, a) = forest.add_root_group("A");
        let (forest, _b) = forest.add_child(a, &shirts()).unwrap();
        let (forest, _) = forest.delete_node(a);
        let (forest, c) = forest.add_root_group("C");
        let (forest, d) = forest.add_child(c, &shirts()).unwrap();

        let ids = forest.ids();
        let unique: HashSet<_> = ids.iter().copied().collect();
        assert_eq!(ids.len(), unique.len());
        // Ids of deleted nodes are never reissued
        assert!(c != a && d != a);
    }

    #[test]
    fn test_mutations_leave_prior_snapshot_intact() {
        let forest = Forest::new();
        let (forest, men) = forest.add_root_group("Men");
        let snapshot = forest.clone();

        let (with_child, _) = forest.add_child(men, &shirts()).unwrap();
        let edited = with_child.update_node(men, &NodeEdit {
            title: Some("Menswear".to_string()),
            url: None,
        });
        let (_after_delete, _) = edited.delete_node(men);

        assert_eq!(forest, snapshot);
        assert!(forest.node(men).unwrap().children.is_empty());
        assert_eq!(forest.node(men).unwrap().title, "Men");
    }

    #[test]
    fn test_update_node_merges_fields_and_ignores_missing() {
        let forest = Forest::new();
        let (forest, men) = forest.add_root_group("Men");
        let forest = forest.update_node(men, &NodeEdit {
            title: None,
            url: Some("/collections/men".to_string()),
        });
        let node = forest.node(men).unwrap();
        assert_eq!(node.title, "Men");
        assert_eq!(node.url, "/collections/men");

        let unchanged = forest.update_node(NodeId(99), &NodeEdit {
            title: Some("ghost".to_string()),
            url: None,
        });
        assert_eq!(unchanged, forest);
    }

    #[test]
    fn test_delete_removes_whole_subtree() {
        let forest = Forest::new();
        let (forest, men) = forest.add_root_group("Men");
        let (forest, shirts_id) = forest.add_child(men, &shirts()).unwrap();
        let (forest, casual) = forest.add_child(shirts_id, &shirts()).unwrap();
        let (forest, women) = forest.add_root_group("Women");

        let (forest, removed) = forest.delete_node(shirts_id);
        assert_eq!(removed, vec![shirts_id, casual]);
        assert!(!forest.contains(shirts_id));
        assert!(!forest.contains(casual));
        assert!(forest.node(men).unwrap().children.is_empty());
        assert!(forest.contains(women));

        // Deleting an unknown id is a no-op
        let (same, removed) = forest.delete_node(NodeId(1234));
        assert!(removed.is_empty());
        assert_eq!(same, forest);
    }

    #[test]
    fn test_move_before_rejects_self_and_descendants() {
        let forest = Forest::new();
        let (forest, a) = forest.add_root_group("A");
        let (forest, b) = forest.add_child(a, &shirts()).unwrap();
        let snapshot = forest.clone();

        assert!(matches!(forest.move_before(a, a), Err(AppError::UserAction(_))));
        assert!(matches!(forest.move_before(a, b), Err(AppError::UserAction(_))));
        assert_eq!(forest, snapshot);
    }

    #[test]
    fn test_move_before_relocates_across_subtrees() {
        let forest = Forest::new();
        let (forest, men) = forest.add_root_group("Men");
        let (forest, women) = forest.add_root_group("Women");
        let (forest, shirts_id) = forest.add_child(men, &shirts()).unwrap();
        let (forest, dresses) = forest.add_child(women, &shirts()).unwrap();

        // Move "Shirts" (under Men) to precede "Dresses" (under Women)
        let forest = forest.move_before(shirts_id, dresses).unwrap();
        assert!(forest.node(men).unwrap().children.is_empty());
        assert_eq!(forest.node(women).unwrap().children, vec![shirts_id, dresses]);
    }

    #[test]
    fn test_move_before_within_same_sibling_list() {
        let forest = Forest::new();
        let (forest, a) = forest.add_root_group("A");
        let (forest, b) = forest.add_root_group("B");
        let (forest, c) = forest.add_root_group("C");

        let forest = forest.move_before(c, a).unwrap();
        assert_eq!(forest.roots(), &[c, a, b]);

        let forest = forest.move_before(c, b).unwrap();
        assert_eq!(forest.roots(), &[a, c, b]);
    }

    #[test]
    fn test_move_carries_subtree_intact() {
        let forest = Forest::new();
        let (forest, men) = forest.add_root_group("Men");
        let (forest, shirts_id) = forest.add_child(men, &shirts()).unwrap();
        let (forest, casual) = forest.add_child(shirts_id, &shirts()).unwrap();
        let (forest, women) = forest.add_root_group("Women");

        let forest = forest.move_before(shirts_id, women).unwrap();
        assert_eq!(forest.roots(), &[men, shirts_id, women]);
        assert_eq!(forest.node(shirts_id).unwrap().children, vec![casual]);
    }
}
