use super::error::{AppError, Result};
use super::tree::{Forest, NodeId};

/// Drag-and-drop relocation. `begin` records the node being moved; `drop_on`
/// attempts the relocation and always forgets the source afterwards, so a
/// failed drop can never replay against a later target.
///
/// The drop target may be at any depth and any distance from the source, so
/// the underlying move searches the whole forest rather than relying on
/// adjacency; see [`Forest::move_before`].
#[derive(Debug, Default)]
pub struct DragReorder {
    source: Option<NodeId>,
}

impl DragReorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, id: NodeId) {
        self.source = Some(id);
    }

    pub fn source(&self) -> Option<NodeId> {
        self.source
    }

    pub fn cancel(&mut self) {
        self.source = None;
    }

    /// Drop any recorded source that pointed into a deleted subtree.
    pub fn forget(&mut self, removed: &[NodeId]) {
        if self.source.is_some_and(|id| removed.contains(&id)) {
            self.source = None;
        }
    }

    /// Relocate the dragged node to immediately precede `target`. Returns
    /// the new forest on success; the caller's forest is untouched on any
    /// failure.
    pub fn drop_on(&mut self, forest: &Forest, target: NodeId) -> Result<Forest> {
        let source = self.source.take().ok_or_else(|| {
            AppError::UserAction("Nothing is being dragged.".to_string())
        })?;
        forest.move_before(source, target)
    }
}
