use super::tree::NodeId;

/// Tracks the single insertion anchor and the single node in inline-edit
/// mode. Selecting a node drops any active edit; entering edit mode points
/// both states at the same node. There is no multi-select.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Option<NodeId>,
    editing: Option<NodeId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// The anchor new children are appended under.
    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    pub fn editing(&self) -> Option<NodeId> {
        self.editing
    }

    pub fn select(&mut self, id: NodeId) {
        self.selected = Some(id);
        self.editing = None;
    }

    pub fn begin_edit(&mut self, id: NodeId) {
        self.selected = Some(id);
        self.editing = Some(id);
    }

    pub fn end_edit(&mut self) {
        self.editing = None;
    }

    pub fn clear(&mut self) {
        self.selected = None;
        self.editing = None;
    }

    /// Drop any state that pointed into a deleted subtree.
    pub fn forget(&mut self, removed: &[NodeId]) {
        if self.selected.is_some_and(|id| removed.contains(&id)) {
            self.selected = None;
        }
        if self.editing.is_some_and(|id| removed.contains(&id)) {
            self.editing = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_clears_active_edit() {
        let mut sel = Selection::new();
        sel.begin_edit(NodeId(1));
        assert_eq!(sel.editing(), Some(NodeId(1)));

        sel.select(NodeId(2));
        assert_eq!(sel.selected(), Some(NodeId(2)));
        assert_eq!(sel.editing(), None);
    }

    #[test]
    fn test_begin_edit_sets_both() {
        let mut sel = Selection::new();
        sel.begin_edit(NodeId(5));
        assert_eq!(sel.selected(), Some(NodeId(5)));
        assert_eq!(sel.editing(), Some(NodeId(5)));

        sel.end_edit();
        assert_eq!(sel.selected(), Some(NodeId(5)));
        assert_eq!(sel.editing(), None);
    }

    #[test]
    fn test_forget_clears_deleted_ids() {
        let mut sel = Selection::new();
        sel.begin_edit(NodeId(3));
        sel.forget(&[NodeId(2), NodeId(3)]);
        assert_eq!(sel.selected(), None);
        assert_eq!(sel.editing(), None);

        sel.select(NodeId(7));
        sel.forget(&[NodeId(8)]);
        assert_eq!(sel.selected(), Some(NodeId(7)));
    }
}
