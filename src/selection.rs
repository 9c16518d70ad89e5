use slint::{Model, SharedString, VecModel};

/// The single selected node, if any.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Selection {
    selected: Option<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `id`, replacing any previous selection
    pub fn select(&mut self, id: &str) {
        if self.selected.as_deref() != Some(id) {
            log::debug!("selected node {}", id);
            self.selected = Some(id.to_string());
        }
    }

    /// Clear the current selection
    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn get(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Take the selected id out, leaving nothing selected
    pub fn take(&mut self) -> Option<String> {
        self.selected.take()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.selected.as_deref() == Some(id)
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_none()
    }

    /// Follow a node rename
    pub fn rename(&mut self, old_id: &str, new_id: &str) {
        if self.contains(old_id) {
            self.selected = Some(new_id.to_string());
        }
    }

    /// Drop the selection if it points at a node that no longer exists
    pub fn forget(&mut self, id: &str) {
        if self.contains(id) {
            self.selected = None;
        }
    }

    /// Sync the selection to a Slint VecModel (zero or one row)
    pub fn sync_to_model(&self, model: &VecModel<SharedString>) {
        let current = self.selected.as_deref().map(SharedString::from);
        let in_sync = match &current {
            Some(id) => model.row_count() == 1 && model.row_data(0).as_ref() == Some(id),
            None => model.row_count() == 0,
        };
        if in_sync {
            return;
        }
        while model.row_count() > 0 {
            model.remove(0);
        }
        if let Some(id) = current {
            model.push(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Selection::new() and Default
    // ========================================================================

    #[test]
    fn test_new_selection_is_empty() {
        let selection = Selection::new();
        assert!(selection.is_empty());
        assert_eq!(selection.get(), None);
    }

    // ========================================================================
    // select() / clear()
    // ========================================================================

    #[test]
    fn test_select_replaces_previous() {
        let mut selection = Selection::new();
        selection.select("a");
        selection.select("b");
        assert!(!selection.contains("a"));
        assert!(selection.contains("b"));
    }

    #[test]
    fn test_clear() {
        let mut selection = Selection::new();
        selection.select("a");
        selection.clear();
        assert!(selection.is_empty());
    }

    #[test]
    fn test_take_empties() {
        let mut selection = Selection::new();
        selection.select("a");
        assert_eq!(selection.take().as_deref(), Some("a"));
        assert!(selection.is_empty());
    }

    // ========================================================================
    // rename() / forget()
    // ========================================================================

    #[test]
    fn test_rename_follows_selected_node() {
        let mut selection = Selection::new();
        selection.select("a");
        selection.rename("a", "renamed");
        assert!(selection.contains("renamed"));
    }

    #[test]
    fn test_rename_of_other_node_is_ignored() {
        let mut selection = Selection::new();
        selection.select("a");
        selection.rename("b", "renamed");
        assert!(selection.contains("a"));
    }

    #[test]
    fn test_forget() {
        let mut selection = Selection::new();
        selection.select("a");
        selection.forget("b");
        assert!(selection.contains("a"));
        selection.forget("a");
        assert!(selection.is_empty());
    }

    // ========================================================================
    // sync_to_model() - Slint VecModel Integration
    // ========================================================================

    #[test]
    fn test_sync_to_model_single_row() {
        let mut selection = Selection::new();
        let model = VecModel::<SharedString>::default();
        selection.select("a");
        selection.sync_to_model(&model);
        assert_eq!(model.row_count(), 1);
        assert_eq!(model.row_data(0).unwrap().as_str(), "a");

        selection.select("b");
        selection.sync_to_model(&model);
        assert_eq!(model.row_count(), 1);
        assert_eq!(model.row_data(0).unwrap().as_str(), "b");
    }

    #[test]
    fn test_sync_to_model_clears() {
        let mut selection = Selection::new();
        let model = VecModel::from(vec![SharedString::from("x"), SharedString::from("y")]);
        selection.sync_to_model(&model);
        assert_eq!(model.row_count(), 0);
        selection.select("a");
        selection.clear();
        selection.sync_to_model(&model);
        assert_eq!(model.row_count(), 0);
    }
}
