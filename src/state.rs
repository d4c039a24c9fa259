use std::sync::Arc;
use tokio::sync::Mutex;

/// Ordered list of entities shared between a view and the units mutating it.
///
/// Insertion order reflects server response order after a fetch and append
/// order for creates. The same handle is passed to the update and delete
/// units so all of them work on the one list the view renders.
pub type SharedCollection<T> = Arc<Mutex<Vec<T>>>;

/// Create an empty shared collection.
pub fn new_collection<T>() -> SharedCollection<T> {
    Arc::new(Mutex::new(Vec::new()))
}

/// Editing state a view holds while one row is being edited.
#[derive(Debug)]
pub struct EditState<T> {
    pub editing: bool,
    pub item: Option<T>,
}

impl<T> EditState<T> {
    /// Mark `item` as the row currently being edited.
    pub fn begin(&mut self, item: T) {
        self.editing = true;
        self.item = Some(item);
    }

    /// Drop the editing flag and the edited row.
    pub fn clear(&mut self) {
        self.editing = false;
        self.item = None;
    }
}

impl<T> Default for EditState<T> {
    fn default() -> Self {
        Self {
            editing: false,
            item: None,
        }
    }
}

pub type SharedEditState<T> = Arc<Mutex<EditState<T>>>;

/// Create a cleared shared editing state.
pub fn new_edit_state<T>() -> SharedEditState<T> {
    Arc::new(Mutex::new(EditState::default()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_state_begin_and_clear() {
        let mut state = EditState::default();
        assert!(!state.editing);

        state.begin("row");
        assert!(state.editing);
        assert_eq!(state.item, Some("row"));

        state.clear();
        assert!(!state.editing);
        assert_eq!(state.item, None);
    }
}
