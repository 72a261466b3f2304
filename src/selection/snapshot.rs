//! Read-only view of the selection handed to renderers and subscribers

use std::rc::Rc;

use super::id::Id;
use super::state::SelectionState;
use super::summary::{BulkState, Summary};

/// Immutable selection snapshot.
///
/// Shares the state with the manager that produced it. Later mutations
/// replace the manager's state and never affect an existing snapshot.
#[derive(Debug, Clone)]
pub struct Snapshot {
    state: Rc<SelectionState>,
    summary: Summary,
}

impl Snapshot {
    pub(super) fn new(state: Rc<SelectionState>, summary: Summary) -> Self {
        Self { state, summary }
    }

    pub fn is_selected(&self, id: &Id) -> bool {
        self.state.is_selected(id)
    }

    /// Copy of the selected ids, `None` while infinite selection is active.
    pub fn selected_ids(&self) -> Option<Vec<Id>> {
        self.state.selected_ids().map(<[Id]>::to_vec)
    }

    /// Copy of the excluded ids, `None` unless infinite selection is active.
    pub fn excluded_ids(&self) -> Option<Vec<Id>> {
        self.state.excluded_ids().map(<[Id]>::to_vec)
    }

    pub fn summary(&self) -> Summary {
        self.summary
    }

    pub fn selected_count(&self) -> usize {
        self.summary.selected_count
    }

    pub fn bulk_state(&self) -> BulkState {
        self.summary.bulk_state
    }

    pub fn infinite_selected(&self) -> bool {
        self.summary.infinite_selected
    }

    pub fn disabled(&self) -> bool {
        self.summary.disabled
    }
}
