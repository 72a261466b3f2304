//! Derived selection summary

use serde::Serialize;

use super::options::SelectionOptions;
use super::state::SelectionState;

/// Tri-state summary of the selection, as shown by a bulk checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BulkState {
    All,
    Some,
    None,
}

impl BulkState {
    pub fn as_str(self) -> &'static str {
        match self {
            BulkState::All => "ALL",
            BulkState::Some => "SOME",
            BulkState::None => "NONE",
        }
    }
}

/// Values derived from a [`SelectionState`] and the current options.
///
/// Always recomputed, never stored apart from the state it describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub selected_count: usize,
    pub bulk_state: BulkState,
    pub infinite_selected: bool,
    /// Selection controls should be disabled (caller flag or empty universe)
    pub disabled: bool,
    pub deselect_rows_by_default: bool,
}

impl Summary {
    pub fn compute(state: &SelectionState, options: &SelectionOptions) -> Self {
        let (selected_count, bulk_state) = match state {
            SelectionState::Explicit(selected) => {
                let count = selected.len();
                let bulk = if count == 0 {
                    BulkState::None
                } else if count == options.all_ids.len() {
                    BulkState::All
                } else {
                    BulkState::Some
                };
                (count, bulk)
            }
            SelectionState::Complement(excluded) => {
                let bulk = if excluded.is_empty() {
                    BulkState::All
                } else {
                    BulkState::Some
                };
                (options.total_count.saturating_sub(excluded.len()), bulk)
            }
        };

        Self {
            selected_count,
            bulk_state,
            infinite_selected: state.is_complement(),
            disabled: options.disabled || options.all_ids.is_empty(),
            deselect_rows_by_default: options.deselect_rows_by_default,
        }
    }
}

#[cfg(test)]
#[path = "summary_tests.rs"]
mod summary_tests;
