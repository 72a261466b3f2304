use serde::{Deserialize, Serialize};

use super::id::Id;

/// Caller-supplied universe and flags, provided at construction and on every reconcile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionOptions {
    /// Every id the caller currently knows about and considers selectable, in order
    pub all_ids: Vec<Id>,
    #[serde(default)]
    pub disabled: bool,
    /// More items may exist beyond `all_ids`, so "select all" enters infinite mode
    #[serde(default)]
    pub has_more_in_bulk_selection: bool,
    /// Size of the full collection, only meaningful in infinite mode
    #[serde(default)]
    pub total_count: usize,
    /// When some items are selected, the bulk toggle clears instead of selecting all
    #[serde(default)]
    pub deselect_rows_by_default: bool,
}

impl SelectionOptions {
    pub fn new(all_ids: Vec<Id>) -> Self {
        Self {
            all_ids,
            ..Self::default()
        }
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn with_has_more(mut self, has_more: bool) -> Self {
        self.has_more_in_bulk_selection = has_more;
        self
    }

    pub fn with_total_count(mut self, total_count: usize) -> Self {
        self.total_count = total_count;
        self
    }

    pub fn with_deselect_rows_by_default(mut self, deselect: bool) -> Self {
        self.deselect_rows_by_default = deselect;
        self
    }
}

/// Input to a reconciliation pass: the next options plus an optional
/// externally controlled selection that overrides internal state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileOptions {
    #[serde(flatten)]
    pub options: SelectionOptions,
    #[serde(default)]
    pub selected_ids: Option<Vec<Id>>,
}

impl ReconcileOptions {
    pub fn with_selected_ids(mut self, selected_ids: Vec<Id>) -> Self {
        self.selected_ids = Some(selected_ids);
        self
    }
}

impl From<SelectionOptions> for ReconcileOptions {
    fn from(options: SelectionOptions) -> Self {
        Self {
            options,
            selected_ids: None,
        }
    }
}
