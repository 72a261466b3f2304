//! Reconciliation of external option changes

use super::{Delivery, SelectionManager};
use crate::selection::options::ReconcileOptions;
use crate::selection::state::SelectionState;
use crate::selection::summary::{BulkState, Summary};

/// Which rule a reconciliation pass applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileStep {
    /// Adopted an externally supplied selection
    AdoptExternal,
    /// Re-applied an ALL selection against a changed universe
    ReapplyAll,
    /// Left infinite mode once no more items can exist
    Materialize,
    /// Dropped ids that left the universe
    Retain,
    /// Only the options changed
    Unchanged,
}

impl SelectionManager {
    /// Applies new caller options and reconciles the selection with them.
    ///
    /// Rules are checked in order against the previous state, first match wins:
    ///
    /// 1. `selected_ids` is supplied and differs from the current selection: adopt it.
    /// 2. Explicit ALL selection and the universe changed: keep the selected ids
    ///    that are still in the universe, so the bulk state follows its new size.
    /// 3. Infinite mode and no more items can exist: select the universe minus
    ///    the excluded ids explicitly.
    /// 4. The disabled flag or the universe changed: drop tracked ids that are no
    ///    longer in the universe.
    /// 5. Otherwise the state is kept.
    ///
    /// Id lists are compared element-wise, so a reordered list counts as changed.
    /// Reconciliation never calls the listener, but subscribers always receive
    /// the recomputed snapshot.
    pub fn reconcile(&mut self, next: ReconcileOptions) -> Summary {
        self.reconcile_step(next).1
    }

    /// [`SelectionManager::reconcile`], also reporting which rule applied.
    pub fn reconcile_step(&mut self, next: ReconcileOptions) -> (ReconcileStep, Summary) {
        let ReconcileOptions {
            options,
            selected_ids,
        } = next;

        let universe_changed = options.all_ids != self.options.all_ids;
        let disabled_changed = options.disabled != self.options.disabled;

        let (step, state) = if let Some(ids) = selected_ids
            && self.state.selected_ids() != Some(ids.as_slice())
        {
            (ReconcileStep::AdoptExternal, Some(SelectionState::Explicit(ids)))
        } else if !self.state.is_complement()
            && self.summary.bulk_state == BulkState::All
            && universe_changed
        {
            (
                ReconcileStep::ReapplyAll,
                Some(self.state.retained_in(&options.all_ids)),
            )
        } else if self.state.is_complement() && !options.has_more_in_bulk_selection {
            (
                ReconcileStep::Materialize,
                Some(self.state.materialized(&options.all_ids)),
            )
        } else if disabled_changed || universe_changed {
            (
                ReconcileStep::Retain,
                Some(self.state.retained_in(&options.all_ids)),
            )
        } else {
            (ReconcileStep::Unchanged, None)
        };

        #[cfg(debug_assertions)]
        log::debug!(
            "reconcile: {:?} (universe {} -> {} ids)",
            step,
            self.options.all_ids.len(),
            options.all_ids.len()
        );

        self.options = options;
        let summary = match state {
            Some(state) => self.commit(state, Delivery::Silent),
            None => {
                self.publish();
                self.summary
            }
        };
        (step, summary)
    }
}

#[cfg(test)]
#[path = "reconcile_tests.rs"]
mod reconcile_tests;
