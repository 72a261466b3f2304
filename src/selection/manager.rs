//! Selection manager
//!
//! Owns the selection state, applies user operations, and publishes a fresh
//! [`Snapshot`] after every state change.

mod reconcile;

use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use super::change::Change;
use super::error::SelectionError;
use super::id::{Id, ids_from_value};
use super::options::SelectionOptions;
use super::snapshot::Snapshot;
use super::state::SelectionState;
use super::summary::{BulkState, Summary};

pub use reconcile::ReconcileStep;

/// Called once per user-initiated mutation with the new selected ids
/// (`None` in infinite mode) and the change descriptor, if any.
pub type SelectionListener = Box<dyn FnMut(Option<Vec<Id>>, Option<&Change>)>;

type SnapshotSubscriber = Box<dyn FnMut(&Snapshot)>;

/// Handle returned by [`SelectionManager::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// How a state replacement is reported.
enum Delivery {
    /// Reconciliation: snapshot subscribers only
    Silent,
    /// User operation: snapshot subscribers, then the listener
    Notify(Option<Change>),
}

/// Bulk selection manager for a single collection.
///
/// Not thread-safe. The owner must serialize every mutating call, including
/// [`SelectionManager::reconcile`].
pub struct SelectionManager {
    state: Rc<SelectionState>,
    options: SelectionOptions,
    summary: Summary,
    listener: Option<SelectionListener>,
    subscribers: Vec<(SubscriptionId, SnapshotSubscriber)>,
    next_subscription: u64,
}

impl fmt::Debug for SelectionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionManager")
            .field("state", &self.state)
            .field("options", &self.options)
            .field("summary", &self.summary)
            .field("has_listener", &self.listener.is_some())
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl SelectionManager {
    /// Creates a manager in explicit mode.
    ///
    /// `initially_selected` is taken as is, without checking it against `all_ids`.
    pub fn new(options: SelectionOptions, initially_selected: Option<Vec<Id>>) -> Self {
        let state = SelectionState::Explicit(initially_selected.unwrap_or_default());
        let summary = Summary::compute(&state, &options);
        Self {
            state: Rc::new(state),
            options,
            summary,
            listener: None,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Builder-style variant of [`SelectionManager::set_listener`].
    pub fn with_listener(
        mut self,
        listener: impl FnMut(Option<Vec<Id>>, Option<&Change>) + 'static,
    ) -> Self {
        self.set_listener(listener);
        self
    }

    /// Replaces the selection listener.
    pub fn set_listener(
        &mut self,
        listener: impl FnMut(Option<Vec<Id>>, Option<&Change>) + 'static,
    ) {
        self.listener = Some(Box::new(listener));
    }

    /// Registers a callback that receives a snapshot after every state change,
    /// reconciliation included.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&Snapshot) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Removes a subscriber. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn is_selected(&self, id: &Id) -> bool {
        self.state.is_selected(id)
    }

    /// Copy of the selected ids, `None` while infinite selection is active.
    pub fn selected_ids(&self) -> Option<Vec<Id>> {
        self.state.selected_ids().map(<[Id]>::to_vec)
    }

    /// Copy of the ids deselected after an infinite "select all".
    pub fn excluded_ids(&self) -> Option<Vec<Id>> {
        self.state.excluded_ids().map(<[Id]>::to_vec)
    }

    pub fn summary(&self) -> Summary {
        self.summary
    }

    pub fn options(&self) -> &SelectionOptions {
        &self.options
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(Rc::clone(&self.state), self.summary)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Selects every item.
    ///
    /// When more items may exist this enters infinite mode with no exclusions,
    /// otherwise it selects a copy of the current universe.
    pub fn select_all(&mut self, origin: Option<String>) -> Summary {
        let state = if self.options.has_more_in_bulk_selection {
            SelectionState::Complement(Vec::new())
        } else {
            SelectionState::Explicit(self.options.all_ids.clone())
        };
        self.commit(state, Delivery::Notify(Some(Change::select_all(origin))))
    }

    pub fn deselect_all(&mut self, origin: Option<String>) -> Summary {
        self.commit(
            SelectionState::Explicit(Vec::new()),
            Delivery::Notify(Some(Change::deselect_all(origin))),
        )
    }

    pub fn toggle_all(&mut self, enable: bool, origin: Option<String>) -> Summary {
        if enable {
            self.select_all(origin)
        } else {
            self.deselect_all(origin)
        }
    }

    /// Bulk checkbox action: NONE -> ALL, ALL -> NONE, and SOME -> NONE or ALL
    /// depending on `deselect_rows_by_default`.
    pub fn toggle_bulk(&mut self, origin: Option<String>) -> Summary {
        match self.summary.bulk_state {
            BulkState::Some => self.toggle_all(!self.options.deselect_rows_by_default, origin),
            BulkState::All => self.toggle_all(false, origin),
            BulkState::None => self.toggle_all(true, origin),
        }
    }

    pub fn toggle_by_id(&mut self, id: impl Into<Id>, origin: Option<String>) -> Summary {
        let id = id.into();
        let (state, value) = self.state.toggled(&id);
        #[cfg(debug_assertions)]
        log::debug!("toggle {} -> {}", id, value);
        self.commit(
            state,
            Delivery::Notify(Some(Change::single_toggle(id, value, origin))),
        )
    }

    /// Forces explicit mode with exactly `ids`.
    pub fn set_selected_ids(&mut self, ids: Vec<Id>, change: Option<Change>) -> Summary {
        self.commit(SelectionState::Explicit(ids), Delivery::Notify(change))
    }

    /// Forces infinite mode with exactly `ids` excluded.
    pub fn set_excluded_ids(&mut self, ids: Vec<Id>, change: Option<Change>) -> Summary {
        self.commit(SelectionState::Complement(ids), Delivery::Notify(change))
    }

    /// Untyped [`SelectionManager::set_selected_ids`].
    ///
    /// Fails with [`SelectionError::InvalidArgument`] unless `ids` is an array
    /// of ids, in which case nothing changes and nobody is notified.
    pub fn set_selected_ids_value(
        &mut self,
        ids: &Value,
        change: Option<Change>,
    ) -> Result<Summary, SelectionError> {
        let ids = ids_from_value(ids, "selectedIds")?;
        Ok(self.set_selected_ids(ids, change))
    }

    /// Untyped [`SelectionManager::set_excluded_ids`].
    pub fn set_excluded_ids_value(
        &mut self,
        ids: &Value,
        change: Option<Change>,
    ) -> Result<Summary, SelectionError> {
        let ids = ids_from_value(ids, "excludedIds")?;
        Ok(self.set_excluded_ids(ids, change))
    }

    /// Replaces the state, recomputes the summary and reports the change.
    fn commit(&mut self, state: SelectionState, delivery: Delivery) -> Summary {
        self.state = Rc::new(state);
        self.publish();

        #[cfg(debug_assertions)]
        log::debug!(
            "commit: {} {} ids, {} selected ({}), {}",
            if self.state.is_complement() { "excluded" } else { "selected" },
            self.state
                .selected_ids()
                .or(self.state.excluded_ids())
                .map_or(0, <[Id]>::len),
            self.summary.selected_count,
            self.summary.bulk_state.as_str(),
            match &delivery {
                Delivery::Silent => "silent".to_string(),
                Delivery::Notify(Some(change)) => format!("{:?}", change.kind),
                Delivery::Notify(None) => "no change descriptor".to_string(),
            }
        );

        if let Delivery::Notify(change) = delivery
            && let Some(listener) = self.listener.as_mut()
        {
            listener(self.state.selected_ids().map(<[Id]>::to_vec), change.as_ref());
        }

        self.summary
    }

    /// Recomputes the summary from the current state and options and hands
    /// the resulting snapshot to every subscriber.
    fn publish(&mut self) {
        self.summary = Summary::compute(&self.state, &self.options);
        let snapshot = self.snapshot();
        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber(&snapshot);
        }
    }
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod manager_tests;
