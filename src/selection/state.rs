//! Selection state representation
//!
//! A selection is either an explicit list of selected ids, or (in infinite
//! selection mode) the complement of a list of excluded ids over a universe
//! that may not be fully loaded yet.

use std::collections::HashSet;

use super::id::Id;

/// The two mutually exclusive shapes a selection can take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionState {
    /// The listed ids are exactly the selected items.
    Explicit(Vec<Id>),
    /// Everything is selected except the listed ids, including items not loaded yet.
    Complement(Vec<Id>),
}

impl Default for SelectionState {
    fn default() -> Self {
        SelectionState::Explicit(Vec::new())
    }
}

impl SelectionState {
    pub fn is_selected(&self, id: &Id) -> bool {
        match self {
            SelectionState::Explicit(selected) => selected.contains(id),
            SelectionState::Complement(excluded) => !excluded.contains(id),
        }
    }

    /// Selected ids, or `None` when the selection is not materialized.
    pub fn selected_ids(&self) -> Option<&[Id]> {
        match self {
            SelectionState::Explicit(selected) => Some(selected),
            SelectionState::Complement(_) => None,
        }
    }

    /// Ids deselected after an infinite "select all", or `None` in explicit mode.
    pub fn excluded_ids(&self) -> Option<&[Id]> {
        match self {
            SelectionState::Explicit(_) => None,
            SelectionState::Complement(excluded) => Some(excluded),
        }
    }

    pub fn is_complement(&self) -> bool {
        matches!(self, SelectionState::Complement(_))
    }

    /// Returns the state with `id` flipped, and the id's new selection value.
    pub fn toggled(&self, id: &Id) -> (SelectionState, bool) {
        let value = !self.is_selected(id);
        let next = match self {
            SelectionState::Explicit(selected) => {
                SelectionState::Explicit(added_or_removed(selected, id, value))
            }
            // Deselecting in complement mode means recording an exclusion
            SelectionState::Complement(excluded) => {
                SelectionState::Complement(added_or_removed(excluded, id, !value))
            }
        };
        (next, value)
    }

    /// Drops every tracked id that is not part of `universe`, keeping the mode.
    pub fn retained_in(&self, universe: &[Id]) -> SelectionState {
        let universe: HashSet<&Id> = universe.iter().collect();
        let keep = |ids: &[Id]| -> Vec<Id> {
            ids.iter()
                .filter(|id| universe.contains(id))
                .cloned()
                .collect()
        };
        match self {
            SelectionState::Explicit(selected) => SelectionState::Explicit(keep(selected)),
            SelectionState::Complement(excluded) => SelectionState::Complement(keep(excluded)),
        }
    }

    /// Converts to an explicit selection of `universe` minus the excluded ids.
    ///
    /// Explicit states are returned unchanged. The result follows the order of `universe`.
    pub fn materialized(&self, universe: &[Id]) -> SelectionState {
        match self {
            SelectionState::Explicit(_) => self.clone(),
            SelectionState::Complement(excluded) => {
                let excluded: HashSet<&Id> = excluded.iter().collect();
                SelectionState::Explicit(
                    universe
                        .iter()
                        .filter(|id| !excluded.contains(id))
                        .cloned()
                        .collect(),
                )
            }
        }
    }
}

fn added_or_removed(ids: &[Id], id: &Id, add: bool) -> Vec<Id> {
    if add {
        let mut next = ids.to_vec();
        if !next.contains(id) {
            next.push(id.clone());
        }
        next
    } else {
        ids.iter().filter(|other| *other != id).cloned().collect()
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod state_tests;
