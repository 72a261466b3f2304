//! Tests for the selection manager

use super::*;
use crate::selection::ChangeKind;
use proptest::prelude::*;
use serde_json::json;
use std::cell::RefCell;

type Notifications = Rc<RefCell<Vec<(Option<Vec<Id>>, Option<Change>)>>>;

fn ids(values: &[&str]) -> Vec<Id> {
    values.iter().map(|v| Id::from(*v)).collect()
}

fn abcd() -> SelectionOptions {
    SelectionOptions::new(ids(&["a", "b", "c", "d"]))
}

/// Manager with a listener that records every notification
fn recording_manager(
    options: SelectionOptions,
    selected: Option<Vec<Id>>,
) -> (SelectionManager, Notifications) {
    let notifications: Notifications = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&notifications);
    let manager = SelectionManager::new(options, selected)
        .with_listener(move |ids, change| sink.borrow_mut().push((ids, change.cloned())));
    (manager, notifications)
}

// =========================================================================
// Construction and queries
// =========================================================================

#[test]
fn test_new_defaults_to_empty_selection() {
    let manager = SelectionManager::new(abcd(), None);
    assert_eq!(manager.selected_ids(), Some(vec![]));
    assert!(manager.excluded_ids().is_none());
    assert_eq!(manager.summary().bulk_state, BulkState::None);
    assert!(!manager.summary().disabled);
}

#[test]
fn test_new_trusts_initial_selection() {
    // Ids outside the universe are kept as given
    let manager = SelectionManager::new(abcd(), Some(ids(&["a", "zzz"])));
    assert_eq!(manager.selected_ids(), Some(ids(&["a", "zzz"])));
    assert_eq!(manager.summary().selected_count, 2);
}

#[test]
fn test_selected_ids_is_a_copy() {
    let manager = SelectionManager::new(abcd(), Some(ids(&["a"])));
    let mut copy = manager.selected_ids().unwrap();
    copy.push(Id::from("b"));
    assert_eq!(manager.selected_ids(), Some(ids(&["a"])));
}

// =========================================================================
// Bulk operations
// =========================================================================

#[test]
fn test_select_all_finite_selects_universe() {
    let (mut manager, notifications) = recording_manager(abcd(), None);
    let summary = manager.select_all(Some("header".to_string()));

    assert_eq!(summary.bulk_state, BulkState::All);
    assert_eq!(manager.selected_ids(), Some(ids(&["a", "b", "c", "d"])));

    let notifications = notifications.borrow();
    assert_eq!(notifications.len(), 1);
    let (selected, change) = &notifications[0];
    assert_eq!(selected.as_deref(), Some(&ids(&["a", "b", "c", "d"])[..]));
    assert_eq!(
        change.as_ref(),
        Some(&Change::select_all(Some("header".to_string())))
    );
}

#[test]
fn test_select_all_with_more_enters_infinite_mode() {
    let options = abcd().with_has_more(true).with_total_count(50);
    let (mut manager, notifications) = recording_manager(options, None);
    let summary = manager.select_all(None);

    assert!(summary.infinite_selected);
    assert_eq!(summary.bulk_state, BulkState::All);
    assert_eq!(summary.selected_count, 50);
    assert!(manager.selected_ids().is_none());
    assert_eq!(manager.excluded_ids(), Some(vec![]));
    assert!(manager.is_selected(&Id::from("not-loaded-yet")));

    let notifications = notifications.borrow();
    assert_eq!(notifications[0].0, None);
    assert_eq!(notifications[0].1.as_ref().unwrap().kind, ChangeKind::SelectAll);
}

#[test]
fn test_select_all_is_idempotent() {
    let mut once = SelectionManager::new(abcd(), Some(ids(&["b"])));
    once.select_all(None);

    let mut twice = SelectionManager::new(abcd(), Some(ids(&["b"])));
    twice.select_all(None);
    twice.select_all(None);

    assert_eq!(once.selected_ids(), twice.selected_ids());
    assert_eq!(once.summary(), twice.summary());
}

#[test]
fn test_deselect_all_leaves_infinite_mode() {
    let mut manager = SelectionManager::new(abcd().with_has_more(true), None);
    manager.select_all(None);
    let summary = manager.deselect_all(None);

    assert!(!summary.infinite_selected);
    assert_eq!(summary.bulk_state, BulkState::None);
    assert_eq!(manager.selected_ids(), Some(vec![]));
}

#[test]
fn test_toggle_bulk_transitions() {
    let mut manager = SelectionManager::new(abcd(), None);
    assert_eq!(manager.toggle_bulk(None).bulk_state, BulkState::All);
    assert_eq!(manager.toggle_bulk(None).bulk_state, BulkState::None);
}

#[test]
fn test_toggle_bulk_from_some_deselects_by_default() {
    let options = abcd().with_deselect_rows_by_default(true);
    let mut manager = SelectionManager::new(options, Some(ids(&["a"])));
    assert_eq!(manager.summary().bulk_state, BulkState::Some);
    assert_eq!(manager.toggle_bulk(None).bulk_state, BulkState::None);
}

#[test]
fn test_toggle_bulk_from_some_selects_all() {
    let mut manager = SelectionManager::new(abcd(), Some(ids(&["a"])));
    assert_eq!(manager.toggle_bulk(None).bulk_state, BulkState::All);
}

#[test]
fn test_toggle_bulk_passes_origin_through() {
    let (mut manager, notifications) = recording_manager(abcd(), None);
    manager.toggle_bulk(Some("checkbox".to_string()));
    let change = notifications.borrow()[0].1.clone().unwrap();
    assert_eq!(change.origin.as_deref(), Some("checkbox"));
}

// =========================================================================
// Single toggles
// =========================================================================

#[test]
fn test_toggle_by_id_reports_new_value() {
    let (mut manager, notifications) = recording_manager(abcd(), None);
    manager.toggle_by_id("c", None);
    manager.toggle_by_id("c", Some("row".to_string()));

    let notifications = notifications.borrow();
    assert_eq!(
        notifications[0].1,
        Some(Change::single_toggle(Id::from("c"), true, None))
    );
    assert_eq!(notifications[0].0, Some(ids(&["c"])));
    assert_eq!(
        notifications[1].1,
        Some(Change::single_toggle(
            Id::from("c"),
            false,
            Some("row".to_string())
        ))
    );
    assert_eq!(notifications[1].0, Some(vec![]));
}

#[test]
fn test_toggle_in_infinite_mode_excludes() {
    let options = abcd().with_has_more(true).with_total_count(10);
    let mut manager = SelectionManager::new(options, None);
    manager.select_all(None);
    let summary = manager.toggle_by_id("b", None);

    assert!(!manager.is_selected(&Id::from("b")));
    assert!(manager.is_selected(&Id::from("a")));
    assert_eq!(manager.excluded_ids(), Some(ids(&["b"])));
    assert_eq!(summary.bulk_state, BulkState::Some);
    assert_eq!(summary.selected_count, 9);
    assert!(summary.infinite_selected);
}

#[test]
fn test_toggle_every_item_reaches_all() {
    let mut manager = SelectionManager::new(abcd(), None);
    for id in ["a", "b", "c"] {
        assert_eq!(manager.toggle_by_id(id, None).bulk_state, BulkState::Some);
    }
    assert_eq!(manager.toggle_by_id("d", None).bulk_state, BulkState::All);
}

#[test]
fn test_integer_ids() {
    let options = SelectionOptions::new(vec![Id::Int(1), Id::Int(2)]);
    let mut manager = SelectionManager::new(options, None);
    manager.toggle_by_id(Id::Int(2), None);
    assert!(manager.is_selected(&Id::Int(2)));
    assert!(!manager.is_selected(&Id::from("2")));
}

// =========================================================================
// Explicit setters
// =========================================================================

#[test]
fn test_set_selected_ids_round_trip() {
    let (mut manager, notifications) = recording_manager(abcd(), None);
    manager.set_selected_ids(ids(&["d", "a"]), None);

    assert_eq!(manager.selected_ids(), Some(ids(&["d", "a"])));
    // Notified without a change descriptor
    assert_eq!(notifications.borrow()[0], (Some(ids(&["d", "a"])), None));
}

#[test]
fn test_set_ids_pass_change_through() {
    let (mut manager, notifications) = recording_manager(abcd(), None);
    manager.set_selected_ids(ids(&["b"]), Some(Change::set(Some("api".to_string()))));
    manager.set_excluded_ids(ids(&["c"]), Some(Change::set(None)));

    let notifications = notifications.borrow();
    assert_eq!(
        notifications[0],
        (Some(ids(&["b"])), Some(Change::set(Some("api".to_string()))))
    );
    assert_eq!(notifications[1], (None, Some(Change::set(None))));
}

#[test]
fn test_set_excluded_ids_enters_infinite_mode() {
    let mut manager = SelectionManager::new(abcd().with_total_count(20), Some(ids(&["a"])));
    let summary = manager.set_excluded_ids(ids(&["c"]), None);
    assert!(summary.infinite_selected);
    assert_eq!(summary.selected_count, 19);
    assert!(manager.selected_ids().is_none());
}

#[test]
fn test_set_selected_ids_value_rejects_scalar() {
    let (mut manager, notifications) = recording_manager(abcd(), Some(ids(&["a", "b"])));
    let before = manager.selected_ids();

    let err = manager.set_selected_ids_value(&json!("x"), None).unwrap_err();

    assert!(matches!(err, SelectionError::InvalidArgument { .. }));
    assert_eq!(manager.selected_ids(), before);
    assert!(notifications.borrow().is_empty());
}

#[test]
fn test_set_excluded_ids_value_rejects_object() {
    let mut manager = SelectionManager::new(abcd(), None);
    let err = manager
        .set_excluded_ids_value(&json!({"ids": ["a"]}), None)
        .unwrap_err();
    assert!(err.to_string().starts_with("excludedIds must be an array"));
    assert!(!manager.summary().infinite_selected);
}

#[test]
fn test_set_selected_ids_value_accepts_array() {
    let mut manager = SelectionManager::new(abcd(), None);
    let summary = manager
        .set_selected_ids_value(&json!(["a", "b", "c", "d"]), None)
        .unwrap();
    assert_eq!(summary.bulk_state, BulkState::All);
}

// =========================================================================
// Snapshots and subscriptions
// =========================================================================

#[test]
fn test_snapshot_is_unaffected_by_later_mutations() {
    let mut manager = SelectionManager::new(abcd(), None);
    let before = manager.snapshot();
    manager.select_all(None);

    assert_eq!(before.bulk_state(), BulkState::None);
    assert!(!before.is_selected(&Id::from("a")));
    assert_eq!(manager.snapshot().bulk_state(), BulkState::All);
}

#[test]
fn test_subscribers_receive_every_mutation() {
    let mut manager = SelectionManager::new(abcd(), None);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    manager.subscribe(move |snapshot: &Snapshot| sink.borrow_mut().push(snapshot.bulk_state()));

    manager.toggle_by_id("a", None);
    manager.select_all(None);
    manager.deselect_all(None);

    assert_eq!(
        *seen.borrow(),
        vec![BulkState::Some, BulkState::All, BulkState::None]
    );
}

#[test]
fn test_unsubscribe_stops_delivery() {
    let mut manager = SelectionManager::new(abcd(), None);
    let count = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&count);
    let id = manager.subscribe(move |_: &Snapshot| *sink.borrow_mut() += 1);

    manager.select_all(None);
    assert!(manager.unsubscribe(id));
    assert!(!manager.unsubscribe(id));
    manager.deselect_all(None);

    assert_eq!(*count.borrow(), 1);
}

#[test]
fn test_failed_set_does_not_publish() {
    let mut manager = SelectionManager::new(abcd(), None);
    let count = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&count);
    manager.subscribe(move |_: &Snapshot| *sink.borrow_mut() += 1);

    assert!(manager.set_selected_ids_value(&json!(42), None).is_err());
    assert_eq!(*count.borrow(), 0);
}

// =========================================================================
// Property Tests
// =========================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Any sequence of single toggles keeps the count equal to the number of
    // ids toggled an odd number of times, and the bulk state consistent with it.
    #[test]
    fn prop_toggle_sequence_matches_model(
        size in 1i64..12,
        toggles in prop::collection::vec(0i64..12, 0..40)
    ) {
        let universe: Vec<Id> = (0..size).map(Id::Int).collect();
        let mut manager = SelectionManager::new(SelectionOptions::new(universe.clone()), None);
        let mut model = std::collections::BTreeSet::new();

        for raw in toggles {
            let n = raw % size;
            if !model.remove(&n) {
                model.insert(n);
            }
            manager.toggle_by_id(Id::Int(n), None);
        }

        let summary = manager.summary();
        prop_assert_eq!(summary.selected_count, model.len());
        let expected = if model.is_empty() {
            BulkState::None
        } else if model.len() == universe.len() {
            BulkState::All
        } else {
            BulkState::Some
        };
        prop_assert_eq!(summary.bulk_state, expected);
        for id in &universe {
            let Id::Int(n) = id else { unreachable!() };
            prop_assert_eq!(manager.is_selected(id), model.contains(n));
        }
    }

    // set_selected_ids followed by selected_ids returns the same members.
    #[test]
    fn prop_set_selected_ids_round_trip(
        picked in prop::collection::btree_set("[a-z]{1,4}", 0..10)
    ) {
        let picked: Vec<Id> = picked.into_iter().map(Id::from).collect();
        let mut manager = SelectionManager::new(SelectionOptions::new(picked.clone()), None);
        manager.set_selected_ids(picked.clone(), None);
        prop_assert_eq!(manager.selected_ids(), Some(picked));
    }
}
