//! Script execution

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;

use super::command::{Command, ScriptLine};
use crate::config::SelectionConfig;
use crate::error::BulkSelectError;
use crate::selection::{Change, Id, ReconcileStep, SelectionManager, Snapshot};

/// A listener call observed while running a step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub selected_ids: Option<Vec<Id>>,
    pub change: Option<Change>,
}

/// Outcome of one script command
#[derive(Debug, Clone)]
pub struct StepReport {
    pub line: usize,
    pub op: &'static str,
    pub snapshot: Snapshot,
    pub notifications: Vec<Notification>,
    /// Rule applied, for `reconcile` commands only
    pub reconcile_step: Option<ReconcileStep>,
}

/// Replays commands against a single [`SelectionManager`].
///
/// The first command must be `create`. Snapshots are taken from the manager's
/// subscription rather than queried, so a step reports exactly what a
/// subscribed renderer would have received.
pub struct ScriptRunner {
    manager: Option<SelectionManager>,
    default_deselect: bool,
    notifications: Rc<RefCell<Vec<Notification>>>,
    published: Rc<RefCell<Vec<Snapshot>>>,
}

impl ScriptRunner {
    pub fn new(defaults: &SelectionConfig) -> Self {
        Self {
            manager: None,
            default_deselect: defaults.deselect_rows_by_default,
            notifications: Rc::new(RefCell::new(Vec::new())),
            published: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn manager(&self) -> Option<&SelectionManager> {
        self.manager.as_ref()
    }

    pub fn step(&mut self, script_line: &ScriptLine) -> Result<StepReport, BulkSelectError> {
        let line = script_line.line;
        let command = &script_line.command;

        if let Command::Create(args) = command
            && self.manager.is_none()
        {
            let manager = self.create_manager(SelectionManager::new(
                args.options(self.default_deselect),
                args.selected_ids.clone(),
            ));
            let snapshot = manager.snapshot();
            self.manager = Some(manager);
            return Ok(StepReport {
                line,
                op: command.name(),
                snapshot,
                notifications: Vec::new(),
                reconcile_step: None,
            });
        }

        let Some(manager) = self.manager.as_mut() else {
            return Err(BulkSelectError::MissingCreate { line });
        };

        let mut reconcile_step = None;
        let selection_error = |source| BulkSelectError::Selection { line, source };
        match command {
            Command::Create(_) => return Err(BulkSelectError::DuplicateCreate { line }),
            Command::SelectAll { origin } => {
                manager.select_all(origin.clone());
            }
            Command::DeselectAll { origin } => {
                manager.deselect_all(origin.clone());
            }
            Command::ToggleAll { enable, origin } => {
                manager.toggle_all(*enable, origin.clone());
            }
            Command::ToggleBulk { origin } => {
                manager.toggle_bulk(origin.clone());
            }
            Command::Toggle { id, origin } => {
                manager.toggle_by_id(id.clone(), origin.clone());
            }
            Command::SetSelected { ids, origin } => {
                manager
                    .set_selected_ids_value(ids, set_change(origin.as_deref()))
                    .map_err(selection_error)?;
            }
            Command::SetExcluded { ids, origin } => {
                manager
                    .set_excluded_ids_value(ids, set_change(origin.as_deref()))
                    .map_err(selection_error)?;
            }
            Command::Reconcile(patch) => {
                let next = patch.apply(manager.options());
                let (step, _) = manager.reconcile_step(next);
                reconcile_step = Some(step);
            }
        }

        let published = std::mem::take(&mut *self.published.borrow_mut());
        let snapshot = match published.last() {
            Some(snapshot) => snapshot.clone(),
            None => manager.snapshot(),
        };
        let notifications = std::mem::take(&mut *self.notifications.borrow_mut());

        Ok(StepReport {
            line,
            op: command.name(),
            snapshot,
            notifications,
            reconcile_step,
        })
    }

    /// Wires the manager's listener and snapshot subscription into the runner's buffers.
    fn create_manager(&self, manager: SelectionManager) -> SelectionManager {
        let notifications = Rc::clone(&self.notifications);
        let published = Rc::clone(&self.published);
        let mut manager = manager.with_listener(move |selected_ids, change| {
            notifications.borrow_mut().push(Notification {
                selected_ids,
                change: change.cloned(),
            });
        });
        manager.subscribe(move |snapshot: &Snapshot| {
            published.borrow_mut().push(snapshot.clone());
        });
        manager
    }
}

/// Forced sets only carry a change descriptor when the script names an origin.
fn set_change(origin: Option<&str>) -> Option<Change> {
    origin.map(|origin| Change::set(Some(origin.to_string())))
}

/// Runs a whole script, stopping at the first error.
pub fn run_script(
    lines: &[ScriptLine],
    defaults: &SelectionConfig,
) -> Result<Vec<StepReport>, BulkSelectError> {
    let mut runner = ScriptRunner::new(defaults);
    lines.iter().map(|line| runner.step(line)).collect()
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod runner_tests;
