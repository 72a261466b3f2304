//! Script command parsing
//!
//! One JSON object per line, tagged by `"op"`. Blank lines and lines starting
//! with `#` are skipped.

use serde::Deserialize;
use serde_json::Value;

use crate::error::BulkSelectError;
use crate::selection::{Id, ReconcileOptions, SelectionOptions};

/// Arguments of the `create` command
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreateArgs {
    pub all_ids: Vec<Id>,
    pub selected_ids: Option<Vec<Id>>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub has_more_in_bulk_selection: bool,
    #[serde(default)]
    pub total_count: usize,
    /// Falls back to the configured default when absent
    pub deselect_rows_by_default: Option<bool>,
}

impl CreateArgs {
    pub fn options(&self, default_deselect: bool) -> SelectionOptions {
        SelectionOptions::new(self.all_ids.clone())
            .with_disabled(self.disabled)
            .with_has_more(self.has_more_in_bulk_selection)
            .with_total_count(self.total_count)
            .with_deselect_rows_by_default(
                self.deselect_rows_by_default.unwrap_or(default_deselect),
            )
    }
}

/// Partial options for the `reconcile` command.
///
/// Absent fields keep their current value, except `selected_ids` which is
/// only supplied when the host wants to override the selection.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ReconcilePatch {
    pub all_ids: Option<Vec<Id>>,
    pub selected_ids: Option<Vec<Id>>,
    pub disabled: Option<bool>,
    pub has_more_in_bulk_selection: Option<bool>,
    pub total_count: Option<usize>,
    pub deselect_rows_by_default: Option<bool>,
}

impl ReconcilePatch {
    pub fn apply(&self, current: &SelectionOptions) -> ReconcileOptions {
        let options = SelectionOptions {
            all_ids: self
                .all_ids
                .clone()
                .unwrap_or_else(|| current.all_ids.clone()),
            disabled: self.disabled.unwrap_or(current.disabled),
            has_more_in_bulk_selection: self
                .has_more_in_bulk_selection
                .unwrap_or(current.has_more_in_bulk_selection),
            total_count: self.total_count.unwrap_or(current.total_count),
            deselect_rows_by_default: self
                .deselect_rows_by_default
                .unwrap_or(current.deselect_rows_by_default),
        };
        ReconcileOptions {
            options,
            selected_ids: self.selected_ids.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    Create(CreateArgs),
    SelectAll {
        origin: Option<String>,
    },
    DeselectAll {
        origin: Option<String>,
    },
    ToggleAll {
        enable: bool,
        origin: Option<String>,
    },
    ToggleBulk {
        origin: Option<String>,
    },
    Toggle {
        id: Id,
        origin: Option<String>,
    },
    /// `ids` stays untyped so that non-array values reach the manager
    SetSelected {
        ids: Value,
        origin: Option<String>,
    },
    SetExcluded {
        ids: Value,
        origin: Option<String>,
    },
    Reconcile(ReconcilePatch),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Create(_) => "create",
            Command::SelectAll { .. } => "select_all",
            Command::DeselectAll { .. } => "deselect_all",
            Command::ToggleAll { .. } => "toggle_all",
            Command::ToggleBulk { .. } => "toggle_bulk",
            Command::Toggle { .. } => "toggle",
            Command::SetSelected { .. } => "set_selected",
            Command::SetExcluded { .. } => "set_excluded",
            Command::Reconcile(_) => "reconcile",
        }
    }
}

/// A parsed command with its 1-based source line
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptLine {
    pub line: usize,
    pub command: Command,
}

pub fn parse_script(input: &str) -> Result<Vec<ScriptLine>, BulkSelectError> {
    let mut lines = Vec::new();
    for (index, raw) in input.lines().enumerate() {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let line = index + 1;
        let command = serde_json::from_str(trimmed)
            .map_err(|source| BulkSelectError::Script { line, source })?;
        lines.push(ScriptLine { line, command });
    }

    if lines.is_empty() {
        return Err(BulkSelectError::EmptyScript);
    }
    Ok(lines)
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod command_tests;
