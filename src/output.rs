//! Rendering of script steps as text or JSON

use serde::Serialize;

use crate::script::{Notification, StepReport};
use crate::selection::{ChangeKind, Id, ReconcileStep, Summary};

/// Formats ids as `[a, b, 3]`
pub fn format_ids(ids: &[Id]) -> String {
    let parts: Vec<String> = ids.iter().map(Id::to_string).collect();
    format!("[{}]", parts.join(", "))
}

fn reconcile_step_name(step: ReconcileStep) -> &'static str {
    match step {
        ReconcileStep::AdoptExternal => "adopt_external",
        ReconcileStep::ReapplyAll => "reapply_all",
        ReconcileStep::Materialize => "materialize",
        ReconcileStep::Retain => "retain",
        ReconcileStep::Unchanged => "unchanged",
    }
}

/// One line for the step, followed by one indented line per notification
/// unless `quiet` is set.
pub fn render_text(report: &StepReport, quiet: bool) -> String {
    let snapshot = &report.snapshot;
    let mut out = format!(
        "#{} {}: {} count={}",
        report.line,
        report.op,
        snapshot.bulk_state().as_str(),
        snapshot.selected_count()
    );

    if snapshot.infinite_selected() {
        out.push_str(" infinite");
    }
    if snapshot.disabled() {
        out.push_str(" disabled");
    }
    match (snapshot.selected_ids(), snapshot.excluded_ids()) {
        (Some(selected), _) => out.push_str(&format!(" selected={}", format_ids(&selected))),
        (None, Some(excluded)) => out.push_str(&format!(" excluded={}", format_ids(&excluded))),
        (None, None) => {}
    }
    if let Some(step) = report.reconcile_step {
        out.push_str(&format!(" via {}", reconcile_step_name(step)));
    }

    if !quiet {
        for notification in &report.notifications {
            out.push('\n');
            out.push_str(&render_notification(notification));
        }
    }
    out
}

fn render_notification(notification: &Notification) -> String {
    let mut out = String::from("  changed:");
    match &notification.change {
        Some(change) => {
            match &change.kind {
                ChangeKind::SelectAll => out.push_str(" ALL"),
                ChangeKind::DeselectAll => out.push_str(" NONE"),
                ChangeKind::SingleToggle { id, value } => {
                    out.push_str(&format!(" SINGLE_TOGGLE id={} value={}", id, value))
                }
                ChangeKind::Set => out.push_str(" SET"),
            }
            if let Some(origin) = &change.origin {
                out.push_str(&format!(" origin={}", origin));
            }
        }
        None => out.push_str(" -"),
    }
    match &notification.selected_ids {
        Some(ids) => out.push_str(&format!(" selected={}", format_ids(ids))),
        None => out.push_str(" selected=null"),
    }
    out
}

#[derive(Serialize)]
struct StepJson<'a> {
    line: usize,
    op: &'a str,
    #[serde(flatten)]
    summary: Summary,
    selected_ids: Option<Vec<Id>>,
    excluded_ids: Option<Vec<Id>>,
    reconcile: Option<&'static str>,
    notifications: &'a [Notification],
}

pub fn render_json(report: &StepReport) -> serde_json::Result<serde_json::Value> {
    let step = StepJson {
        line: report.line,
        op: report.op,
        summary: report.snapshot.summary(),
        selected_ids: report.snapshot.selected_ids(),
        excluded_ids: report.snapshot.excluded_ids(),
        reconcile: report.reconcile_step.map(reconcile_step_name),
        notifications: &report.notifications,
    };
    serde_json::to_value(step)
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod output_tests;
