//! Script replay host
//!
//! Drives a [`SelectionManager`](crate::selection::SelectionManager) from a
//! JSON-lines script, the way a UI would drive it from user input and from
//! pagination updates.

mod command;
mod runner;

pub use command::{Command, CreateArgs, ReconcilePatch, ScriptLine, parse_script};
pub use runner::{Notification, ScriptRunner, StepReport, run_script};
