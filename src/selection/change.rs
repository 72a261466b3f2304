use serde::Serialize;

use super::id::Id;

/// What kind of mutation produced a selection change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum ChangeKind {
    #[serde(rename = "ALL")]
    SelectAll,
    #[serde(rename = "NONE")]
    DeselectAll,
    /// A single item flipped to `value`
    #[serde(rename = "SINGLE_TOGGLE")]
    SingleToggle { id: Id, value: bool },
    /// The whole selection was replaced by the caller
    #[serde(rename = "SET")]
    Set,
}

/// Change descriptor handed to the selection listener.
///
/// `origin` is an opaque caller token passed through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Change {
    #[serde(flatten)]
    pub kind: ChangeKind,
    pub origin: Option<String>,
}

impl Change {
    pub fn select_all(origin: Option<String>) -> Self {
        Self {
            kind: ChangeKind::SelectAll,
            origin,
        }
    }

    pub fn deselect_all(origin: Option<String>) -> Self {
        Self {
            kind: ChangeKind::DeselectAll,
            origin,
        }
    }

    pub fn set(origin: Option<String>) -> Self {
        Self {
            kind: ChangeKind::Set,
            origin,
        }
    }

    pub fn single_toggle(id: Id, value: bool, origin: Option<String>) -> Self {
        Self {
            kind: ChangeKind::SingleToggle { id, value },
            origin,
        }
    }
}
