//! Bulk selection state for paginated and partially loaded collections
//!
//! Tracks which items of a universe of identifiers are selected, derives the
//! ALL / SOME / NONE summary, and supports infinite selection where a bulk
//! "select all" over a collection that is still loading is recorded as the
//! set of items the user deselected afterwards.

mod change;
mod error;
mod id;
pub mod manager;
mod options;
mod snapshot;
mod state;
mod summary;

// Re-export main types
pub use change::{Change, ChangeKind};
pub use error::SelectionError;
pub use id::{Id, ids_from_value};
pub use manager::{ReconcileStep, SelectionListener, SelectionManager, SubscriptionId};
pub use options::{ReconcileOptions, SelectionOptions};
pub use snapshot::Snapshot;
pub use state::SelectionState;
pub use summary::{BulkState, Summary};
