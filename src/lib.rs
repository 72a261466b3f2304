//! bulk-select library - Bulk selection state for paginated collections
//!
//! The [`selection`] module is the core: a manager that tracks selected items,
//! including "select all" over collections that are still loading. The other
//! modules make up the `bulk-select` script replay tool.

pub mod config;
pub mod error;
pub mod output;
pub mod script;
pub mod selection;

// Re-export commonly used types for convenience
pub use config::Config;
pub use error::BulkSelectError;
pub use selection::{BulkState, Id, SelectionManager, SelectionOptions};
