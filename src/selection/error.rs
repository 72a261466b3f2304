use thiserror::Error;

/// Errors raised by selection operations.
///
/// Every failure leaves the manager's state exactly as it was before the call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("{what} must be an array of ids, found {found}")]
    InvalidArgument { what: &'static str, found: String },
}
