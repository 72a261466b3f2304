use thiserror::Error;

use crate::selection::SelectionError;

#[derive(Debug, Error)]
pub enum BulkSelectError {
    #[error("line {line}: invalid command: {source}")]
    Script {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("line {line}: the script must start with a \"create\" command")]
    MissingCreate { line: usize },

    #[error("line {line}: \"create\" may only appear once")]
    DuplicateCreate { line: usize },

    #[error("line {line}: {source}")]
    Selection {
        line: usize,
        #[source]
        source: SelectionError,
    },

    #[error("Script is empty")]
    EmptyScript,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
