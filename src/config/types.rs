// Configuration type definitions

use serde::Deserialize;

/// Output format for replayed scripts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Selection defaults section
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SelectionConfig {
    /// Default for scripts that do not set `deselect_rows_by_default` themselves
    #[serde(default)]
    pub deselect_rows_by_default: bool,
}

/// Output configuration section
#[derive(Debug, Clone, Deserialize, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub selection: SelectionConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
