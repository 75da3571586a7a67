//! Error types for the grouped-sort pipeline.
//!
//! Two layers, following the split between caller-side validation and the
//! core transform:
//!
//! - [`ConfigError`] - configuration problems caught before the sort runs
//! - [`PipelineError`] - top-level errors returned by the pipeline entry points
//!
//! The sort engine itself raises nothing: data irregularities (short rows,
//! unparseable sort values) are absorbed as missing values, not errors.
//! Error conversion is automatic via `From` implementations, allowing `?` to
//! work across boundaries.

use thiserror::Error;

/// Configuration errors, reported before the core transform is invoked.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Aggregate name did not resolve to a known function.
    #[error("unknown aggregate '{0}' (expected min, minimum, max, maximum, avg or average)")]
    UnknownAggregate(String),

    /// No columns configured to build the group key from.
    #[error("no group-by columns configured")]
    NoGroupColumns,

    /// No columns configured to read the sort field from.
    #[error("no sort-field columns configured")]
    NoSortFieldColumns,

    /// Failed to read an options file.
    #[error("failed to read options file: {0}")]
    Io(#[from] std::io::Error),

    /// Options file did not parse.
    #[error("invalid options file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Top-level pipeline errors.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Input unreadable or output unwritable.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
