//! Error types for linked selection.
//!
//! [`LookupFailure`] is the only error the sync bridge knows about. It is
//! always handled at the event boundary (logged and skipped), never
//! propagated out of a UI callback. [`DataError`] covers loading and
//! validating datasets.

use thiserror::Error;

/// A category, series or cell that has no counterpart on the other side.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupFailure {
    /// Category label has no table row.
    #[error("category not mapped to a table row: {0}")]
    UnknownCategory(String),

    /// Series name has no table column.
    #[error("series not mapped to a table column: {0}")]
    UnknownSeries(String),

    /// The cell is the header row or the category column, not a data cell.
    #[error("cell ({row}, {column}) is a header position, not a data cell")]
    HeaderCell { row: usize, column: usize },

    /// The cell lies outside the table.
    #[error("cell ({row}, {column}) is outside the table")]
    OutOfBounds { row: usize, column: usize },

    /// The chart has no point at this position.
    #[error("no point at series {series}, index {index}")]
    MissingPoint { series: usize, index: usize },

    /// The cached index mapping was read from a table that has since been regenerated.
    #[error("index mapping is stale (built for table generation {cached}, table is at {current})")]
    StaleMapping { cached: u64, current: u64 },
}

/// Errors raised while loading, saving or validating a dataset.
#[derive(Error, Debug)]
pub enum DataError {
    /// Reading or writing the dataset file failed
    #[error("dataset I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization failed
    #[error("invalid JSON dataset: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML (de)serialization failed
    #[error("invalid YAML dataset: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// File extension is neither JSON nor YAML
    #[error("unsupported dataset format: {0}")]
    UnsupportedFormat(String),

    /// A category label occurs more than once
    #[error("duplicate category: {0}")]
    DuplicateCategory(String),

    /// A series name occurs more than once
    #[error("duplicate series name: {0}")]
    DuplicateSeries(String),

    /// A series does not have one value per category
    #[error("series {series} has {found} points, expected {expected}")]
    RaggedSeries {
        series: String,
        expected: usize,
        found: usize,
    },

    /// No categories or no series
    #[error("dataset has no {0}")]
    Empty(&'static str),
}

/// Type alias for dataset results.
pub type Result<T> = std::result::Result<T, DataError>;
