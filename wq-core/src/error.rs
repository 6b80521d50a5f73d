/// Error types for the water-quality pipeline
use std::path::PathBuf;
use thiserror::Error;

use crate::variable::Variable;

/// Main error type for loading and analysing sensor data
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Reading a file or directory failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a well-formed delimited table
    #[error("Failed to parse CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A required column is not present in the header row
    #[error("{path}: missing required column {column:?}")]
    MissingColumn { path: PathBuf, column: String },

    /// The header row names both variables, or neither
    #[error("{path}: expected exactly one of the chlorophyll or oxygen columns, found {found}")]
    AmbiguousSchema { path: PathBuf, found: usize },

    /// A measurement cell is neither numeric nor a missing marker
    #[error("{path}:{line}: invalid value {value:?}")]
    InvalidValue {
        path: PathBuf,
        line: u64,
        value: String,
    },

    /// A date-time cell matched none of the accepted layouts
    #[error("{path}:{line}: {source}")]
    DateTimeParse {
        path: PathBuf,
        line: u64,
        #[source]
        source: wq_utils::error::DateError,
    },

    /// Two files carry the same variable for the same site
    #[error("Site {site:?} has more than one {variable} dataset ({first} and {second})")]
    DuplicateDataset {
        site: String,
        variable: Variable,
        first: PathBuf,
        second: PathBuf,
    },

    /// Fewer than two paired, non-missing points were available
    #[error("Regression needs at least 2 paired points, found {found}")]
    InsufficientPoints { found: usize },

    /// Every predictor value is identical so the slope is undefined
    #[error("Regression is undefined when all predictor values are identical")]
    ConstantPredictor,

    /// The site locations table could not be read
    #[error("Invalid site locations table: {0}")]
    SiteTable(String),
}

/// A measurement cell that is neither a number nor a missing-value spelling
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("not a number or missing-value marker: {0:?}")]
pub struct ValueError(pub String);

/// Type alias for Results using PipelineError
pub type Result<T> = std::result::Result<T, PipelineError>;
