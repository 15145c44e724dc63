//! Error handling for the phenotype/PRS pipeline.

use std::io;

use arrow::error::ArrowError;
use parquet::errors::ParquetError;

pub mod util;

/// Errors raised while loading, modelling or publishing cohort tables
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error opening, reading or writing a file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error processing Parquet data
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    /// Error processing Arrow arrays
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Error reading a delimited (TSV/CSV) table
    #[error("Delimited file error: {0}")]
    Delimited(#[from] csv::Error),

    /// Error converting records to or from Arrow batches
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_arrow::Error),

    /// A required column is absent from an input table
    #[error("Column '{column}' not found (tried: {})", .candidates.join(", "))]
    ColumnNotFound {
        /// Canonical column name
        column: String,
        /// Every name that was looked up
        candidates: Vec<String>,
    },

    /// A cell could not be interpreted as the declared field type
    #[error("Invalid value '{value}' in column '{column}': {reason}")]
    InvalidValue {
        /// Column holding the value
        column: String,
        /// Raw value
        value: String,
        /// Why it was rejected
        reason: String,
    },

    /// A smoking status outside the fixed category vocabulary
    #[error("Unknown smoking status '{value}' for patient '{patient_id}'")]
    Encoding {
        /// The offending label
        value: String,
        /// Patient the label belongs to
        patient_id: String,
    },

    /// A regression could not be fitted for a phenotype group
    #[error("Regression fit failed for phenotype '{phenotype_id}': {reason}")]
    Fit {
        /// Phenotype group that failed
        phenotype_id: String,
        /// Description of the degeneracy
        reason: String,
    },

    /// Chart rendering failed
    #[error("Chart error: {0}")]
    Chart(String),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Nothing to work with
    #[error("Empty input: {0}")]
    EmptyInput(String),
}

impl Error {
    /// Whether this error aborts the association stage as a whole
    #[must_use]
    pub const fn is_modelling_error(&self) -> bool {
        matches!(self, Self::Encoding { .. } | Self::Fit { .. })
    }
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;
