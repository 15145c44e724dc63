//! IO utilities for the pipeline's input and output tables
//!
//! Input tables may be Parquet or delimited text; the format follows the file
//! extension. Outputs are always Parquet.

use std::path::Path;

use log::info;

use crate::error::{Error, Result};
use crate::models::{ArrowSchema, DemographicRecord, PhenotypeObservation, PrsRecord};

pub mod delimited;
pub mod parquet;

pub use self::delimited::read_delimited;
pub use self::parquet::{read_parquet, read_parquet_records, write_parquet, write_records};

/// Supported input file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Parquet,
    Tsv,
    Csv,
}

impl TableFormat {
    /// Detect the format from the file extension
    ///
    /// # Errors
    /// Returns [`Error::Config`] for an unknown or missing extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some("parquet" | "pq") => Ok(Self::Parquet),
            Some("tsv" | "txt") => Ok(Self::Tsv),
            Some("csv") => Ok(Self::Csv),
            _ => Err(Error::Config(format!(
                "cannot determine table format of {}",
                path.display()
            ))),
        }
    }

    /// Field delimiter for text formats
    #[must_use]
    pub const fn delimiter(self) -> Option<u8> {
        match self {
            Self::Parquet => None,
            Self::Tsv => Some(b'\t'),
            Self::Csv => Some(b','),
        }
    }
}

/// Load a table of records in whichever format the path names
///
/// # Errors
/// Returns an error if the format is unknown or the file cannot be read
pub fn load_table<T: ArrowSchema>(path: &Path, purpose: &str, batch_size: usize) -> Result<Vec<T>> {
    let format = TableFormat::from_path(path)?;
    let records = match format.delimiter() {
        Some(delimiter) => read_delimited(path, purpose, delimiter)?,
        None => read_parquet_records(path, purpose, batch_size)?,
    };
    info!("Loaded {} {purpose} records", records.len());
    Ok(records)
}

/// Load phenotype observations
pub fn load_phenotypes(path: &Path, batch_size: usize) -> Result<Vec<PhenotypeObservation>> {
    load_table(path, "phenotypes", batch_size)
}

/// Load demographic records
pub fn load_demographics(path: &Path, batch_size: usize) -> Result<Vec<DemographicRecord>> {
    load_table(path, "demographics", batch_size)
}

/// Load polygenic risk scores
pub fn load_prs(path: &Path, batch_size: usize) -> Result<Vec<PrsRecord>> {
    load_table(path, "PRS", batch_size)
}
