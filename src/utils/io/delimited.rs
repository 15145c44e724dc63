//! Delimited (TSV/CSV) table reading

use std::path::Path;
use std::time::Instant;

use csv::ReaderBuilder;
use serde::de::DeserializeOwned;

use crate::error::util::safe_open_file;
use crate::error::{Error, Result};
use crate::utils::logging::{log_table_load, log_table_loaded};

/// Read a delimited file with a header row into records
///
/// Columns are matched to fields by header name; extra columns are ignored.
/// Headers and cells are trimmed, matching how Parquet key strings are read.
///
/// # Errors
/// Returns an error if the file cannot be opened, has no header row, or a
/// row cannot be deserialized
pub fn read_delimited<T: DeserializeOwned>(
    path: &Path,
    purpose: &str,
    delimiter: u8,
) -> Result<Vec<T>> {
    let start = Instant::now();
    log_table_load(purpose, path);

    let file = safe_open_file(path, purpose)?;
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(file);

    if reader.headers()?.is_empty() {
        return Err(Error::EmptyInput(format!(
            "{purpose} file has no header row: {}",
            path.display()
        )));
    }

    let records = reader
        .deserialize()
        .collect::<std::result::Result<Vec<T>, csv::Error>>()?;

    log_table_loaded(purpose, path, records.len(), start.elapsed());
    Ok(records)
}
