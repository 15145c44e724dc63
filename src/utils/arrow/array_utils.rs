//! Utilities for working with Arrow arrays.
//!
//! Column lookup by any of several accepted names, with automatic casting to
//! the type the caller expects.

use arrow::array::{Array, ArrayRef};
use arrow::compute::kernels::cast::{can_cast_types, cast};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use log::{debug, warn};

use crate::error::{Error, Result};

/// Find the first of `candidates` present in the batch schema
///
/// # Returns
/// The column index and the name that matched
pub fn find_column<'a>(batch: &RecordBatch, candidates: &[&'a str]) -> Option<(usize, &'a str)> {
    let schema = batch.schema();
    candidates
        .iter()
        .find_map(|name| schema.index_of(name).ok().map(|idx| (idx, *name)))
}

/// Get a column from a record batch, cast to `expected_type` if needed
///
/// # Arguments
///
/// * `batch` - The record batch containing the column
/// * `candidates` - Accepted column names, canonical name first
/// * `expected_type` - The data type the caller will downcast to
/// * `required` - Whether a missing column is an error
///
/// # Returns
///
/// * `Ok(Some(ArrayRef))` - The column array (converted if necessary) if found
/// * `Ok(None)` - If the column is not found and `required` is false
/// * `Err(Error)` - If a required column is missing or cannot be cast
pub fn get_column(
    batch: &RecordBatch,
    candidates: &[&str],
    expected_type: &DataType,
    required: bool,
) -> Result<Option<ArrayRef>> {
    let Some((idx, name)) = find_column(batch, candidates) else {
        if required {
            return Err(Error::ColumnNotFound {
                column: candidates.first().copied().unwrap_or_default().to_string(),
                candidates: candidates.iter().map(|c| (*c).to_string()).collect(),
            });
        }
        warn!("Column '{}' not found in record batch", candidates.join("/"));
        return Ok(None);
    };

    let column = batch.column(idx);
    let actual_type = column.data_type();

    if actual_type == expected_type {
        return Ok(Some(column.clone()));
    }

    if !can_cast_types(actual_type, expected_type) {
        return Err(Error::InvalidValue {
            column: name.to_string(),
            value: format!("{actual_type:?}"),
            reason: format!("cannot be converted to {expected_type:?}"),
        });
    }

    debug!("Converting column '{name}' from {actual_type:?} to {expected_type:?}");
    Ok(Some(cast(column, expected_type)?))
}

/// Downcast an array to a concrete Arrow array type
pub fn downcast_array<'a, T: Array + 'static>(
    array: &'a ArrayRef,
    column_name: &str,
    type_name: &str,
) -> Result<&'a T> {
    array
        .as_any()
        .downcast_ref::<T>()
        .ok_or_else(|| Error::InvalidValue {
            column: column_name.to_string(),
            value: format!("{:?}", array.data_type()),
            reason: format!("expected a {type_name} array"),
        })
}
