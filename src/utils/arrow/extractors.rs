//! Column extraction utilities for Arrow record batches
//!
//! Each extractor returns one `Option` per row, with Arrow nulls mapped to
//! `None`. Optional columns that are absent yield all-`None` vectors.

use arrow::array::{Array, Float64Array, StringArray};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;

use crate::error::{Error, Result};
use crate::models::serde_fields::{indicator_from_f64, is_null_token};
use crate::utils::arrow::array_utils::{downcast_array, find_column, get_column};

/// Extract a string column
///
/// Null-like tokens (`NA`, empty, ...) are treated as null, matching the
/// delimited readers.
pub fn extract_strings(
    batch: &RecordBatch,
    candidates: &[&str],
    required: bool,
) -> Result<Vec<Option<String>>> {
    let Some(array) = get_column(batch, candidates, &DataType::Utf8, required)? else {
        return Ok(vec![None; batch.num_rows()]);
    };
    let strings = downcast_array::<StringArray>(&array, candidates[0], "String")?;

    Ok(strings
        .iter()
        .map(|value| {
            value
                .filter(|v| !is_null_token(v))
                .map(|v| v.trim().to_string())
        })
        .collect())
}

/// Extract a string column that must not contain nulls
pub fn extract_required_strings(batch: &RecordBatch, candidates: &[&str]) -> Result<Vec<String>> {
    let column = column_label(batch, candidates);
    extract_strings(batch, candidates, true)?
        .into_iter()
        .enumerate()
        .map(|(row, value)| {
            value.ok_or_else(|| Error::InvalidValue {
                column: column.clone(),
                value: String::new(),
                reason: format!("null key in row {row}"),
            })
        })
        .collect()
}

/// Extract a floating point column; integer and decimal columns are cast
pub fn extract_f64(
    batch: &RecordBatch,
    candidates: &[&str],
    required: bool,
) -> Result<Vec<Option<f64>>> {
    let Some(array) = get_column(batch, candidates, &DataType::Float64, required)? else {
        return Ok(vec![None; batch.num_rows()]);
    };
    let floats = downcast_array::<Float64Array>(&array, candidates[0], "Float64")?;

    // NaN is how pandas-written files spell a missing float
    Ok(floats.iter().map(|v| v.filter(|x| !x.is_nan())).collect())
}

/// Extract a 0/1 indicator column
pub fn extract_indicator(
    batch: &RecordBatch,
    candidates: &[&str],
    required: bool,
) -> Result<Vec<Option<u8>>> {
    let column = column_label(batch, candidates);
    extract_f64(batch, candidates, required)?
        .into_iter()
        .map(|value| match value {
            None => Ok(None),
            Some(v) => indicator_from_f64(v).map(Some).ok_or_else(|| Error::InvalidValue {
                column: column.clone(),
                value: v.to_string(),
                reason: "expected a 0/1 indicator".to_string(),
            }),
        })
        .collect()
}

fn column_label(batch: &RecordBatch, candidates: &[&str]) -> String {
    find_column(batch, candidates)
        .map_or(candidates[0], |(_, name)| name)
        .to_string()
}
