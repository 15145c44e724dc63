//! Parquet file operations
//!
//! Reading whole files into record batches or typed records, and writing a
//! single record batch with Snappy compression.

use std::fs::File;
use std::path::Path;
use std::time::Instant;

use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::error::Result;
use crate::error::util::{ensure_parent_dir, safe_open_file};
use crate::models::ArrowSchema;
use crate::utils::logging::{log_table_load, log_table_loaded, log_table_written};

/// Read a parquet file into Arrow record batches
///
/// # Arguments
/// * `path` - Path to the Parquet file
/// * `purpose` - Which table the file holds (for error context)
/// * `batch_size` - Rows per decoded batch
///
/// # Errors
/// Returns an error if the file cannot be opened or is not valid Parquet
pub fn read_parquet(path: &Path, purpose: &str, batch_size: usize) -> Result<Vec<RecordBatch>> {
    let start = Instant::now();
    log_table_load(purpose, path);

    let file = safe_open_file(path, purpose)?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?
        .with_batch_size(batch_size)
        .build()?;

    let batches = reader.collect::<std::result::Result<Vec<_>, _>>()?;

    let rows: usize = batches.iter().map(RecordBatch::num_rows).sum();
    log_table_loaded(purpose, path, rows, start.elapsed());
    Ok(batches)
}

/// Read a parquet file into typed records
///
/// # Errors
/// Returns an error if the file cannot be read or a required column is missing
pub fn read_parquet_records<T: ArrowSchema>(
    path: &Path,
    purpose: &str,
    batch_size: usize,
) -> Result<Vec<T>> {
    let mut records = Vec::new();
    for batch in read_parquet(path, purpose, batch_size)? {
        records.extend(T::from_record_batch(&batch)?);
    }
    Ok(records)
}

/// Write a single record batch to a Parquet file, creating parent directories
///
/// # Errors
/// Returns an error if the file cannot be created or the batch cannot be encoded
pub fn write_parquet(path: &Path, batch: &RecordBatch) -> Result<()> {
    ensure_parent_dir(path)?;
    let file = File::create(path)?;

    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();

    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))?;
    writer.write(batch)?;
    writer.close()?;

    log_table_written(path, batch.num_rows());
    Ok(())
}

/// Convert records to a batch and write them
///
/// # Errors
/// Returns an error if conversion or writing fails
pub fn write_records<T: ArrowSchema>(path: &Path, records: &[T]) -> Result<RecordBatch> {
    let batch = T::to_record_batch(records)?;
    write_parquet(path, &batch)?;
    Ok(batch)
}
