//! Log lines for table I/O and pipeline stages

use std::path::Path;
use std::time::Duration;

/// `Loading <purpose> table from <path>`
pub fn log_table_load(purpose: &str, path: &Path) {
    log::info!("Loading {purpose} table from {}", path.display());
}

/// Row count and duration once a table has been decoded
pub fn log_table_loaded(purpose: &str, path: &Path, rows: usize, elapsed: Duration) {
    log::info!("Loaded {rows} {purpose} rows from {} in {elapsed:?}", path.display());
}

pub fn log_table_written(path: &Path, rows: usize) {
    log::info!("Wrote {rows} rows to {}", path.display());
}

/// Warning about a file; the path is appended when known
pub fn log_warning(message: &str, path: Option<&Path>) {
    match path {
        Some(path) => log::warn!("{message}: {}", path.display()),
        None => log::warn!("{message}"),
    }
}

pub fn log_stage_complete(stage: &str, elapsed: Duration) {
    log::info!("{stage} finished in {elapsed:?}");
}
