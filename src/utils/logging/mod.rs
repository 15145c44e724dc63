//! Logging and progress reporting

pub mod log;
pub mod progress;

pub use self::log::{
    log_stage_complete, log_table_load, log_table_loaded, log_table_written, log_warning,
};
pub use progress::{create_spinner, finish_progress_bar};
