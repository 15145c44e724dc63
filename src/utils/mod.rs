//! Utility modules for Arrow columns, file IO and logging

pub mod arrow;
pub mod io;
pub mod logging;

pub use io::{TableFormat, load_demographics, load_phenotypes, load_prs, load_table, write_records};
