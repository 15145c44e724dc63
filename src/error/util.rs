//! Utility functions for error handling
//!
//! Checks that turn filesystem surprises into descriptive errors before a
//! reader or writer is constructed.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{Error, Result};

/// Open an input file, distinguishing a missing path from a directory
///
/// # Arguments
/// * `path` - The path to the file to open
/// * `purpose` - Which table the file holds (for error context)
pub fn safe_open_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if !path.exists() {
        return Err(Error::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("{purpose} file not found: {}", path.display()),
        )));
    }

    if !path.is_file() {
        return Err(Error::Io(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{purpose} path is not a file: {}", path.display()),
        )));
    }

    fs::File::open(path).map_err(|e| {
        let context = match e.kind() {
            io::ErrorKind::PermissionDenied => "permission denied - check file permissions",
            _ => "failed to open file",
        };
        Error::Io(io::Error::new(
            e.kind(),
            format!("{purpose}: {context}: {} ({e})", path.display()),
        ))
    })
}

/// Create the parent directory of an output path if it does not exist yet
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
