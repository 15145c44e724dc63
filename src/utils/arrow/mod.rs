//! Arrow data handling utilities
//!
//! Column lookup with type adaptation, and typed extraction of whole columns
//! into `Option` vectors.

pub mod array_utils;
pub mod extractors;

pub use array_utils::{downcast_array, find_column, get_column};
pub use extractors::{extract_f64, extract_indicator, extract_required_strings, extract_strings};
