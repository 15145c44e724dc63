//! Contracts for the two published tables
//!
//! Every column is declared non-nullable, so undefined statistics and
//! undefined r-squared values show up as `NullValues` diagnostics.

use arrow::datatypes::DataType;

use crate::schema::{ColumnSpec, TableContract};

/// Contract for the per-phenotype statistics table
#[must_use]
pub fn stats_contract() -> TableContract {
    TableContract {
        name: "stats".to_string(),
        columns: vec![
            ColumnSpec::new("phenotype_id", DataType::Utf8, false),
            ColumnSpec::new("not_missing_count", DataType::Int64, false),
            ColumnSpec::new("missingness_rate", DataType::Float64, false),
            ColumnSpec::new("avg_value", DataType::Float64, false),
            ColumnSpec::new("median_value", DataType::Float64, false),
            ColumnSpec::new("std_value", DataType::Float64, false),
            ColumnSpec::new("avg_age", DataType::Float64, false),
        ],
    }
}

/// Contract for the associations table
#[must_use]
pub fn associations_contract() -> TableContract {
    TableContract {
        name: "associations".to_string(),
        columns: vec![
            ColumnSpec::new("phenotype_id", DataType::Utf8, false),
            ColumnSpec::new("coef", DataType::Float64, false),
            ColumnSpec::new("intercept", DataType::Float64, false),
            ColumnSpec::new("r_squared", DataType::Float64, false),
        ],
    }
}
