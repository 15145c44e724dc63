//! Per-phenotype result records and their output table schemas

use arrow::datatypes::{DataType, Field, Schema};
use serde::{Deserialize, Serialize};

use crate::models::ArrowSchema;

/// Descriptive statistics for one phenotype
///
/// Statistics that are undefined for the group (no values, fewer than two
/// values for the deviation, no ages) are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhenotypeStats {
    pub phenotype_id: String,
    pub not_missing_count: i64,
    pub missingness_rate: f64,
    pub avg_value: Option<f64>,
    pub median_value: Option<f64>,
    /// Sample standard deviation, rounded to 6 decimals
    pub std_value: Option<f64>,
    pub avg_age: Option<f64>,
}

impl ArrowSchema for PhenotypeStats {
    fn schema() -> Schema {
        Schema::new(vec![
            Field::new("phenotype_id", DataType::Utf8, false),
            Field::new("not_missing_count", DataType::Int64, false),
            Field::new("missingness_rate", DataType::Float64, false),
            Field::new("avg_value", DataType::Float64, true),
            Field::new("median_value", DataType::Float64, true),
            Field::new("std_value", DataType::Float64, true),
            Field::new("avg_age", DataType::Float64, true),
        ])
    }
}

/// Linear association between a phenotype and the risk score
///
/// `coef` is the `prs` coefficient of the adjusted model; all three numbers
/// are rounded to 4 decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssociationResult {
    pub phenotype_id: String,
    pub coef: f64,
    pub intercept: f64,
    /// `None` when the response is constant but not perfectly fitted
    pub r_squared: Option<f64>,
}

impl ArrowSchema for AssociationResult {
    fn schema() -> Schema {
        Schema::new(vec![
            Field::new("phenotype_id", DataType::Utf8, false),
            Field::new("coef", DataType::Float64, false),
            Field::new("intercept", DataType::Float64, false),
            Field::new("r_squared", DataType::Float64, true),
        ])
    }
}

/// The phenotype whose model explains the most variance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestAssociation {
    pub phenotype_id: String,
    pub r_squared: f64,
}

impl std::fmt::Display for BestAssociation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.phenotype_id, self.r_squared)
    }
}
