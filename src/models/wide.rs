//! The joined, one-row-per-observation record

use arrow::datatypes::{DataType, Field, Schema};
use serde::{Deserialize, Serialize};

use crate::models::ArrowSchema;

/// A phenotype observation with every covariate attached
///
/// Covariates are `None` when the patient had no matching demographic or
/// risk score row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WideRow {
    pub patient_id: String,
    pub phenotype_id: String,
    pub value: Option<f64>,
    pub prs: Option<f64>,
    pub age: Option<f64>,
    pub sex_indicator: Option<u8>,
    pub smoking_status: Option<String>,
}

impl ArrowSchema for WideRow {
    fn schema() -> Schema {
        Schema::new(vec![
            Field::new("patient_id", DataType::Utf8, false),
            Field::new("phenotype_id", DataType::Utf8, false),
            Field::new("value", DataType::Float64, true),
            Field::new("prs", DataType::Float64, true),
            Field::new("age", DataType::Float64, true),
            Field::new("sex_indicator", DataType::UInt8, true),
            Field::new("smoking_status", DataType::Utf8, true),
        ])
    }
}
