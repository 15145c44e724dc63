//! Input record types
//!
//! One struct per input table. Column names follow the canonical output
//! naming; the serde aliases and `*_COLUMNS` candidate lists also accept the
//! names used by the upstream cohort exports (`uuid`, `sexM`, ...).

use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::ArrowSchema;
use crate::models::serde_fields::{nullable_f64, nullable_indicator, nullable_label};
use crate::utils::arrow::extractors::{
    extract_f64, extract_indicator, extract_required_strings, extract_strings,
};

/// Accepted names for the patient key column
pub const PATIENT_ID_COLUMNS: &[&str] = &["patient_id", "uuid"];
/// Accepted names for the phenotype key column
pub const PHENOTYPE_ID_COLUMNS: &[&str] = &["phenotype_id"];
/// Accepted names for the measurement column
pub const VALUE_COLUMNS: &[&str] = &["value"];
/// Accepted names for the age column
pub const AGE_COLUMNS: &[&str] = &["age", "age_at_progression_enrollment", "age_at_enrollment"];
/// Accepted names for the sex indicator column (male = 1)
pub const SEX_COLUMNS: &[&str] = &["sex_indicator", "sexM"];
/// Accepted names for the smoking history column
pub const SMOKING_COLUMNS: &[&str] = &["smoking_status"];
/// Accepted names for the risk score column
pub const PRS_COLUMNS: &[&str] = &["prs"];

/// A single phenotype measurement for one patient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhenotypeObservation {
    #[serde(alias = "uuid")]
    pub patient_id: String,
    pub phenotype_id: String,
    #[serde(deserialize_with = "nullable_f64")]
    pub value: Option<f64>,
}

impl PhenotypeObservation {
    #[must_use]
    pub fn new(patient_id: impl Into<String>, phenotype_id: impl Into<String>, value: Option<f64>) -> Self {
        Self {
            patient_id: patient_id.into(),
            phenotype_id: phenotype_id.into(),
            value,
        }
    }
}

impl ArrowSchema for PhenotypeObservation {
    fn schema() -> Schema {
        Schema::new(vec![
            Field::new("patient_id", DataType::Utf8, false),
            Field::new("phenotype_id", DataType::Utf8, false),
            Field::new("value", DataType::Float64, true),
        ])
    }

    fn from_record_batch(batch: &RecordBatch) -> Result<Vec<Self>> {
        let patient_ids = extract_required_strings(batch, PATIENT_ID_COLUMNS)?;
        let phenotype_ids = extract_required_strings(batch, PHENOTYPE_ID_COLUMNS)?;
        let values = extract_f64(batch, VALUE_COLUMNS, true)?;

        Ok(patient_ids
            .into_iter()
            .zip(phenotype_ids)
            .zip(values)
            .map(|((patient_id, phenotype_id), value)| Self {
                patient_id,
                phenotype_id,
                value,
            })
            .collect())
    }
}

/// Demographic covariates for one patient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemographicRecord {
    #[serde(alias = "uuid")]
    pub patient_id: String,
    #[serde(
        alias = "age_at_progression_enrollment",
        alias = "age_at_enrollment",
        deserialize_with = "nullable_f64"
    )]
    pub age: Option<f64>,
    /// 1 for male, 0 otherwise
    #[serde(alias = "sexM", deserialize_with = "nullable_indicator")]
    pub sex_indicator: Option<u8>,
    /// Raw smoking history label, encoded only at modelling time
    #[serde(deserialize_with = "nullable_label")]
    pub smoking_status: Option<String>,
}

impl DemographicRecord {
    #[must_use]
    pub fn new(
        patient_id: impl Into<String>,
        age: Option<f64>,
        sex_indicator: Option<u8>,
        smoking_status: Option<&str>,
    ) -> Self {
        Self {
            patient_id: patient_id.into(),
            age,
            sex_indicator,
            smoking_status: smoking_status.map(str::to_string),
        }
    }
}

impl ArrowSchema for DemographicRecord {
    fn schema() -> Schema {
        Schema::new(vec![
            Field::new("patient_id", DataType::Utf8, false),
            Field::new("age", DataType::Float64, true),
            Field::new("sex_indicator", DataType::UInt8, true),
            Field::new("smoking_status", DataType::Utf8, true),
        ])
    }

    fn from_record_batch(batch: &RecordBatch) -> Result<Vec<Self>> {
        let patient_ids = extract_required_strings(batch, PATIENT_ID_COLUMNS)?;
        let ages = extract_f64(batch, AGE_COLUMNS, true)?;
        let sexes = extract_indicator(batch, SEX_COLUMNS, true)?;
        let smoking = extract_strings(batch, SMOKING_COLUMNS, true)?;

        Ok(patient_ids
            .into_iter()
            .zip(ages)
            .zip(sexes)
            .zip(smoking)
            .map(|(((patient_id, age), sex_indicator), smoking_status)| Self {
                patient_id,
                age,
                sex_indicator,
                smoking_status,
            })
            .collect())
    }
}

/// Polygenic risk score for one patient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrsRecord {
    #[serde(alias = "uuid")]
    pub patient_id: String,
    #[serde(deserialize_with = "nullable_f64")]
    pub prs: Option<f64>,
}

impl PrsRecord {
    #[must_use]
    pub fn new(patient_id: impl Into<String>, prs: Option<f64>) -> Self {
        Self {
            patient_id: patient_id.into(),
            prs,
        }
    }
}

impl ArrowSchema for PrsRecord {
    fn schema() -> Schema {
        Schema::new(vec![
            Field::new("patient_id", DataType::Utf8, false),
            Field::new("prs", DataType::Float64, true),
        ])
    }

    fn from_record_batch(batch: &RecordBatch) -> Result<Vec<Self>> {
        let patient_ids = extract_required_strings(batch, PATIENT_ID_COLUMNS)?;
        let scores = extract_f64(batch, PRS_COLUMNS, true)?;

        Ok(patient_ids
            .into_iter()
            .zip(scores)
            .map(|(patient_id, prs)| Self { patient_id, prs })
            .collect())
    }
}
