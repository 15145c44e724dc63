//! Domain models for the phenotype/PRS pipeline
//!
//! Input records (observations, demographics, risk scores), the joined wide
//! row, and the per-phenotype result records. Every nullable field is an
//! `Option`; there are no sentinel values.

use std::sync::Arc;

use arrow::datatypes::{FieldRef, Schema};
use arrow::record_batch::RecordBatch;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;

pub mod cohort;
pub mod results;
pub mod serde_fields;
pub mod smoking;
pub mod wide;

pub use cohort::{DemographicRecord, PhenotypeObservation, PrsRecord};
pub use results::{AssociationResult, BestAssociation, PhenotypeStats};
pub use smoking::SmokingStatus;
pub use wide::WideRow;

/// Conversion between a record type and Arrow record batches
pub trait ArrowSchema: Sized + Serialize + DeserializeOwned {
    /// Get the Arrow schema for this model
    fn schema() -> Schema;

    /// Convert a `RecordBatch` to a vector of this model
    fn from_record_batch(batch: &RecordBatch) -> Result<Vec<Self>> {
        Ok(serde_arrow::from_record_batch(batch)?)
    }

    /// Convert a slice of this model to a `RecordBatch`
    fn to_record_batch(models: &[Self]) -> Result<RecordBatch> {
        let fields: Vec<FieldRef> = Self::schema().fields().iter().map(Arc::clone).collect();
        Ok(serde_arrow::to_record_batch(&fields, &models)?)
    }
}
