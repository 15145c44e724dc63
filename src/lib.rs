//! Per-phenotype summary statistics and polygenic risk score associations
//! for a patient cohort, read from Parquet and delimited tables and published
//! as Parquet with a bar chart.

pub mod algorithm;
pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod schema;
pub mod utils;
pub mod visualize;

// Re-export the most common types for easier use
pub use config::{FitFailurePolicy, PipelineConfig};
pub use error::{Error, Result};
pub use pipeline::{CohortInputs, PipelineOutput, Stage, analyze, run, run_with};

pub use algorithm::{
    AssociationReport, Execution, FitFailure, ModelOptions, best_association, build_wide_table,
    compute_associations, compute_associations_with, compute_stats, compute_stats_with,
};
pub use models::{
    ArrowSchema, AssociationResult, BestAssociation, DemographicRecord, PhenotypeObservation,
    PhenotypeStats, PrsRecord, SmokingStatus, WideRow,
};
pub use schema::{SchemaViolation, TableContract, Validated};

// Arrow types
pub use arrow::record_batch::RecordBatch;
