//! Output table contracts and validation.
//!
//! Validation never fails a run: it returns the violations next to the table
//! and leaves the decision to halt with the caller.

use std::fmt;

use arrow::array::Array;
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use log::{info, warn};

pub mod contracts;

pub use contracts::{associations_contract, stats_contract};

/// Expected name, type and nullability of one column
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    pub name: String,
    pub data_type: DataType,
    pub nullable: bool,
}

impl ColumnSpec {
    #[must_use]
    pub fn new(name: &str, data_type: DataType, nullable: bool) -> Self {
        Self {
            name: name.to_string(),
            data_type,
            nullable,
        }
    }
}

/// The column contract of a named table
#[derive(Debug, Clone, PartialEq)]
pub struct TableContract {
    pub name: String,
    pub columns: Vec<ColumnSpec>,
}

/// A way in which a table breaks its contract
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaViolation {
    /// A declared column is absent
    MissingColumn { table: String, column: String },
    /// A column exists with a different type
    TypeMismatch {
        table: String,
        column: String,
        expected: DataType,
        actual: DataType,
    },
    /// A non-nullable column holds nulls
    NullValues {
        table: String,
        column: String,
        count: usize,
    },
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingColumn { table, column } => {
                write!(f, "{table}: column '{column}' is missing")
            }
            Self::TypeMismatch {
                table,
                column,
                expected,
                actual,
            } => write!(
                f,
                "{table}: column '{column}' has type {actual:?}, expected {expected:?}"
            ),
            Self::NullValues {
                table,
                column,
                count,
            } => write!(f, "{table}: column '{column}' contains {count} null value(s)"),
        }
    }
}

/// A table together with the contract violations found in it
#[derive(Debug, Clone)]
pub struct Validated<T> {
    pub table: T,
    pub violations: Vec<SchemaViolation>,
}

impl<T> Validated<T> {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Log the outcome: one info line when valid, one warning per violation
    pub fn log(&self, table_name: &str) {
        if self.is_valid() {
            info!("{table_name} schema is valid");
        } else {
            for violation in &self.violations {
                warn!("Validation error: {violation}");
            }
        }
    }
}

/// Check a record batch against a contract
///
/// Extra columns are allowed; each declared column is checked for presence,
/// type, and (when non-nullable) absence of nulls.
#[must_use]
pub fn validate_batch(batch: &RecordBatch, contract: &TableContract) -> Vec<SchemaViolation> {
    let schema = batch.schema();
    let mut violations = Vec::new();

    for spec in &contract.columns {
        let Ok(idx) = schema.index_of(&spec.name) else {
            violations.push(SchemaViolation::MissingColumn {
                table: contract.name.clone(),
                column: spec.name.clone(),
            });
            continue;
        };

        let column = batch.column(idx);
        if column.data_type() != &spec.data_type {
            violations.push(SchemaViolation::TypeMismatch {
                table: contract.name.clone(),
                column: spec.name.clone(),
                expected: spec.data_type.clone(),
                actual: column.data_type().clone(),
            });
        }

        if !spec.nullable && column.null_count() > 0 {
            violations.push(SchemaViolation::NullValues {
                table: contract.name.clone(),
                column: spec.name.clone(),
                count: column.null_count(),
            });
        }
    }

    violations
}

/// Validate a batch and wrap it with its violations
#[must_use]
pub fn validate(batch: RecordBatch, contract: &TableContract) -> Validated<RecordBatch> {
    let violations = validate_batch(&batch, contract);
    Validated {
        table: batch,
        violations,
    }
}
