//! Per-phenotype association between phenotype values and the risk score
//!
//! Complete-case rows are ordinal-encoded, partitioned by phenotype in
//! ascending order and fitted with `value ~ 1 + prs + age + sex_indicator +
//! smoking_code`. Only the `prs` coefficient is reported.

use log::{debug, info, warn};

use crate::algorithm::{Execution, map_partitions, partition_by_phenotype, round_to};
use crate::config::FitFailurePolicy;
use crate::error::{Error, Result};
use crate::models::{AssociationResult, BestAssociation, SmokingStatus, WideRow};

pub mod ols;

pub use ols::{DegenerateFit, LinearFit, fit_ols};

/// Decimal places kept for coefficient, intercept and r-squared
pub const RESULT_DECIMALS: i32 = 4;

/// Predictor columns in model order
pub const PREDICTORS: [&str; 4] = ["prs", "age", "sex_indicator", "smoking_status"];

/// Options for an association run
#[derive(Debug, Clone, Copy, Default)]
pub struct ModelOptions {
    pub policy: FitFailurePolicy,
    pub execution: Execution,
}

/// A phenotype whose model could not be fitted
#[derive(Debug, Clone, PartialEq)]
pub struct FitFailure {
    pub phenotype_id: String,
    pub reason: String,
}

/// Output of the association stage
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AssociationReport {
    /// One result per fitted phenotype, ascending by phenotype id
    pub results: Vec<AssociationResult>,
    /// Phenotype with the strictly largest r-squared, first seen on ties
    pub best: Option<BestAssociation>,
    /// Groups skipped under [`FitFailurePolicy::Isolate`]; always empty under `Abort`
    pub failures: Vec<FitFailure>,
}

/// A complete-case row ready for fitting
#[derive(Debug, Clone)]
struct ModelRow<'a> {
    phenotype_id: &'a str,
    features: [f64; 4],
    response: f64,
}

/// Associations with the default options (sequential, abort on first failure)
pub fn compute_associations(rows: &[WideRow]) -> Result<AssociationReport> {
    compute_associations_with(rows, ModelOptions::default())
}

/// Associations for every phenotype with at least one complete-case row
///
/// # Errors
/// * [`Error::Encoding`] if any complete-case row carries an unknown smoking
///   status; no results are returned.
/// * [`Error::Fit`] for the first phenotype (in ascending order) that cannot
///   be fitted, when the policy is [`FitFailurePolicy::Abort`].
pub fn compute_associations_with(
    rows: &[WideRow],
    options: ModelOptions,
) -> Result<AssociationReport> {
    let model_rows = encode_complete_cases(rows)?;
    debug!(
        "{} of {} wide rows are complete cases",
        model_rows.len(),
        rows.len()
    );

    let partitions = partition_by_phenotype(&model_rows, |row| row.phenotype_id);

    let fits = match (options.policy, options.execution) {
        (FitFailurePolicy::Abort, Execution::Sequential) => {
            // stop at the first failure without fitting later groups
            let mut fits = Vec::with_capacity(partitions.len());
            for (phenotype_id, group) in &partitions {
                fits.push(Ok(fit_partition(phenotype_id, group)?));
            }
            fits
        }
        (_, execution) => map_partitions(&partitions, execution, fit_partition),
    };

    let mut report = AssociationReport::default();
    for fit in fits {
        match fit {
            Ok(result) => report.results.push(result),
            Err(Error::Fit {
                phenotype_id,
                reason,
            }) if options.policy == FitFailurePolicy::Isolate => {
                warn!("Skipping phenotype '{phenotype_id}': {reason}");
                report.failures.push(FitFailure {
                    phenotype_id,
                    reason,
                });
            }
            Err(e) => return Err(e),
        }
    }

    report.best = best_association(&report.results);
    if let Some(best) = &report.best {
        info!("{best}");
    }
    Ok(report)
}

/// Pick the association with the strictly greatest r-squared
///
/// Results are visited in the given order; a later result only replaces the
/// current holder when its r-squared is strictly greater, so the first
/// phenotype to reach the maximum keeps it. Results without an r-squared are
/// never selected.
#[must_use]
pub fn best_association(results: &[AssociationResult]) -> Option<BestAssociation> {
    results
        .iter()
        .filter_map(|result| result.r_squared.map(|r2| (result, r2)))
        .fold(None, |best, (result, r2)| match best {
            Some(current) if r2 <= current.r_squared => Some(current),
            _ => Some(BestAssociation {
                phenotype_id: result.phenotype_id.clone(),
                r_squared: r2,
            }),
        })
}

/// Drop incomplete rows and encode the rest; any unknown label fails the batch
fn encode_complete_cases(rows: &[WideRow]) -> Result<Vec<ModelRow<'_>>> {
    rows.iter()
        .filter_map(|row| {
            let (Some(value), Some(prs), Some(age), Some(sex), Some(smoking)) = (
                row.value,
                row.prs,
                row.age,
                row.sex_indicator,
                row.smoking_status.as_deref(),
            ) else {
                return None;
            };
            Some(
                SmokingStatus::encode(smoking, &row.patient_id).map(|status| ModelRow {
                    phenotype_id: row.phenotype_id.as_str(),
                    features: [prs, age, f64::from(sex), f64::from(status.code())],
                    response: value,
                }),
            )
        })
        .collect()
}

fn fit_partition(phenotype_id: &str, group: &[&ModelRow<'_>]) -> Result<AssociationResult> {
    let x: Vec<[f64; 4]> = group.iter().map(|row| row.features).collect();
    let y: Vec<f64> = group.iter().map(|row| row.response).collect();

    let fit = fit_ols(&x, &y, &PREDICTORS).map_err(|e| Error::Fit {
        phenotype_id: phenotype_id.to_string(),
        reason: e.to_string(),
    })?;

    debug!(
        "Fitted '{}' on {} rows (rank {}): coef={:.6} r2={:?}",
        phenotype_id,
        group.len(),
        fit.rank,
        fit.coefficients[0],
        fit.r_squared
    );

    Ok(AssociationResult {
        phenotype_id: phenotype_id.to_string(),
        coef: round_to(fit.coefficients[0], RESULT_DECIMALS),
        intercept: round_to(fit.intercept, RESULT_DECIMALS),
        r_squared: fit.r_squared.map(|r2| round_to(r2, RESULT_DECIMALS)),
    })
}
