//! Per-phenotype descriptive statistics
//!
//! One [`PhenotypeStats`] per distinct phenotype id, in ascending order.
//! Statistics that are undefined for a group are `None`, never errors.

use log::debug;

use crate::algorithm::{Execution, map_partitions, partition_by_phenotype, round_to};
use crate::models::{PhenotypeStats, WideRow};

/// Decimal places kept for the standard deviation
pub const STD_DECIMALS: i32 = 6;

/// Summary statistics for every phenotype, computed sequentially
#[must_use]
pub fn compute_stats(rows: &[WideRow]) -> Vec<PhenotypeStats> {
    compute_stats_with(rows, Execution::Sequential)
}

/// Summary statistics for every phenotype
#[must_use]
pub fn compute_stats_with(rows: &[WideRow], execution: Execution) -> Vec<PhenotypeStats> {
    let partitions = partition_by_phenotype(rows, |row| row.phenotype_id.as_str());
    debug!("Computing statistics for {} phenotypes", partitions.len());
    map_partitions(&partitions, execution, summarize_partition)
}

/// Statistics for the rows of a single phenotype
///
/// `rows` must be non-empty; partitions built from existing rows always are.
#[must_use]
pub fn summarize_partition(phenotype_id: &str, rows: &[&WideRow]) -> PhenotypeStats {
    let values: Vec<f64> = rows.iter().filter_map(|row| row.value).collect();
    let ages: Vec<f64> = rows.iter().filter_map(|row| row.age).collect();

    let n_present = values.len();
    let n_missing = rows.len() - n_present;

    PhenotypeStats {
        phenotype_id: phenotype_id.to_string(),
        not_missing_count: n_present as i64,
        missingness_rate: n_missing as f64 / (n_present + n_missing) as f64,
        avg_value: mean(&values),
        median_value: median(&values),
        std_value: sample_std(&values).map(|std| round_to(std, STD_DECIMALS)),
        avg_age: mean(&ages),
    }
}

/// Arithmetic mean; `None` for an empty slice
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median, averaging the two middle values for even lengths
#[must_use]
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Bessel-corrected standard deviation; `None` below two values
#[must_use]
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mean = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    Some((sum_sq / (values.len() - 1) as f64).sqrt())
}
