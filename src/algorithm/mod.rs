//! Cohort algorithms
//!
//! The join that builds the wide table, the per-phenotype statistics, and the
//! per-phenotype association models. Partitions are always visited in
//! ascending phenotype order, whether they are processed sequentially or on a
//! thread pool.

use std::collections::BTreeMap;

use rayon::prelude::*;

pub mod association;
pub mod join;
pub mod statistics;

pub use association::{
    AssociationReport, FitFailure, ModelOptions, best_association, compute_associations,
    compute_associations_with,
};
pub use join::{PatientIndex, build_wide_table};
pub use statistics::{compute_stats, compute_stats_with, summarize_partition};

/// How per-phenotype partitions are processed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Execution {
    /// One partition after another on the calling thread
    #[default]
    Sequential,
    /// Partitions spread over the current rayon pool
    Parallel,
}

impl Execution {
    #[must_use]
    pub const fn from_flag(parallel: bool) -> Self {
        if parallel { Self::Parallel } else { Self::Sequential }
    }
}

/// Group items by phenotype id, keys in ascending order
///
/// Items keep their input order within a partition.
pub fn partition_by_phenotype<'a, T, I, F>(items: I, key: F) -> BTreeMap<&'a str, Vec<&'a T>>
where
    T: 'a,
    I: IntoIterator<Item = &'a T>,
    F: Fn(&'a T) -> &'a str,
{
    let mut partitions: BTreeMap<&'a str, Vec<&'a T>> = BTreeMap::new();
    for item in items {
        partitions.entry(key(item)).or_default().push(item);
    }
    partitions
}

/// Apply `f` to every partition, returning results in partition order
pub fn map_partitions<'a, T, R, F>(
    partitions: &BTreeMap<&'a str, Vec<&'a T>>,
    execution: Execution,
    f: F,
) -> Vec<R>
where
    T: Sync + 'a,
    R: Send,
    F: Fn(&'a str, &[&'a T]) -> R + Sync + Send,
{
    match execution {
        Execution::Sequential => partitions
            .iter()
            .map(|(id, rows)| f(*id, rows.as_slice()))
            .collect(),
        Execution::Parallel => {
            let ordered: Vec<(&&'a str, &Vec<&'a T>)> = partitions.iter().collect();
            // indexed collect keeps the BTreeMap order
            ordered
                .into_par_iter()
                .map(|(id, rows)| f(*id, rows.as_slice()))
                .collect()
        }
    }
}

/// Round to `decimals` places, ties to even
///
/// Ties are decided on the scaled binary value, so `0.125` becomes `0.12`
/// while `2.675` (stored just below the tie) becomes `2.67`.
#[must_use]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}
