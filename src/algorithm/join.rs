//! Wide table construction
//!
//! Left outer join of phenotype observations with risk scores and then with
//! demographics, both on `patient_id`. Each right-hand table is indexed once.
//! A patient with no match gets null covariates; a patient with several
//! matches fans out into one row per combination.

use log::{debug, warn};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::models::{DemographicRecord, PhenotypeObservation, PrsRecord, WideRow};

/// Hash index from patient id to the rows carrying it, in input order
#[derive(Debug)]
pub struct PatientIndex<'a, T> {
    rows: FxHashMap<&'a str, SmallVec<[&'a T; 1]>>,
}

impl<'a, T> PatientIndex<'a, T> {
    /// Index `rows` by the key returned from `patient_id`
    pub fn build(rows: &'a [T], patient_id: impl Fn(&'a T) -> &'a str) -> Self {
        let mut index: FxHashMap<&'a str, SmallVec<[&'a T; 1]>> =
            FxHashMap::with_capacity_and_hasher(rows.len(), Default::default());
        for row in rows {
            index.entry(patient_id(row)).or_default().push(row);
        }
        Self { rows: index }
    }

    /// Rows for a patient; empty when there are none
    #[must_use]
    pub fn matches(&self, patient_id: &str) -> &[&'a T] {
        self.rows
            .get(patient_id)
            .map(|rows| rows.as_slice())
            .unwrap_or(&[])
    }

    /// Patients that appear more than once
    #[must_use]
    pub fn duplicated_keys(&self) -> usize {
        self.rows.values().filter(|rows| rows.len() > 1).count()
    }
}

/// Matches for the right side of a left join: every match, or a single `None`
fn left_side<'i, 'a, T>(matches: &'i [&'a T]) -> impl Iterator<Item = Option<&'a T>> + 'i {
    let unmatched = matches.is_empty().then_some(None);
    matches.iter().map(|row| Some(*row)).chain(unmatched)
}

/// Join the three input tables into one row per observation
///
/// Output order follows the observations; fanned-out rows for one observation
/// are ordered by risk score match, then demographic match.
#[must_use]
pub fn build_wide_table(
    observations: &[PhenotypeObservation],
    demographics: &[DemographicRecord],
    prs: &[PrsRecord],
) -> Vec<WideRow> {
    let prs_index = PatientIndex::build(prs, |record| record.patient_id.as_str());
    let demographic_index = PatientIndex::build(demographics, |record| record.patient_id.as_str());

    if prs_index.duplicated_keys() > 0 || demographic_index.duplicated_keys() > 0 {
        warn!(
            "Duplicate patient ids in inputs ({} in PRS, {} in demographics); joined rows will fan out",
            prs_index.duplicated_keys(),
            demographic_index.duplicated_keys()
        );
    }

    let mut wide = Vec::with_capacity(observations.len());
    let mut unmatched_prs = 0usize;
    let mut unmatched_demographics = 0usize;

    for observation in observations {
        let prs_matches = prs_index.matches(&observation.patient_id);
        let demographic_matches = demographic_index.matches(&observation.patient_id);
        unmatched_prs += usize::from(prs_matches.is_empty());
        unmatched_demographics += usize::from(demographic_matches.is_empty());

        for score in left_side(prs_matches) {
            for demographic in left_side(demographic_matches) {
                wide.push(WideRow {
                    patient_id: observation.patient_id.clone(),
                    phenotype_id: observation.phenotype_id.clone(),
                    value: observation.value,
                    prs: score.and_then(|s| s.prs),
                    age: demographic.and_then(|d| d.age),
                    sex_indicator: demographic.and_then(|d| d.sex_indicator),
                    smoking_status: demographic.and_then(|d| d.smoking_status.clone()),
                });
            }
        }
    }

    debug!(
        "Joined {} observations into {} wide rows ({} without PRS, {} without demographics)",
        observations.len(),
        wide.len(),
        unmatched_prs,
        unmatched_demographics
    );

    wide
}
