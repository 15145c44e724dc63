use std::fs;
use std::path::Path;

use pheno_prs::utils::io::write_records;
use pheno_prs::{CohortInputs, DemographicRecord, PhenotypeObservation, PipelineConfig, PrsRecord};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tempfile::TempDir;

/// Six observations over phenotypes "a" (patients 1-4) and "b" (patients 5-6)
///
/// Within each phenotype the value is an exact linear function of the PRS
/// once the null row is dropped, and every other covariate is constant.
#[must_use]
pub fn fixture_inputs() -> CohortInputs {
    let observations = vec![
        PhenotypeObservation::new("1", "a", Some(1.0)),
        PhenotypeObservation::new("2", "a", Some(2.0)),
        PhenotypeObservation::new("3", "a", Some(3.0)),
        PhenotypeObservation::new("4", "a", None),
        PhenotypeObservation::new("5", "b", Some(1.0)),
        PhenotypeObservation::new("6", "b", Some(2.0)),
    ];

    let demographics = (1..=6)
        .map(|id| {
            if id <= 4 {
                DemographicRecord::new(id.to_string(), Some(50.0), Some(0), Some("past_5_to_10_years"))
            } else {
                DemographicRecord::new(id.to_string(), Some(30.0), Some(1), Some("never"))
            }
        })
        .collect();

    let prs = [1.0, 2.0, 3.0, -1.0, -1.0, -2.0]
        .iter()
        .zip(1..)
        .map(|(score, id): (&f64, i32)| PrsRecord::new(id.to_string(), Some(*score)))
        .collect();

    CohortInputs {
        observations,
        demographics,
        prs,
    }
}

/// Write the fixture as the default input layout: Parquet phenotypes, TSV covariates
pub fn write_fixture_dir(dir: &Path, inputs: &CohortInputs) {
    fs::create_dir_all(dir).unwrap();
    write_records(&dir.join("phenotypes.parquet"), &inputs.observations).unwrap();

    let mut demographics = String::from("uuid\tage_at_progression_enrollment\tsexM\tsmoking_status\n");
    for record in &inputs.demographics {
        demographics.push_str(&format!(
            "{}\t{}\t{}\t{}\n",
            record.patient_id,
            cell(record.age),
            cell(record.sex_indicator),
            record.smoking_status.as_deref().unwrap_or("NA")
        ));
    }
    fs::write(dir.join("demographics.tsv"), demographics).unwrap();

    let mut prs = String::from("uuid\tprs\n");
    for record in &inputs.prs {
        prs.push_str(&format!("{}\t{}\n", record.patient_id, cell(record.prs)));
    }
    fs::write(dir.join("prs.tsv"), prs).unwrap();
}

fn cell<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "NA".to_string(), |v| v.to_string())
}

/// A temporary workspace with the fixture written under `in/`
///
/// The returned configuration reads from `in/`, writes to `out/` and skips
/// the chart.
#[must_use]
pub fn fixture_workspace(inputs: &CohortInputs) -> (TempDir, PipelineConfig) {
    let workspace = TempDir::new().unwrap();
    let input_dir = workspace.path().join("in");
    write_fixture_dir(&input_dir, inputs);

    let config = PipelineConfig {
        render_chart: false,
        ..PipelineConfig::default()
    }
    .with_input_dir(&input_dir)
    .with_output_dir(workspace.path().join("out"));

    (workspace, config)
}

/// A random cohort with complete covariates and occasional missing values
#[must_use]
pub fn random_cohort(seed: u64, patients: usize, phenotypes: usize) -> CohortInputs {
    let mut rng = StdRng::seed_from_u64(seed);
    let labels = [
        "never",
        "past_more_than_10_years",
        "past_5_to_10_years",
        "past_less_than_5_years",
        "current",
    ];

    let mut inputs = CohortInputs::default();
    for patient in 0..patients {
        let id = format!("p{patient:04}");
        inputs.demographics.push(DemographicRecord::new(
            id.clone(),
            Some(f64::from(rng.random_range(20..80_u8))),
            Some(rng.random_range(0..=1_u8)),
            Some(labels[rng.random_range(0..labels.len())]),
        ));
        inputs.prs.push(PrsRecord::new(id.clone(), Some(rng.random_range(-3.0..3.0))));

        for phenotype in 0..phenotypes {
            let value = (!rng.random_bool(0.1)).then(|| rng.random_range(0.0..10.0));
            inputs
                .observations
                .push(PhenotypeObservation::new(id.clone(), format!("ph{phenotype:02}"), value));
        }
    }
    inputs
}
