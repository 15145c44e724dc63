use pheno_prs::utils::io::read_parquet;
use pheno_prs::{
    DemographicRecord, Error, FitFailurePolicy, PhenotypeObservation, PipelineConfig, PrsRecord,
    SchemaViolation, Stage, analyze, run, run_with,
};

use crate::utils::{fixture_inputs, fixture_workspace, random_cohort};

#[test]
fn test_run_writes_both_tables() {
    let (_workspace, config) = fixture_workspace(&fixture_inputs());
    let output = run(&config).unwrap();

    assert!(config.stats_path.exists());
    assert!(config.associations_path.exists());
    assert!(!config.chart_path.exists());

    let stats = read_parquet(&config.stats_path, "stats", 1024).unwrap();
    assert_eq!(stats.iter().map(|b| b.num_rows()).sum::<usize>(), 2);
    let associations = read_parquet(&config.associations_path, "associations", 1024).unwrap();
    assert_eq!(associations.iter().map(|b| b.num_rows()).sum::<usize>(), 2);

    assert!(output.stats_table.is_valid());
    assert!(output.associations_table.is_valid());
    assert_eq!(output.associations.best.unwrap().phenotype_id, "a");
}

#[test]
fn test_stages_in_order() {
    let (_workspace, config) = fixture_workspace(&fixture_inputs());
    let mut stages = Vec::new();
    run_with(&config, |stage| stages.push(stage)).unwrap();
    assert_eq!(
        stages,
        vec![
            Stage::Loading,
            Stage::Joining,
            Stage::Analyzing,
            Stage::Validating,
            Stage::Writing,
        ]
    );
}

#[test]
fn test_encoding_failure_writes_nothing() {
    let mut inputs = fixture_inputs();
    inputs.demographics[0].smoking_status = Some("unknown_history".to_string());
    let (_workspace, config) = fixture_workspace(&inputs);

    let err = run(&config).unwrap_err();
    assert!(matches!(err, Error::Encoding { .. }));
    assert!(!config.stats_path.exists());
    assert!(!config.associations_path.exists());
}

#[test]
fn test_fit_failure_policies() {
    let mut inputs = fixture_inputs();
    // phenotype "c" has an infinite risk score among its complete cases
    for (id, score) in [("7", f64::INFINITY), ("8", 1.0)] {
        inputs.observations.push(PhenotypeObservation::new(id, "c", Some(4.0)));
        inputs
            .demographics
            .push(DemographicRecord::new(id, Some(45.0), Some(1), Some("current")));
        inputs.prs.push(PrsRecord::new(id, Some(score)));
    }

    let (_workspace, config) = fixture_workspace(&inputs);
    let err = run(&config).unwrap_err();
    assert!(matches!(err, Error::Fit { ref phenotype_id, .. } if phenotype_id == "c"));
    assert!(!config.stats_path.exists());

    let config = PipelineConfig {
        fit_failure_policy: FitFailurePolicy::Isolate,
        ..config
    };
    let output = run(&config).unwrap();
    assert_eq!(output.associations.results.len(), 2);
    assert_eq!(output.associations.failures.len(), 1);
    assert_eq!(output.associations.failures[0].phenotype_id, "c");
    assert_eq!(output.stats.len(), 3);
    assert!(config.associations_path.exists());
}

#[test]
fn test_single_row_phenotype_is_reported_without_r_squared() {
    let mut inputs = fixture_inputs();
    inputs.observations.push(PhenotypeObservation::new("1", "c", Some(4.0)));

    let (_workspace, config) = fixture_workspace(&inputs);
    let output = run(&config).unwrap();

    let results = &output.associations.results;
    assert_eq!(results.len(), 3);
    assert_eq!(results[2].phenotype_id, "c");
    assert_eq!(results[2].coef, 0.0);
    assert_eq!(results[2].intercept, 4.0);
    assert_eq!(results[2].r_squared, None);
    assert_eq!(output.associations.best.unwrap().phenotype_id, "a");

    assert!(output.associations_table.violations.contains(&SchemaViolation::NullValues {
        table: "associations".to_string(),
        column: "r_squared".to_string(),
        count: 1,
    }));
    assert!(config.associations_path.exists());
}

#[test]
fn test_undefined_statistics_are_reported_not_fatal() {
    let mut inputs = fixture_inputs();
    inputs
        .observations
        .push(PhenotypeObservation::new("2", "z", None));

    let output = analyze(&inputs, &PipelineConfig::default()).unwrap();
    assert_eq!(output.stats.len(), 3);
    assert!(!output.stats_table.is_valid());
    assert!(output.stats_table.violations.contains(&SchemaViolation::NullValues {
        table: "stats".to_string(),
        column: "std_value".to_string(),
        count: 1,
    }));
    assert!(output.associations_table.is_valid());
}

#[test]
fn test_parallel_run_matches_sequential() {
    let inputs = random_cohort(2024, 250, 9);
    let sequential = analyze(&inputs, &PipelineConfig::default()).unwrap();
    let parallel = analyze(
        &inputs,
        &PipelineConfig {
            parallel: true,
            threads: 4,
            ..PipelineConfig::default()
        },
    )
    .unwrap();

    assert_eq!(sequential.stats, parallel.stats);
    assert_eq!(sequential.associations, parallel.associations);
    assert_eq!(sequential.stats_table.table, parallel.stats_table.table);
}

#[test]
fn test_zero_threads_rejected() {
    let (_workspace, config) = fixture_workspace(&fixture_inputs());
    let config = PipelineConfig {
        parallel: true,
        threads: 0,
        ..config
    };
    assert!(matches!(run(&config), Err(Error::Config(_))));
}
