use std::fs;

use pheno_prs::utils::io::{load_demographics, load_phenotypes, load_prs, read_parquet, write_records};
use pheno_prs::algorithm::build_wide_table;
use pheno_prs::{
    ArrowSchema, AssociationResult, DemographicRecord, Error, PhenotypeObservation, PhenotypeStats,
};
use tempfile::TempDir;

use crate::utils::{fixture_inputs, write_fixture_dir};

const BATCH_SIZE: usize = 1024;

#[test]
fn test_fixture_inputs_load_back() {
    let inputs = fixture_inputs();
    let dir = TempDir::new().unwrap();
    write_fixture_dir(dir.path(), &inputs);

    let observations = load_phenotypes(&dir.path().join("phenotypes.parquet"), BATCH_SIZE).unwrap();
    let demographics = load_demographics(&dir.path().join("demographics.tsv"), BATCH_SIZE).unwrap();
    let prs = load_prs(&dir.path().join("prs.tsv"), BATCH_SIZE).unwrap();

    assert_eq!(observations, inputs.observations);
    assert_eq!(demographics, inputs.demographics);
    assert_eq!(prs, inputs.prs);
}

#[test]
fn test_demographics_from_parquet_with_float_sex() {
    use std::sync::Arc;

    use arrow::array::{Float64Array, StringArray};
    use arrow::datatypes::{DataType, Field, Schema};
    use arrow::record_batch::RecordBatch;
    use pheno_prs::utils::io::write_parquet;

    let schema = Schema::new(vec![
        Field::new("uuid", DataType::Utf8, false),
        Field::new("age_at_progression_enrollment", DataType::Float64, true),
        Field::new("sexM", DataType::Float64, true),
        Field::new("smoking_status", DataType::Utf8, true),
    ]);
    let batch = RecordBatch::try_new(
        Arc::new(schema),
        vec![
            Arc::new(StringArray::from(vec!["1", "2"])),
            Arc::new(Float64Array::from(vec![Some(61.5), None])),
            Arc::new(Float64Array::from(vec![Some(1.0), Some(0.0)])),
            Arc::new(StringArray::from(vec![Some("current"), None])),
        ],
    )
    .unwrap();

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("demographics.parquet");
    write_parquet(&path, &batch).unwrap();

    let records = load_demographics(&path, BATCH_SIZE).unwrap();
    assert_eq!(
        records,
        vec![
            DemographicRecord::new("1", Some(61.5), Some(1), Some("current")),
            DemographicRecord::new("2", None, Some(0), None),
        ]
    );
}

#[test]
fn test_padded_tsv_ids_join_parquet_ids() {
    let inputs = fixture_inputs();
    let dir = TempDir::new().unwrap();
    write_fixture_dir(dir.path(), &inputs);
    fs::write(dir.path().join("prs.tsv"), "uuid\tprs\n 1\t0.25\n2 \t0.75\n").unwrap();

    let observations = load_phenotypes(&dir.path().join("phenotypes.parquet"), BATCH_SIZE).unwrap();
    let prs = load_prs(&dir.path().join("prs.tsv"), BATCH_SIZE).unwrap();
    let wide = build_wide_table(&observations, &inputs.demographics, &prs);

    assert_eq!(wide[0].patient_id, "1");
    assert_eq!(wide[0].prs, Some(0.25));
    assert_eq!(wide[1].prs, Some(0.75));
    assert_eq!(wide[2].prs, None);
}

#[test]
fn test_missing_key_column_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("prs.csv");
    fs::write(&path, "prs\n0.5\n").unwrap();

    let err = load_prs(&path, BATCH_SIZE).unwrap_err();
    assert!(matches!(err, Error::Delimited(_)), "unexpected error: {err}");
}

#[test]
fn test_missing_file() {
    let err = load_phenotypes(std::path::Path::new("/no/such/phenotypes.parquet"), BATCH_SIZE)
        .unwrap_err();
    assert!(err.to_string().contains("phenotypes file not found"));
}

#[test]
fn test_output_schemas_survive_parquet() {
    let dir = TempDir::new().unwrap();
    let stats_path = dir.path().join("out").join("stats.parquet");
    let stats = vec![PhenotypeStats {
        phenotype_id: "x".to_string(),
        not_missing_count: 0,
        missingness_rate: 1.0,
        avg_value: None,
        median_value: None,
        std_value: None,
        avg_age: Some(40.0),
    }];
    write_records(&stats_path, &stats).unwrap();

    let batches = read_parquet(&stats_path, "stats", BATCH_SIZE).unwrap();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].schema().fields(), PhenotypeStats::schema().fields());
    assert_eq!(batches[0].column(3).null_count(), 1);

    let associations_path = dir.path().join("out").join("associations.parquet");
    write_records::<AssociationResult>(&associations_path, &[]).unwrap();
    let batches = read_parquet(&associations_path, "associations", BATCH_SIZE).unwrap();
    assert!(batches.iter().all(|batch| batch.num_rows() == 0));

    let observations: Vec<PhenotypeObservation> = Vec::new();
    assert_eq!(PhenotypeObservation::to_record_batch(&observations).unwrap().num_rows(), 0);
}
