use pheno_prs::{DemographicRecord, PrsRecord, build_wide_table};

use crate::utils::{fixture_inputs, random_cohort};

#[test]
fn test_one_to_one_keeps_row_count() {
    let inputs = fixture_inputs();
    let wide = build_wide_table(&inputs.observations, &inputs.demographics, &inputs.prs);
    assert_eq!(wide.len(), inputs.observations.len());

    let fourth = &wide[3];
    assert_eq!(fourth.patient_id, "4");
    assert_eq!(fourth.value, None);
    assert_eq!(fourth.prs, Some(-1.0));
    assert_eq!(fourth.smoking_status.as_deref(), Some("past_5_to_10_years"));
}

#[test]
fn test_row_count_never_shrinks() {
    let mut inputs = random_cohort(5, 40, 3);
    // drop some right-hand rows and duplicate others
    inputs.prs.retain(|record| !record.patient_id.ends_with('7'));
    inputs.demographics.push(DemographicRecord::new("p0001", Some(33.0), Some(0), Some("never")));
    inputs.prs.push(PrsRecord::new("p0002", Some(0.0)));

    let wide = build_wide_table(&inputs.observations, &inputs.demographics, &inputs.prs);
    assert!(wide.len() >= inputs.observations.len());
    // p0001 and p0002 each double their three observations
    assert_eq!(wide.len(), inputs.observations.len() + 6);
}

#[test]
fn test_missing_patients_are_null_not_dropped() {
    let inputs = fixture_inputs();
    let wide = build_wide_table(&inputs.observations, &[], &inputs.prs[..2]);
    assert_eq!(wide.len(), 6);
    assert!(wide.iter().all(|row| row.age.is_none() && row.sex_indicator.is_none()));
    assert_eq!(wide.iter().filter(|row| row.prs.is_some()).count(), 2);
}
