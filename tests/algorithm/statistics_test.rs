use pheno_prs::{Execution, build_wide_table, compute_stats, compute_stats_with};

use crate::utils::{fixture_inputs, random_cohort};

#[test]
fn test_fixture_statistics() {
    let inputs = fixture_inputs();
    let wide = build_wide_table(&inputs.observations, &inputs.demographics, &inputs.prs);
    let stats = compute_stats(&wide);

    assert_eq!(stats.len(), 2);

    let a = &stats[0];
    assert_eq!(a.phenotype_id, "a");
    assert_eq!(a.not_missing_count, 3);
    assert_eq!(a.missingness_rate, 0.25);
    assert_eq!(a.avg_value, Some(2.0));
    assert_eq!(a.median_value, Some(2.0));
    assert_eq!(a.std_value, Some(1.0));
    assert_eq!(a.avg_age, Some(50.0));

    let b = &stats[1];
    assert_eq!(b.phenotype_id, "b");
    assert_eq!(b.not_missing_count, 2);
    assert_eq!(b.missingness_rate, 0.0);
    assert_eq!(b.avg_value, Some(1.5));
    assert_eq!(b.median_value, Some(1.5));
    assert_eq!(b.std_value, Some(0.707_107));
    assert_eq!(b.avg_age, Some(30.0));
}

#[test]
fn test_missingness_identity_on_random_cohort() {
    let inputs = random_cohort(7, 120, 6);
    let wide = build_wide_table(&inputs.observations, &inputs.demographics, &inputs.prs);

    for stats in compute_stats(&wide) {
        let total = wide
            .iter()
            .filter(|row| row.phenotype_id == stats.phenotype_id)
            .count() as f64;
        let present = stats.not_missing_count as f64 / total;
        assert!((stats.missingness_rate + present - 1.0).abs() < 1e-12);
    }
}

#[test]
fn test_std_has_at_most_six_decimals() {
    let inputs = random_cohort(11, 60, 4);
    let wide = build_wide_table(&inputs.observations, &inputs.demographics, &inputs.prs);

    for stats in compute_stats(&wide) {
        let std = stats.std_value.unwrap();
        assert_eq!(std, (std * 1e6).round() / 1e6);
    }
}

#[test]
fn test_parallel_statistics_identical() {
    let inputs = random_cohort(3, 200, 12);
    let wide = build_wide_table(&inputs.observations, &inputs.demographics, &inputs.prs);
    assert_eq!(
        compute_stats_with(&wide, Execution::Sequential),
        compute_stats_with(&wide, Execution::Parallel)
    );
}
