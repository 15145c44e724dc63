//! End-to-end run: load, join, summarize, model, validate, publish
//!
//! Every fallible computation finishes before the first output file is
//! written, so a failed run leaves no partial outputs behind.

use std::fmt;
use std::time::Instant;

use arrow::record_batch::RecordBatch;
use itertools::Itertools;
use log::{info, warn};

use crate::algorithm::{
    AssociationReport, Execution, ModelOptions, build_wide_table, compute_associations_with,
    compute_stats_with,
};
use crate::config::{FitFailurePolicy, PipelineConfig};
use crate::error::{Error, Result};
use crate::models::{
    ArrowSchema, AssociationResult, DemographicRecord, PhenotypeObservation, PhenotypeStats,
    PrsRecord,
};
use crate::schema::{Validated, associations_contract, stats_contract, validate};
use crate::utils::io::{load_demographics, load_phenotypes, load_prs, write_parquet};
use crate::utils::logging::{log_stage_complete, log_warning};
use crate::visualize::render_chart;

/// The three input tables
#[derive(Debug, Clone, Default)]
pub struct CohortInputs {
    pub observations: Vec<PhenotypeObservation>,
    pub demographics: Vec<DemographicRecord>,
    pub prs: Vec<PrsRecord>,
}

impl CohortInputs {
    /// Load every input named by the configuration
    ///
    /// # Errors
    /// Returns the first load error
    pub fn load(config: &PipelineConfig) -> Result<Self> {
        Ok(Self {
            observations: load_phenotypes(&config.phenotypes_path, config.batch_size)?,
            demographics: load_demographics(&config.demographics_path, config.batch_size)?,
            prs: load_prs(&config.prs_path, config.batch_size)?,
        })
    }
}

/// Results of a run, with the validated output batches
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub stats: Vec<PhenotypeStats>,
    pub associations: AssociationReport,
    pub stats_table: Validated<RecordBatch>,
    pub associations_table: Validated<RecordBatch>,
}

/// Pipeline stages, reported to an observer as they start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Loading,
    Joining,
    Analyzing,
    Validating,
    Charting,
    Writing,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Loading => "Loading inputs",
            Self::Joining => "Joining cohort tables",
            Self::Analyzing => "Computing statistics and associations",
            Self::Validating => "Validating outputs",
            Self::Charting => "Drawing chart",
            Self::Writing => "Writing outputs",
        };
        f.write_str(label)
    }
}

/// Run the whole pipeline
///
/// # Errors
/// Returns the first fatal error; no output is written in that case
pub fn run(config: &PipelineConfig) -> Result<PipelineOutput> {
    run_with(config, |_| {})
}

/// Run the whole pipeline, calling `on_stage` as each stage begins
///
/// # Errors
/// Returns the first fatal error; no output is written in that case
pub fn run_with(config: &PipelineConfig, mut on_stage: impl FnMut(Stage)) -> Result<PipelineOutput> {
    config.validate()?;

    on_stage(Stage::Loading);
    let inputs = CohortInputs::load(config)?;

    let output = analyze_with(&inputs, config, &mut on_stage)?;

    if config.render_chart {
        on_stage(Stage::Charting);
        // a chart failure does not invalidate the tables
        if let Err(e) = render_chart(&output.associations.results, &config.chart_path) {
            log_warning(&format!("Chart not written: {e}"), Some(&config.chart_path));
        }
    }

    on_stage(Stage::Writing);
    write_parquet(&config.stats_path, &output.stats_table.table)?;
    write_parquet(&config.associations_path, &output.associations_table.table)?;

    Ok(output)
}

/// Everything between loading and writing, without touching the filesystem
///
/// # Errors
/// Returns an encoding error, or a fit error under the abort policy
pub fn analyze(inputs: &CohortInputs, config: &PipelineConfig) -> Result<PipelineOutput> {
    analyze_with(inputs, config, &mut |_| {})
}

fn analyze_with(
    inputs: &CohortInputs,
    config: &PipelineConfig,
    on_stage: &mut dyn FnMut(Stage),
) -> Result<PipelineOutput> {
    on_stage(Stage::Joining);
    let start = Instant::now();
    let wide = build_wide_table(&inputs.observations, &inputs.demographics, &inputs.prs);
    log_stage_complete("Join", start.elapsed());

    on_stage(Stage::Analyzing);
    let start = Instant::now();
    let execution = Execution::from_flag(config.parallel);
    if config.fit_failure_policy == FitFailurePolicy::Isolate {
        warn!("Fit failures are isolated per phenotype; failing phenotypes are skipped instead of stopping the run");
    }
    let options = ModelOptions {
        policy: config.fit_failure_policy,
        execution,
    };

    let (stats, associations) = match execution {
        Execution::Sequential => (
            compute_stats_with(&wide, execution),
            compute_associations_with(&wide, options)?,
        ),
        Execution::Parallel => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(config.threads)
                .build()
                .map_err(|e| Error::Config(format!("cannot build thread pool: {e}")))?;
            info!("Running per-phenotype work on {} threads", pool.current_num_threads());
            let (stats, associations) = pool.install(|| {
                rayon::join(
                    || compute_stats_with(&wide, execution),
                    || compute_associations_with(&wide, options),
                )
            });
            (stats, associations?)
        }
    };
    log_stage_complete("Analysis", start.elapsed());
    info!(
        "{} phenotypes summarized, {} associations fitted",
        stats.len(),
        associations.results.len()
    );
    if !associations.failures.is_empty() {
        warn!(
            "{} phenotype(s) could not be fitted: {}",
            associations.failures.len(),
            associations.failures.iter().map(|f| &f.phenotype_id).join(", ")
        );
    }

    on_stage(Stage::Validating);
    let stats_table = validate(PhenotypeStats::to_record_batch(&stats)?, &stats_contract());
    stats_table.log("stats");
    let associations_table = validate(
        AssociationResult::to_record_batch(&associations.results)?,
        &associations_contract(),
    );
    associations_table.log("associations");

    Ok(PipelineOutput {
        stats,
        associations,
        stats_table,
        associations_table,
    })
}
