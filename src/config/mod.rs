//! Configuration for the phenotype/PRS pipeline.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{Error, Result};

/// Default batch size for Parquet reading
pub const DEFAULT_BATCH_SIZE: usize = 16384;

/// What the association stage does when a phenotype group cannot be fitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FitFailurePolicy {
    /// Stop at the first failing group and return the error
    #[default]
    Abort,
    /// Record the failure for that group and continue with the rest
    Isolate,
}

impl FromStr for FitFailurePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "abort" => Ok(Self::Abort),
            "isolate" => Ok(Self::Isolate),
            other => Err(Error::Config(format!(
                "unknown fit failure policy '{other}' (expected 'abort' or 'isolate')"
            ))),
        }
    }
}

/// Configuration for a single pipeline run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Phenotype observations (Parquet or delimited)
    pub phenotypes_path: PathBuf,
    /// Demographic records (delimited or Parquet)
    pub demographics_path: PathBuf,
    /// Polygenic risk scores (delimited or Parquet)
    pub prs_path: PathBuf,
    /// Destination of the per-phenotype statistics table
    pub stats_path: PathBuf,
    /// Destination of the associations table
    pub associations_path: PathBuf,
    /// Destination of the r-squared bar chart
    pub chart_path: PathBuf,
    /// Whether to render the chart at all
    pub render_chart: bool,
    /// Failure handling for per-phenotype fits
    pub fit_failure_policy: FitFailurePolicy,
    /// Run per-phenotype work on a thread pool
    pub parallel: bool,
    /// Thread count used when `parallel` is set
    pub threads: usize,
    /// Batch size for Parquet reading
    pub batch_size: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            phenotypes_path: PathBuf::from("in/phenotypes.parquet"),
            demographics_path: PathBuf::from("in/demographics.tsv"),
            prs_path: PathBuf::from("in/prs.tsv"),
            stats_path: PathBuf::from("out/stats.parquet"),
            associations_path: PathBuf::from("out/associations.parquet"),
            chart_path: PathBuf::from("out/associations.png"),
            render_chart: true,
            fit_failure_policy: FitFailurePolicy::Abort,
            parallel: false,
            threads: num_cpus::get(),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl PipelineConfig {
    /// Default configuration overlaid with `PHENO_PRS_*` environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(dir) = std::env::var("PHENO_PRS_INPUT_DIR") {
            config = config.with_input_dir(dir);
        }
        if let Ok(dir) = std::env::var("PHENO_PRS_OUTPUT_DIR") {
            config = config.with_output_dir(dir);
        }
        if let Ok(value) = std::env::var("PHENO_PRS_PARALLEL") {
            config.parallel = parse_flag("PHENO_PRS_PARALLEL", &value)?;
        }
        if let Ok(value) = std::env::var("PHENO_PRS_THREADS") {
            config.threads = value.trim().parse::<usize>().map_err(|e| {
                Error::Config(format!("PHENO_PRS_THREADS='{value}' is not a count: {e}"))
            })?;
        }
        if let Ok(value) = std::env::var("PHENO_PRS_FIT_POLICY") {
            config.fit_failure_policy = value.parse()?;
        }
        if let Some(size) = get_batch_size() {
            config.batch_size = size;
        }

        config.validate()?;
        Ok(config)
    }

    /// Re-root the three input file names under `dir`
    #[must_use]
    pub fn with_input_dir(mut self, dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        self.phenotypes_path = rebase(dir, &self.phenotypes_path);
        self.demographics_path = rebase(dir, &self.demographics_path);
        self.prs_path = rebase(dir, &self.prs_path);
        self
    }

    /// Re-root the three output file names under `dir`
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        self.stats_path = rebase(dir, &self.stats_path);
        self.associations_path = rebase(dir, &self.associations_path);
        self.chart_path = rebase(dir, &self.chart_path);
        self
    }

    /// Reject settings that cannot produce a run
    pub fn validate(&self) -> Result<()> {
        if self.parallel && self.threads == 0 {
            return Err(Error::Config(
                "parallel execution requires at least one thread".to_string(),
            ));
        }
        if self.batch_size == 0 {
            return Err(Error::Config("batch size must be positive".to_string()));
        }
        Ok(())
    }
}

/// Helper function to get batch size from environment
#[must_use]
pub fn get_batch_size() -> Option<usize> {
    std::env::var("PARQUET_BATCH_SIZE")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .filter(|&size| size > 0)
}

fn rebase(dir: &Path, path: &Path) -> PathBuf {
    path.file_name()
        .map_or_else(|| dir.to_path_buf(), |name| dir.join(name))
}

fn parse_flag(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(Error::Config(format!("{name}='{other}' is not a boolean"))),
    }
}
