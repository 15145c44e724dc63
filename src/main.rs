use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use pheno_prs::PipelineConfig;
use pheno_prs::utils::logging::{create_spinner, finish_progress_bar};

/// Per-phenotype statistics and PRS associations for a patient cohort
///
/// Other settings come from `PHENO_PRS_*` environment variables.
#[derive(Parser, Debug)]
#[command(name = "pheno-prs")]
#[command(version)]
struct Cli {
    /// Directory holding phenotypes.parquet, demographics.tsv and prs.tsv
    input_dir: Option<PathBuf>,

    /// Directory for the stats and associations tables and the chart
    output_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut config = PipelineConfig::from_env().context("Invalid PHENO_PRS_* settings")?;
    if let Some(input_dir) = cli.input_dir {
        config = config.with_input_dir(input_dir);
    }
    if let Some(output_dir) = cli.output_dir {
        config = config.with_output_dir(output_dir);
    }

    info!(
        "Phenotypes: {}, demographics: {}, PRS: {}",
        config.phenotypes_path.display(),
        config.demographics_path.display(),
        config.prs_path.display()
    );

    let start = Instant::now();
    let spinner = create_spinner(Some("Starting"));
    let result = pheno_prs::run_with(&config, |stage| spinner.set_message(stage.to_string()));

    let output = match result {
        Ok(output) => {
            finish_progress_bar(&spinner, Some("Done"));
            output
        }
        Err(e) => {
            spinner.abandon_with_message("Failed");
            let context = if e.is_modelling_error() {
                "Association modelling failed; no outputs were written"
            } else {
                "Pipeline run failed"
            };
            return Err(e).context(context);
        }
    };

    if let Some(best) = &output.associations.best {
        println!("{best}");
    }
    info!(
        "Wrote {} and {} in {:?}",
        config.stats_path.display(),
        config.associations_path.display(),
        start.elapsed()
    );

    Ok(())
}
