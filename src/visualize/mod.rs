//! Bar chart of r-squared per phenotype

use std::error::Error as StdError;
use std::path::Path;

use log::info;
use plotters::prelude::*;

use crate::error::util::ensure_parent_dir;
use crate::error::{Error, Result};
use crate::models::AssociationResult;
use crate::utils::logging::log_warning;

/// Output image size in pixels
pub const CHART_SIZE: (u32, u32) = (1200, 800);
/// Chart caption
pub const CHART_TITLE: &str = "Phenotype vs PRS";

/// Bars to draw: one `(phenotype_id, r_squared)` per defined r-squared, in
/// input order
#[must_use]
pub fn chart_bars(results: &[AssociationResult]) -> Vec<(String, f64)> {
    results
        .iter()
        .filter_map(|result| {
            result
                .r_squared
                .filter(|r2| r2.is_finite())
                .map(|r2| (result.phenotype_id.clone(), r2))
        })
        .collect()
}

/// Render the association chart as a PNG
///
/// Nothing is drawn when no result has a defined r-squared.
///
/// # Errors
/// Returns [`Error::Chart`] if drawing fails, or an IO error if the output
/// directory cannot be created
pub fn render_chart(results: &[AssociationResult], path: &Path) -> Result<()> {
    let bars = chart_bars(results);
    if bars.is_empty() {
        log_warning("No associations with a defined r-squared; chart not drawn", Some(path));
        return Ok(());
    }

    ensure_parent_dir(path)?;
    draw_bars(&bars, path).map_err(|e| Error::Chart(format!("{}: {e}", path.display())))?;

    info!("Chart with {} bars written to {}", bars.len(), path.display());
    Ok(())
}

fn draw_bars(bars: &[(String, f64)], path: &Path) -> std::result::Result<(), Box<dyn StdError + Send + Sync>> {
    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.margin(10, 10, 10, 10);

    // r-squared can go negative for poor fits
    let y_min = bars.iter().map(|(_, r2)| *r2).fold(0.0, f64::min);
    let y_max = bars.iter().map(|(_, r2)| *r2).fold(1.0, f64::max);
    let count = u32::try_from(bars.len())?;

    let mut chart = ChartBuilder::on(&root)
        .caption(CHART_TITLE, ("sans-serif", 30))
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d((0u32..count).into_segmented(), y_min..y_max * 1.05)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("phenotype_id")
        .y_desc("r_squared")
        .x_labels(bars.len())
        .x_label_formatter(&|segment| match segment {
            SegmentValue::CenterOf(idx) => bars
                .get(*idx as usize)
                .map(|(id, _)| id.clone())
                .unwrap_or_default(),
            _ => String::new(),
        })
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(BLUE.mix(0.7).filled())
            .margin(10)
            .data(bars.iter().zip(0u32..).map(|((_, r2), idx)| (idx, *r2))),
    )?;

    root.present()?;
    Ok(())
}
