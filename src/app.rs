//! Pipeline driver: load, clean, summarize, report, render.

use crate::charts::{open_charts, ChartRenderer, RenderedCharts};
use crate::config::CliConfig;
use crate::data::{LoaderError, SalesCleaner, SalesLoader};
use crate::report;
use crate::stats::{SalesAnalyzer, SalesSummary};
use anyhow::Context;
use std::io::{self, Write};
use std::path::Path;

pub const LOAD_FAILED: &str = "Failed to load the data. Please check the file format and try again.";

/// What a run produced.
#[derive(Debug)]
pub struct RunOutcome {
    pub summary: SalesSummary,
    pub charts: RenderedCharts,
}

/// Run the whole analysis for `input`, writing the report to `out`.
pub fn run<W: Write>(config: &CliConfig, input: &Path, out: &mut W) -> anyhow::Result<RunOutcome> {
    tracing::info!(path = %input.display(), "loading sales data");

    let mut loader = SalesLoader::new();
    loader.load_csv(input).context(LOAD_FAILED)?;
    let raw = loader.take_dataframe()?;

    let cleaned = SalesCleaner::clean(&raw).context("Failed to clean sales data")?;
    if cleaned.frame.height() == 0 {
        tracing::warn!("no valid rows left after cleaning");
    }

    let summary =
        SalesAnalyzer::summarize(&cleaned, config.top).context("Failed to summarize sales")?;

    if config.json {
        report::write_json(out, &summary)?;
    } else {
        report::write_report(out, &summary)?;
    }
    out.flush()?;

    let charts = if config.no_charts {
        RenderedCharts::default()
    } else {
        let renderer = ChartRenderer::new(config.width, config.height);
        let charts = renderer
            .render_all(&summary, &config.output_dir)
            .context("Failed to render charts")?;
        if !config.json {
            for path in charts.paths() {
                writeln!(out, "Chart saved: {}", path.display())?;
            }
        }
        if !config.no_open {
            open_charts(&charts);
        }
        charts
    };

    Ok(RunOutcome { summary, charts })
}

/// Print a failed run for the user.
///
/// Load failures go to `out` in the classic two-line form; anything else is
/// written once to `err` with its context chain.
pub fn report_failure<O: Write, E: Write>(
    error: &anyhow::Error,
    out: &mut O,
    err: &mut E,
) -> io::Result<()> {
    match error.downcast_ref::<LoaderError>() {
        Some(load_error) => {
            writeln!(out, "Error loading file: {load_error}")?;
            writeln!(out, "{LOAD_FAILED}")
        }
        None => writeln!(err, "Error: {error:#}"),
    }
}
