// src/pipeline.rs
use crate::config::Config;
use crate::error::{PipelineError, Result};
use crate::process::{
    aggregate_levels, filter_by_prefix, finalize, load_census, unify_and_pivot, Level,
};
use crate::report::{preview, write_report, ReportFormat, PREVIEW_ROWS};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// What a completed run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub rows_read: usize,
    pub rows_matched: usize,
    pub regency_groups: usize,
    pub district_groups: usize,
    pub village_groups: usize,
    pub report_rows: usize,
    pub format: ReportFormat,
    pub output_path: PathBuf,
}

/// Load, filter, aggregate, pivot, format and write one report.
///
/// `InputNotFound` and `NoMatchingData` are returned before anything is
/// written; callers treat them as a clean early exit.
#[tracing::instrument(level = "info", skip(config), fields(prefix = %config.prefix))]
pub fn run(config: &Config) -> Result<RunSummary> {
    let start = Instant::now();

    // ─── 1) load ─────────────────────────────────────────────────────
    info!("reading {}", config.input_path.display());
    let table = load_census(&config.input_path)?;
    let rows_read = table.num_rows();

    // ─── 2) filter ───────────────────────────────────────────────────
    info!("filtering for desa code starting with {}", config.prefix);
    let filtered = filter_by_prefix(&table, &config.prefix)?;
    drop(table);
    if filtered.num_rows() == 0 {
        return Err(PipelineError::NoMatchingData {
            prefix: config.prefix.clone(),
        });
    }
    let rows_matched = filtered.num_rows();
    info!("found {} rows, processing", rows_matched);

    // ─── 3) aggregate per level ──────────────────────────────────────
    let levels = aggregate_levels(&filtered)?;
    let regency_groups = levels.get(Level::Regency).len();
    let district_groups = levels.get(Level::District).len();
    let village_groups = levels.get(Level::Village).len();

    // ─── 4) unify + pivot, 5) sort + format ─────────────────────────
    let report = finalize(unify_and_pivot(levels));
    info!("preview of final data:\n{}", preview(&report, PREVIEW_ROWS));

    // ─── 6) write ────────────────────────────────────────────────────
    info!("saving to {}", config.output_path.display());
    let format = write_report(&report, &config.output_path)?;
    info!(elapsed = ?start.elapsed(), rows = report.len(), "done");

    Ok(RunSummary {
        rows_read,
        rows_matched,
        regency_groups,
        district_groups,
        village_groups,
        report_rows: report.len(),
        format,
        output_path: config.output_path.clone(),
    })
}
