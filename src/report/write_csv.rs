use crate::error::Result;
use crate::report::{ReportRow, REPORT_COLUMNS};
use csv::WriterBuilder;
use std::path::Path;

/// Comma-separated report, header first.
pub fn write_csv(rows: &[ReportRow], path: &Path) -> Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_path(path)?;
    wtr.write_record(REPORT_COLUMNS)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}
