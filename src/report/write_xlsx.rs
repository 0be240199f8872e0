use crate::error::Result;
use crate::report::{ReportRow, REPORT_COLUMNS};
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;

pub const SHEET_NAME: &str = "Sheet1";

/// One worksheet: bold header row, then one row per unit with the counts
/// stored as numbers.
pub fn write_xlsx(rows: &[ReportRow], path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, name) in REPORT_COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *name, &header)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = u32::try_from(i + 1).unwrap_or(u32::MAX);
        worksheet.write_string(r, 0, &row.kode)?;
        worksheet.write_string(r, 1, &row.desa)?;
        worksheet.write_number(r, 2, row.laki_laki as f64)?;
        worksheet.write_number(r, 3, row.perempuan as f64)?;
        worksheet.write_number(r, 4, row.total as f64)?;
    }
    worksheet.autofit();

    workbook.save(path)?;
    Ok(())
}
