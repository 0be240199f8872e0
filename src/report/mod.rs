// src/report/mod.rs
pub mod write_csv;
pub mod write_parquet;
pub mod write_xlsx;

use crate::error::Result;
use arrow::{
    array::{ArrayRef, Int64Array, StringArray},
    datatypes::{DataType, Field, Schema},
    record_batch::RecordBatch,
};
use serde::Serialize;
use std::{
    fmt, fs,
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing::{debug, info, instrument};

pub const REPORT_COLUMNS: [&str; 5] = ["KODE", "DESA", "LAKI-LAKI", "PEREMPUAN", "TOTAL"];

/// Rows shown in the log before the report is written.
pub const PREVIEW_ROWS: usize = 5;

/// One output line: formatted code, unit name, and the three counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    #[serde(rename = "KODE")]
    pub kode: String,
    #[serde(rename = "DESA")]
    pub desa: String,
    #[serde(rename = "LAKI-LAKI")]
    pub laki_laki: i64,
    #[serde(rename = "PEREMPUAN")]
    pub perempuan: i64,
    #[serde(rename = "TOTAL")]
    pub total: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Xlsx,
    Csv,
    Parquet,
}

impl ReportFormat {
    /// Chosen by extension; anything unrecognized gets a spreadsheet.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("csv") => ReportFormat::Csv,
            Some("parquet") => ReportFormat::Parquet,
            _ => ReportFormat::Xlsx,
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReportFormat::Xlsx => "xlsx",
            ReportFormat::Csv => "csv",
            ReportFormat::Parquet => "parquet",
        };
        f.write_str(s)
    }
}

pub fn report_schema() -> Schema {
    Schema::new(vec![
        Field::new(REPORT_COLUMNS[0], DataType::Utf8, false),
        Field::new(REPORT_COLUMNS[1], DataType::Utf8, false),
        Field::new(REPORT_COLUMNS[2], DataType::Int64, false),
        Field::new(REPORT_COLUMNS[3], DataType::Int64, false),
        Field::new(REPORT_COLUMNS[4], DataType::Int64, false),
    ])
}

/// The report as an Arrow batch with the fixed five-column schema.
pub fn report_batch(rows: &[ReportRow]) -> Result<RecordBatch> {
    let kode = StringArray::from_iter_values(rows.iter().map(|r| r.kode.as_str()));
    let desa = StringArray::from_iter_values(rows.iter().map(|r| r.desa.as_str()));
    let laki = Int64Array::from_iter_values(rows.iter().map(|r| r.laki_laki));
    let perempuan = Int64Array::from_iter_values(rows.iter().map(|r| r.perempuan));
    let total = Int64Array::from_iter_values(rows.iter().map(|r| r.total));

    let columns: Vec<ArrayRef> = vec![
        Arc::new(kode),
        Arc::new(desa),
        Arc::new(laki),
        Arc::new(perempuan),
        Arc::new(total),
    ];
    Ok(RecordBatch::try_new(Arc::new(report_schema()), columns)?)
}

/// Render the first `n` rows as an aligned text table.
pub fn preview(rows: &[ReportRow], n: usize) -> String {
    let cells: Vec<[String; 5]> = rows
        .iter()
        .take(n)
        .map(|r| {
            [
                r.kode.clone(),
                r.desa.clone(),
                r.laki_laki.to_string(),
                r.perempuan.to_string(),
                r.total.to_string(),
            ]
        })
        .collect();

    let mut widths = REPORT_COLUMNS.map(str::len);
    for row in &cells {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let mut push_line = |values: [&str; 5]| {
        let line: Vec<String> = values
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(i, (v, w))| {
                if i < 2 {
                    format!("{v:<w$}")
                } else {
                    format!("{v:>w$}")
                }
            })
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
    };
    push_line(REPORT_COLUMNS);
    for row in &cells {
        push_line([
            row[0].as_str(),
            row[1].as_str(),
            row[2].as_str(),
            row[3].as_str(),
            row[4].as_str(),
        ]);
    }
    if rows.len() > n {
        out.push_str(&format!("... {} more rows\n", rows.len() - n));
    }
    out
}

/// Write the report to `path` in the format its extension names.
///
/// Output goes to a hidden sibling file that is renamed into place, so a
/// failed write leaves nothing at `path`.
#[instrument(level = "info", skip(rows, path), fields(path = %path.display(), rows = rows.len()))]
pub fn write_report(rows: &[ReportRow], path: &Path) -> Result<ReportFormat> {
    let format = ReportFormat::from_path(path);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let staging = staging_path(path);
    debug!(staging = %staging.display(), %format, "writing report");
    let written = match format {
        ReportFormat::Xlsx => write_xlsx::write_xlsx(rows, &staging),
        ReportFormat::Csv => write_csv::write_csv(rows, &staging),
        ReportFormat::Parquet => write_parquet::write_parquet(rows, &staging),
    };
    if let Err(e) = written {
        let _ = fs::remove_file(&staging);
        return Err(e);
    }
    if let Err(e) = fs::rename(&staging, path) {
        let _ = fs::remove_file(&staging);
        return Err(e.into());
    }

    info!(%format, "report written");
    Ok(format)
}

fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "report".to_string());
    path.with_file_name(format!(".{name}.partial"))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use anyhow::Result;
    use arrow::array::Array;

    pub(crate) fn sample_rows() -> Vec<ReportRow> {
        vec![
            ReportRow {
                kode: "11.03".into(),
                desa: "ACEH SELATAN".into(),
                laki_laki: 50,
                perempuan: 30,
                total: 80,
            },
            ReportRow {
                kode: "11.03.01".into(),
                desa: "TRUMON".into(),
                laki_laki: 50,
                perempuan: 30,
                total: 80,
            },
            ReportRow {
                kode: "11.03.01.2001".into(),
                desa: "KUTA PADANG".into(),
                laki_laki: 50,
                perempuan: 30,
                total: 80,
            },
        ]
    }

    #[test]
    fn test_format_follows_extension() {
        assert_eq!(ReportFormat::from_path(Path::new("out.xlsx")), ReportFormat::Xlsx);
        assert_eq!(ReportFormat::from_path(Path::new("out.CSV")), ReportFormat::Csv);
        assert_eq!(ReportFormat::from_path(Path::new("a/b.parquet")), ReportFormat::Parquet);
        assert_eq!(ReportFormat::from_path(Path::new("report")), ReportFormat::Xlsx);
    }

    #[test]
    fn test_batch_has_fixed_schema() -> Result<()> {
        let batch = report_batch(&sample_rows())?;
        assert_eq!(batch.num_rows(), 3);
        let names: Vec<String> = batch
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect();
        assert_eq!(names, REPORT_COLUMNS);
        let total = batch
            .column(4)
            .as_any()
            .downcast_ref::<Int64Array>()
            .expect("TOTAL is Int64");
        assert_eq!(total.len(), 3);
        assert_eq!(total.value(2), 80);
        Ok(())
    }

    #[test]
    fn test_preview_aligns_and_truncates() {
        let text = preview(&sample_rows(), 2);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("KODE"));
        assert!(lines[1].starts_with("11.03     ACEH SELATAN"));
        assert_eq!(lines[3], "... 1 more rows");
    }

    #[test]
    fn test_staging_file_is_a_hidden_sibling() {
        let p = staging_path(Path::new("/tmp/out/report.xlsx"));
        assert_eq!(p, PathBuf::from("/tmp/out/.report.xlsx.partial"));
    }

    #[test]
    fn test_write_report_creates_parent_and_leaves_no_staging() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("nested").join("report.csv");
        let format = write_report(&sample_rows(), &path)?;
        assert_eq!(format, ReportFormat::Csv);
        assert!(path.exists());
        assert!(!staging_path(&path).exists());
        Ok(())
    }
}
