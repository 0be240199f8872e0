use crate::error::Result;
use crate::report::{report_batch, ReportRow};
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use std::fs::File;
use std::path::Path;

/// Single row group Parquet file carrying the report batch.
pub fn write_parquet(rows: &[ReportRow], path: &Path) -> Result<()> {
    let batch = report_batch(rows)?;
    let file = File::create(path)?;
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();
    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}
