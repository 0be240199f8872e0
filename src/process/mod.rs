// src/process/mod.rs
pub mod aggregate;
pub mod columns;
pub mod convert;
pub mod filter;
pub mod format;
pub mod pivot;
pub mod utils;

use crate::error::{PipelineError, Result};
use arrow::{
    array::{ArrayRef, StringArray, StringBuilder},
    datatypes::{DataType, Field, Schema},
    error::ArrowError,
    record_batch::RecordBatch,
};
use csv::ReaderBuilder;
use std::{
    fs::File,
    io::{self, BufReader, Read},
    path::Path,
    sync::Arc,
};
use tracing::{debug, info};

pub use aggregate::{aggregate_levels, Level, LevelRow, LevelTables};
pub use columns::{CensusField, ColumnMap};
pub use filter::filter_by_prefix;
pub use format::{finalize, format_code};
pub use pivot::{unify_and_pivot, UnifiedRow};

/// A census file held in memory. Every column is `Utf8` so codes keep
/// their leading zeros; empty fields are null.
#[derive(Debug, Clone)]
pub struct CensusTable {
    pub batch: RecordBatch,
    pub columns: ColumnMap,
}

impl CensusTable {
    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    /// The text column backing `field`.
    pub fn strings(&self, field: CensusField) -> Result<&StringArray> {
        let idx = self.columns.index(field);
        self.batch
            .column(idx)
            .as_any()
            .downcast_ref::<StringArray>()
            .ok_or_else(|| {
                ArrowError::CastError(format!(
                    "column {} ({}) is not Utf8",
                    idx,
                    field.label()
                ))
                .into()
            })
    }
}

/// Open `path` and load it as a semicolon-delimited census table.
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_census<P: AsRef<Path>>(path: P) -> Result<CensusTable> {
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(PipelineError::InputNotFound(path.to_path_buf()))
        }
        Err(e) => return Err(e.into()),
    };
    let table = read_census(BufReader::new(file))?;
    info!(
        rows = table.num_rows(),
        columns = table.batch.num_columns(),
        "loaded census table"
    );
    Ok(table)
}

/// Parse census CSV from any reader. Short rows pad with nulls, long rows
/// are cut to the header width.
pub fn read_census<R: Read>(reader: R) -> Result<CensusTable> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(utils::normalize_header)
        .collect();
    debug!(?headers, "normalized headers");
    let columns = ColumnMap::resolve(&headers)?;

    let mut builders: Vec<StringBuilder> = headers.iter().map(|_| StringBuilder::new()).collect();
    for result in rdr.records() {
        let record = result?;
        for (i, builder) in builders.iter_mut().enumerate() {
            match record.get(i) {
                Some(v) if !v.is_empty() => builder.append_value(v),
                _ => builder.append_null(),
            }
        }
    }

    let fields: Vec<Field> = headers
        .iter()
        .map(|name| Field::new(name, DataType::Utf8, true))
        .collect();
    let arrays: Vec<ArrayRef> = builders
        .into_iter()
        .map(|mut b| Arc::new(b.finish()) as ArrayRef)
        .collect();
    let batch = RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)?;

    Ok(CensusTable { batch, columns })
}
