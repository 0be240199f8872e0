use crate::error::Result;
use crate::process::{CensusField, CensusTable};
use arrow::{array::BooleanArray, compute::filter_record_batch};
use tracing::debug;

/// Keep rows whose village code starts with `prefix`, compared as text.
/// Null codes never match.
#[tracing::instrument(level = "debug", skip(table), fields(rows = table.num_rows()))]
pub fn filter_by_prefix(table: &CensusTable, prefix: &str) -> Result<CensusTable> {
    let codes = table.strings(CensusField::VillageCode)?;
    let mask: BooleanArray = codes
        .iter()
        .map(|code| Some(code.is_some_and(|c| c.starts_with(prefix))))
        .collect();
    let batch = filter_record_batch(&table.batch, &mask)?;
    debug!(kept = batch.num_rows(), "prefix filter applied");

    Ok(CensusTable {
        batch,
        columns: table.columns.clone(),
    })
}
