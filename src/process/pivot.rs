use crate::process::{aggregate::accumulate, utils::clean_code, LevelRow, LevelTables};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

pub const MALE_MARKER: &str = "laki";
pub const FEMALE_MARKER: &str = "perempuan";

/// One administrative unit with its population split by gender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnifiedRow {
    pub code: String,
    pub name: String,
    pub male: i64,
    pub female: i64,
}

/// Which gender labels in the data feed the male and female columns.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GenderColumns<'a> {
    pub male: Option<&'a str>,
    pub female: Option<&'a str>,
}

/// Pick the first label (in byte order) containing each marker,
/// case-insensitively. A label claimed for male is not reused for female.
pub fn resolve_gender_columns<'a>(labels: &BTreeSet<&'a str>) -> GenderColumns<'a> {
    let male = first_label_with(labels, MALE_MARKER, None);
    let female = first_label_with(labels, FEMALE_MARKER, male);
    GenderColumns { male, female }
}

fn first_label_with<'a>(
    labels: &BTreeSet<&'a str>,
    marker: &str,
    skip: Option<&str>,
) -> Option<&'a str> {
    labels
        .iter()
        .copied()
        .filter(|l| skip.map_or(true, |s| s != *l))
        .find(|l| l.to_lowercase().contains(marker))
}

/// Stack the three levels, normalize codes, then pivot gender into columns.
///
/// Duplicate (code, name, gender) cells are summed. A gender absent from the
/// data leaves its column at zero for every row.
#[tracing::instrument(level = "debug", skip(levels))]
pub fn unify_and_pivot(levels: LevelTables) -> Vec<UnifiedRow> {
    let long: Vec<LevelRow> = levels
        .into_long()
        .map(|mut r| {
            r.code = clean_code(&r.code);
            r
        })
        .collect();

    let cells = accumulate(
        long.iter()
            .map(|r| (r.code.as_str(), r.name.as_str(), r.gender.as_str(), r.count)),
    );

    let labels: BTreeSet<&str> = cells.iter().map(|c| c.gender.as_str()).collect();
    let columns = resolve_gender_columns(&labels);
    debug!(?labels, ?columns, "gender columns");
    if columns.male.is_none() {
        warn!("no male gender label found, LAKI-LAKI column will be zero");
    }
    if columns.female.is_none() {
        warn!("no female gender label found, PEREMPUAN column will be zero");
    }
    for label in &labels {
        if Some(*label) != columns.male && Some(*label) != columns.female {
            warn!(label = %label, "gender label matches no report column, ignored");
        }
    }

    let mut wide: BTreeMap<(&str, &str), UnifiedRow> = BTreeMap::new();
    for cell in &cells {
        let row = wide
            .entry((cell.code.as_str(), cell.name.as_str()))
            .or_insert_with(|| UnifiedRow {
                code: cell.code.clone(),
                name: cell.name.clone(),
                male: 0,
                female: 0,
            });
        let label = Some(cell.gender.as_str());
        if label == columns.male {
            row.male = row.male.saturating_add(cell.count);
        } else if label == columns.female {
            row.female = row.female.saturating_add(cell.count);
        }
    }

    wide.into_values().collect()
}
