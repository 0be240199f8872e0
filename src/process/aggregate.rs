use crate::error::Result;
use crate::process::{convert::coerce_counts, CensusField, CensusTable};
use arrow::array::{Array, Int64Array, StringArray};
use std::collections::HashMap;
use tracing::debug;

/// Administrative hierarchy levels, top down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Regency,
    District,
    Village,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Regency, Level::District, Level::Village];

    pub fn name(self) -> &'static str {
        match self {
            Level::Regency => "regency",
            Level::District => "district",
            Level::Village => "village",
        }
    }

    pub fn code_field(self) -> CensusField {
        match self {
            Level::Regency => CensusField::RegencyCode,
            Level::District => CensusField::DistrictCode,
            Level::Village => CensusField::VillageCode,
        }
    }

    pub fn name_field(self) -> CensusField {
        match self {
            Level::Regency => CensusField::RegencyName,
            Level::District => CensusField::DistrictName,
            Level::Village => CensusField::VillageName,
        }
    }
}

/// One (code, name, gender) group and its summed population. The same
/// shape is used at every level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelRow {
    pub code: String,
    pub name: String,
    pub gender: String,
    pub count: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelTables {
    pub regency: Vec<LevelRow>,
    pub district: Vec<LevelRow>,
    pub village: Vec<LevelRow>,
}

impl LevelTables {
    pub fn get(&self, level: Level) -> &[LevelRow] {
        match level {
            Level::Regency => &self.regency,
            Level::District => &self.district,
            Level::Village => &self.village,
        }
    }

    fn slot_mut(&mut self, level: Level) -> &mut Vec<LevelRow> {
        match level {
            Level::Regency => &mut self.regency,
            Level::District => &mut self.district,
            Level::Village => &mut self.village,
        }
    }

    /// All three levels stacked into one long table, top level first.
    pub fn into_long(self) -> impl Iterator<Item = LevelRow> {
        self.regency
            .into_iter()
            .chain(self.district)
            .chain(self.village)
    }
}

/// Sum the filtered table at each hierarchy level.
#[tracing::instrument(level = "debug", skip(table), fields(rows = table.num_rows()))]
pub fn aggregate_levels(table: &CensusTable) -> Result<LevelTables> {
    let counts = coerce_counts(table.strings(CensusField::Count)?);
    let genders = table.strings(CensusField::Gender)?;

    let mut out = LevelTables::default();
    for level in Level::ALL {
        let codes = table.strings(level.code_field())?;
        let names = table.strings(level.name_field())?;
        let rows = aggregate_level(codes, names, genders, &counts);
        debug!(level = level.name(), groups = rows.len(), "aggregated level");
        *out.slot_mut(level) = rows;
    }
    Ok(out)
}

/// Group one level's columns by (code, name, gender). Rows with a null key
/// part take no part in the grouping.
pub fn aggregate_level(
    codes: &StringArray,
    names: &StringArray,
    genders: &StringArray,
    counts: &Int64Array,
) -> Vec<LevelRow> {
    let entries = (0..codes.len()).filter_map(|i| {
        if codes.is_null(i) || names.is_null(i) || genders.is_null(i) {
            return None;
        }
        Some((codes.value(i), names.value(i), genders.value(i), counts.value(i)))
    });
    accumulate(entries)
}

/// Sum counts per (code, name, gender) key. Output is sorted by key.
pub fn accumulate<'a, I>(entries: I) -> Vec<LevelRow>
where
    I: IntoIterator<Item = (&'a str, &'a str, &'a str, i64)>,
{
    let mut acc: HashMap<(&'a str, &'a str, &'a str), i64> = HashMap::new();
    for (code, name, gender, count) in entries {
        let slot = acc.entry((code, name, gender)).or_insert(0);
        *slot = slot.saturating_add(count);
    }

    let mut keys: Vec<_> = acc.into_iter().collect();
    keys.sort_unstable_by(|a, b| a.0.cmp(&b.0));
    keys.into_iter()
        .map(|((code, name, gender), count)| LevelRow {
            code: code.to_string(),
            name: name.to_string(),
            gender: gender.to_string(),
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::read_census;
    use crate::test_support::{census_line, CENSUS_HEADER};
    use anyhow::Result;
    use proptest::prelude::*;
    use std::io::Cursor;

    fn row(code: &str, name: &str, gender: &str, count: i64) -> LevelRow {
        LevelRow {
            code: code.into(),
            name: name.into(),
            gender: gender.into(),
            count,
        }
    }

    fn table(lines: &[String]) -> Result<CensusTable> {
        let content = format!("{CENSUS_HEADER}\n{}\n", lines.join("\n"));
        Ok(read_census(Cursor::new(content))?)
    }

    #[test]
    fn test_each_level_sums_over_its_own_granularity() -> Result<()> {
        let t = table(&[
            census_line(("1103", "X"), ("110301", "Y"), ("1103012001", "Z1"), "Laki-Laki", "50"),
            census_line(("1103", "X"), ("110301", "Y"), ("1103012001", "Z1"), "Perempuan", "30"),
            census_line(("1103", "X"), ("110301", "Y"), ("1103012002", "Z2"), "Laki-Laki", "5"),
            census_line(("1103", "X"), ("110302", "W"), ("1103022001", "Z3"), "Laki-Laki", "7"),
        ])?;
        let levels = aggregate_levels(&t)?;

        assert_eq!(
            levels.regency,
            vec![row("1103", "X", "Laki-Laki", 62), row("1103", "X", "Perempuan", 30)]
        );
        assert_eq!(
            levels.district,
            vec![
                row("110301", "Y", "Laki-Laki", 55),
                row("110301", "Y", "Perempuan", 30),
                row("110302", "W", "Laki-Laki", 7),
            ]
        );
        assert_eq!(levels.village.len(), 4);
        assert_eq!(levels.get(Level::Village)[0], row("1103012001", "Z1", "Laki-Laki", 50));
        Ok(())
    }

    #[test]
    fn test_unparseable_counts_contribute_zero() -> Result<()> {
        let t = table(&[
            census_line(("1103", "X"), ("110301", "Y"), ("1103012001", "Z"), "Laki-Laki", "N/A"),
            census_line(("1103", "X"), ("110301", "Y"), ("1103012002", "Q"), "Laki-Laki", "9"),
        ])?;
        let levels = aggregate_levels(&t)?;
        assert_eq!(levels.regency, vec![row("1103", "X", "Laki-Laki", 9)]);
        assert_eq!(levels.village[0], row("1103012001", "Z", "Laki-Laki", 0));
        Ok(())
    }

    #[test]
    fn test_null_keys_are_dropped_per_level() -> Result<()> {
        let t = table(&[
            census_line(("1103", ""), ("110301", "Y"), ("1103012001", "Z"), "Laki-Laki", "4"),
            census_line(("1103", "X"), ("110301", "Y"), ("1103012001", "Z"), "", "6"),
        ])?;
        let levels = aggregate_levels(&t)?;
        assert!(levels.regency.is_empty());
        assert_eq!(levels.district, vec![row("110301", "Y", "Laki-Laki", 4)]);
        Ok(())
    }

    #[test]
    fn test_long_form_stacks_levels_top_down() {
        let levels = LevelTables {
            regency: vec![row("1103", "X", "L", 1)],
            district: vec![row("110301", "Y", "L", 1)],
            village: vec![row("1103012001", "Z", "L", 1)],
        };
        let codes: Vec<String> = levels.into_long().map(|r| r.code).collect();
        assert_eq!(codes, vec!["1103", "110301", "1103012001"]);
    }

    fn entry_strategy() -> impl Strategy<Value = (String, String, String, i64)> {
        (
            prop::sample::select(vec!["1103", "110301", "1103012001"]),
            prop::sample::select(vec!["X", "Y"]),
            prop::sample::select(vec!["Laki-Laki", "Perempuan"]),
            0i64..100_000,
        )
            .prop_map(|(c, n, g, v)| (c.to_string(), n.to_string(), g.to_string(), v))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Re-summing an already aggregated table changes nothing.
        #[test]
        fn test_prop_accumulate_is_idempotent(entries in prop::collection::vec(entry_strategy(), 0..64)) {
            let once = accumulate(
                entries.iter().map(|(c, n, g, v)| (c.as_str(), n.as_str(), g.as_str(), *v)),
            );
            let twice = accumulate(
                once.iter().map(|r| (r.code.as_str(), r.name.as_str(), r.gender.as_str(), r.count)),
            );
            prop_assert_eq!(&once, &twice);

            let raw_total: i64 = entries.iter().map(|e| e.3).sum();
            let agg_total: i64 = once.iter().map(|r| r.count).sum();
            prop_assert_eq!(raw_total, agg_total);
        }
    }
}
