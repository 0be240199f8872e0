use std::path::PathBuf;

pub const INPUT_FILE: &str = "jumlah-penduduk-desa-berdasarkan-jenis-kelamin.csv";
pub const OUTPUT_FILE: &str = "Population_Data_Processed.xlsx";
pub const FILTER_PREFIX: &str = "1103";

/// Everything a run needs, built once at startup and handed to [`crate::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Semicolon-delimited census file.
    pub input_path: PathBuf,
    /// Report destination; the extension picks the format.
    pub output_path: PathBuf,
    /// Village-code prefix selecting the regional subtree.
    pub prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            input_path: PathBuf::from(INPUT_FILE),
            output_path: PathBuf::from(OUTPUT_FILE),
            prefix: FILTER_PREFIX.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_uses_compiled_constants() {
        let cfg = Config::default();
        assert_eq!(cfg.input_path, PathBuf::from(INPUT_FILE));
        assert_eq!(cfg.output_path, PathBuf::from(OUTPUT_FILE));
        assert_eq!(cfg.prefix, "1103");
    }
}
