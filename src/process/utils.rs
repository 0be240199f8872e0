/// Trim whitespace + strip outer quotes if present.
pub fn clean_str(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with('"') && trimmed.ends_with('"') && trimmed.len() >= 2 {
        trimmed[1..trimmed.len() - 1].trim().to_string()
    } else {
        trimmed.to_string()
    }
}

/// Header names arrive with stray newlines, padding and sometimes a BOM.
pub fn normalize_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}')
        .replace(['\n', '\r'], "")
        .trim()
        .to_string()
}

/// Reduce an administrative code to its bare digit string, dropping any
/// separators a pre-formatted code may carry.
pub fn clean_code(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_ascii_punctuation() && !c.is_whitespace())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_str_strips_quotes_and_padding() {
        assert_eq!(clean_str("  42 "), "42");
        assert_eq!(clean_str("\" 42\""), "42");
        assert_eq!(clean_str("\""), "\"");
    }

    #[test]
    fn test_normalize_header_removes_embedded_newlines() {
        assert_eq!(normalize_header(" jenis_\nkelamin \r\n"), "jenis_kelamin");
        assert_eq!(normalize_header("\u{feff}id"), "id");
        assert_eq!(normalize_header("kemendagri_kode_desa"), "kemendagri_kode_desa");
    }

    #[test]
    fn test_clean_code_drops_dots_and_spaces() {
        assert_eq!(clean_code("11.03.01.2001"), "1103012001");
        assert_eq!(clean_code(" 1103 "), "1103");
        assert_eq!(clean_code("11-03"), "1103");
        assert_eq!(clean_code("110301"), "110301");
    }
}
