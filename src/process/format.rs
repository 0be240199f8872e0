use crate::process::UnifiedRow;
use crate::report::ReportRow;

/// Dotted notation by code length: `1103` → `11.03`, `110301` → `11.03.01`,
/// `1103012001` → `11.03.01.2001`. Other lengths come back as given (trimmed).
pub fn format_code(code: &str) -> String {
    let s = code.trim();
    if !s.is_ascii() {
        return s.to_string();
    }
    match s.len() {
        4 => format!("{}.{}", &s[..2], &s[2..]),
        6 => format!("{}.{}.{}", &s[..2], &s[2..4], &s[4..]),
        10 => format!("{}.{}.{}.{}", &s[..2], &s[2..4], &s[4..6], &s[6..]),
        _ => s.to_string(),
    }
}

/// Sort on the raw digit code, then format codes and add the total.
///
/// Lexical order on raw codes puts every code directly ahead of its
/// descendants because a child code extends its parent. Formatting must come
/// after the sort.
pub fn finalize(mut rows: Vec<UnifiedRow>) -> Vec<ReportRow> {
    rows.sort_by(|a, b| a.code.cmp(&b.code).then_with(|| a.name.cmp(&b.name)));
    rows.into_iter()
        .map(|r| ReportRow {
            kode: format_code(&r.code),
            desa: r.name,
            laki_laki: r.male,
            perempuan: r.female,
            total: r.male.saturating_add(r.female),
        })
        .collect()
}
