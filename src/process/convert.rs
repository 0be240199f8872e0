use crate::process::utils::clean_str;
use arrow::array::{Array, Int64Array, Int64Builder, StringArray};

/// Convert the raw count column to integers. Anything unparseable,
/// including nulls, becomes 0.
pub fn coerce_counts(raw: &StringArray) -> Int64Array {
    let mut b = Int64Builder::with_capacity(raw.len());
    for opt in raw.iter() {
        b.append_value(opt.map(parse_count).unwrap_or(0));
    }
    b.finish()
}

/// Integers parse directly; decimal text like `"12.0"` truncates toward zero.
pub fn parse_count(raw: &str) -> i64 {
    let c = clean_str(raw);
    if let Ok(v) = c.parse::<i64>() {
        return v;
    }
    match c.parse::<f64>() {
        Ok(v) if v.is_finite() => v.trunc() as i64,
        _ => 0,
    }
}
