// Utility helpers for cell coercion and number formatting.
//
// This module centralizes all the "dirty" value handling so the statistics
// engine and every generator apply the exact same cleaning rule. Consistent
// column-numeric detection across the pipeline depends on that.
use num_format::{Locale, ToFormattedString};
use serde_json::Value;

/// Best-effort conversion of an arbitrary cell value into `f64`.
///
/// - Numbers pass through unchanged.
/// - Strings are cleaned via [`clean_numeric_str`] and parsed.
/// - Everything else (booleans, nulls, nested values) yields `None`.
pub fn coerce_numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => clean_numeric_str(s),
        _ => None,
    }
}

/// Parse a string into `f64` while being forgiving about formatting that is
/// common in spreadsheet exports.
///
/// - Trims whitespace.
/// - Strips thousands separators (`,`), currency markers (`$`), and percent
///   signs (`%`) before parsing.
/// - Returns `None` for anything that cannot be safely parsed.
pub fn clean_numeric_str(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    let cleaned: String = s
        .chars()
        .filter(|c| !matches!(c, ',' | '$' | '%'))
        .collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

/// A cell counts as missing when the key is absent, the value is null, or
/// the value is a whitespace-only string.
pub fn is_cell_empty(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

pub fn format_number(n: f64, decimals: usize) -> String {
    // Format a floating-point value with:
    // - a fixed number of decimal places, and
    // - locale-aware thousands separators (e.g., `1,234,567.89`).
    let neg = n.is_sign_negative() && n != 0.0;
    let abs_n = n.abs();
    // First, format to a plain fixed-decimal string like `1234567.89`.
    let s = format!("{:.*}", decimals, abs_n);
    let mut parts = s.split('.');
    let int_part = parts.next().unwrap_or("0");
    let frac_part = parts.next();
    // Use `num-format` to insert commas into the integer portion.
    let int_val: i64 = int_part.parse().unwrap_or(0);
    let mut res = int_val.to_formatted_string(&Locale::en);
    if let Some(frac) = frac_part {
        if decimals > 0 {
            res.push('.');
            res.push_str(frac);
        }
    } else if decimals > 0 {
        res.push('.');
        res.push_str(&"0".repeat(decimals));
    }
    if neg {
        format!("-{}", res)
    } else {
        res
    }
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    // Thin wrapper around `num-format` for integer-like values, used for
    // record counts in narratives and console messages.
    n.to_formatted_string(&Locale::en)
}
