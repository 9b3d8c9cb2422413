// Utility helpers for parsing and display formatting.
//
// This module centralizes the "dirty" CSV/number handling so the rest of
// the code can assume clean, typed values.
use num_format::{Locale, ToFormattedString};

/// Parse a string-like value into `f64` while being forgiving about
/// formatting issues that are common in MLS exports (commas, spaces, text).
///
/// - Accepts `Option<&str>` so callers can pass through optional fields.
/// - Trims whitespace.
/// - Rejects values that contain alphabetic characters, which also keeps
///   textual "NaN"/"inf" out of the averages.
/// - Strips thousands separators like `","` before parsing.
/// - Returns `None` for anything that cannot be safely parsed.
pub fn parse_f64_safe(s: Option<&str>) -> Option<f64> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    if s.chars().any(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let s = s.replace(",", "");
    s.parse::<f64>().ok()
}

/// Clean an identifier field: trim and strip thousands separators, but keep
/// the result as text. Identifiers are opaque tokens; a missing field
/// becomes the empty string rather than a parse failure.
pub fn clean_identifier(s: Option<&str>) -> String {
    match s {
        Some(raw) => raw.trim().replace(",", ""),
        None => String::new(),
    }
}

/// Mean over a list of optional values, skipping the missing ones entirely.
/// Missing values narrow the denominator; they are never counted as zero.
/// Returns `None` when no value is present at all.
pub fn mean_present(v: &[Option<f64>]) -> Option<f64> {
    let mut sum = 0.0;
    let mut n = 0usize;
    for val in v.iter().flatten() {
        sum += val;
        n += 1;
    }
    if n == 0 {
        None
    } else {
        Some(sum / n as f64)
    }
}

pub fn format_number(n: f64, decimals: usize) -> String {
    // Format a floating-point value with:
    // - a fixed number of decimal places, and
    // - locale-aware thousands separators (e.g., `1,234,567.89`).
    let neg = n.is_sign_negative();
    let abs_n = n.abs();
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

/// Dollar formatting for console metrics; missing means render as "n/a"
/// so an empty subset never shows up as a misleading $0.
pub fn format_opt_money(v: Option<f64>, decimals: usize) -> String {
    match v {
        Some(n) => format!("${}", format_number(n, decimals)),
        None => "n/a".to_string(),
    }
}

/// Separator-free rendering for re-export. Whole numbers are written
/// without a decimal point so a reloaded file parses to the same values;
/// a missing field is written as an empty cell.
pub fn format_plain(v: Option<f64>) -> String {
    match v {
        Some(n) if n.fract() == 0.0 && n.abs() < 9e15 => format!("{}", n as i64),
        Some(n) => format!("{}", n),
        None => String::new(),
    }
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    // Thin wrapper around `num-format` for integer-like values, used for
    // row counts in console messages (e.g., `1,234 rows loaded`).
    n.to_formatted_string(&Locale::en)
}
