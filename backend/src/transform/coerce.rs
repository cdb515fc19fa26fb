//! Lenient numeric coercion for hand-edited sheet cells.
//!
//! Cells are read the way the dashboard front end reads them: a leading
//! number is taken and anything after it ignored (`"254 codes"` is `254`).
//! Cells without a leading number become `0`. Nothing here fails.

use once_cell::sync::Lazy;
use regex::Regex;

static INTEGER_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?\d+").expect("valid integer pattern"));

static FLOAT_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?").expect("valid float pattern")
});

/// Part-code count. Negative or malformed values become `0`; values past
/// `u32::MAX` saturate.
pub fn parse_count(raw: &str) -> u32 {
    let Some(m) = INTEGER_PREFIX.find(raw.trim()) else {
        return 0;
    };

    match m.as_str().strip_prefix('-') {
        Some(_) => 0,
        // Only digits remain, so the sole parse failure is overflow.
        None => m.as_str().trim_start_matches('+').parse::<u32>().unwrap_or(u32::MAX),
    }
}

/// Spend amount as a float, `0.0` when no leading number.
pub fn parse_amount(raw: &str) -> f64 {
    FLOAT_PREFIX
        .find(raw.trim())
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

/// Percentage cell as a plain number: every `%` is removed, so `"20%"` is `20.0`.
pub fn parse_percent(raw: &str) -> f64 {
    parse_amount(&raw.replace('%', ""))
}
