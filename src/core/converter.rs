//! Range converter - linear min-max rescaling onto an integer interval
//!
//! Every input keeps its position: entries that do not parse are recorded as
//! `None` in [`Conversion::slots`] instead of being dropped, so callers can
//! join the results back to their records by index.

use crate::error::{KonversiError, KonversiResult};
use crate::types::{Conversion, ConversionRange};
use regex::Regex;
use std::cmp::Ordering;
use std::sync::OnceLock;
use tracing::debug;

/// Split the comma separated surface form into ordered entries
pub fn split_input(text: &str) -> Vec<&str> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    text.split(',').collect()
}

/// Leading number of an entry: sign, digits with an optional fraction, exponent
const NUMBER_PREFIX: &str = r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?";

fn number_prefix() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(NUMBER_PREFIX).ok()).as_ref()
}

/// Parse a single entry by its leading number, so `"70 poin"` reads as 70.
/// Surrounding whitespace is ignored; NaN and infinities are unparseable.
pub fn parse_number(entry: &str) -> Option<f64> {
    let matched = number_prefix()?.find(entry.trim())?;
    matched
        .as_str()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Parse every entry, keeping one slot per input position
pub fn parse_numbers<S: AsRef<str>>(entries: &[S]) -> Vec<Option<f64>> {
    entries
        .iter()
        .map(|entry| parse_number(entry.as_ref()))
        .collect()
}

/// Rescale the numeric entries into `range`.
///
/// Rounding is half away from zero (`2.5 -> 3`, `-2.5 -> -3`). When all
/// parsed numbers are equal every surviving entry maps to `range.min`.
pub fn convert<S: AsRef<str>>(entries: &[S], range: ConversionRange) -> KonversiResult<Conversion> {
    let parsed = parse_numbers(entries);

    let numbers: Vec<f64> = parsed.iter().flatten().copied().collect();
    if numbers.is_empty() {
        return Err(KonversiError::InvalidInput);
    }

    range.validate()?;

    let lo = numbers.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = numbers.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    debug!(
        lo,
        hi,
        parsed = numbers.len(),
        skipped = parsed.len() - numbers.len(),
        "converting into [{}, {}]",
        range.min,
        range.max
    );

    let slots = parsed
        .iter()
        .map(|slot| slot.map(|x| rescale(x, lo, hi, range)))
        .collect();

    Ok(Conversion { range, slots })
}

/// Convert comma separated text
pub fn convert_text(text: &str, range: ConversionRange) -> KonversiResult<Conversion> {
    convert(&split_input(text), range)
}

/// Render values for display or the clipboard: `"85, 90, 95"`
pub fn join_values(values: &[i64]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Map `x` from `[lo, hi]` onto `range`. The extremes land exactly on the
/// bounds; everything in between is rounded half away from zero.
fn rescale(x: f64, lo: f64, hi: f64, range: ConversionRange) -> i64 {
    if x <= lo || hi <= lo {
        return range.min;
    }
    if x >= hi {
        return range.max;
    }

    let spread = hi - lo;
    let normalized = if spread.is_finite() {
        (x - lo) / spread
    } else {
        // Halved operands keep the spread finite near f64::MAX
        (x / 2.0 - lo / 2.0) / (hi / 2.0 - lo / 2.0)
    };

    let min = i128::from(range.min);
    let span = i128::from(range.max) - min;
    let offset = normalized.clamp(0.0, 1.0) * span as f64;
    let whole = offset.floor();
    let base = min + whole as i128;

    let value = match (offset - whole).partial_cmp(&0.5) {
        Some(Ordering::Greater) => base + 1,
        Some(Ordering::Equal) if base >= 0 => base + 1,
        _ => base,
    };

    value.clamp(min, i128::from(range.max)) as i64
}
