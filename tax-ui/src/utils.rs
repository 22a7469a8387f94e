use std::num::ParseIntError;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Digits grouped in threes by commas, with an optional sign and fraction.
static GROUPED_THOUSANDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?\d{1,3}(,\d{3})+(\.\d+)?$").expect("valid thousands regex")
});

/// Error returned when form text cannot be read as a number.
#[derive(Debug, Error)]
pub enum ParseNumberError {
    #[error("no value entered")]
    Empty,

    #[error("misplaced thousands separator in '{input}'")]
    Grouping { input: String },

    #[error("invalid decimal '{input}': {source}")]
    Decimal {
        input: String,
        #[source]
        source: rust_decimal::Error,
    },

    #[error("invalid integer '{input}': {source}")]
    Integer {
        input: String,
        #[source]
        source: ParseIntError,
    },
}

/// Trims whitespace and removes thousands separators.
///
/// Commas are only accepted between complete three-digit groups, so `1,5`
/// is rejected rather than read as `15`.
fn normalize_decimal_input(s: &str) -> Result<String, ParseNumberError> {
    let trimmed = s.trim();
    if !trimmed.contains(',') {
        return Ok(trimmed.to_string());
    }
    if !GROUPED_THOUSANDS.is_match(trimmed) {
        tracing::debug!(input = %s, "misplaced thousands separator");
        return Err(ParseNumberError::Grouping {
            input: s.to_string(),
        });
    }
    Ok(trimmed.replace(',', ""))
}

/// Parses a string into a [`Decimal`].
///
/// Handles comma as thousands separator (e.g. `"1,234.56"`). Empty or
/// whitespace-only input is an error.
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseNumberError> {
    let normalized = normalize_decimal_input(s)?;
    if normalized.is_empty() {
        return Err(ParseNumberError::Empty);
    }
    normalized.parse().map_err(|e| {
        tracing::debug!(input = %s, "invalid decimal: {}", e);
        ParseNumberError::Decimal {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Parses a whole, non-negative count. Values beyond `u64::MAX` are errors.
pub fn parse_count(s: &str) -> Result<u64, ParseNumberError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(ParseNumberError::Empty);
    }
    trimmed.parse().map_err(|e| {
        tracing::debug!(input = %s, "invalid integer: {}", e);
        ParseNumberError::Integer {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Rounds to two decimal places, halves away from zero.
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount as dollars with exactly two decimals and no thousands
/// separator, e.g. `$1072.49`.
pub fn format_currency(value: Decimal) -> String {
    format!("${:.2}", round_half_up(value))
}

/// Formats a percentage value with two decimals, e.g. `7.25%`.
pub fn format_percent(value: Decimal) -> String {
    format!("{:.2}%", round_half_up(value))
}
