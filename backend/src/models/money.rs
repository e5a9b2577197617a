//! Money helpers
//!
//! All money values in this crate are i64 integer cents. Binary floating
//! point never touches an amount: decimal boundary values are parsed
//! straight into cents, and all share arithmetic is integer division with
//! explicit round-half-up at the point a share is finalized.
//!
//! CRITICAL: All money values are i64 (cents)

use thiserror::Error;

/// Errors that can occur when parsing boundary money values
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("invalid money literal: {input:?}")]
    InvalidFormat { input: String },

    #[error("too many fraction digits (max 2): {input:?}")]
    TooManyFractionDigits { input: String },

    #[error("money value out of range: {input:?}")]
    Overflow { input: String },
}

/// Integer division with round-half-up
///
/// Exact .5 fractions round away from zero, which for the non-negative
/// amounts the engines produce is round-half-up. The denominator must be
/// positive.
///
/// # Example
/// ```
/// use bill_split_core_rs::models::money::round_half_up_div;
///
/// assert_eq!(round_half_up_div(825, 100), 8);  // 8.25 -> 8
/// assert_eq!(round_half_up_div(850, 100), 9);  // 8.50 -> 9
/// assert_eq!(round_half_up_div(875, 100), 9);  // 8.75 -> 9
/// ```
pub fn round_half_up_div(numerator: i128, denominator: i128) -> i64 {
    debug_assert!(denominator > 0, "denominator must be positive");
    let half = denominator / 2;
    let adjusted = if numerator >= 0 {
        numerator + half
    } else {
        numerator - half
    };
    (adjusted / denominator) as i64
}

/// Apply a basis-point fraction to an amount, rounding half-up
///
/// 10000 bps = 100%. Uses i128 internally so large totals cannot overflow.
///
/// # Example
/// ```
/// use bill_split_core_rs::models::money::apply_bps;
///
/// // 60% of 250.00
/// assert_eq!(apply_bps(25_000, 6_000), 15_000);
/// // 8.25% of 10.00 = 0.825 -> 0.83
/// assert_eq!(apply_bps(1_000, 825), 83);
/// ```
pub fn apply_bps(amount_cents: i64, bps: i64) -> i64 {
    round_half_up_div(amount_cents as i128 * bps as i128, 10_000)
}

/// Parse a decimal money literal ("123.45", "7", "-0.50") into cents
///
/// At most two fraction digits are accepted; the boundary contract is that
/// callers already work in 2-decimal currency, so extra precision is an
/// input error rather than something to round silently.
pub fn parse_cents(input: &str) -> Result<i64, MoneyError> {
    let trimmed = input.trim();
    let (negative, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let invalid = || MoneyError::InvalidFormat {
        input: input.to_string(),
    };

    let (whole, frac) = match body.split_once('.') {
        Some((_, f)) if f.is_empty() => return Err(invalid()), // trailing dot
        Some((w, f)) => (w, f),
        None => (body, ""),
    };

    if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    if !frac.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    if frac.len() > 2 {
        return Err(MoneyError::TooManyFractionDigits {
            input: input.to_string(),
        });
    }

    let overflow = || MoneyError::Overflow {
        input: input.to_string(),
    };

    let whole_value: i64 = whole.parse().map_err(|_| overflow())?;
    let frac_value: i64 = if frac.is_empty() {
        0
    } else if frac.len() == 1 {
        // "4.5" means 50 cents, not 5
        frac.parse::<i64>().map_err(|_| overflow())? * 10
    } else {
        frac.parse().map_err(|_| overflow())?
    };

    let magnitude = whole_value
        .checked_mul(100)
        .and_then(|w| w.checked_add(frac_value))
        .ok_or_else(overflow)?;

    Ok(if negative { -magnitude } else { magnitude })
}

/// Render cents as a decimal string ("123.45")
///
/// Used in warnings and test assertions; UI formatting and localization
/// live outside the engine.
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let magnitude = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, magnitude / 100, magnitude % 100)
}
