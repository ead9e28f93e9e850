//! Decimal-string ⇄ base-unit conversion.
//!
//! Token amounts travel on-chain as integers scaled by `10^decimals`.
//! User input and display values are decimal strings. Conversions are
//! exact: no floating point is involved anywhere on this path.
//!
//! Formatting follows the common wallet convention of trimming trailing
//! fractional zeros while keeping at least one fractional digit, so
//! `25 * 10^18` at 18 decimals renders as `"25.0"`.

use alloy::primitives::U256;
use thiserror::Error;

/// Largest supported decimal scale (`10^77` overflows `U256`).
pub const MAX_DECIMALS: u8 = 76;

/// Reasons a decimal string cannot be converted to base units.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitsError {
    #[error("amount is empty")]
    Empty,
    #[error("negative amounts are not allowed")]
    Negative,
    #[error("invalid character {0:?} in amount")]
    InvalidDigit(char),
    #[error("amount has {found} fractional digits, token supports {max}")]
    TooManyDecimals { found: usize, max: u8 },
    #[error("amount does not fit in 256 bits")]
    Overflow,
    #[error("unsupported decimal scale {0}")]
    UnsupportedDecimals(u8),
}

/// Parse a decimal string into base units at `decimals` scale.
///
/// Accepts `"10"`, `"10.5"`, `".5"` and `"5."`. Surrounding whitespace
/// is ignored. Signs, exponents and separators are rejected.
pub fn parse_units(amount: &str, decimals: u8) -> Result<U256, UnitsError> {
    if decimals > MAX_DECIMALS {
        return Err(UnitsError::UnsupportedDecimals(decimals));
    }

    let amount = amount.trim();
    if amount.is_empty() || amount == "." {
        return Err(UnitsError::Empty);
    }
    if amount.starts_with('-') {
        return Err(UnitsError::Negative);
    }

    let (whole, fraction) = amount.split_once('.').unwrap_or((amount, ""));

    if let Some(bad) = whole
        .chars()
        .chain(fraction.chars())
        .find(|c| !c.is_ascii_digit())
    {
        return Err(UnitsError::InvalidDigit(bad));
    }
    // Trailing zeros carry no value: "5.0" is valid at 0 decimals.
    let fraction = fraction.trim_end_matches('0');
    if fraction.len() > usize::from(decimals) {
        return Err(UnitsError::TooManyDecimals {
            found: fraction.len(),
            max: decimals,
        });
    }

    let scale = U256::from(10u8).pow(U256::from(decimals));
    let whole_value = digits_to_u256(whole)?;

    // Right-pad the fraction to the full scale: "5" at 3 decimals → 500.
    let padding = usize::from(decimals) - fraction.len();
    let fraction_value = digits_to_u256(fraction)?
        .checked_mul(U256::from(10u8).pow(U256::from(padding)))
        .ok_or(UnitsError::Overflow)?;

    whole_value
        .checked_mul(scale)
        .and_then(|v| v.checked_add(fraction_value))
        .ok_or(UnitsError::Overflow)
}

/// Format a base-unit integer as a decimal string at `decimals` scale.
pub fn format_units(value: U256, decimals: u8) -> String {
    let digits = value.to_string();
    let decimals = usize::from(decimals.min(MAX_DECIMALS));

    if decimals == 0 {
        return format!("{digits}.0");
    }

    let padded = if digits.len() <= decimals {
        format!("{}{digits}", "0".repeat(decimals - digits.len() + 1))
    } else {
        digits
    };

    let (whole, fraction) = padded.split_at(padded.len() - decimals);
    let fraction = fraction.trim_end_matches('0');
    let fraction = if fraction.is_empty() { "0" } else { fraction };

    format!("{whole}.{fraction}")
}

/// `true` when `amount` parses to a strictly positive value.
pub fn is_positive_amount(amount: &str, decimals: u8) -> bool {
    parse_units(amount, decimals).is_ok_and(|v| !v.is_zero())
}

fn digits_to_u256(digits: &str) -> Result<U256, UnitsError> {
    if digits.is_empty() {
        return Ok(U256::ZERO);
    }
    U256::from_str_radix(digits, 10).map_err(|_| UnitsError::Overflow)
}
