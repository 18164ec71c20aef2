//! Fee aggregation: sum the three fee categories of a bucket and rescale from
//! the on-chain 10^30 fixed-point representation.
//!
//! Sums are accumulated exactly as 256-bit integers and converted to `f64`
//! once, so the only rounding is the final conversion and the scale multiply.
//! A field that is not a non-negative decimal integer fails the whole bucket
//! with [`FeesError::InvalidAmount`] instead of yielding NaN.

use alloy_primitives::U256;

use crate::error::{FeesError, Result};
use crate::models::{FeeStatsRecord, FeeStatsResponse};

/// Multiplier taking a raw on-chain amount to its human decimal value.
pub const FEE_SCALE: f64 = 1e-30;

/// Parse one fee field as a non-negative decimal integer.
pub fn parse_amount(field: &'static str, value: &str) -> Result<U256> {
    let invalid = || FeesError::InvalidAmount {
        field,
        value: value.to_string(),
    };
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    U256::from_str_radix(value, 10).map_err(|_| invalid())
}

/// Exact integer sum of `liquidation + margin + swap`.
pub fn sum_record(record: &FeeStatsRecord) -> Result<U256> {
    let mut total = U256::ZERO;
    for (field, value) in record.fields() {
        total = total
            .checked_add(parse_amount(field, value)?)
            .ok_or_else(|| FeesError::InvalidAmount {
                field,
                value: value.to_string(),
            })?;
    }
    Ok(total)
}

/// Convert a raw fixed-point amount to a decimal fee figure.
pub fn scale(raw: U256) -> f64 {
    // Decimal-string parsing is correctly rounded; a U256 always fits f64's range.
    let as_float: f64 = raw.to_string().parse().unwrap_or(f64::INFINITY);
    as_float * FEE_SCALE
}

/// Scaled fee total for a bucket, or `None` unless it holds exactly one record.
pub fn aggregate(response: &FeeStatsResponse) -> Result<Option<f64>> {
    match response.records() {
        [record] => Ok(Some(scale(sum_record(record)?))),
        _ => Ok(None),
    }
}
