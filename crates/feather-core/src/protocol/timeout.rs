//! Deadline header (`grpc-timeout` encoding).
//!
//! Value is an ASCII integer of at most 8 digits followed by a unit:
//! `H` hours, `M` minutes, `S` seconds, `m` millis, `u` micros, `n` nanos.

use std::time::Duration;

use crate::error::{FeatherError, Result};

/// Header name carrying the caller's remaining deadline.
pub const HEADER: &str = "grpc-timeout";

const MAX_DIGITS: usize = 8;
const MAX_VALUE: u64 = 99_999_999;

/// Encode a timeout as whole milliseconds, saturating at the header maximum.
pub fn encode(timeout: Duration) -> String {
    let ms = timeout.as_millis();
    if ms > MAX_VALUE as u128 {
        tracing::debug!(ms = %ms, "timeout saturated to header maximum");
    }
    format!("{}m", ms.min(MAX_VALUE as u128))
}

pub fn decode(value: &str) -> Result<Duration> {
    let bad = || FeatherError::BadRequest(format!("invalid {HEADER}: {value:?}"));

    let unit = value.chars().last().ok_or_else(bad)?;
    let digits = &value[..value.len() - unit.len_utf8()];
    if digits.is_empty() || digits.len() > MAX_DIGITS || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(bad());
    }
    let n: u64 = digits.parse().map_err(|_| bad())?;

    let d = match unit {
        'H' => Duration::from_secs(n * 3600),
        'M' => Duration::from_secs(n * 60),
        'S' => Duration::from_secs(n),
        'm' => Duration::from_millis(n),
        'u' => Duration::from_micros(n),
        'n' => Duration::from_nanos(n),
        _ => return Err(bad()),
    };
    Ok(d)
}
