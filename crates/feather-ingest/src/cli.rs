//! Positional argument parsing shared by the two binaries.

use std::time::Duration;

use feather_core::error::{FeatherError, Result};

/// Exit code for a malformed command line.
pub const USAGE_EXIT: u8 = 2;

/// Parse an optional integer millisecond argument. Absent -> `None`.
pub fn parse_ms_arg(arg: Option<&str>) -> Result<Option<i64>> {
    match arg {
        None => Ok(None),
        Some(s) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| FeatherError::BadRequest(format!("expected an integer of milliseconds, got {s:?}"))),
    }
}

/// Server `sleep_ms`: negative values mean no delay.
pub fn work_delay_ms(arg: Option<i64>) -> Option<u64> {
    arg.map(|ms| ms.max(0) as u64)
}

/// Client `deadline_ms`: negative values mean no deadline.
pub fn deadline(arg: Option<i64>) -> Option<Duration> {
    arg.filter(|ms| *ms >= 0).map(|ms| Duration::from_millis(ms as u64))
}
