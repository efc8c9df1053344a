//! Trim boundaries in `HH:MM:SS` form.
//!
//! A [`TimeMark`] is only ever constructed from a string that passed
//! validation, so the stored text is also the value handed to ffmpeg's
//! `-ss`/`-to` options.

use crate::config::{DEFAULT_END_TIME, DEFAULT_START_TIME};
use crate::error::{CoreError, CoreResult};

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A validated 24-hour `HH:MM:SS` time of day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TimeMark(String);

impl TimeMark {
    /// Validates `input` and returns it unchanged on success.
    pub fn parse(input: &str) -> CoreResult<Self> {
        validate_time(input).map(|s| Self(s.to_string()))
    }

    /// `00:00:00`
    #[must_use]
    pub fn start_of_file() -> Self {
        Self(DEFAULT_START_TIME.to_string())
    }

    /// `23:59:59`
    #[must_use]
    pub fn end_of_file() -> Self {
        Self(DEFAULT_END_TIME.to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Seconds since midnight.
    #[must_use]
    pub fn as_seconds(&self) -> u32 {
        // Layout was checked in `validate_time`.
        let field = |range: std::ops::Range<usize>| -> u32 {
            self.0[range].parse().unwrap_or_default()
        };
        field(0..2) * 3600 + field(3..5) * 60 + field(6..8)
    }
}

impl FromStr for TimeMark {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TimeMark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Checks that `input` is exactly `HH:MM:SS` with hours 00-23 and
/// minutes/seconds 00-59. Returns the input untouched.
pub fn validate_time(input: &str) -> CoreResult<&str> {
    let invalid = || CoreError::InvalidTimeFormat(input.to_string());

    let bytes = input.as_bytes();
    if bytes.len() != 8 || bytes[2] != b':' || bytes[5] != b':' {
        return Err(invalid());
    }

    let two_digits = |pos: usize| -> Option<u8> {
        let (hi, lo) = (bytes[pos], bytes[pos + 1]);
        (hi.is_ascii_digit() && lo.is_ascii_digit()).then(|| (hi - b'0') * 10 + (lo - b'0'))
    };

    match (two_digits(0), two_digits(3), two_digits(6)) {
        (Some(h), Some(m), Some(s)) if h < 24 && m < 60 && s < 60 => Ok(input),
        _ => Err(invalid()),
    }
}

/// Start and end boundaries for trim-based operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeRange {
    pub start: TimeMark,
    pub end: TimeMark,
}

impl TimeRange {
    #[must_use]
    pub fn new(start: TimeMark, end: TimeMark) -> Self {
        Self { start, end }
    }

    /// True when the range still uses the whole-file defaults.
    #[must_use]
    pub fn is_whole_file(&self) -> bool {
        *self == Self::default()
    }
}

impl Default for TimeRange {
    fn default() -> Self {
        Self {
            start: TimeMark::start_of_file(),
            end: TimeMark::end_of_file(),
        }
    }
}
