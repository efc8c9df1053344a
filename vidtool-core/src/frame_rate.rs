//! Rational frame rates as reported by ffprobe (`30000/1001`).

use serde::Serialize;
use std::fmt;

/// A positive frame rate expressed as `num/den` frames per second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrameRate {
    num: u32,
    den: u32,
}

impl FrameRate {
    /// Returns `None` unless both parts are non-zero.
    #[must_use]
    pub fn new(num: u32, den: u32) -> Option<Self> {
        (num > 0 && den > 0).then_some(Self { num, den })
    }

    /// Parses ffprobe's `num/den` notation. ffprobe writes `0/0` for
    /// unknown rates, which is treated as absent.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let (num, den) = value.trim().split_once('/')?;
        Self::new(num.parse().ok()?, den.parse().ok()?)
    }

    /// Picks the average frame rate, falling back to the nominal (`r_frame_rate`) one.
    #[must_use]
    pub fn from_stream_fields(avg_frame_rate: &str, r_frame_rate: &str) -> Option<Self> {
        Self::parse(avg_frame_rate).or_else(|| Self::parse(r_frame_rate))
    }

    #[must_use]
    pub fn fps(&self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    #[must_use]
    pub fn numerator(&self) -> u32 {
        self.num
    }

    #[must_use]
    pub fn denominator(&self) -> u32 {
        self.den
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}
