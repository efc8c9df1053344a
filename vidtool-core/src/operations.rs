//! Operations and their parameter records.
//!
//! Every operation is one variant of [`Operation`]. Parameter records are
//! built with `new` (which fills in the defaults from `config`), adjusted
//! through their public fields, and checked once by [`Operation::validate`]
//! before anything is assembled.

use crate::config::{
    DEFAULT_CONVERT_EXTENSION, DEFAULT_GIF_FPS, DEFAULT_GIF_SCALE, DEFAULT_RESIZE_HEIGHT,
    DEFAULT_SLOMO_RATE_OUT,
};
use crate::error::{CoreError, CoreResult};
use crate::timemark::TimeRange;

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Halve the frame rate of high-frame-rate footage.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipifyParams {
    pub input: PathBuf,
}

impl ClipifyParams {
    #[must_use]
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
        }
    }
}

/// Re-mux files into another container without re-encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertParams {
    pub inputs: Vec<PathBuf>,
    /// Target extension without the leading dot.
    pub extension: String,
}

impl ConvertParams {
    #[must_use]
    pub fn new(inputs: Vec<PathBuf>) -> Self {
        Self {
            inputs,
            extension: DEFAULT_CONVERT_EXTENSION.to_string(),
        }
    }
}

/// Trim a file to a time range, re-encoding video.
#[derive(Debug, Clone, PartialEq)]
pub struct CutParams {
    pub input: PathBuf,
    pub range: TimeRange,
    pub name: Option<PathBuf>,
}

impl CutParams {
    #[must_use]
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            range: TimeRange::default(),
            name: None,
        }
    }
}

/// Extract a time range as a palette-optimized GIF.
#[derive(Debug, Clone, PartialEq)]
pub struct GifParams {
    pub input: PathBuf,
    pub range: TimeRange,
    pub fps: u32,
    /// Output width in pixels; height follows the aspect ratio.
    pub scale: u32,
    pub name: Option<PathBuf>,
}

impl GifParams {
    #[must_use]
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            range: TimeRange::default(),
            fps: DEFAULT_GIF_FPS,
            scale: DEFAULT_GIF_SCALE,
            name: None,
        }
    }
}

/// Re-encode files with NVENC H.264.
#[derive(Debug, Clone, PartialEq)]
pub struct ReencodeParams {
    pub inputs: Vec<PathBuf>,
    /// Encode audio to AAC instead of copying it.
    pub reencode_audio: bool,
    /// Only allowed with a single input.
    pub name: Option<PathBuf>,
}

impl ReencodeParams {
    #[must_use]
    pub fn new(inputs: Vec<PathBuf>) -> Self {
        Self {
            inputs,
            reencode_audio: false,
            name: None,
        }
    }
}

/// Strip all audio, copying video.
#[derive(Debug, Clone, PartialEq)]
pub struct SilenceParams {
    pub input: PathBuf,
    pub name: Option<PathBuf>,
}

impl SilenceParams {
    #[must_use]
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            name: None,
        }
    }
}

/// GPU resize to a target height.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeParams {
    pub input: PathBuf,
    pub height: u32,
}

impl ResizeParams {
    #[must_use]
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            height: DEFAULT_RESIZE_HEIGHT,
        }
    }
}

/// Which output frame rate `slomo` writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlomoOutputRate {
    /// Always `SLOMO_OUTPUT_FPS` (30), whatever `rate_out` is.
    #[default]
    Fixed,
    /// Use `rate_out` as the output frame rate.
    MatchRateOut,
}

/// Slow footage down by stretching timestamps by `rate_in / rate_out`.
#[derive(Debug, Clone, PartialEq)]
pub struct SlomoParams {
    pub input: PathBuf,
    pub rate_in: u32,
    pub rate_out: u32,
    pub name: Option<PathBuf>,
    pub output_rate: SlomoOutputRate,
}

impl SlomoParams {
    #[must_use]
    pub fn new(input: impl Into<PathBuf>, rate_in: u32) -> Self {
        Self {
            input: input.into(),
            rate_in,
            rate_out: DEFAULT_SLOMO_RATE_OUT,
            name: None,
            output_rate: SlomoOutputRate::default(),
        }
    }
}

/// The eight operations. Exactly one runs per invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Clipify(ClipifyParams),
    Convert(ConvertParams),
    Cut(CutParams),
    Gif(GifParams),
    Reencode(ReencodeParams),
    Silence(SilenceParams),
    Resize(ResizeParams),
    Slomo(SlomoParams),
}

/// Operation names as used on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Clipify,
    Convert,
    Cut,
    Gif,
    Reencode,
    Silence,
    Resize,
    Slomo,
}

impl OperationKind {
    pub const ALL: [OperationKind; 8] = [
        OperationKind::Clipify,
        OperationKind::Convert,
        OperationKind::Cut,
        OperationKind::Gif,
        OperationKind::Reencode,
        OperationKind::Silence,
        OperationKind::Resize,
        OperationKind::Slomo,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            OperationKind::Clipify => "clipify",
            OperationKind::Convert => "convert",
            OperationKind::Cut => "cut",
            OperationKind::Gif => "gif",
            OperationKind::Reencode => "reencode",
            OperationKind::Silence => "silence",
            OperationKind::Resize => "resize",
            OperationKind::Slomo => "slomo",
        }
    }

    /// Batch operations accept several inputs and process them in order.
    #[must_use]
    pub fn is_batch(self) -> bool {
        matches!(self, OperationKind::Convert | OperationKind::Reencode)
    }
}

impl FromStr for OperationKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| CoreError::UnknownOperation(s.to_string()))
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Operation {
    #[must_use]
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Clipify(_) => OperationKind::Clipify,
            Operation::Convert(_) => OperationKind::Convert,
            Operation::Cut(_) => OperationKind::Cut,
            Operation::Gif(_) => OperationKind::Gif,
            Operation::Reencode(_) => OperationKind::Reencode,
            Operation::Silence(_) => OperationKind::Silence,
            Operation::Resize(_) => OperationKind::Resize,
            Operation::Slomo(_) => OperationKind::Slomo,
        }
    }

    /// Checks parameter values. Called by the dispatcher before assembly.
    pub fn validate(&self) -> CoreResult<()> {
        match self {
            Operation::Clipify(p) => require_input(&p.input),
            Operation::Convert(p) => {
                require_inputs(&p.inputs)?;
                let ext = p.extension.trim_start_matches('.');
                if ext.is_empty() || ext.contains(['/', '\\']) {
                    return Err(CoreError::InvalidParameter(format!(
                        "'{}' is not a usable file extension",
                        p.extension
                    )));
                }
                Ok(())
            }
            Operation::Cut(p) => {
                require_input(&p.input)?;
                require_ordered(&p.range)
            }
            Operation::Gif(p) => {
                require_input(&p.input)?;
                require_ordered(&p.range)?;
                require_positive("fps", p.fps)?;
                require_positive("scale", p.scale)
            }
            Operation::Reencode(p) => {
                require_inputs(&p.inputs)?;
                if p.name.is_some() && p.inputs.len() > 1 {
                    return Err(CoreError::InvalidParameter(
                        "--name can only be used with a single input file".to_string(),
                    ));
                }
                Ok(())
            }
            Operation::Silence(p) => require_input(&p.input),
            Operation::Resize(p) => {
                require_input(&p.input)?;
                require_positive("scale", p.height)
            }
            Operation::Slomo(p) => {
                require_input(&p.input)?;
                require_positive("rate-in", p.rate_in)?;
                require_positive("rate-out", p.rate_out)
            }
        }
    }
}

fn require_input(input: &Path) -> CoreResult<()> {
    if input.as_os_str().is_empty() {
        return Err(CoreError::InvalidParameter(
            "input file name must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn require_inputs(inputs: &[PathBuf]) -> CoreResult<()> {
    if inputs.is_empty() {
        return Err(CoreError::InvalidParameter(
            "at least one input file is required".to_string(),
        ));
    }
    inputs.iter().try_for_each(|input| require_input(input))
}

fn require_positive(name: &str, value: u32) -> CoreResult<()> {
    if value == 0 {
        return Err(CoreError::InvalidParameter(format!(
            "--{name} must be greater than zero"
        )));
    }
    Ok(())
}

fn require_ordered(range: &TimeRange) -> CoreResult<()> {
    if range.end.as_seconds() <= range.start.as_seconds() {
        return Err(CoreError::InvalidParameter(format!(
            "end time {} must be after start time {}",
            range.end, range.start
        )));
    }
    Ok(())
}
