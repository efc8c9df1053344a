// ============================================================================
// vidtool-core/src/config.rs
// ============================================================================
//
// CONFIGURATION: Constants and run-time options
//
// This module defines the fixed encode parameters, the per-operation default
// values and the `RunOptions` record that controls how the dispatcher treats
// assembled commands (render only, execute, stop or continue on failure).
//
// USAGE:
// Operation parameter records (see `operations`) pull their defaults from
// the constants below. `RunOptions` is created by the consumer (vidtool-cli)
// and passed to the dispatcher.

use crate::error::{CoreError, CoreResult};

// ============================================================================
// ENCODER CONSTANTS
// ============================================================================

/// Hardware H.264 encoder used by every re-encoding operation.
/// There is no software fallback.
pub const NVENC_ENCODER: &str = "h264_nvenc";

/// Constant-quality level passed as `-cq`.
pub const NVENC_CQ: u8 = 23;

/// Encoder preset passed as `-preset`.
pub const NVENC_PRESET: &str = "fast";

/// Hardware decode backend paired with the NVENC encoder.
pub const HWACCEL_BACKEND: &str = "cuda";

/// Default program name used when rendering and spawning ffmpeg.
pub const DEFAULT_FFMPEG_PROGRAM: &str = "ffmpeg";

// ============================================================================
// OPERATION DEFAULTS
// ============================================================================

/// Default trim start (beginning of file).
pub const DEFAULT_START_TIME: &str = "00:00:00";

/// Default trim end. Longer than any clip this tool is used on, so it
/// effectively means "to the end of the file".
pub const DEFAULT_END_TIME: &str = "23:59:59";

/// Default target height for `resize`.
pub const DEFAULT_RESIZE_HEIGHT: u32 = 640;

/// Default target width for `gif`.
pub const DEFAULT_GIF_SCALE: u32 = 320;

/// Default frame rate for `gif`.
pub const DEFAULT_GIF_FPS: u32 = 10;

/// Default target container for `convert`.
pub const DEFAULT_CONVERT_EXTENSION: &str = "mkv";

/// Default `--rate-out` for `slomo`.
pub const DEFAULT_SLOMO_RATE_OUT: u32 = 30;

/// Frame rate written by `slomo` unless `--match-rate-out` is given.
pub const SLOMO_OUTPUT_FPS: u32 = 30;

/// `clipify` only acts on footage strictly faster than this.
pub const CLIPIFY_THRESHOLD_FPS: f64 = 45.0;

// ============================================================================
// RUN OPTIONS
// ============================================================================

/// What to do when one file of a batch (convert, reencode) fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Abort the batch on the first failure and return that error.
    #[default]
    Stop,
    /// Attempt every file, then report how many failed.
    Continue,
}

/// How assembled commands are written to the output stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderFormat {
    /// One shell-quoted command line per invocation.
    #[default]
    Shell,
    /// One JSON object per invocation.
    Json,
}

/// Options controlling a single dispatcher run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Render commands without invoking the engine.
    pub dry_run: bool,

    pub failure_policy: FailurePolicy,

    pub render_format: RenderFormat,

    /// Program name shown in rendered commands and used for the
    /// hardware capability check.
    pub ffmpeg_program: String,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            failure_policy: FailurePolicy::default(),
            render_format: RenderFormat::default(),
            ffmpeg_program: DEFAULT_FFMPEG_PROGRAM.to_string(),
        }
    }
}

impl RunOptions {
    #[must_use]
    pub fn dry_run() -> Self {
        Self {
            dry_run: true,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.ffmpeg_program.trim().is_empty() {
            return Err(CoreError::InvalidParameter(
                "ffmpeg program name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
