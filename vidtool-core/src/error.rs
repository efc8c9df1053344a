// ============================================================================
// vidtool-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Core error type and helpers
//
// All fallible operations in vidtool-core return `CoreResult<T>`. The
// `command_*_error` helpers build the engine-related variants so the
// executor and the ffprobe wrapper report failures uniformly.

use std::process::ExitStatus;
use thiserror::Error;

/// Errors produced while validating, assembling or executing an operation.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid time '{0}': expected HH:MM:SS (24-hour, zero-padded)")]
    InvalidTimeFormat(String),

    #[error("No video frame rate available for {0}")]
    ProbeUnavailable(String),

    #[error("Unknown operation '{0}'")]
    UnknownOperation(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Path error: {0}")]
    PathError(String),

    #[error(
        "Hardware encoder '{0}' is unavailable. An NVIDIA GPU with NVENC support \
         and an ffmpeg build with CUDA enabled are required"
    )]
    HardwareEncoderUnavailable(String),

    #[error("Failed to start '{0}': {1}")]
    CommandStart(String, std::io::Error),

    #[error("Failed while waiting for '{0}': {1}")]
    CommandWait(String, std::io::Error),

    #[error("'{cmd}' exited with {status}: {stderr}")]
    CommandFailed {
        cmd: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("ffprobe output could not be interpreted: {0}")]
    FfprobeParse(String),

    #[error("JSON error: {0}")]
    JsonParseError(String),

    #[error("{failed} of {total} file(s) failed")]
    BatchFailed { failed: usize, total: usize },
}

/// Result alias used throughout vidtool-core.
pub type CoreResult<T> = std::result::Result<T, CoreError>;

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::JsonParseError(err.to_string())
    }
}

/// Builds a `CommandStart` error for a process that could not be spawned.
pub fn command_start_error(cmd: impl Into<String>, err: std::io::Error) -> CoreError {
    CoreError::CommandStart(cmd.into(), err)
}

/// Builds a `CommandWait` error for a process whose exit could not be collected.
pub fn command_wait_error(cmd: impl Into<String>, err: std::io::Error) -> CoreError {
    CoreError::CommandWait(cmd.into(), err)
}

/// Builds a `CommandFailed` error from an exit status and captured stderr.
pub fn command_failed_error(
    cmd: impl Into<String>,
    status: ExitStatus,
    stderr: impl Into<String>,
) -> CoreError {
    CoreError::CommandFailed {
        cmd: cmd.into(),
        status,
        stderr: stderr.into(),
    }
}

impl CoreError {
    /// True for failures reported by, or while talking to, the external engine.
    #[must_use]
    pub fn is_engine_failure(&self) -> bool {
        matches!(
            self,
            CoreError::CommandStart(..)
                | CoreError::CommandWait(..)
                | CoreError::CommandFailed { .. }
                | CoreError::HardwareEncoderUnavailable(_)
        )
    }
}
