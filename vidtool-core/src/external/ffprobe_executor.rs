//! FFprobe integration for frame-rate detection.
//!
//! The only metadata vidtool needs is the frame rate of the first video
//! stream, used by `clipify` to decide whether to halve it.

use crate::error::{CoreError, CoreResult, command_failed_error, command_start_error};
use crate::frame_rate::FrameRate;

use ffprobe::{FfProbeError, ffprobe};
use std::path::Path;

/// Trait for components that can read stream metadata from a media file.
pub trait FfprobeExecutor {
    /// Returns the frame rate of the first video stream.
    ///
    /// Fails with `CoreError::ProbeUnavailable` when the file has no video
    /// stream or the stream declares no usable rate, and with an engine
    /// error when ffprobe itself cannot read the file.
    fn get_frame_rate(&self, input_path: &Path) -> CoreResult<FrameRate>;
}

/// `FfprobeExecutor` backed by the `ffprobe` crate.
#[derive(Debug, Clone, Default)]
pub struct CrateFfprobeExecutor;

impl CrateFfprobeExecutor {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl FfprobeExecutor for CrateFfprobeExecutor {
    fn get_frame_rate(&self, input_path: &Path) -> CoreResult<FrameRate> {
        log::debug!(
            "Running ffprobe (via crate) for frame rate on: {}",
            input_path.display()
        );
        let metadata = ffprobe(input_path).map_err(|err| {
            log::error!(
                "ffprobe failed for frame rate on {}: {:?}",
                input_path.display(),
                err
            );
            map_ffprobe_error(err, "frame rate")
        })?;

        let Some(video_stream) = metadata
            .streams
            .iter()
            .find(|s| s.codec_type.as_deref() == Some("video"))
        else {
            log::debug!("No video stream found in {}", input_path.display());
            return Err(CoreError::ProbeUnavailable(input_path.display().to_string()));
        };

        let rate = FrameRate::from_stream_fields(
            &video_stream.avg_frame_rate,
            &video_stream.r_frame_rate,
        )
        .ok_or_else(|| CoreError::ProbeUnavailable(input_path.display().to_string()))?;

        log::debug!(
            "Probed frame rate for {}: {} ({:.3} fps)",
            input_path.display(),
            rate,
            rate.fps()
        );
        Ok(rate)
    }
}

fn map_ffprobe_error(err: FfProbeError, context: &str) -> CoreError {
    match err {
        FfProbeError::Io(io_err) => command_start_error(format!("ffprobe ({context})"), io_err),
        FfProbeError::Status(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            command_failed_error(format!("ffprobe ({context})"), output.status, stderr)
        }
        FfProbeError::Deserialize(err) => CoreError::JsonParseError(format!(
            "ffprobe {context} output deserialization: {err}"
        )),
        #[allow(unreachable_patterns)]
        _ => CoreError::FfprobeParse(format!("Unknown ffprobe error during {context}: {err:?}")),
    }
}
