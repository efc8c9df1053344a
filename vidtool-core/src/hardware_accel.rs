// ============================================================================
// vidtool-core/src/hardware_accel.rs
// ============================================================================
//
// HARDWARE ACCELERATION: NVENC/CUDA capability check
//
// Every re-encoding operation uses NVENC with CUDA decoding and there is no
// software fallback. Before the first hardware command of a run, the
// dispatcher asks a `HardwareProbe` whether the encoder exists so a missing
// GPU fails with a clear message instead of an opaque ffmpeg error.
//
// KEY COMPONENTS:
// - HardwareProbe: trait answering "does ffmpeg offer this encoder?"
// - SystemHardwareProbe: asks the installed ffmpeg (`-encoders`)
// - StaticHardwareProbe: fixed answer, for tests and `--no-hw-check`

use crate::error::{CoreError, CoreResult, command_failed_error, command_start_error};

use std::io;
use std::process::{Command, Stdio};

/// Answers whether the engine provides a given encoder.
pub trait HardwareProbe {
    fn encoder_available(&self, encoder: &str) -> CoreResult<bool>;
}

/// Queries the ffmpeg binary with `-hide_banner -encoders`.
#[derive(Debug, Clone)]
pub struct SystemHardwareProbe {
    program: String,
}

impl SystemHardwareProbe {
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl HardwareProbe for SystemHardwareProbe {
    fn encoder_available(&self, encoder: &str) -> CoreResult<bool> {
        let output = Command::new(&self.program)
            .args(["-hide_banner", "-encoders"])
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                if e.kind() == io::ErrorKind::NotFound {
                    log::warn!("Dependency '{}' not found.", self.program);
                }
                command_start_error(&self.program, e)
            })?;

        if !output.status.success() {
            return Err(command_failed_error(
                format!("{} -encoders", self.program),
                output.status,
                String::from_utf8_lossy(&output.stderr).into_owned(),
            ));
        }

        let listing = String::from_utf8_lossy(&output.stdout);
        let found = encoder_listed(&listing, encoder);
        log::debug!("Encoder {encoder} available: {found}");
        Ok(found)
    }
}

/// Fixed answer. `StaticHardwareProbe(true)` skips the check entirely.
#[derive(Debug, Clone, Copy)]
pub struct StaticHardwareProbe(pub bool);

impl HardwareProbe for StaticHardwareProbe {
    fn encoder_available(&self, _encoder: &str) -> CoreResult<bool> {
        Ok(self.0)
    }
}

/// Fails with `HardwareEncoderUnavailable` unless `encoder` is offered.
pub fn ensure_encoder<H: HardwareProbe + ?Sized>(probe: &H, encoder: &str) -> CoreResult<()> {
    if probe.encoder_available(encoder)? {
        Ok(())
    } else {
        Err(CoreError::HardwareEncoderUnavailable(encoder.to_string()))
    }
}

/// Looks for `encoder` as the name column of `ffmpeg -encoders` output
/// (` V....D h264_nvenc  NVIDIA NVENC H.264 encoder`).
fn encoder_listed(listing: &str, encoder: &str) -> bool {
    listing
        .lines()
        .filter_map(|line| line.split_whitespace().nth(1))
        .any(|name| name == encoder)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = "Encoders:
 V..... = Video
 ------
 V....D libx264              libx264 H.264 / AVC / MPEG-4 AVC
 V....D h264_nvenc           NVIDIA NVENC H.264 encoder (codec h264)
 A....D aac                  AAC (Advanced Audio Coding)
";

    #[test]
    fn finds_encoder_by_name_column() {
        assert!(encoder_listed(LISTING, "h264_nvenc"));
        assert!(encoder_listed(LISTING, "aac"));
        assert!(!encoder_listed(LISTING, "hevc_nvenc"));
        assert!(!encoder_listed(LISTING, "NVENC"));
    }

    #[test]
    fn static_probe_controls_ensure() {
        assert!(ensure_encoder(&StaticHardwareProbe(true), "h264_nvenc").is_ok());
        assert!(matches!(
            ensure_encoder(&StaticHardwareProbe(false), "h264_nvenc"),
            Err(CoreError::HardwareEncoderUnavailable(ref name)) if name == "h264_nvenc"
        ));
    }
}
