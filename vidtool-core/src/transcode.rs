//! Engine-ready description of one ffmpeg invocation.
//!
//! A [`TranscodeSpec`] is produced by the assembler, rendered by the
//! dispatcher and, unless running dry, turned into an `FfmpegCommand`.
//! The argument order produced by [`TranscodeSpec::to_args`] is stable so
//! rendered commands can be diffed and asserted on.

use crate::config::{HWACCEL_BACKEND, NVENC_CQ, NVENC_ENCODER, NVENC_PRESET};
use crate::error::{CoreError, CoreResult};
use crate::timemark::TimeRange;

use ffmpeg_sidecar::command::FfmpegCommand;
use serde::Serialize;
use std::ffi::OsString;
use std::path::PathBuf;

/// Hardware decode mode requested for the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HwDecode {
    None,
    /// `-hwaccel cuda`
    Cuda,
    /// `-hwaccel cuda -hwaccel_output_format cuda`, frames stay on the GPU
    /// for `scale_cuda`.
    CudaFrames,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoCodec {
    /// Stream copy.
    Copy,
    /// NVENC H.264 at the fixed quality/preset.
    Nvenc,
    /// Let ffmpeg pick from the output container (GIF).
    EngineDefault,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioCodec {
    Copy,
    Aac,
    /// `-an`
    Drop,
    EngineDefault,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputSpec {
    pub path: PathBuf,
    pub hw_decode: HwDecode,
    /// Applied as input options (`-ss`/`-to` before `-i`).
    pub trim: Option<TimeRange>,
}

impl InputSpec {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            hw_decode: HwDecode::None,
            trim: None,
        }
    }

    #[must_use]
    pub fn with_hw_decode(mut self, hw_decode: HwDecode) -> Self {
        self.hw_decode = hw_decode;
        self
    }

    #[must_use]
    pub fn with_trim(mut self, trim: TimeRange) -> Self {
        self.trim = Some(trim);
        self
    }
}

/// One fully resolved engine invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscodeSpec {
    pub input: InputSpec,
    pub output: PathBuf,
    pub video: VideoCodec,
    pub audio: AudioCodec,
    pub filter: Option<String>,
    /// Output frame rate (`-r`), already formatted.
    pub frame_rate: Option<String>,
}

impl TranscodeSpec {
    #[must_use]
    pub fn new(input: InputSpec, output: impl Into<PathBuf>) -> Self {
        Self {
            input,
            output: output.into(),
            video: VideoCodec::EngineDefault,
            audio: AudioCodec::EngineDefault,
            filter: None,
            frame_rate: None,
        }
    }

    #[must_use]
    pub fn video(mut self, codec: VideoCodec) -> Self {
        self.video = codec;
        self
    }

    #[must_use]
    pub fn audio(mut self, codec: AudioCodec) -> Self {
        self.audio = codec;
        self
    }

    #[must_use]
    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    #[must_use]
    pub fn frame_rate(mut self, rate: impl Into<String>) -> Self {
        self.frame_rate = Some(rate.into());
        self
    }

    /// Whether running this command needs the CUDA/NVENC stack.
    #[must_use]
    pub fn requires_hardware(&self) -> bool {
        self.video == VideoCodec::Nvenc || self.input.hw_decode != HwDecode::None
    }

    /// Full ffmpeg argument list, program name excluded. Always overwrites
    /// an existing output (`-y`). Paths are passed through untouched, so
    /// non-UTF-8 file names reach the engine as given.
    #[must_use]
    pub fn to_os_args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["-hide_banner".into(), "-y".into()];

        match self.input.hw_decode {
            HwDecode::None => {}
            HwDecode::Cuda => {
                args.extend(["-hwaccel".into(), HWACCEL_BACKEND.into()]);
            }
            HwDecode::CudaFrames => {
                args.extend([
                    "-hwaccel".into(),
                    HWACCEL_BACKEND.into(),
                    "-hwaccel_output_format".into(),
                    HWACCEL_BACKEND.into(),
                ]);
            }
        }

        if let Some(trim) = &self.input.trim {
            args.extend([
                "-ss".into(),
                trim.start.as_str().into(),
                "-to".into(),
                trim.end.as_str().into(),
            ]);
        }

        args.extend(["-i".into(), self.input.path.clone().into_os_string()]);

        if let Some(filter) = &self.filter {
            args.extend(["-vf".into(), filter.into()]);
        }
        if let Some(rate) = &self.frame_rate {
            args.extend(["-r".into(), rate.into()]);
        }

        match self.video {
            VideoCodec::Copy => args.extend(["-c:v".into(), "copy".into()]),
            VideoCodec::Nvenc => args.extend([
                "-c:v".into(),
                NVENC_ENCODER.into(),
                "-preset".into(),
                NVENC_PRESET.into(),
                "-cq".into(),
                NVENC_CQ.to_string().into(),
            ]),
            VideoCodec::EngineDefault => {}
        }

        match self.audio {
            AudioCodec::Copy => args.extend(["-c:a".into(), "copy".into()]),
            AudioCodec::Aac => args.extend(["-c:a".into(), "aac".into()]),
            AudioCodec::Drop => args.push("-an".into()),
            AudioCodec::EngineDefault => {}
        }

        args.push(self.output.clone().into_os_string());
        args
    }

    /// Printable form of [`Self::to_os_args`]. Non-UTF-8 bytes in paths are
    /// replaced, so use this for display only.
    #[must_use]
    pub fn to_args(&self) -> Vec<String> {
        self.to_os_args()
            .iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect()
    }

    /// Shell-equivalent command line, quoted so it can be pasted into a shell.
    ///
    /// ffmpeg-sidecar adds `-loglevel level+info` ahead of these arguments
    /// when the command runs so it can parse progress. That flag only changes
    /// what ffmpeg writes to stderr and is left out of the printed line.
    pub fn render_shell(&self, program: &str) -> CoreResult<String> {
        let args = self.to_args();
        shlex::try_join(std::iter::once(program).chain(args.iter().map(String::as_str)))
            .map_err(|e| {
                CoreError::InvalidParameter(format!(
                    "command for '{}' cannot be quoted: {e}",
                    self.output.display()
                ))
            })
    }

    /// JSON object with the structured spec and the resolved argument list.
    pub fn render_json(&self, program: &str) -> CoreResult<String> {
        #[derive(Serialize)]
        struct Record<'a> {
            program: &'a str,
            args: Vec<String>,
            spec: &'a TranscodeSpec,
        }

        Ok(serde_json::to_string(&Record {
            program,
            args: self.to_args(),
            spec: self,
        })?)
    }

    /// Builds the ffmpeg-sidecar command for execution.
    #[must_use]
    pub fn to_ffmpeg_command(&self, program: &str) -> FfmpegCommand {
        let mut cmd = FfmpegCommand::new_with_path(program);
        cmd.args(self.to_os_args());
        cmd
    }
}
