// ============================================================================
// vidtool-core/src/external/ffmpeg_executor.rs
// ============================================================================
//
// FFMPEG EXECUTOR: FFmpeg Process Management and Abstraction
//
// This module provides abstractions for spawning and interacting with FFmpeg
// processes, and `run_transcode`, which drives one `TranscodeSpec` through a
// spawner to completion.
//
// KEY COMPONENTS:
// - FfmpegProcess: Trait representing an active FFmpeg process
// - FfmpegSpawner: Trait for creating new FFmpeg processes
// - SidecarSpawner: Concrete implementation using ffmpeg-sidecar

use crate::error::{CoreResult, command_failed_error, command_start_error, command_wait_error};
use crate::progress::FfmpegProgressHandler;
use crate::transcode::TranscodeSpec;

use ffmpeg_sidecar::child::FfmpegChild as SidecarChild;
use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::FfmpegEvent;
use std::process::ExitStatus;

// --- FFmpeg Execution Abstraction ---

/// Trait representing an active ffmpeg process instance.
pub trait FfmpegProcess {
    /// Processes events from the running command using a provided handler closure.
    fn handle_events<F>(&mut self, handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>;

    /// Waits for the command to complete and returns its exit status.
    fn wait(&mut self) -> CoreResult<ExitStatus>;
}

/// Trait representing something that can spawn an FfmpegProcess.
pub trait FfmpegSpawner {
    type Process: FfmpegProcess;
    /// Spawns the ffmpeg command, consuming the command object.
    fn spawn(&self, cmd: FfmpegCommand) -> CoreResult<Self::Process>;
}

// --- Concrete Implementation using ffmpeg-sidecar ---

/// Wrapper around `ffmpeg_sidecar::child::FfmpegChild` implementing `FfmpegProcess`.
pub struct SidecarProcess(SidecarChild);

impl FfmpegProcess for SidecarProcess {
    fn handle_events<F>(&mut self, mut handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>,
    {
        let iterator = self.0.iter().map_err(|e| {
            log::error!("Failed to get ffmpeg event iterator: {}", e);
            command_failed_error("ffmpeg (sidecar - get iter)", ExitStatus::default(), e.to_string())
        })?;
        for event in iterator {
            handler(event)?;
        }
        Ok(())
    }

    fn wait(&mut self) -> CoreResult<ExitStatus> {
        self.0
            .wait()
            .map_err(|e| command_wait_error("ffmpeg (sidecar)", e))
    }
}

/// Concrete implementation of `FfmpegSpawner` using `ffmpeg-sidecar`.
#[derive(Debug, Clone, Default)]
pub struct SidecarSpawner;

impl FfmpegSpawner for SidecarSpawner {
    type Process = SidecarProcess;

    fn spawn(&self, mut cmd: FfmpegCommand) -> CoreResult<Self::Process> {
        cmd.spawn()
            .map(SidecarProcess)
            .map_err(|e| command_start_error("ffmpeg (sidecar)", e))
    }
}

// --- Running a transcode ---

/// Spawns ffmpeg for `spec`, reports progress until it exits and turns a
/// non-zero exit into `CoreError::CommandFailed`.
pub fn run_transcode<S: FfmpegSpawner>(
    spawner: &S,
    spec: &TranscodeSpec,
    program: &str,
) -> CoreResult<()> {
    let label = spec
        .output
        .file_name()
        .map_or_else(|| spec.output.to_string_lossy(), |name| name.to_string_lossy())
        .into_owned();

    log::debug!("Spawning {program} for {label}");
    let mut process = spawner.spawn(spec.to_ffmpeg_command(program))?;

    let mut progress = FfmpegProgressHandler::new(&label);
    let events = process.handle_events(|event| {
        progress.handle_event(event);
        Ok(())
    });
    progress.finish();
    events?;

    let status = process.wait()?;
    if status.success() {
        log::info!("Finished {label}");
        Ok(())
    } else {
        let stderr = progress.stderr_buffer();
        log::error!("ffmpeg failed for {label}: {status}");
        Err(command_failed_error(
            format!("{program} ({label})"),
            status,
            if stderr.is_empty() {
                "no error output captured".to_string()
            } else {
                stderr
            },
        ))
    }
}
