// ============================================================================
// vidtool-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with ffmpeg and ffprobe
//
// This module encapsulates interactions with the external engine (ffmpeg)
// and prober (ffprobe). Both sit behind traits so the dispatcher can be
// driven by the mocks in tests.
//
// KEY COMPONENTS:
// - FfmpegSpawner / FfmpegProcess: spawn and observe ffmpeg
// - FfprobeExecutor: read the frame rate of a file
// - mocks: recording test doubles for both ("test-mocks" feature)

/// Traits and implementations for executing ffmpeg commands
pub mod ffmpeg_executor;

/// Traits and implementations for executing ffprobe commands
pub mod ffprobe_executor;

/// Test doubles for the engine and the prober
#[cfg(any(test, feature = "test-mocks"))]
pub mod mocks;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use ffmpeg_executor::{
    FfmpegProcess, FfmpegSpawner, SidecarProcess, SidecarSpawner, run_transcode,
};
pub use ffprobe_executor::{CrateFfprobeExecutor, FfprobeExecutor};
