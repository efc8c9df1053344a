//! Command implementations for the CLI.

/// Builds the operation for a parsed subcommand and runs it through the
/// dispatcher with the real ffmpeg and ffprobe.
pub mod run;
