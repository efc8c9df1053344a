// vidtool-cli/src/config.rs
//
// Turns the global command-line flags into the core's `RunOptions`.

use crate::cli::{GlobalArgs, OutputFormat};
use vidtool_core::{FailurePolicy, RenderFormat, RunOptions};

impl From<OutputFormat> for RenderFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Shell => RenderFormat::Shell,
            OutputFormat::Json => RenderFormat::Json,
        }
    }
}

pub fn run_options(global: &GlobalArgs) -> RunOptions {
    RunOptions {
        dry_run: global.dry_run,
        failure_policy: if global.keep_going {
            FailurePolicy::Continue
        } else {
            FailurePolicy::Stop
        },
        render_format: global.format.into(),
        ffmpeg_program: global.ffmpeg.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    #[test]
    fn defaults_stop_on_failure_and_render_shell() {
        let cli = Cli::try_parse_from(["vidtool", "silence", "clip.mp4"]).unwrap();
        let options = run_options(&cli.global);
        assert!(!options.dry_run);
        assert_eq!(options.failure_policy, FailurePolicy::Stop);
        assert_eq!(options.render_format, RenderFormat::Shell);
    }

    #[test]
    fn flags_map_onto_options() {
        let cli = Cli::try_parse_from([
            "vidtool",
            "convert",
            "a.mov",
            "--keep-going",
            "--dry-run",
            "--format",
            "json",
            "--ffmpeg",
            "/opt/ffmpeg/bin/ffmpeg",
        ])
        .unwrap();
        let options = run_options(&cli.global);
        assert!(options.dry_run);
        assert_eq!(options.failure_policy, FailurePolicy::Continue);
        assert_eq!(options.render_format, RenderFormat::Json);
        assert_eq!(options.ffmpeg_program, "/opt/ffmpeg/bin/ffmpeg");
    }
}
