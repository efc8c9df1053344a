// vidtool-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use vidtool_core::TimeMark;
use vidtool_core::config::{
    DEFAULT_CONVERT_EXTENSION, DEFAULT_END_TIME, DEFAULT_FFMPEG_PROGRAM, DEFAULT_GIF_FPS,
    DEFAULT_GIF_SCALE, DEFAULT_RESIZE_HEIGHT, DEFAULT_SLOMO_RATE_OUT, DEFAULT_START_TIME,
};

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "vidtool: batch video transformations on top of ffmpeg",
    long_about = "Builds ffmpeg commands for common video chores (trimming, GIFs, \
                  re-encoding with NVENC, slow motion) and runs them. Every command \
                  is printed before it runs.",
    arg_required_else_help = true,
    allow_external_subcommands = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Flags accepted by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Print the ffmpeg commands without running them
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// In batch commands, keep going after a file fails and report at the end
    #[arg(long, global = true)]
    pub keep_going: bool,

    /// How printed commands are formatted
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Shell)]
    pub format: OutputFormat,

    /// ffmpeg binary to run.
    /// Can also be set via the VIDTOOL_FFMPEG environment variable.
    #[arg(
        long,
        global = true,
        value_name = "PATH",
        env = "VIDTOOL_FFMPEG",
        default_value = DEFAULT_FFMPEG_PROGRAM
    )]
    pub ffmpeg: String,

    /// Skip the NVENC availability check before encoding
    #[arg(long, global = true)]
    pub no_hw_check: bool,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Shell-quoted command lines
    Shell,
    /// One JSON object per command
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Halve the frame rate of footage faster than 45 fps
    Clipify(ClipifyArgs),
    /// Change the container of one or more files without re-encoding
    Convert(ConvertArgs),
    /// Cut a time range out of a file
    Cut(CutArgs),
    /// Make a palette-optimized GIF from a time range
    Gif(GifArgs),
    /// Re-encode one or more files with NVENC H.264
    Reencode(ReencodeArgs),
    /// Remove all audio from a file
    Silence(SilenceArgs),
    /// Resize a file on the GPU to a target height
    Resize(ResizeArgs),
    /// Slow footage down by stretching its timestamps
    Slomo(SlomoArgs),

    #[command(external_subcommand)]
    External(Vec<String>),
}

fn parse_time_mark(value: &str) -> Result<TimeMark, String> {
    TimeMark::parse(value).map_err(|e| e.to_string())
}

#[derive(Args, Debug)]
pub struct ClipifyArgs {
    #[arg(value_name = "FILENAME")]
    pub filename: PathBuf,
}

#[derive(Args, Debug)]
pub struct ConvertArgs {
    #[arg(required = true, value_name = "FILENAMES")]
    pub filenames: Vec<PathBuf>,

    /// Target container extension
    #[arg(short, long, value_name = "EXT", default_value = DEFAULT_CONVERT_EXTENSION)]
    pub extension: String,
}

#[derive(Args, Debug)]
pub struct CutArgs {
    #[arg(value_name = "FILENAME")]
    pub filename: PathBuf,

    #[arg(long, value_name = "HH:MM:SS", value_parser = parse_time_mark, default_value = DEFAULT_START_TIME)]
    pub start: TimeMark,

    #[arg(long, value_name = "HH:MM:SS", value_parser = parse_time_mark, default_value = DEFAULT_END_TIME)]
    pub end: TimeMark,

    /// Output file (defaults to <stem>-cut.<ext>)
    #[arg(long, value_name = "OUT")]
    pub name: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct GifArgs {
    #[arg(value_name = "FILENAME")]
    pub filename: PathBuf,

    #[arg(long, value_name = "HH:MM:SS", value_parser = parse_time_mark, default_value = DEFAULT_START_TIME)]
    pub start: TimeMark,

    #[arg(long, value_name = "HH:MM:SS", value_parser = parse_time_mark, default_value = DEFAULT_END_TIME)]
    pub end: TimeMark,

    /// GIF frame rate
    #[arg(short, long, value_name = "N", default_value_t = DEFAULT_GIF_FPS,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub fps: u32,

    /// GIF width in pixels
    #[arg(long, value_name = "N", default_value_t = DEFAULT_GIF_SCALE,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub scale: u32,

    /// Output file (defaults to <stem>.gif)
    #[arg(long, value_name = "OUT")]
    pub name: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ReencodeArgs {
    #[arg(required = true, value_name = "FILENAMES")]
    pub filenames: Vec<PathBuf>,

    /// Encode audio to AAC instead of copying it
    #[arg(long)]
    pub reencode_audio: bool,

    /// Output file, single input only (defaults to <stem>-reencoded.<ext>)
    #[arg(long, value_name = "OUT")]
    pub name: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct SilenceArgs {
    #[arg(value_name = "FILENAME")]
    pub filename: PathBuf,

    /// Output file (defaults to <stem>-noaudio.<ext>)
    #[arg(long, value_name = "OUT")]
    pub name: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ResizeArgs {
    #[arg(value_name = "FILENAME")]
    pub filename: PathBuf,

    /// Target height in pixels
    #[arg(long, value_name = "N", default_value_t = DEFAULT_RESIZE_HEIGHT,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub scale: u32,
}

#[derive(Args, Debug)]
pub struct SlomoArgs {
    #[arg(value_name = "FILENAME")]
    pub filename: PathBuf,

    /// Frame rate the footage was shot at
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub rate_in: u32,

    /// Playback frame rate
    #[arg(long, value_name = "N", default_value_t = DEFAULT_SLOMO_RATE_OUT,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub rate_out: u32,

    /// Write the output at --rate-out instead of 30 fps
    #[arg(long)]
    pub match_rate_out: bool,

    /// Output file (defaults to <stem>-slow.<ext>)
    #[arg(long, value_name = "OUT")]
    pub name: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cut_defaults_to_whole_file() {
        let cli = Cli::try_parse_from(["vidtool", "cut", "clip.mp4"]).unwrap();
        match cli.command {
            Commands::Cut(args) => {
                assert_eq!(args.start.as_str(), "00:00:00");
                assert_eq!(args.end.as_str(), "23:59:59");
                assert!(args.name.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn invalid_time_is_a_parse_error() {
        let err = Cli::try_parse_from(["vidtool", "cut", "clip.mp4", "--start", "1:00:00"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn global_flags_follow_the_subcommand() {
        let cli = Cli::try_parse_from([
            "vidtool",
            "reencode",
            "a.mp4",
            "b.mp4",
            "--dry-run",
            "--keep-going",
            "--format",
            "json",
        ])
        .unwrap();
        assert!(cli.global.dry_run);
        assert!(cli.global.keep_going);
        assert_eq!(cli.global.format, OutputFormat::Json);
        match cli.command {
            Commands::Reencode(args) => assert_eq!(args.filenames.len(), 2),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn gif_short_flags() {
        let cli = Cli::try_parse_from(["vidtool", "gif", "clip.mov", "-f", "15", "--scale", "480"])
            .unwrap();
        match cli.command {
            Commands::Gif(args) => {
                assert_eq!(args.fps, 15);
                assert_eq!(args.scale, 480);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn slomo_requires_rate_in() {
        assert!(Cli::try_parse_from(["vidtool", "slomo", "clip.mp4"]).is_err());
        assert!(Cli::try_parse_from(["vidtool", "slomo", "clip.mp4", "--rate-in", "0"]).is_err());
    }

    #[test]
    fn unknown_names_become_external() {
        let cli = Cli::try_parse_from(["vidtool", "frobnicate", "clip.mp4"]).unwrap();
        match cli.command {
            Commands::External(args) => assert_eq!(args, ["frobnicate", "clip.mp4"]),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn missing_command_shows_help() {
        let err = Cli::try_parse_from(["vidtool"]).unwrap_err();
        assert_eq!(
            err.kind(),
            clap::error::ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
        );
    }
}
