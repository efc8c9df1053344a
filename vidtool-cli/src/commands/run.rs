// ============================================================================
// vidtool-cli/src/commands/run.rs
// ============================================================================
//
// RUN COMMAND: Parsed arguments -> Operation -> Dispatcher
//
// Each subcommand maps onto exactly one `Operation` variant. Names clap does
// not know arrive as `Commands::External` and are rejected here with
// `UnknownOperation`.

use crate::cli::{Commands, GlobalArgs};
use crate::config::run_options;
use crate::error::CliResult;

use std::io::{self, Write};
use vidtool_core::external::{CrateFfprobeExecutor, SidecarSpawner};
use vidtool_core::hardware_accel::{HardwareProbe, StaticHardwareProbe, SystemHardwareProbe};
use vidtool_core::{
    ClipifyParams, ConvertParams, CoreError, CutParams, Dispatcher, GifParams, Operation,
    ReencodeParams, ResizeParams, RunReport, SilenceParams, SlomoOutputRate, SlomoParams,
    TimeRange,
};

/// Converts a parsed subcommand into its operation.
pub fn build_operation(command: Commands) -> CliResult<Operation> {
    let op = match command {
        Commands::Clipify(args) => Operation::Clipify(ClipifyParams::new(args.filename)),
        Commands::Convert(args) => {
            let mut params = ConvertParams::new(args.filenames);
            params.extension = args.extension;
            Operation::Convert(params)
        }
        Commands::Cut(args) => {
            let mut params = CutParams::new(args.filename);
            params.range = TimeRange::new(args.start, args.end);
            params.name = args.name;
            Operation::Cut(params)
        }
        Commands::Gif(args) => {
            let mut params = GifParams::new(args.filename);
            params.range = TimeRange::new(args.start, args.end);
            params.fps = args.fps;
            params.scale = args.scale;
            params.name = args.name;
            Operation::Gif(params)
        }
        Commands::Reencode(args) => {
            let mut params = ReencodeParams::new(args.filenames);
            params.reencode_audio = args.reencode_audio;
            params.name = args.name;
            Operation::Reencode(params)
        }
        Commands::Silence(args) => {
            let mut params = SilenceParams::new(args.filename);
            params.name = args.name;
            Operation::Silence(params)
        }
        Commands::Resize(args) => {
            let mut params = ResizeParams::new(args.filename);
            params.height = args.scale;
            Operation::Resize(params)
        }
        Commands::Slomo(args) => {
            let mut params = SlomoParams::new(args.filename, args.rate_in);
            params.rate_out = args.rate_out;
            params.name = args.name;
            if args.match_rate_out {
                params.output_rate = SlomoOutputRate::MatchRateOut;
            }
            Operation::Slomo(params)
        }
        Commands::External(args) => {
            let name = args.first().cloned().unwrap_or_default();
            return Err(CoreError::UnknownOperation(name));
        }
    };
    Ok(op)
}

/// Runs a parsed command line, printing commands to stdout.
pub fn run_command(global: &GlobalArgs, command: Commands) -> CliResult<RunReport> {
    let op = build_operation(command)?;
    let options = run_options(global);
    log::debug!("Running {} with {:?}", op.kind(), options);

    let hardware: Box<dyn HardwareProbe> = if global.no_hw_check {
        Box::new(StaticHardwareProbe(true))
    } else {
        Box::new(SystemHardwareProbe::new(options.ffmpeg_program.clone()))
    };
    let spawner = SidecarSpawner;
    let prober = CrateFfprobeExecutor::new();
    let dispatcher = Dispatcher::new(&spawner, &prober, hardware.as_ref(), options);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let report = dispatcher.run(&op, &mut out)?;
    out.flush()?;
    Ok(report)
}
