// vidtool-cli/src/main.rs
//
// Entry point for the `vidtool` binary.
//
// - Parses arguments (clap prints help and exits when no command is given).
// - Sets up logging on stderr.
// - Runs the command; printed ffmpeg commands go to stdout.
// - Maps the outcome to an exit code.

use clap::{CommandFactory, Parser};
use std::process;
use vidtool_cli::{Cli, error, logging, run_command, terminal};
use vidtool_core::CoreError;

fn main() {
    let cli = Cli::parse();
    let color = terminal::use_color();
    logging::init(cli.global.verbose, color);

    match run_command(&cli.global, cli.command) {
        Ok(report) => terminal::print_report(&report, color),
        Err(e) => {
            terminal::print_error(&e, error::suggestion(&e), color);
            if matches!(e, CoreError::UnknownOperation(_)) {
                eprintln!("\n{}", Cli::command().render_usage());
            }
            process::exit(error::exit_code(&e));
        }
    }
}
