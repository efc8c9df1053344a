// ============================================================================
// vidtool-cli/src/logging.rs
// ============================================================================
//
// LOGGING: env_logger setup
//
// Logs go to stderr so stdout carries only the printed commands.
// - default level: info
// - `--verbose`: debug, with timestamps
// - RUST_LOG, when set, overrides both

use log::LevelFilter;
use owo_colors::OwoColorize;
use std::io::Write;

/// Level used when RUST_LOG is unset.
pub fn default_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Installs the global logger. Call once, before any work starts.
pub fn init(verbose: bool, color: bool) {
    let level = default_level(verbose);
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level).parse_default_env();

    builder.format(move |buf, record| {
        let level = record.level();
        let label = format!("{level:<5}");
        let label = if color {
            match level {
                log::Level::Error => label.bright_red().to_string(),
                log::Level::Warn => label.yellow().to_string(),
                log::Level::Info => label.green().to_string(),
                log::Level::Debug => label.blue().to_string(),
                log::Level::Trace => label.magenta().to_string(),
            }
        } else {
            label
        };
        if verbose {
            writeln!(buf, "{} {} {}", buf.timestamp(), label, record.args())
        } else {
            writeln!(buf, "{} {}", label, record.args())
        }
    });

    // A logger may already be installed when running under a test harness.
    if builder.try_init().is_ok() {
        log::debug!("Logger initialized with level: {level}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_raises_to_debug() {
        assert_eq!(default_level(false), LevelFilter::Info);
        assert_eq!(default_level(true), LevelFilter::Debug);
    }
}
