// ============================================================================
// vidtool-cli/src/terminal.rs
// ============================================================================
//
// TERMINAL OUTPUT: Final status and error lines
//
// Everything here goes to stderr. Color is used only when stderr is a
// terminal that supports it and NO_COLOR is unset.

use owo_colors::OwoColorize;
use vidtool_core::{CoreError, RunReport};

pub mod styling {
    pub const SUCCESS_SYMBOL: &str = "✓";
    pub const ERROR_SYMBOL: &str = "✗";
    pub const SKIP_SYMBOL: &str = "»";
    pub const STATUS_INDENT: &str = "  ";
}

/// Whether stderr output should be colored.
pub fn use_color() -> bool {
    std::env::var_os("NO_COLOR").is_none() && console::colors_enabled_stderr()
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{count} {word}")
    } else {
        format!("{count} {word}s")
    }
}

/// One-line summary of a finished run.
pub fn summary_line(report: &RunReport) -> String {
    let kind = report.operation;
    if report.is_noop() {
        return format!("{} {kind}: nothing to do", styling::SKIP_SYMBOL);
    }
    let dry = report.dry_run();
    if dry > 0 {
        format!(
            "{} {kind}: {} printed (dry run)",
            styling::SUCCESS_SYMBOL,
            plural(dry, "command")
        )
    } else {
        format!(
            "{} {kind}: {} finished",
            styling::SUCCESS_SYMBOL,
            plural(report.executed(), "command")
        )
    }
}

pub fn print_report(report: &RunReport, color: bool) {
    let line = summary_line(report);
    if color && !report.is_noop() {
        eprintln!("{}", line.green().bold());
    } else {
        eprintln!("{line}");
    }
    for entry in &report.entries {
        log::debug!("{}{}", styling::STATUS_INDENT, entry.output.display());
    }
}

pub fn print_error(err: &CoreError, suggestion: Option<&str>, color: bool) {
    let title = format!("Error: {err}");
    if color {
        eprintln!("{} {}", styling::ERROR_SYMBOL, title.red().bold());
    } else {
        eprintln!("{} {title}", styling::ERROR_SYMBOL);
    }
    if let Some(text) = suggestion {
        eprintln!("{}{text}", styling::STATUS_INDENT);
    }
}
