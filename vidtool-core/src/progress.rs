//! Progress reporting for running ffmpeg processes.
//!
//! Consumes ffmpeg-sidecar events: progress lines drive an `indicatif`
//! spinner, error lines are kept so a failed run can report why.

use console::style;
use ffmpeg_sidecar::event::{FfmpegEvent, LogLevel};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::io::IsTerminal;

/// Number of stderr lines kept for error reports.
const STDERR_TAIL_LINES: usize = 20;

/// Tracks one ffmpeg run: spinner state plus a tail of error output.
pub struct FfmpegProgressHandler {
    spinner: ProgressBar,
    stderr_tail: Vec<String>,
}

impl FfmpegProgressHandler {
    /// Creates a handler for the run producing `label`. The spinner is only
    /// drawn when stderr is a terminal.
    #[must_use]
    pub fn new(label: &str) -> Self {
        let spinner = if std::io::stderr().is_terminal() {
            ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr())
        } else {
            ProgressBar::hidden()
        };
        let spinner_style = ProgressStyle::with_template("{spinner} {prefix} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        spinner.set_style(spinner_style);
        spinner.set_prefix(style(label.to_string()).bold().to_string());

        Self {
            spinner,
            stderr_tail: Vec::new(),
        }
    }

    pub fn handle_event(&mut self, event: FfmpegEvent) {
        match event {
            FfmpegEvent::Progress(progress) => {
                self.spinner.set_message(format!(
                    "time {} | {:.1} fps | {:.2}x",
                    progress.time, progress.fps, progress.speed
                ));
                self.spinner.tick();
            }
            FfmpegEvent::Log(LogLevel::Error | LogLevel::Fatal, line) | FfmpegEvent::Error(line) => {
                log::debug!("ffmpeg: {line}");
                self.push_stderr(line);
            }
            FfmpegEvent::Log(LogLevel::Warning, line) => {
                log::debug!("ffmpeg warning: {line}");
            }
            _ => {}
        }
    }

    fn push_stderr(&mut self, line: String) {
        if self.stderr_tail.len() == STDERR_TAIL_LINES {
            self.stderr_tail.remove(0);
        }
        self.stderr_tail.push(line);
    }

    /// Collected error output, newest last.
    #[must_use]
    pub fn stderr_buffer(&self) -> String {
        self.stderr_tail.join("\n")
    }

    pub fn finish(&self) {
        self.spinner.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_error_lines_only() {
        let mut handler = FfmpegProgressHandler::new("test");
        handler.handle_event(FfmpegEvent::Log(LogLevel::Info, "info line".into()));
        handler.handle_event(FfmpegEvent::Log(LogLevel::Error, "bad codec".into()));
        handler.handle_event(FfmpegEvent::Error("broken pipe".into()));
        handler.finish();
        assert_eq!(handler.stderr_buffer(), "bad codec\nbroken pipe");
    }

    #[test]
    fn stderr_tail_is_bounded() {
        let mut handler = FfmpegProgressHandler::new("test");
        for i in 0..(STDERR_TAIL_LINES + 5) {
            handler.handle_event(FfmpegEvent::Error(format!("line {i}")));
        }
        let buffer = handler.stderr_buffer();
        assert_eq!(buffer.lines().count(), STDERR_TAIL_LINES);
        assert!(buffer.starts_with("line 5"));
        handler.finish();
    }
}
