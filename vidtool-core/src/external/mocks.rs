// vidtool-core/src/external/mocks.rs

// --- Mocking Infrastructure (for testing) ---
//
// Compiled for unit tests and when the "test-mocks" feature is enabled.
//
// Test doubles for the engine and the prober. They record every call so tests
// can assert on exactly which commands reached the engine.

use super::{FfmpegProcess, FfmpegSpawner, FfprobeExecutor};
use crate::error::{CoreError, CoreResult};
use crate::frame_rate::FrameRate;

use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::FfmpegEvent;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::rc::Rc;

/// Builds an `ExitStatus` carrying `code`.
#[must_use]
pub fn exit_status(code: i32) -> ExitStatus {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        ExitStatus::from_raw(code << 8)
    }
    #[cfg(windows)]
    {
        use std::os::windows::process::ExitStatusExt;
        ExitStatus::from_raw(code as u32)
    }
}

/// Mock implementation of FfmpegProcess.
#[derive(Clone)]
pub struct MockFfmpegProcess {
    /// Events to emit when handle_events is called.
    pub events_to_emit: Rc<RefCell<Vec<FfmpegEvent>>>,
    /// Exit status to return when wait is called.
    pub exit_status: ExitStatus,
}

impl FfmpegProcess for MockFfmpegProcess {
    fn handle_events<F>(&mut self, mut handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>,
    {
        let events = self.events_to_emit.borrow().clone();
        for event in events {
            handler(event)?;
        }
        Ok(())
    }

    fn wait(&mut self) -> CoreResult<ExitStatus> {
        Ok(self.exit_status)
    }
}

/// Represents an expected ffmpeg command call and its mock result.
pub struct MockFfmpegExpectation {
    pub arg_pattern: String,
    pub result: CoreResult<MockFfmpegProcess>,
}

/// Mock implementation of FfmpegSpawner supporting multiple expectations.
///
/// Each spawned command is matched against the first expectation whose
/// pattern occurs in one of its arguments; the expectation is consumed.
/// A command with no matching expectation panics.
#[derive(Clone, Default)]
pub struct MockFfmpegSpawner {
    expectations: Rc<RefCell<Vec<MockFfmpegExpectation>>>,
    received_calls: Rc<RefCell<Vec<Vec<String>>>>,
}

impl MockFfmpegSpawner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_expectation(&self, arg_pattern: &str, result: CoreResult<MockFfmpegProcess>) {
        self.expectations.borrow_mut().push(MockFfmpegExpectation {
            arg_pattern: arg_pattern.to_string(),
            result,
        });
    }

    pub fn add_success_expectation(&self, arg_pattern: &str, events: Vec<FfmpegEvent>) {
        let process = MockFfmpegProcess {
            events_to_emit: Rc::new(RefCell::new(events)),
            exit_status: exit_status(0),
        };
        self.add_expectation(arg_pattern, Ok(process));
    }

    pub fn add_spawn_error_expectation(&self, arg_pattern: &str, error: CoreError) {
        self.add_expectation(arg_pattern, Err(error));
    }

    pub fn add_exit_error_expectation(
        &self,
        arg_pattern: &str,
        events: Vec<FfmpegEvent>,
        exit_code: i32,
    ) {
        let process = MockFfmpegProcess {
            events_to_emit: Rc::new(RefCell::new(events)),
            exit_status: exit_status(exit_code),
        };
        self.add_expectation(arg_pattern, Ok(process));
    }

    #[must_use]
    pub fn get_received_calls(&self) -> Vec<Vec<String>> {
        self.received_calls.borrow().clone()
    }

    #[must_use]
    pub fn call_count(&self) -> usize {
        self.received_calls.borrow().len()
    }
}

impl FfmpegSpawner for MockFfmpegSpawner {
    type Process = MockFfmpegProcess;

    fn spawn(&self, cmd: FfmpegCommand) -> CoreResult<Self::Process> {
        let args: Vec<String> = cmd
            .get_args()
            .map(|s| s.to_string_lossy().into_owned())
            .collect();
        self.received_calls.borrow_mut().push(args.clone());

        let mut expectations = self.expectations.borrow_mut();
        let found_index = expectations
            .iter()
            .position(|exp| args.iter().any(|arg| arg.contains(&exp.arg_pattern)));

        match found_index {
            Some(index) => {
                let expectation = expectations.remove(index);
                log::info!(
                    "MockFfmpegSpawner: Matched expectation with pattern '{}'",
                    expectation.arg_pattern
                );
                expectation.result
            }
            None => {
                log::error!("MockFfmpegSpawner: No expectation found for command args: {args:?}");
                panic!("MockFfmpegSpawner: No expectation found for command args: {args:?}");
            }
        }
    }
}

/// Mock implementation of FfprobeExecutor.
///
/// `None` results stand for files without a usable video frame rate.
#[derive(Clone, Default)]
pub struct MockFfprobeExecutor {
    frame_rates: Rc<RefCell<HashMap<PathBuf, Option<FrameRate>>>>,
    probed: Rc<RefCell<Vec<PathBuf>>>,
}

impl MockFfprobeExecutor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an expected result for get_frame_rate for a specific input path.
    pub fn expect_frame_rate(&self, input_path: &Path, rate: Option<FrameRate>) {
        self.frame_rates
            .borrow_mut()
            .insert(input_path.to_path_buf(), rate);
    }

    #[must_use]
    pub fn probed_paths(&self) -> Vec<PathBuf> {
        self.probed.borrow().clone()
    }
}

impl FfprobeExecutor for MockFfprobeExecutor {
    fn get_frame_rate(&self, input_path: &Path) -> CoreResult<FrameRate> {
        log::info!(
            "MockFfprobeExecutor::get_frame_rate called for: {}",
            input_path.display()
        );
        self.probed.borrow_mut().push(input_path.to_path_buf());
        match self.frame_rates.borrow().get(input_path) {
            Some(Some(rate)) => Ok(*rate),
            Some(None) => Err(CoreError::ProbeUnavailable(input_path.display().to_string())),
            None => Err(CoreError::FfprobeParse(format!(
                "MockFfprobeExecutor: No expectation set for path {}",
                input_path.display()
            ))),
        }
    }
}
