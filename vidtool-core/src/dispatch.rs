// ============================================================================
// vidtool-core/src/dispatch.rs
// ============================================================================
//
// DISPATCHER: Render, then execute
//
// The dispatcher validates an operation, assembles its commands and walks
// them in order. Each command is written to the output stream before
// anything else happens to it. In dry-run mode that is all; otherwise the
// NVENC precondition is checked once and the command is run through the
// spawner.
//
// Failures in a batch follow `RunOptions::failure_policy`.

use crate::assembler::assemble;
use crate::config::{FailurePolicy, NVENC_ENCODER, RenderFormat, RunOptions};
use crate::error::{CoreError, CoreResult};
use crate::external::{FfmpegSpawner, FfprobeExecutor, run_transcode};
use crate::hardware_accel::{HardwareProbe, ensure_encoder};
use crate::operations::{Operation, OperationKind};
use crate::transcode::TranscodeSpec;

use std::cell::Cell;
use std::io::Write;
use std::path::PathBuf;

/// What happened to one assembled command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Rendered only.
    DryRun,
    /// Engine finished successfully.
    Executed,
    /// Engine failed and the batch continued.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunEntry {
    pub output: PathBuf,
    pub outcome: Outcome,
}

/// Summary of one dispatcher run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub operation: OperationKind,
    pub entries: Vec<RunEntry>,
}

impl RunReport {
    /// True when the operation decided there was nothing to do.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn count(&self, outcome: fn(&Outcome) -> bool) -> usize {
        self.entries.iter().filter(|e| outcome(&e.outcome)).count()
    }

    #[must_use]
    pub fn executed(&self) -> usize {
        self.count(|o| *o == Outcome::Executed)
    }

    #[must_use]
    pub fn dry_run(&self) -> usize {
        self.count(|o| *o == Outcome::DryRun)
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Failed(_)))
    }
}

/// Routes operations to the assembler and the engine.
pub struct Dispatcher<'a, S, P, H>
where
    S: FfmpegSpawner,
    P: FfprobeExecutor + ?Sized,
    H: HardwareProbe + ?Sized,
{
    spawner: &'a S,
    prober: &'a P,
    hardware: &'a H,
    options: RunOptions,
    hardware_checked: Cell<bool>,
}

impl<'a, S, P, H> Dispatcher<'a, S, P, H>
where
    S: FfmpegSpawner,
    P: FfprobeExecutor + ?Sized,
    H: HardwareProbe + ?Sized,
{
    pub fn new(spawner: &'a S, prober: &'a P, hardware: &'a H, options: RunOptions) -> Self {
        Self {
            spawner,
            prober,
            hardware,
            options,
            hardware_checked: Cell::new(false),
        }
    }

    #[must_use]
    pub fn options(&self) -> &RunOptions {
        &self.options
    }

    /// Runs `op`, writing each command to `out` before acting on it.
    pub fn run<W: Write + ?Sized>(&self, op: &Operation, out: &mut W) -> CoreResult<RunReport> {
        self.options.validate()?;
        op.validate()?;

        let kind = op.kind();
        let specs = assemble(op, self.prober)?;
        let mut report = RunReport {
            operation: kind,
            entries: Vec::with_capacity(specs.len()),
        };

        if specs.is_empty() {
            log::info!("{kind}: nothing to do");
            return Ok(report);
        }

        let total = specs.len();
        for (index, spec) in specs.iter().enumerate() {
            if kind.is_batch() {
                log::debug!("{kind}: file {} of {total}", index + 1);
            }
            self.render(spec, out)?;

            let outcome = if self.options.dry_run {
                Outcome::DryRun
            } else {
                match self.execute(spec) {
                    Ok(()) => Outcome::Executed,
                    Err(e) if self.keeps_going(kind, &e) => {
                        log::error!("{kind}: {} failed: {e}", spec.input.path.display());
                        Outcome::Failed(e.to_string())
                    }
                    Err(e) => return Err(e),
                }
            };
            report.entries.push(RunEntry {
                output: spec.output.clone(),
                outcome,
            });
        }

        let failed = report.failed();
        if failed > 0 {
            return Err(CoreError::BatchFailed { failed, total });
        }
        Ok(report)
    }

    fn render<W: Write + ?Sized>(&self, spec: &TranscodeSpec, out: &mut W) -> CoreResult<()> {
        let program = self.options.ffmpeg_program.as_str();
        let line = match self.options.render_format {
            RenderFormat::Shell => spec.render_shell(program)?,
            RenderFormat::Json => spec.render_json(program)?,
        };
        writeln!(out, "{line}")?;
        out.flush()?;
        Ok(())
    }

    fn execute(&self, spec: &TranscodeSpec) -> CoreResult<()> {
        if spec.requires_hardware() && !self.hardware_checked.get() {
            ensure_encoder(self.hardware, NVENC_ENCODER)?;
            self.hardware_checked.set(true);
        }
        run_transcode(self.spawner, spec, &self.options.ffmpeg_program)
    }

    /// Only batches continue past a failure. A missing hardware encoder
    /// affects every file, so it always stops the run.
    fn keeps_going(&self, kind: OperationKind, err: &CoreError) -> bool {
        kind.is_batch()
            && self.options.failure_policy == FailurePolicy::Continue
            && !matches!(err, CoreError::HardwareEncoderUnavailable(_))
    }
}
