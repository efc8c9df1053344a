//! Core library for the `vidtool` ffmpeg front end.
//!
//! Each operation (clipify, convert, cut, gif, reencode, silence, resize,
//! slomo) is assembled into one or more fully resolved ffmpeg invocations.
//! The [`Dispatcher`] renders every invocation to an output stream and, unless
//! it is a dry run, executes it through an [`FfmpegSpawner`].
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use vidtool_core::{CutParams, Dispatcher, Operation, RunOptions, TimeMark, TimeRange};
//! use vidtool_core::external::{CrateFfprobeExecutor, SidecarSpawner};
//! use vidtool_core::hardware_accel::SystemHardwareProbe;
//!
//! let mut params = CutParams::new("clip.mp4");
//! params.range = TimeRange::new(
//!     TimeMark::parse("00:00:05").unwrap(),
//!     TimeMark::parse("00:00:10").unwrap(),
//! );
//!
//! let options = RunOptions::default();
//! let spawner = SidecarSpawner;
//! let prober = CrateFfprobeExecutor::new();
//! let hardware = SystemHardwareProbe::new(options.ffmpeg_program.clone());
//! let dispatcher = Dispatcher::new(&spawner, &prober, &hardware, options);
//!
//! let report = dispatcher
//!     .run(&Operation::Cut(params), &mut std::io::stdout())
//!     .unwrap();
//! assert_eq!(report.executed(), 1);
//! ```

pub mod assembler;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod external;
pub mod filters;
pub mod frame_rate;
pub mod hardware_accel;
pub mod naming;
pub mod operations;
pub mod progress;
pub mod timemark;
pub mod transcode;

// Re-exports for public API
pub use assembler::assemble;
pub use config::{FailurePolicy, RenderFormat, RunOptions};
pub use dispatch::{Dispatcher, Outcome, RunEntry, RunReport};
pub use error::{CoreError, CoreResult};
pub use external::{FfmpegSpawner, FfprobeExecutor};
pub use frame_rate::FrameRate;
pub use hardware_accel::HardwareProbe;
pub use operations::{
    ClipifyParams, ConvertParams, CutParams, GifParams, Operation, OperationKind, ReencodeParams,
    ResizeParams, SilenceParams, SlomoOutputRate, SlomoParams,
};
pub use timemark::{TimeMark, TimeRange};
pub use transcode::TranscodeSpec;
