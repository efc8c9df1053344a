// ============================================================================
// vidtool-cli/src/error.rs
// ============================================================================
//
// CLI ERROR HANDLING: Result alias and exit codes
//
// The CLI reports every failure as a `CoreError`. This module decides which
// exit code each kind of failure maps to.

use vidtool_core::{CoreError, CoreResult};

/// Type alias for CLI results using CoreError.
pub type CliResult<T> = CoreResult<T>;

/// Exit code for arguments clap accepted but the operation rejected.
pub const EXIT_USAGE: i32 = 2;

/// Exit code for everything else that went wrong.
pub const EXIT_FAILURE: i32 = 1;

/// Maps an error to the process exit code. Usage mistakes share clap's code.
pub fn exit_code(err: &CoreError) -> i32 {
    match err {
        CoreError::UnknownOperation(_)
        | CoreError::InvalidTimeFormat(_)
        | CoreError::InvalidParameter(_)
        | CoreError::PathError(_) => EXIT_USAGE,
        _ => EXIT_FAILURE,
    }
}

/// Hint printed under the error line, when one helps.
pub fn suggestion(err: &CoreError) -> Option<&'static str> {
    match err {
        CoreError::HardwareEncoderUnavailable(_) => {
            Some("Pass --no-hw-check to try anyway, or --dry-run to only print the commands.")
        }
        CoreError::CommandStart(..) => {
            Some("Check that ffmpeg is installed, or point --ffmpeg / VIDTOOL_FFMPEG at it.")
        }
        CoreError::BatchFailed { .. } => Some("Failed files are listed in the log above."),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_errors_exit_with_two() {
        assert_eq!(exit_code(&CoreError::UnknownOperation("x".into())), EXIT_USAGE);
        assert_eq!(exit_code(&CoreError::InvalidParameter("x".into())), EXIT_USAGE);
    }

    #[test]
    fn engine_errors_exit_with_one() {
        let err = CoreError::BatchFailed { failed: 1, total: 2 };
        assert_eq!(exit_code(&err), EXIT_FAILURE);
        assert!(suggestion(&err).is_some());
    }
}
