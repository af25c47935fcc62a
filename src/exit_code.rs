//! Process exit codes.
//!
//! The indexer's contract is deliberately coarse: zero on success, one on
//! any fatal error. Successful `--help` and `--version` displays exit zero.

use anyhow::Error;
use clap::error::ErrorKind as ClapErrorKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success = 0,
    Failure = 1,
}

impl ExitCode {
    /// Converts an error to the process exit code.
    pub fn from_error(err: &Error) -> Self {
        if let Some(clap_err) = err.downcast_ref::<clap::Error>() {
            return match clap_err.kind() {
                // Successful `--help` or `--version` display
                ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion => Self::Success,
                _ => Self::Failure,
            };
        }

        Self::Failure
    }

    /// Returns the numeric exit code value.
    pub const fn code(self) -> i32 {
        self as i32
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.code()
    }
}
