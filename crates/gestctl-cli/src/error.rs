//! CLI error types.

use gestctl_core::CoreError;
use gestctl_session::SessionError;
use thiserror::Error;

/// CLI-specific errors.
#[derive(Error, Debug)]
pub enum CliError {
    /// A trace file line could not be used.
    #[error("trace line {line}: {reason}")]
    Trace {
        /// 1-based line number.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// Invalid argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Output formatting error.
    #[error("format error: {0}")]
    Format(String),

    /// Session failure.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        Self::InvalidArgument(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn cli_error_display_trace() {
        let err = CliError::Trace {
            line: 3,
            reason: "expected value".into(),
        };
        assert_eq!(err.to_string(), "trace line 3: expected value");
    }

    #[test]
    fn cli_error_display_invalid_argument_from_core() {
        let err = CliError::from(CoreError::PatternLength { len: 2 });
        assert_eq!(
            err.to_string(),
            "invalid argument: finger pattern must have 5 flags, got 2"
        );
    }

    #[test]
    fn cli_error_session_is_transparent() {
        let err = CliError::from(SessionError::Config("bad".into()));
        assert_eq!(err.to_string(), "configuration error: bad");
    }

    #[test]
    fn cli_error_io_has_source() {
        let err = CliError::from(std::io::Error::other("disk"));
        assert!(err.source().is_some());
        assert_eq!(err.to_string(), "IO error: disk");
    }
}
