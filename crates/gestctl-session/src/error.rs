//! Error types for gesture sessions.

use gestctl_core::CoreError;
use thiserror::Error;

/// Result type for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;

/// Errors that can occur while running a gesture session.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    /// The pose source failed for this frame.
    #[error("capture failed: {0}")]
    Capture(#[from] CaptureError),

    /// Invalid or unreadable session configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// A core value could not be built.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Failure of a pose source to produce a frame.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    /// No camera or tracker is attached.
    #[error("no camera")]
    Unavailable,

    /// A frame could not be read.
    #[error("failed to read frame: {reason}")]
    ReadFailed {
        /// Description of the failure.
        reason: String,
    },

    /// A finite source has no more frames.
    #[error("pose source exhausted")]
    Exhausted,
}

/// Failure of an external command action.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{action} failed for {target}: {reason}")]
pub struct ExecutorError {
    /// Action that was attempted.
    pub action: String,
    /// Target instance.
    pub target: String,
    /// Description of the failure.
    pub reason: String,
}

impl ExecutorError {
    /// Creates an executor error.
    pub fn new(
        action: impl Into<String>,
        target: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            action: action.into(),
            target: target.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_capture() {
        let err = SessionError::from(CaptureError::Unavailable);
        assert_eq!(err.to_string(), "capture failed: no camera");
    }

    #[test]
    fn error_display_read_failed() {
        let err = CaptureError::ReadFailed {
            reason: "device busy".into(),
        };
        assert_eq!(err.to_string(), "failed to read frame: device busy");
    }

    #[test]
    fn error_display_config() {
        let err = SessionError::Config("history_limit must be greater than 0".into());
        assert_eq!(
            err.to_string(),
            "configuration error: history_limit must be greater than 0"
        );
    }

    #[test]
    fn error_display_core_is_transparent() {
        let err = SessionError::from(CoreError::PatternLength { len: 2 });
        assert_eq!(err.to_string(), "finger pattern must have 5 flags, got 2");
    }

    #[test]
    fn error_display_executor() {
        let err = ExecutorError::new("start", "i-0abc", "access denied");
        assert_eq!(err.to_string(), "start failed for i-0abc: access denied");
    }
}
