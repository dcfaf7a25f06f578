//! Recorded pose traces.
//!
//! A trace is JSON lines, one frame per line. Blank lines and lines starting
//! with `#` are ignored.
//!
//! ```text
//! # thumbs up for five frames at ~30fps
//! {"at_ms": 0,   "pose": [1,0,0,0,0]}
//! {"at_ms": 33,  "pose": [1,0,0,0,0]}
//! {"at_ms": 66,  "pose": null}
//! {"at_ms": 100, "error": "usb reset"}
//! ```

use std::collections::VecDeque;
use std::path::Path;
use std::time::Duration;

use gestctl_core::{FingerState, ManualClock};
use gestctl_session::{CaptureError, PoseSource};
use serde::Deserialize;

use crate::error::CliError;

/// One recorded frame.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TraceFrame {
    /// Capture time relative to the start of the trace.
    pub at_ms: u64,
    /// Finger state, or `None` if no hand was detected.
    #[serde(default)]
    pub pose: Option<FingerState>,
    /// Capture failure for this frame.
    #[serde(default)]
    pub error: Option<String>,
}

/// Parses a trace from text.
///
/// # Errors
///
/// Returns an error naming the first line that is not a valid frame or
/// whose timestamp goes backwards.
pub fn parse(content: &str) -> Result<Vec<TraceFrame>, CliError> {
    let mut frames = Vec::new();
    let mut last_at = 0;

    for (index, line) in content.lines().enumerate() {
        let line_no = index + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let frame: TraceFrame = serde_json::from_str(trimmed).map_err(|e| CliError::Trace {
            line: line_no,
            reason: e.to_string(),
        })?;

        if frame.at_ms < last_at {
            return Err(CliError::Trace {
                line: line_no,
                reason: format!("at_ms {} is before previous frame at {last_at}", frame.at_ms),
            });
        }
        if frame.pose.is_some() && frame.error.is_some() {
            return Err(CliError::Trace {
                line: line_no,
                reason: "frame cannot have both pose and error".to_string(),
            });
        }

        last_at = frame.at_ms;
        frames.push(frame);
    }

    Ok(frames)
}

/// Reads and parses a trace file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load(path: &Path) -> Result<Vec<TraceFrame>, CliError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        CliError::InvalidArgument(format!("cannot read trace '{}': {e}", path.display()))
    })?;
    parse(&content)
}

/// Pose source that replays a trace and moves a clock to each frame's time.
#[derive(Debug)]
pub struct TraceSource {
    frames: VecDeque<TraceFrame>,
    clock: ManualClock,
    current_at_ms: u64,
}

impl TraceSource {
    /// Creates a source driving `clock`.
    pub fn new(frames: Vec<TraceFrame>, clock: ManualClock) -> Self {
        Self {
            frames: frames.into(),
            clock,
            current_at_ms: 0,
        }
    }

    /// Frames left to replay.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }

    /// Timestamp of the last captured frame.
    #[must_use]
    pub const fn current_at_ms(&self) -> u64 {
        self.current_at_ms
    }
}

impl PoseSource for TraceSource {
    fn capture(&mut self) -> Result<Option<FingerState>, CaptureError> {
        let frame = self.frames.pop_front().ok_or(CaptureError::Exhausted)?;
        self.current_at_ms = frame.at_ms;
        self.clock.set(Duration::from_millis(frame.at_ms));

        match frame.error {
            Some(reason) => Err(CaptureError::ReadFailed { reason }),
            None => Ok(frame.pose),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gestctl_core::Clock;

    #[test]
    fn parse_skips_blank_and_comment_lines() {
        let content = "# header\n\n{\"at_ms\": 0, \"pose\": [1,0,0,0,0]}\n  \n{\"at_ms\": 40}\n";
        let frames = parse(content).unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].pose, Some(FingerState::from_bits(0b1_0000)));
        assert_eq!(frames[1].pose, None);
        assert_eq!(frames[1].at_ms, 40);
    }

    #[test]
    fn parse_reports_line_number() {
        let content = "{\"at_ms\": 0}\n{\"at_ms\": 5, \"pose\": [1,0]}\n";
        match parse(content).unwrap_err() {
            CliError::Trace { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn parse_rejects_time_going_backwards() {
        let content = "{\"at_ms\": 100}\n{\"at_ms\": 50}\n";
        let err = parse(content).unwrap_err();
        assert!(err.to_string().contains("before previous frame"));
    }

    #[test]
    fn parse_rejects_pose_and_error() {
        let content = "{\"at_ms\": 0, \"pose\": [0,0,0,0,0], \"error\": \"x\"}\n";
        assert!(parse(content).is_err());
    }

    #[test]
    fn parse_rejects_unknown_fields() {
        assert!(parse("{\"at_ms\": 0, \"hand\": 1}\n").is_err());
    }

    #[test]
    fn load_missing_file_fails() {
        let err = load(Path::new("/nonexistent/trace.jsonl")).unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
    }

    #[test]
    fn trace_source_drives_clock() {
        let frames = parse(
            "{\"at_ms\": 0, \"pose\": [0,0,0,0,0]}\n\
             {\"at_ms\": 250, \"error\": \"usb reset\"}\n\
             {\"at_ms\": 900}\n",
        )
        .unwrap();
        let clock = ManualClock::new();
        let mut source = TraceSource::new(frames, clock.clone());

        assert_eq!(source.capture(), Ok(Some(FingerState::from_bits(0))));
        assert_eq!(
            source.capture(),
            Err(CaptureError::ReadFailed {
                reason: "usb reset".into()
            })
        );
        assert_eq!(clock.now(), Duration::from_millis(250));
        assert_eq!(source.capture(), Ok(None));
        assert_eq!(source.current_at_ms(), 900);
        assert_eq!(source.remaining(), 0);
        assert_eq!(source.capture(), Err(CaptureError::Exhausted));
    }
}
