//! Pose sources: where per-frame finger states come from.

use std::collections::VecDeque;

use gestctl_core::FingerState;

use crate::error::CaptureError;

/// A frame-by-frame hand tracker.
///
/// Each call captures one frame. `Ok(None)` means the frame had no hand.
pub trait PoseSource {
    /// Captures the next frame's finger state.
    fn capture(&mut self) -> Result<Option<FingerState>, CaptureError>;
}

impl<S: PoseSource + ?Sized> PoseSource for Box<S> {
    fn capture(&mut self) -> Result<Option<FingerState>, CaptureError> {
        (**self).capture()
    }
}

impl<S: PoseSource + ?Sized> PoseSource for &mut S {
    fn capture(&mut self) -> Result<Option<FingerState>, CaptureError> {
        (**self).capture()
    }
}

/// A pose source that replays a fixed sequence of frames.
///
/// Returns [`CaptureError::Exhausted`] once the script runs out.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    frames: VecDeque<Result<Option<FingerState>, CaptureError>>,
}

impl ScriptedSource {
    /// Creates an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a script of detected hands.
    pub fn from_states(states: impl IntoIterator<Item = FingerState>) -> Self {
        Self {
            frames: states.into_iter().map(|state| Ok(Some(state))).collect(),
        }
    }

    /// Appends a frame with a detected hand.
    #[must_use]
    pub fn with_hand(mut self, state: FingerState) -> Self {
        self.push(Ok(Some(state)));
        self
    }

    /// Appends `count` identical frames.
    #[must_use]
    pub fn with_repeated(mut self, state: FingerState, count: usize) -> Self {
        for _ in 0..count {
            self.push(Ok(Some(state)));
        }
        self
    }

    /// Appends a frame with no hand.
    #[must_use]
    pub fn with_no_hand(mut self) -> Self {
        self.push(Ok(None));
        self
    }

    /// Appends a failed capture.
    #[must_use]
    pub fn with_failure(mut self, error: CaptureError) -> Self {
        self.push(Err(error));
        self
    }

    /// Appends a frame result.
    pub fn push(&mut self, frame: Result<Option<FingerState>, CaptureError>) {
        self.frames.push_back(frame);
    }

    /// Frames left to replay.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl PoseSource for ScriptedSource {
    fn capture(&mut self) -> Result<Option<FingerState>, CaptureError> {
        self.frames.pop_front().unwrap_or(Err(CaptureError::Exhausted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_source_replays_in_order() {
        let thumbs_up = FingerState::from_bits(0b1_0000);
        let mut source = ScriptedSource::new()
            .with_hand(thumbs_up)
            .with_no_hand()
            .with_failure(CaptureError::Unavailable);

        assert_eq!(source.remaining(), 3);
        assert_eq!(source.capture(), Ok(Some(thumbs_up)));
        assert_eq!(source.capture(), Ok(None));
        assert_eq!(source.capture(), Err(CaptureError::Unavailable));
        assert_eq!(source.capture(), Err(CaptureError::Exhausted));
    }

    #[test]
    fn scripted_source_from_states() {
        let states = [FingerState::from_bits(0), FingerState::from_bits(0b1_1111)];
        let mut source = ScriptedSource::from_states(states);
        assert_eq!(source.capture(), Ok(Some(states[0])));
        assert_eq!(source.capture(), Ok(Some(states[1])));
        assert_eq!(source.remaining(), 0);
    }

    #[test]
    fn boxed_source_delegates() {
        let mut source: Box<dyn PoseSource> =
            Box::new(ScriptedSource::new().with_repeated(FingerState::from_bits(0), 2));
        assert!(source.capture().is_ok());
        assert!(source.capture().is_ok());
        assert_eq!(source.capture(), Err(CaptureError::Exhausted));
    }
}
