//! Finger-pattern gesture classification.
//!
//! Classification is an exact match against five literal patterns; anything
//! else is [`GestureLabel::None`]. A [`ConfidenceModel`] attaches a scalar
//! that the stabilizer uses to gate window admission.

use serde::{Deserialize, Serialize};

use crate::types::{FingerState, GestureLabel};

/// The literal patterns, thumb first.
const PATTERNS: [(u8, GestureLabel); 5] = [
    (0b1_0000, GestureLabel::ThumbsUp),
    // Approximation: a curled thumb with extended fingers, not a true
    // thumb-orientation check.
    (0b0_1111, GestureLabel::ThumbsDown),
    (0b0_0000, GestureLabel::Fist),
    (0b1_1111, GestureLabel::OpenPalm),
    (0b0_1100, GestureLabel::Peace),
];

/// Classifies a finger state by exact pattern match.
#[must_use]
pub fn classify(state: FingerState) -> GestureLabel {
    let bits = state.to_bits();
    PATTERNS
        .iter()
        .find(|(pattern, _)| *pattern == bits)
        .map_or(GestureLabel::None, |(_, label)| *label)
}

/// Source of the confidence scalar attached to a classification.
pub trait ConfidenceModel {
    /// Returns the confidence for a detected hand's finger state.
    fn confidence(&self, state: FingerState) -> f32;
}

impl<M: ConfidenceModel + ?Sized> ConfidenceModel for Box<M> {
    fn confidence(&self, state: FingerState) -> f32 {
        (**self).confidence(state)
    }
}

/// Confidence derived from the number of raised digits.
///
/// Scores `high` unless the digit count equals `2.5`, which integer flags
/// never do, so every detected hand scores `high`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlagSumConfidence {
    /// Score for an unambiguous pose.
    pub high: f32,
    /// Score for an ambiguous pose.
    pub low: f32,
}

impl Default for FlagSumConfidence {
    fn default() -> Self {
        Self {
            high: 0.9,
            low: 0.5,
        }
    }
}

impl ConfidenceModel for FlagSumConfidence {
    fn confidence(&self, state: FingerState) -> f32 {
        if f32::from(state.count_up()) == 2.5 {
            self.low
        } else {
            self.high
        }
    }
}

/// Constant confidence for every detected hand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixedConfidence(pub f32);

impl ConfidenceModel for FixedConfidence {
    fn confidence(&self, _state: FingerState) -> f32 {
        self.0
    }
}

/// A classified frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// The recognized gesture.
    pub label: GestureLabel,
    /// Confidence in `[0, 1]`.
    pub confidence: f32,
}

impl Classification {
    /// Classification for a frame with no detected hand.
    pub const NO_HAND: Self = Self {
        label: GestureLabel::None,
        confidence: 0.0,
    };
}

/// Classifier that pairs the pattern match with a confidence model.
#[derive(Debug, Clone, Default)]
pub struct GestureClassifier<M = FlagSumConfidence> {
    model: M,
}

impl GestureClassifier {
    /// Creates a classifier using [`FlagSumConfidence`].
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(FlagSumConfidence::default())
    }
}

impl<M: ConfidenceModel> GestureClassifier<M> {
    /// Creates a classifier with the given confidence model.
    pub fn new(model: M) -> Self {
        Self { model }
    }

    /// Returns the confidence model.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Classifies one frame. `None` means no hand was detected.
    pub fn classify(&self, state: Option<FingerState>) -> Classification {
        match state {
            Some(state) => Classification {
                label: classify(state),
                confidence: self.model.confidence(state),
            },
            None => Classification::NO_HAND,
        }
    }
}
