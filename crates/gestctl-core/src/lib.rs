//! # gestctl-core
//!
//! Hand gesture classification and command stabilization.
//!
//! This crate provides:
//!
//! - [`FingerState`] - per-frame finger up/down flags from a hand tracker
//! - [`classify`] / [`GestureClassifier`] - exact-match pose classification
//! - [`GestureWindow`] - bounded FIFO with first-seen-max majority voting
//! - [`GestureStabilizer`] - debounced, cooldown-gated command emission
//! - [`Clock`] - injectable time, with [`SystemClock`] and [`ManualClock`]
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use gestctl_core::{
//!     Command, FingerState, GestureClassifier, GestureStabilizer, ManualClock,
//!     StabilizerConfig,
//! };
//!
//! let clock = ManualClock::new();
//! let mut stabilizer = GestureStabilizer::new(StabilizerConfig::default(), clock.clone())?;
//! let classifier = GestureClassifier::with_defaults();
//!
//! let thumbs_up: FingerState = "1,0,0,0,0".parse()?;
//! let mut emitted = None;
//! for _ in 0..5 {
//!     let frame = classifier.classify(Some(thumbs_up));
//!     emitted = stabilizer.observe_classification(frame).command();
//!     clock.advance(Duration::from_millis(33));
//! }
//! assert_eq!(emitted, Some(Command::Start));
//! # Ok::<(), gestctl_core::CoreError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod classifier;
pub mod clock;
pub mod error;
pub mod stabilizer;
pub mod types;
pub mod window;

pub use classifier::{
    classify, Classification, ConfidenceModel, FixedConfidence, FlagSumConfidence,
    GestureClassifier,
};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{CoreError, Result};
pub use stabilizer::{Decision, GestureStabilizer, Phase, StabilizerConfig};
pub use types::{Command, CommandMap, Digit, FingerState, GestureLabel, DIGIT_COUNT};
pub use window::GestureWindow;
