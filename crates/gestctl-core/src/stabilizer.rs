//! Debounced, cooldown-gated gesture-to-command state machine.
//!
//! The [`GestureStabilizer`] accepts one classified frame at a time. Frames
//! above the confidence threshold enter a bounded [`GestureWindow`]; once the
//! window is full, its majority label is looked up in the configured
//! [`CommandMap`]. A bound majority emits its [`Command`] if the cooldown has
//! elapsed, which also clears the window and restarts the cooldown. A label
//! bound to [`Command::None`] emits the no-op the same way; only an unbound
//! majority leaves the window in place.
//!
//! ```text
//!            accept / drop
//!   ┌──────────────┐  window full   ┌──────────┐
//!   │ Accumulating │ ─────────────► │ Deciding │ ──► Emit (clear window)
//!   └──────────────┘ ◄───────────── └──────────┘
//!                     emit clears      │
//!                                      └──► CoolingDown / Unmapped
//!                                           (window kept, keeps sliding)
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::classifier::Classification;
use crate::clock::{Clock, SystemClock};
use crate::error::{CoreError, Result};
use crate::types::{Command, CommandMap, GestureLabel};
use crate::window::GestureWindow;

/// Default number of accepted frames needed for a decision.
pub const DEFAULT_WINDOW_SIZE: usize = 5;

/// Default minimum time between emissions, in milliseconds.
pub const DEFAULT_COOLDOWN_MS: u64 = 3_000;

/// Default confidence a frame must exceed to be accepted.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.7;

/// Stabilizer tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StabilizerConfig {
    /// Number of accepted frames in the voting window.
    pub window_size: usize,
    /// Minimum time between emissions, in milliseconds.
    pub cooldown_ms: u64,
    /// Frames must score strictly above this to be accepted.
    pub confidence_threshold: f32,
    /// Gesture to command bindings.
    pub bindings: CommandMap,
}

impl Default for StabilizerConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            cooldown_ms: DEFAULT_COOLDOWN_MS,
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            bindings: CommandMap::default(),
        }
    }
}

impl StabilizerConfig {
    /// Creates a config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the window size.
    #[must_use]
    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    /// Sets the cooldown interval.
    #[must_use]
    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown_ms = u64::try_from(cooldown.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Sets the confidence threshold.
    #[must_use]
    pub fn with_confidence_threshold(mut self, threshold: f32) -> Self {
        self.confidence_threshold = threshold;
        self
    }

    /// Replaces the gesture bindings.
    #[must_use]
    pub fn with_bindings(mut self, bindings: CommandMap) -> Self {
        self.bindings = bindings;
        self
    }

    /// The cooldown interval.
    #[must_use]
    pub const fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the window is empty or the threshold is outside
    /// `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        if self.window_size == 0 {
            return Err(CoreError::InvalidConfig {
                reason: "window_size must be at least 1".into(),
            });
        }
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(CoreError::InvalidConfig {
                reason: format!(
                    "confidence_threshold must be within [0, 1], got {}",
                    self.confidence_threshold
                ),
            });
        }
        Ok(())
    }
}

/// Coarse state of the stabilizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// The window is not yet full.
    Accumulating,
    /// The window is full and a majority is evaluated on every frame.
    Deciding,
}

/// Result of one observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Decision {
    /// The window is not full yet.
    Pending {
        /// Labels currently held.
        filled: usize,
        /// Labels needed.
        capacity: usize,
    },
    /// The window is full but the previous emission is too recent.
    CoolingDown {
        /// Current majority label.
        majority: GestureLabel,
        /// Time until the next emission may happen.
        remaining: Duration,
    },
    /// The majority label is not bound to any command.
    Unmapped {
        /// Current majority label.
        majority: GestureLabel,
    },
    /// A command was emitted and the window cleared. The command may be
    /// [`Command::None`].
    Emit {
        /// The emitted command.
        command: Command,
        /// The label that produced it.
        majority: GestureLabel,
    },
}

impl Decision {
    /// Returns the emitted command, if any, including the no-op.
    #[must_use]
    pub const fn command(&self) -> Option<Command> {
        match self {
            Self::Emit { command, .. } => Some(*command),
            _ => None,
        }
    }

    /// Returns true if a command was emitted.
    #[must_use]
    pub const fn is_emit(&self) -> bool {
        matches!(self, Self::Emit { .. })
    }
}

/// Session-scoped gesture stabilizer.
#[derive(Debug, Clone)]
pub struct GestureStabilizer<C = SystemClock> {
    config: StabilizerConfig,
    window: GestureWindow,
    last_emission: Option<Duration>,
    clock: C,
}

impl GestureStabilizer<SystemClock> {
    /// Creates a stabilizer with default tuning on the system clock.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::from_parts(StabilizerConfig::default(), SystemClock::new())
    }
}

impl<C: Clock> GestureStabilizer<C> {
    /// Creates a stabilizer.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid.
    pub fn new(config: StabilizerConfig, clock: C) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(config, clock))
    }

    fn from_parts(config: StabilizerConfig, clock: C) -> Self {
        Self {
            window: GestureWindow::new(config.window_size),
            config,
            last_emission: None,
            clock,
        }
    }

    /// Feeds one classified frame.
    pub fn observe(&mut self, label: GestureLabel, confidence: f32) -> Decision {
        if confidence > self.config.confidence_threshold {
            self.window.push(label);
        } else {
            debug!(%label, confidence, "dropped low-confidence frame");
        }

        if !self.window.is_full() {
            return Decision::Pending {
                filled: self.window.len(),
                capacity: self.window.capacity(),
            };
        }

        let Some(majority) = self.window.majority() else {
            return Decision::Pending {
                filled: 0,
                capacity: self.window.capacity(),
            };
        };

        let now = self.clock.now();
        if let Some(remaining) = self.cooldown_remaining_at(now) {
            return Decision::CoolingDown {
                majority,
                remaining,
            };
        }

        let Some(command) = self.config.bindings.mapped(majority) else {
            debug!(%majority, "majority gesture is not bound");
            return Decision::Unmapped { majority };
        };

        self.window.clear();
        self.last_emission = Some(now);
        info!(%majority, %command, "gesture command emitted");
        Decision::Emit { command, majority }
    }

    /// Feeds one frame produced by a classifier.
    pub fn observe_classification(&mut self, classification: Classification) -> Decision {
        self.observe(classification.label, classification.confidence)
    }

    /// Returns the coarse state.
    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.window.is_full() {
            Phase::Deciding
        } else {
            Phase::Accumulating
        }
    }

    /// Time until the next emission may happen, or `None` if eligible now.
    #[must_use]
    pub fn cooldown_remaining(&self) -> Option<Duration> {
        self.cooldown_remaining_at(self.clock.now())
    }

    fn cooldown_remaining_at(&self, now: Duration) -> Option<Duration> {
        let last = self.last_emission?;
        let elapsed = now.saturating_sub(last);
        let cooldown = self.config.cooldown();
        // Eligible only once elapsed strictly exceeds the interval.
        (elapsed <= cooldown).then(|| cooldown - elapsed)
    }

    /// Clock reading of the last emission.
    #[must_use]
    pub const fn last_emission(&self) -> Option<Duration> {
        self.last_emission
    }

    /// The voting window.
    #[must_use]
    pub const fn window(&self) -> &GestureWindow {
        &self.window
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &StabilizerConfig {
        &self.config
    }

    /// The injected clock.
    #[must_use]
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Returns to the initial state: empty window, no cooldown.
    pub fn reset(&mut self) {
        self.window.clear();
        self.last_emission = None;
    }
}
