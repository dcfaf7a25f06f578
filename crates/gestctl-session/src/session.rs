//! Camera session controller.
//!
//! A [`GestureSession`] owns one [`GestureStabilizer`] for the lifetime of an
//! interactive camera session. Each [`GestureSession::process_frame`] call:
//!
//! 1. captures one frame from the [`PoseSource`]
//! 2. classifies it (no hand = `none` at confidence 0)
//! 3. feeds the stabilizer
//! 4. dispatches an emitted command to the [`CommandExecutor`]
//!
//! Commands can also be dispatched manually, bypassing the stabilizer.

use gestctl_core::{
    Classification, Clock, Command, ConfidenceModel, Decision, GestureClassifier,
    GestureStabilizer, SystemClock,
};
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::SessionConfig;
use crate::error::Result;
use crate::executor::CommandExecutor;
use crate::history::{CommandHistory, CommandRecord, DispatchOutcome};
use crate::source::PoseSource;

/// What happened when a command was handed to dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "dispatch", rename_all = "snake_case")]
pub enum Dispatch {
    /// The executor was called; the record is also in the history.
    Recorded(CommandRecord),
    /// The executor was not called.
    Skipped {
        /// Why nothing ran.
        reason: String,
    },
}

impl Dispatch {
    /// Returns the record if the executor was called.
    #[must_use]
    pub const fn record(&self) -> Option<&CommandRecord> {
        match self {
            Self::Recorded(record) => Some(record),
            Self::Skipped { .. } => None,
        }
    }
}

/// Result of processing one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameReport {
    /// Frame sequence number within the session, starting at 1.
    pub frame: u64,
    /// Classified gesture, for display.
    pub classification: Classification,
    /// Stabilizer decision.
    pub decision: Decision,
    /// Dispatch of the emitted command, if any.
    pub dispatch: Option<Dispatch>,
}

impl FrameReport {
    /// The emitted command, if any.
    #[must_use]
    pub const fn command(&self) -> Option<Command> {
        self.decision.command()
    }
}

/// One interactive gesture control session.
pub struct GestureSession<S, E, C = SystemClock> {
    id: Uuid,
    source: S,
    executor: E,
    classifier: GestureClassifier<Box<dyn ConfidenceModel>>,
    stabilizer: GestureStabilizer<C>,
    history: CommandHistory,
    target: Option<String>,
    frames: u64,
}

impl<S: PoseSource, E: CommandExecutor> GestureSession<S, E, SystemClock> {
    /// Creates a session on the system clock.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid.
    pub fn new(config: SessionConfig, source: S, executor: E) -> Result<Self> {
        Self::with_clock(config, source, executor, SystemClock::new())
    }
}

impl<S: PoseSource, E: CommandExecutor, C: Clock> GestureSession<S, E, C> {
    /// Creates a session with an injected clock.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid.
    pub fn with_clock(config: SessionConfig, source: S, executor: E, clock: C) -> Result<Self> {
        config.validate()?;
        let stabilizer = GestureStabilizer::new(config.stabilizer, clock)?;
        let id = Uuid::new_v4();
        info!(session = %id, target = ?config.target, "gesture session started");

        Ok(Self {
            id,
            source,
            executor,
            classifier: GestureClassifier::new(config.confidence.build()),
            stabilizer,
            history: CommandHistory::new(config.history_limit),
            target: config.target,
            frames: 0,
        })
    }

    /// Replaces the confidence model.
    #[must_use]
    pub fn with_confidence_model(mut self, model: impl ConfidenceModel + 'static) -> Self {
        self.classifier = GestureClassifier::new(Box::new(model));
        self
    }

    /// Captures, classifies, and stabilizes one frame, dispatching any
    /// emitted command.
    ///
    /// # Errors
    ///
    /// Returns an error if the pose source fails. The stabilizer is left
    /// untouched in that case.
    pub fn process_frame(&mut self) -> Result<FrameReport> {
        let pose = self.source.capture().map_err(|e| {
            warn!(session = %self.id, error = %e, "frame capture failed");
            e
        })?;
        self.frames += 1;

        let classification = self.classifier.classify(pose);
        let decision = self.stabilizer.observe_classification(classification);
        debug!(
            session = %self.id,
            frame = self.frames,
            label = %classification.label,
            confidence = classification.confidence,
            ?decision,
            "frame processed"
        );

        let dispatch = decision.command().map(|command| self.dispatch(command));

        Ok(FrameReport {
            frame: self.frames,
            classification,
            decision,
            dispatch,
        })
    }

    /// Dispatches `command` to the executor against the selected target.
    ///
    /// Nothing runs for [`Command::None`] or without a target. Executor
    /// failures are recorded, never retried.
    pub fn dispatch(&mut self, command: Command) -> Dispatch {
        if !command.is_action() {
            return Dispatch::Skipped {
                reason: "no action".to_string(),
            };
        }
        let Some(target) = self.target.clone() else {
            warn!(session = %self.id, %command, "command dropped, no instance selected");
            return Dispatch::Skipped {
                reason: "no instance selected".to_string(),
            };
        };

        let outcome = match self.executor.execute(command, &target) {
            Ok(message) => {
                info!(session = %self.id, %command, target = %target, "command executed");
                DispatchOutcome::Succeeded { message }
            }
            Err(e) => {
                warn!(session = %self.id, %command, target = %target, error = %e, "command failed");
                DispatchOutcome::Failed {
                    error: e.to_string(),
                }
            }
        };

        let record = CommandRecord::new(command, target, outcome);
        self.history.push(record.clone());
        Dispatch::Recorded(record)
    }

    /// Selects the instance that commands act on.
    pub fn select_target(&mut self, target: impl Into<String>) {
        let target = target.into();
        debug!(session = %self.id, target = %target, "target selected");
        self.target = Some(target);
    }

    /// Clears the selected instance.
    pub fn clear_target(&mut self) {
        self.target = None;
    }

    /// The selected instance.
    #[must_use]
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// Unique session ID.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Frames successfully captured so far.
    #[must_use]
    pub const fn frames_processed(&self) -> u64 {
        self.frames
    }

    /// Dispatched command history.
    #[must_use]
    pub const fn history(&self) -> &CommandHistory {
        &self.history
    }

    /// The session's stabilizer.
    #[must_use]
    pub const fn stabilizer(&self) -> &GestureStabilizer<C> {
        &self.stabilizer
    }

    /// The executor.
    #[must_use]
    pub const fn executor(&self) -> &E {
        &self.executor
    }

    /// The pose source.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Clears the gesture window and cooldown, keeping target and history.
    pub fn reset(&mut self) {
        self.stabilizer.reset();
    }

    /// Ends the session, returning its command history.
    #[must_use]
    pub fn finish(self) -> CommandHistory {
        info!(
            session = %self.id,
            frames = self.frames,
            commands = self.history.len(),
            "gesture session ended"
        );
        self.history
    }
}
