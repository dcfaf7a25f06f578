//! Replay command implementation.

use std::io::Write;

use gestctl_core::{Decision, ManualClock};
use gestctl_session::{
    Dispatch, DryRunExecutor, FrameReport, GestureSession, SessionConfig, SessionError,
};
use tracing::{debug, info};

use crate::cli::ReplayArgs;
use crate::error::CliError;
use crate::output::{EmissionRow, OutputFormat, ReplaySummary};
use crate::trace::{self, TraceFrame, TraceSource};

/// Replay command executor.
pub struct ReplayCommand {
    config: SessionConfig,
}

impl ReplayCommand {
    /// Create a new replay command.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self { config }
    }

    /// Execute the replay command.
    ///
    /// # Errors
    ///
    /// Returns an error if the trace or configuration is invalid, or output fails.
    pub fn execute<W: Write>(
        &self,
        writer: &mut W,
        format: &OutputFormat,
        args: &ReplayArgs,
    ) -> Result<(), CliError> {
        let frames = trace::load(&args.trace)?;
        let summary = self.replay(frames, args)?;
        format.write(writer, &summary)
    }

    /// Runs `frames` through a dry-run session.
    ///
    /// # Errors
    ///
    /// Returns an error if the overridden configuration is invalid.
    pub fn replay(
        &self,
        frames: Vec<TraceFrame>,
        args: &ReplayArgs,
    ) -> Result<ReplaySummary, CliError> {
        let config = self.effective_config(args);
        let total = frames.len();
        let clock = ManualClock::new();
        let source = TraceSource::new(frames, clock.clone());
        let mut session = GestureSession::with_clock(config, source, DryRunExecutor::new(), clock)?;
        info!(session = %session.id(), frames = total, "replaying trace");

        let mut capture_failures = 0;
        let mut emissions = Vec::new();
        while session.source_mut().remaining() > 0 {
            match session.process_frame() {
                Ok(report) => {
                    let at_ms = session.source_mut().current_at_ms();
                    if let Some(row) = emission_row(report, at_ms) {
                        emissions.push(row);
                    }
                }
                Err(SessionError::Capture(e)) => {
                    debug!(error = %e, "skipping failed frame");
                    capture_failures += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }

        let frames = session.frames_processed();
        let history = session.finish().iter().cloned().collect();
        Ok(ReplaySummary {
            frames,
            capture_failures,
            emissions,
            history,
        })
    }

    fn effective_config(&self, args: &ReplayArgs) -> SessionConfig {
        let mut config = self.config.clone();
        if let Some(target) = &args.target {
            config.target = Some(target.clone());
        }
        if let Some(window) = args.window {
            config.stabilizer.window_size = window;
        }
        if let Some(cooldown_ms) = args.cooldown_ms {
            config.stabilizer.cooldown_ms = cooldown_ms;
        }
        if let Some(threshold) = args.threshold {
            config.stabilizer.confidence_threshold = threshold;
        }
        config
    }
}

fn emission_row(report: FrameReport, at_ms: u64) -> Option<EmissionRow> {
    let Decision::Emit { command, majority } = report.decision else {
        return None;
    };
    let result = match report.dispatch {
        Some(Dispatch::Recorded(record)) => record.outcome.text().to_string(),
        Some(Dispatch::Skipped { reason }) => reason,
        None => String::new(),
    };
    Some(EmissionRow {
        frame: report.frame,
        at_ms,
        command,
        gesture: majority,
        result,
    })
}
