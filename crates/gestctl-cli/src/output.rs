//! Rendering of command results as aligned tables or pretty JSON.

use std::io::Write;

use gestctl_core::{Command, GestureLabel};
use gestctl_session::CommandRecord;
use serde::Serialize;

use crate::cli::Format;
use crate::error::CliError;

/// Selected rendering for command results.
#[derive(Debug, Clone)]
pub struct OutputFormat {
    format: Format,
}

impl OutputFormat {
    /// Renders in `format`.
    #[must_use]
    pub const fn new(format: Format) -> Self {
        Self { format }
    }

    /// Renders `value` to `writer`.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON encoding or the write fails.
    pub fn write<W, T>(&self, writer: &mut W, value: &T) -> Result<(), CliError>
    where
        W: Write,
        T: Serialize + TableDisplay,
    {
        match self.format {
            Format::Json => {
                serde_json::to_writer_pretty(&mut *writer, value)
                    .map_err(|e| CliError::Format(format!("JSON serialization failed: {e}")))?;
                writeln!(writer)?;
            }
            Format::Table => {
                value.write_table(writer)?;
            }
        }
        Ok(())
    }

    /// Renders `value` into a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON encoding fails.
    pub fn render<T>(&self, value: &T) -> Result<String, CliError>
    where
        T: Serialize + TableDisplay,
    {
        let mut buf = Vec::new();
        self.write(&mut buf, value)?;
        String::from_utf8(buf).map_err(|e| CliError::Format(format!("UTF-8 error: {e}")))
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::new(Format::Table)
    }
}

/// Views with a human-readable table form.
pub trait TableDisplay {
    /// Writes the table.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError>;
}

/// Classification of one finger pattern.
#[derive(Debug, Clone, Serialize)]
pub struct ClassifyView {
    /// Normalized pattern, thumb first.
    pub pattern: String,
    /// Recognized gesture.
    pub gesture: GestureLabel,
    /// Bound command.
    pub command: Command,
    /// Confidence score.
    pub confidence: f32,
    /// Whether the score passes the stabilizer's threshold.
    pub accepted: bool,
}

impl TableDisplay for ClassifyView {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "Pattern:     {}", self.pattern)?;
        writeln!(writer, "Gesture:     {}", self.gesture)?;
        writeln!(writer, "Command:     {}", self.command)?;
        writeln!(
            writer,
            "Confidence:  {:.2} ({})",
            self.confidence,
            if self.accepted { "accepted" } else { "dropped" }
        )?;
        Ok(())
    }
}

/// One gesture binding.
#[derive(Debug, Clone, Serialize)]
pub struct BindingRow {
    /// Gesture label.
    pub gesture: GestureLabel,
    /// Finger pattern that produces the gesture, if it has one.
    pub pattern: Option<String>,
    /// Bound command.
    pub command: Command,
}

/// The full gesture binding table.
#[derive(Debug, Clone, Serialize)]
pub struct BindingsView {
    /// One row per gesture.
    pub bindings: Vec<BindingRow>,
}

impl TableDisplay for BindingsView {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "{:<12} {:<10} {:<8}", "GESTURE", "PATTERN", "COMMAND")?;
        for row in &self.bindings {
            writeln!(
                writer,
                "{:<12} {:<10} {:<8}",
                row.gesture.as_str(),
                row.pattern.as_deref().unwrap_or("-"),
                row.command.as_str()
            )?;
        }
        Ok(())
    }
}

/// A command emitted during a replay.
#[derive(Debug, Clone, Serialize)]
pub struct EmissionRow {
    /// Frame sequence number.
    pub frame: u64,
    /// Trace timestamp.
    pub at_ms: u64,
    /// Emitted command.
    pub command: Command,
    /// Gesture that produced it.
    pub gesture: GestureLabel,
    /// Dispatch result text.
    pub result: String,
}

/// Result of replaying a trace.
#[derive(Debug, Clone, Serialize)]
pub struct ReplaySummary {
    /// Frames captured successfully.
    pub frames: u64,
    /// Frames whose capture failed.
    pub capture_failures: usize,
    /// Emitted commands in order.
    pub emissions: Vec<EmissionRow>,
    /// Dispatched command history.
    pub history: Vec<CommandRecord>,
}

/// Number of history records shown in the table view.
pub const RECENT_HISTORY: usize = 10;

impl TableDisplay for ReplaySummary {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "Replay Summary")?;
        writeln!(writer, "══════════════════════════════════")?;
        writeln!(writer, "Frames:            {}", self.frames)?;
        writeln!(writer, "Capture failures:  {}", self.capture_failures)?;
        writeln!(writer, "Emissions:         {}", self.emissions.len())?;
        writeln!(writer)?;

        if self.emissions.is_empty() {
            writeln!(writer, "No commands emitted.")?;
        } else {
            writeln!(
                writer,
                "{:<7} {:<9} {:<8} {:<12} RESULT",
                "FRAME", "AT_MS", "COMMAND", "GESTURE"
            )?;
            for row in &self.emissions {
                writeln!(
                    writer,
                    "{:<7} {:<9} {:<8} {:<12} {}",
                    row.frame,
                    row.at_ms,
                    row.command.as_str(),
                    row.gesture.as_str(),
                    row.result
                )?;
            }
        }

        if self.history.is_empty() {
            return Ok(());
        }

        let skip = self.history.len().saturating_sub(RECENT_HISTORY);
        writeln!(writer)?;
        writeln!(
            writer,
            "Command History ({} of {})",
            self.history.len() - skip,
            self.history.len()
        )?;
        writeln!(writer, "{:<10} {:<8} {:<16} RESULT", "TIME", "COMMAND", "TARGET")?;
        for record in self.history.iter().skip(skip) {
            writeln!(
                writer,
                "{:<10} {:<8} {:<16} {}",
                record.timestamp.format("%H:%M:%S"),
                record.command.as_str(),
                record.target,
                record.outcome.text()
            )?;
        }
        Ok(())
    }
}
