//! Bindings command implementation.

use std::io::Write;

use gestctl_core::{classify, FingerState, GestureLabel};
use gestctl_session::SessionConfig;

use crate::error::CliError;
use crate::output::{BindingRow, BindingsView, OutputFormat};

/// Bindings command executor.
pub struct BindingsCommand {
    config: SessionConfig,
}

impl BindingsCommand {
    /// Create a new bindings command.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self { config }
    }

    /// Execute the bindings command.
    ///
    /// # Errors
    ///
    /// Returns an error if output fails.
    pub fn execute<W: Write>(&self, writer: &mut W, format: &OutputFormat) -> Result<(), CliError> {
        format.write(writer, &self.view())
    }

    /// Build the binding table.
    #[must_use]
    pub fn view(&self) -> BindingsView {
        let bindings = self
            .config
            .stabilizer
            .bindings
            .iter()
            .map(|(gesture, command)| BindingRow {
                gesture,
                pattern: pattern_for(gesture).map(|state| state.to_string()),
                command,
            })
            .collect();
        BindingsView { bindings }
    }
}

/// The single finger pattern that produces `label`; `none` has no pattern.
fn pattern_for(label: GestureLabel) -> Option<FingerState> {
    if label == GestureLabel::None {
        return None;
    }
    (0u8..32)
        .map(FingerState::from_bits)
        .find(|&state| classify(state) == label)
}
