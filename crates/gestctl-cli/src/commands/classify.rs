//! Classify command implementation.

use std::io::Write;

use gestctl_core::{FingerState, GestureClassifier};
use gestctl_session::SessionConfig;

use crate::cli::ClassifyArgs;
use crate::error::CliError;
use crate::output::{ClassifyView, OutputFormat};

/// Classify command executor.
pub struct ClassifyCommand {
    config: SessionConfig,
}

impl ClassifyCommand {
    /// Create a new classify command.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self { config }
    }

    /// Execute the classify command.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is invalid or output fails.
    pub fn execute<W: Write>(
        &self,
        writer: &mut W,
        format: &OutputFormat,
        args: &ClassifyArgs,
    ) -> Result<(), CliError> {
        let view = self.classify(&args.pattern)?;
        format.write(writer, &view)
    }

    /// Classify a pattern against the configured model and bindings.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is not five 0/1 flags.
    pub fn classify(&self, pattern: &str) -> Result<ClassifyView, CliError> {
        let state: FingerState = pattern.parse()?;
        let classifier = GestureClassifier::new(self.config.confidence.build());
        let classification = classifier.classify(Some(state));

        Ok(ClassifyView {
            pattern: state.to_string(),
            gesture: classification.label,
            command: self.config.stabilizer.bindings.command_for(classification.label),
            confidence: classification.confidence,
            accepted: classification.confidence > self.config.stabilizer.confidence_threshold,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gestctl_core::{Command, GestureLabel};
    use gestctl_session::ConfidenceSettings;

    #[test]
    fn classify_thumbs_up() {
        let view = ClassifyCommand::new(SessionConfig::default())
            .classify("10000")
            .unwrap();
        assert_eq!(view.pattern, "1,0,0,0,0");
        assert_eq!(view.gesture, GestureLabel::ThumbsUp);
        assert_eq!(view.command, Command::Start);
        assert!(view.accepted);
    }

    #[test]
    fn classify_unknown_pattern_is_none() {
        let view = ClassifyCommand::new(SessionConfig::default())
            .classify("1,1,0,0,0")
            .unwrap();
        assert_eq!(view.gesture, GestureLabel::None);
        assert_eq!(view.command, Command::None);
    }

    #[test]
    fn classify_respects_confidence_model() {
        let config = SessionConfig {
            confidence: ConfidenceSettings::Fixed { value: 0.6 },
            ..SessionConfig::default()
        };
        let view = ClassifyCommand::new(config).classify("0,1,1,0,0").unwrap();
        assert_eq!(view.gesture, GestureLabel::Peace);
        assert!(!view.accepted);
    }

    #[test]
    fn classify_rejects_bad_pattern() {
        let err = ClassifyCommand::new(SessionConfig::default())
            .classify("1,0,2,0,0")
            .unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
    }
}
