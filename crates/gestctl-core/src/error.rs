//! Error types for gesture classification and stabilization.

use thiserror::Error;

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised while building core values.
///
/// Classification and stabilization themselves never fail; these errors only
/// come from constructing inputs or configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Invalid stabilizer configuration.
    #[error("invalid stabilizer config: {reason}")]
    InvalidConfig {
        /// Description of why the configuration is invalid.
        reason: String,
    },

    /// A finger pattern did not contain exactly five flags.
    #[error("finger pattern must have 5 flags, got {len}")]
    PatternLength {
        /// Number of flags supplied.
        len: usize,
    },

    /// A finger flag was not 0 or 1.
    #[error("finger flag at position {position} must be 0 or 1, got {value}")]
    InvalidFlag {
        /// Digit position (0 = thumb).
        position: usize,
        /// Offending value.
        value: u8,
    },

    /// A finger pattern could not be parsed from text.
    #[error("cannot parse finger pattern '{input}'")]
    Unparsable {
        /// The input text.
        input: String,
    },

    /// An unknown gesture or command name.
    #[error("unknown {kind}: {name}")]
    UnknownName {
        /// What was being parsed ("gesture" or "command").
        kind: &'static str,
        /// The unrecognized name.
        name: String,
    },
}
