//! CLI command implementations.
//!
//! Each submodule implements a specific CLI command:
//! - [`classify`] - Classify one finger pattern
//! - [`bindings`] - Gesture to command table
//! - [`replay`] - Replay a pose trace through a session

use std::path::Path;

use gestctl_session::SessionConfig;
use tracing::debug;

use crate::error::CliError;

pub mod bindings;
pub mod classify;
pub mod replay;

pub use bindings::BindingsCommand;
pub use classify::ClassifyCommand;
pub use replay::ReplayCommand;

/// Loads the session configuration, or the defaults if no file is given.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&Path>) -> Result<SessionConfig, CliError> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "loading session config");
            Ok(SessionConfig::from_file(path)?)
        }
        None => Ok(SessionConfig::default()),
    }
}
