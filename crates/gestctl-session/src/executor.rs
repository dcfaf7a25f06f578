//! Command executors: the side-effecting end of a dispatch.
//!
//! An executor performs one instance lifecycle action (or a list refresh)
//! and reports a human-readable result. Sessions call an executor at most
//! once per emitted command and never retry.

use gestctl_core::Command;
use tracing::info;

use crate::error::ExecutorError;

/// Performs the action behind a [`Command`] against a target instance.
pub trait CommandExecutor {
    /// Executes `command` against `target`.
    ///
    /// Never called with [`Command::None`].
    fn execute(&mut self, command: Command, target: &str) -> Result<String, ExecutorError>;
}

impl<E: CommandExecutor + ?Sized> CommandExecutor for Box<E> {
    fn execute(&mut self, command: Command, target: &str) -> Result<String, ExecutorError> {
        (**self).execute(command, target)
    }
}

impl<E: CommandExecutor + ?Sized> CommandExecutor for &mut E {
    fn execute(&mut self, command: Command, target: &str) -> Result<String, ExecutorError> {
        (**self).execute(command, target)
    }
}

/// Success message for a completed command.
#[must_use]
pub fn success_message(command: Command, target: &str) -> String {
    match command {
        Command::Start => format!("started instance {target}"),
        Command::Stop => format!("stopped instance {target}"),
        Command::Restart => format!("restarted instance {target}"),
        Command::List => "refreshing instance list".to_string(),
        Command::None => String::new(),
    }
}

/// Executor that performs no side effects and remembers what it was asked.
#[derive(Debug, Clone, Default)]
pub struct DryRunExecutor {
    executed: Vec<(Command, String)>,
}

impl DryRunExecutor {
    /// Creates an executor with an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `(command, target)` pair executed so far.
    #[must_use]
    pub fn executed(&self) -> &[(Command, String)] {
        &self.executed
    }
}

impl CommandExecutor for DryRunExecutor {
    fn execute(&mut self, command: Command, target: &str) -> Result<String, ExecutorError> {
        info!(%command, target, "dry run");
        self.executed.push((command, target.to_string()));
        Ok(success_message(command, target))
    }
}
