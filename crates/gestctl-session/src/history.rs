//! Bounded log of dispatched commands.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use gestctl_core::Command;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default number of records kept.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Result of one executor call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DispatchOutcome {
    /// The action completed.
    Succeeded {
        /// Executor message.
        message: String,
    },
    /// The action failed.
    Failed {
        /// Failure description.
        error: String,
    },
}

impl DispatchOutcome {
    /// Returns true if the action completed.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }

    /// The message or error text.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Succeeded { message } => message,
            Self::Failed { error } => error,
        }
    }
}

/// One dispatched command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRecord {
    /// Unique record ID.
    pub id: Uuid,
    /// When the command was dispatched.
    pub timestamp: DateTime<Utc>,
    /// The command.
    pub command: Command,
    /// Target instance.
    pub target: String,
    /// What happened.
    pub outcome: DispatchOutcome,
}

impl CommandRecord {
    /// Creates a record stamped now.
    pub fn new(command: Command, target: impl Into<String>, outcome: DispatchOutcome) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            command,
            target: target.into(),
            outcome,
        }
    }
}

/// Command history, oldest first, capped at `limit` records.
#[derive(Debug, Clone)]
pub struct CommandHistory {
    records: VecDeque<CommandRecord>,
    limit: usize,
}

impl CommandHistory {
    /// Creates an empty history. A limit of zero is raised to one.
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self {
            records: VecDeque::new(),
            limit: limit.max(1),
        }
    }

    /// Appends a record, dropping the oldest if over the limit.
    pub fn push(&mut self, record: CommandRecord) {
        if self.records.len() >= self.limit {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    /// Maximum number of records kept.
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates over every record, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &CommandRecord> {
        self.records.iter()
    }

    /// The last `n` records, oldest first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &CommandRecord> {
        self.records.iter().skip(self.records.len().saturating_sub(n))
    }

    /// The most recent record.
    #[must_use]
    pub fn last(&self) -> Option<&CommandRecord> {
        self.records.back()
    }

    /// Number of records for `command`.
    #[must_use]
    pub fn count(&self, command: Command) -> usize {
        self.records.iter().filter(|r| r.command == command).count()
    }

    /// Drops every record.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ok(message: &str) -> DispatchOutcome {
        DispatchOutcome::Succeeded {
            message: message.into(),
        }
    }

    fn record(command: Command) -> CommandRecord {
        CommandRecord::new(command, "i-1", ok("done"))
    }

    #[test]
    fn push_and_last() {
        let mut history = CommandHistory::default();
        assert!(history.is_empty());
        history.push(record(Command::Start));
        history.push(record(Command::Stop));
        assert_eq!(history.len(), 2);
        assert_eq!(history.last().map(|r| r.command), Some(Command::Stop));
    }

    #[test]
    fn limit_drops_oldest() {
        let mut history = CommandHistory::new(2);
        history.push(record(Command::Start));
        history.push(record(Command::Stop));
        history.push(record(Command::Restart));
        let commands: Vec<_> = history.iter().map(|r| r.command).collect();
        assert_eq!(commands, vec![Command::Stop, Command::Restart]);
    }

    #[test]
    fn recent_returns_tail_oldest_first() {
        let mut history = CommandHistory::default();
        for command in [Command::Start, Command::Stop, Command::Restart, Command::List] {
            history.push(record(command));
        }
        let commands: Vec<_> = history.recent(2).map(|r| r.command).collect();
        assert_eq!(commands, vec![Command::Restart, Command::List]);
        assert_eq!(history.recent(10).count(), 4);
    }

    #[test]
    fn count_by_command() {
        let mut history = CommandHistory::default();
        history.push(record(Command::Start));
        history.push(record(Command::Start));
        history.push(record(Command::List));
        assert_eq!(history.count(Command::Start), 2);
        assert_eq!(history.count(Command::Stop), 0);
    }

    #[test]
    fn outcome_text_and_status() {
        let failed = DispatchOutcome::Failed {
            error: "denied".into(),
        };
        assert!(!failed.is_success());
        assert_eq!(failed.text(), "denied");
        assert!(ok("fine").is_success());
    }

    #[test]
    fn record_serializes_outcome_with_tag() {
        let record = CommandRecord::new(Command::Restart, "i-7", ok("restarted instance i-7"));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["command"], "restart");
        assert_eq!(json["target"], "i-7");
        assert_eq!(json["outcome"]["status"], "succeeded");
        assert_eq!(json["outcome"]["message"], "restarted instance i-7");
    }

    #[test]
    fn records_have_unique_ids() {
        let a = record(Command::Start);
        let b = record(Command::Start);
        assert_ne!(a.id, b.id);
    }

    proptest! {
        #[test]
        fn prop_history_never_exceeds_limit(limit in 1usize..20, pushes in 0usize..60) {
            let mut history = CommandHistory::new(limit);
            for _ in 0..pushes {
                history.push(record(Command::List));
                prop_assert!(history.len() <= limit);
            }
            prop_assert_eq!(history.len(), pushes.min(limit));
        }
    }
}
