//! Command-line argument parsing with clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// gestctl - hand gesture instance control.
#[derive(Parser, Debug, Clone)]
#[command(name = "gestctl")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Session configuration file (TOML).
    #[arg(short, long, env = "GESTCTL_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Table, global = true)]
    pub format: Format,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum Format {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON output for scripting.
    Json,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Classify a single finger pattern.
    Classify(ClassifyArgs),

    /// Show which command each gesture triggers.
    Bindings,

    /// Replay a recorded pose trace through a full session.
    ///
    /// The trace is JSON lines, one frame per line:
    /// `{"at_ms": 0, "pose": [1,0,0,0,0]}`. Use `"pose": null` for a frame
    /// with no hand, or `"error": "..."` for a failed capture.
    Replay(ReplayArgs),
}

/// Arguments for the classify command.
#[derive(Parser, Debug, Clone)]
pub struct ClassifyArgs {
    /// Finger flags, thumb first: "1,0,0,0,0" or "10000".
    #[arg(required = true)]
    pub pattern: String,
}

/// Arguments for the replay command.
#[derive(Parser, Debug, Clone)]
pub struct ReplayArgs {
    /// Trace file to replay.
    #[arg(required = true)]
    pub trace: PathBuf,

    /// Instance that commands act on.
    #[arg(short, long)]
    pub target: Option<String>,

    /// Override the stabilization window size.
    #[arg(long)]
    pub window: Option<usize>,

    /// Override the cooldown, in milliseconds.
    #[arg(long)]
    pub cooldown_ms: Option<u64>,

    /// Override the confidence threshold.
    #[arg(long)]
    pub threshold: Option<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_classify() {
        let cli = Cli::try_parse_from(["gestctl", "classify", "1,0,0,0,0"]).unwrap();
        assert_eq!(cli.format, Format::Table);
        match cli.command {
            Commands::Classify(args) => assert_eq!(args.pattern, "1,0,0,0,0"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parse_global_format_after_subcommand() {
        let cli = Cli::try_parse_from(["gestctl", "bindings", "--format", "json"]).unwrap();
        assert_eq!(cli.format, Format::Json);
        assert!(matches!(cli.command, Commands::Bindings));
    }

    #[test]
    fn parse_replay_overrides() {
        let cli = Cli::try_parse_from([
            "gestctl",
            "replay",
            "trace.jsonl",
            "--target",
            "i-1",
            "--window",
            "3",
            "--cooldown-ms",
            "500",
            "--threshold",
            "0.5",
        ])
        .unwrap();
        match cli.command {
            Commands::Replay(args) => {
                assert_eq!(args.trace, PathBuf::from("trace.jsonl"));
                assert_eq!(args.target.as_deref(), Some("i-1"));
                assert_eq!(args.window, Some(3));
                assert_eq!(args.cooldown_ms, Some(500));
                assert_eq!(args.threshold, Some(0.5));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn replay_requires_trace() {
        assert!(Cli::try_parse_from(["gestctl", "replay"]).is_err());
    }
}
