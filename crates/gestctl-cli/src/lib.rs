//! # gestctl-cli
//!
//! Command-line front end for gesture-driven instance control.
//!
//! Provides commands for:
//! - Classifying a single finger pattern
//! - Listing gesture bindings
//! - Replaying recorded pose traces through a dry-run session
//!
//! # Architecture
//!
//! Replays drive a [`gestctl_session::GestureSession`] from a
//! [`trace::TraceSource`], which also advances a manual clock to each
//! frame's recorded time, so cooldowns follow trace time rather than
//! wall time.
//!
//! ```text
//! ┌─────────────┐  frames   ┌────────────────┐  commands  ┌────────────────┐
//! │ trace.jsonl │ ────────► │ GestureSession │ ─────────► │ DryRunExecutor │
//! └─────────────┘           └────────────────┘            └────────────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;
pub mod trace;

pub use cli::{Cli, ClassifyArgs, Commands, Format, ReplayArgs};
pub use error::CliError;
pub use output::OutputFormat;
