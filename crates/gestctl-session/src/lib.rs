//! # gestctl-session
//!
//! Session controller that turns a stream of hand poses into dispatched
//! instance commands.
//!
//! Provides:
//! - [`PoseSource`] - per-frame finger states from a hand tracker
//! - [`CommandExecutor`] - the side-effecting end of a dispatch
//! - [`GestureSession`] - owns one stabilizer per camera session
//! - [`CommandHistory`] - bounded log of dispatched commands
//! - [`SessionConfig`] - TOML configuration
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐  FingerState  ┌──────────────────────────────┐  Command  ┌─────────────────┐
//! │ PoseSource │ ────────────► │        GestureSession        │ ────────► │ CommandExecutor │
//! └────────────┘               │  classifier → stabilizer     │           └─────────────────┘
//!                              │  target, CommandHistory      │
//!                              └──────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use gestctl_core::{Command, FingerState};
//! use gestctl_session::{DryRunExecutor, GestureSession, ScriptedSource, SessionConfig};
//!
//! let fist = FingerState::from_bits(0);
//! let source = ScriptedSource::new().with_repeated(fist, 5);
//! let mut session = GestureSession::new(SessionConfig::default(), source, DryRunExecutor::new())?;
//! session.select_target("i-0abc123");
//!
//! let mut last = None;
//! for _ in 0..5 {
//!     last = session.process_frame()?.command();
//! }
//! assert_eq!(last, Some(Command::Restart));
//! assert_eq!(session.history().len(), 1);
//! # Ok::<(), gestctl_session::SessionError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod executor;
pub mod history;
pub mod session;
pub mod source;

pub use config::{ConfidenceSettings, SessionConfig};
pub use error::{CaptureError, ExecutorError, Result, SessionError};
pub use executor::{success_message, CommandExecutor, DryRunExecutor};
pub use history::{CommandHistory, CommandRecord, DispatchOutcome, DEFAULT_HISTORY_LIMIT};
pub use session::{Dispatch, FrameReport, GestureSession};
pub use source::{PoseSource, ScriptedSource};
