//! Host services for the terminal front-end.
//!
//! Everything here touches the outside world: environment variables, the
//! speech program on `PATH`, and the session log file. The game core stays
//! pure and hands its side effects over as [`GameEvent`](crate::core::GameEvent)s.
//!
//! - [`config`]: `SIMON_*` environment configuration
//! - [`speech`]: engine detection and the sequential speech queue
//! - [`log`]: JSON-lines session log writer
//! - [`runtime`]: the tokio runtime tying it together

pub mod config;
pub mod log;
pub mod runtime;
pub mod speech;

pub use tui_simon_core as core;
pub use tui_simon_types as types;

pub use config::{HostConfig, SpeechMode};
pub use log::LogRecord;
pub use runtime::HostServices;
pub use speech::{EngineKind, SpeechEngine, SpeechWorker};
