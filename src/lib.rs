//! TUI Simon Says (workspace facade crate).
//!
//! Re-exports the workspace crates under `tui_simon::{core,host,input,term,types}`
//! and holds the small amount of glue the binary needs: argument parsing and
//! the [`app::App`] state that sits between input events and the game.

pub use tui_simon_core as core;
pub use tui_simon_host as host;
pub use tui_simon_input as input;
pub use tui_simon_term as term;
pub use tui_simon_types as types;

pub mod app;
pub mod cli;
