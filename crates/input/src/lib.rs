//! Terminal input module (engine-facing).
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key and mouse events into [`crate::types::UiAction`]s. Mouse
//! hit-testing against the pad layout lives in the terminal view; this crate
//! only extracts click positions.

pub mod map;

pub use tui_simon_types as types;

pub use map::{handle_key_event, left_click, should_quit};
