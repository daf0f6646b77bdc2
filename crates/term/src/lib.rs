//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It avoids widget/layout libraries and instead renders into a simple
//! framebuffer that is diffed and flushed to the terminal.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Compute the pad layout once per viewport and reuse it for both drawing
//!   and mouse hit-testing
//! - Only write changed cells to the terminal

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_simon_core as core;
pub use tui_simon_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rect, Rgb};
pub use game_view::{Button, GameView, HudState, Layout, Viewport, CONTENT_H, CONTENT_W};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
