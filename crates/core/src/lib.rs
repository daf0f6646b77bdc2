//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the game rules, state management, and timing logic.
//! It has **zero dependencies** on UI, terminal, or I/O, which makes it:
//!
//! - **Deterministic**: Same seed produces identical sequences
//! - **Testable**: Time is virtual and advanced explicitly with [`Game::tick`]
//! - **Portable**: Can run behind any front-end (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`game`]: The game controller (round progression and the state machine)
//! - [`playback`]: Cancellable, timed replay of the sequence
//! - [`validator`]: Prefix comparison of player input against the sequence
//! - [`rng`]: Seeded uniform signal generation
//! - [`timer`]: Virtual-clock timer queue and timing configuration
//! - [`announcer`]: Mute-aware speech announcer over a host speech sink
//! - [`snapshot`]: Copyable view of the game state for renderers
//!
//! # Game Rules
//!
//! - Starting a game appends one random signal and plays the sequence back
//! - The player reproduces the sequence one signal at a time
//! - A full correct repeat scores a point; after a short delay one more signal
//!   is appended and the extended sequence is played back
//! - The first wrong signal ends the game
//!
//! # Example
//!
//! ```
//! use tui_simon_core::Game;
//! use tui_simon_types::{GameAction, Verdict};
//!
//! let mut game = Game::new(12345);
//! game.apply_action(GameAction::Start);
//!
//! // Repeat the sequence back.
//! let expected = game.sequence()[0];
//! assert_eq!(game.press(expected), Some(Verdict::RoundComplete));
//! assert_eq!(game.score(), 1);
//!
//! // 1.5s later the sequence grows by one.
//! game.tick(1500);
//! assert_eq!(game.sequence().len(), 2);
//! ```
//!
//! # Timing
//!
//! Call [`Game::tick`] every frame with the elapsed time (16ms in the terminal
//! front-end). Playback lights signal `i` at `1000 + (i + 1) * 1200` ms after
//! it is scheduled, for 500 ms each.

pub mod announcer;
pub mod game;
pub mod playback;
pub mod rng;
pub mod snapshot;
pub mod timer;
pub mod validator;

pub use tui_simon_types as types;

// Re-export commonly used types for convenience
pub use announcer::{Announcer, SpeechSink, Utterance};
pub use game::{Game, GameEvent};
pub use playback::{Cue, Playback, PlaybackEvent};
pub use rng::SignalGenerator;
pub use snapshot::{Controls, GameSnapshot};
pub use timer::{TimerQueue, Timings};
pub use validator::{check, submit};
