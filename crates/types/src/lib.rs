//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with no I/O, so they can be used from the game core,
//! the terminal view, the input mapper and the host services alike.
//!
//! # Signals
//!
//! The game alphabet is four colored pads, in canonical order:
//!
//! | Signal | Key | Pad position |
//! |--------|-----|--------------|
//! | Red | `1` / `r` | top-left |
//! | Blue | `2` / `b` | top-right |
//! | Green | `3` / `g` | bottom-left |
//! | Yellow | `4` / `y` | bottom-right |
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `PLAYBACK_START_DELAY_MS` | 1000 | Delay before a playback run begins |
//! | `SIGNAL_INTERVAL_MS` | 1200 | Delay between consecutive highlight starts |
//! | `HIGHLIGHT_MS` | 500 | How long a played signal stays lit |
//! | `ROUND_ADVANCE_DELAY_MS` | 1500 | Delay before a completed round extends the sequence |
//! | `PRESS_FLASH_MS` | 150 | How long a pressed pad flashes in the view |
//!
//! # Examples
//!
//! ```
//! use tui_simon_types::{Announcement, Phase, Signal};
//!
//! assert_eq!(Signal::Red.as_str(), "red");
//! assert_eq!(Announcement::Signal(Signal::Blue).text(), "blue");
//! assert!(Phase::RoundTransition.in_progress());
//! ```

use serde::Serialize;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Delay between a sequence mutation (or a resume) and the start of playback.
pub const PLAYBACK_START_DELAY_MS: u32 = 1000;

/// Delay between the starts of two consecutive highlights.
///
/// The first highlight also waits one interval after the startup delay.
pub const SIGNAL_INTERVAL_MS: u32 = 1200;

/// Time a played signal stays lit.
pub const HIGHLIGHT_MS: u32 = 500;

/// Delay between completing a round and appending the next signal.
pub const ROUND_ADVANCE_DELAY_MS: u32 = 1500;

/// Flash duration for a pad the player pressed (view only).
pub const PRESS_FLASH_MS: u32 = 150;

/// Speech rate relative to the host's normal rate.
pub const SPEECH_RATE: f32 = 0.7;

/// Speech pitch relative to the host's normal pitch.
pub const SPEECH_PITCH: f32 = 1.2;


/// The four colored signals of the game alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    Red,
    Blue,
    Green,
    Yellow,
}

impl Signal {
    /// All signals in canonical order.
    pub const ALL: [Signal; 4] = [Signal::Red, Signal::Blue, Signal::Green, Signal::Yellow];

    /// Number of signals in the alphabet.
    pub const COUNT: usize = 4;

    /// Lowercase name, also used as the spoken text.
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::Red => "red",
            Signal::Blue => "blue",
            Signal::Green => "green",
            Signal::Yellow => "yellow",
        }
    }

    /// Position in [`Signal::ALL`].
    pub fn index(&self) -> usize {
        match self {
            Signal::Red => 0,
            Signal::Blue => 1,
            Signal::Green => 2,
            Signal::Yellow => 3,
        }
    }
}

/// Actions the game controller accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    Press(Signal),
    Start,
    Pause,
    Resume,
}

/// Front-end actions: game actions plus the controls that live outside the
/// game state (the mute flag survives restarts).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiAction {
    Game(GameAction),
    /// Pause when playing, resume when paused.
    TogglePause,
    ToggleMute,
}

/// Things the game wants spoken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "signal", rename_all = "snake_case")]
pub enum Announcement {
    Signal(Signal),
    GameStarted,
    GameOver,
}

impl Announcement {
    pub fn text(&self) -> &'static str {
        match self {
            Announcement::Signal(signal) => signal.as_str(),
            Announcement::GameStarted => "Game started",
            Announcement::GameOver => "Game Over",
        }
    }
}

/// Validator outcome for a single press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Correct so far, more input expected.
    Continue,
    /// The whole sequence was reproduced.
    RoundComplete,
    /// The press disagreed with the expected signal.
    Mismatch,
}

/// Game lifecycle phase. `paused` is tracked separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// No game has been started yet.
    #[default]
    Idle,
    /// Waiting for (or receiving) player input; playback may be running.
    Playing,
    /// Round completed, waiting for the sequence to be extended.
    RoundTransition,
    /// The player mismatched. Sequence and score stay frozen.
    GameOver,
}

impl Phase {
    /// True while a game is running (paused or not).
    pub fn in_progress(&self) -> bool {
        matches!(self, Phase::Playing | Phase::RoundTransition)
    }
}
