use crate::types::{Phase, Signal};

/// Which control buttons are enabled. Mute is always enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Controls {
    pub start: bool,
    pub pause: bool,
    pub resume: bool,
}

impl Controls {
    pub fn new(phase: Phase, paused: bool) -> Self {
        let playing = phase.in_progress() && !paused;
        Self {
            start: !playing,
            pause: playing,
            resume: paused && phase.in_progress(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub phase: Phase,
    pub paused: bool,
    pub score: u32,
    pub sequence_len: u32,
    pub input_len: u32,
    /// Signal currently lit by playback.
    pub lit: Option<Signal>,
    pub playback_running: bool,
    pub episode: u32,
    pub controls: Controls,
}

impl GameSnapshot {
    /// Game in progress and not paused.
    pub fn playing(&self) -> bool {
        self.phase.in_progress() && !self.paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// True when the player is expected to press pads.
    pub fn accepts_input(&self) -> bool {
        self.phase == Phase::Playing && !self.paused
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            paused: false,
            score: 0,
            sequence_len: 0,
            input_len: 0,
            lit: None,
            playback_running: false,
            episode: 0,
            controls: Controls::new(Phase::Idle, false),
        }
    }
}
