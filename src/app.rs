//! Front-end state around a [`Game`]: the announcer (whose mute flag outlives
//! individual games) and the short flash of the pad the player pressed.

use crate::core::{Announcer, Controls, Game, GameEvent};
use crate::term::HudState;
use crate::types::{GameAction, Signal, UiAction, PRESS_FLASH_MS};

pub struct App {
    game: Game,
    announcer: Announcer,
    pressed: Option<Signal>,
    flash_ms: u32,
}

impl App {
    pub fn new(game: Game, announcer: Announcer) -> Self {
        Self {
            game,
            announcer,
            pressed: None,
            flash_ms: 0,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn announcer(&self) -> &Announcer {
        &self.announcer
    }

    pub fn controls(&self) -> Controls {
        self.game.controls()
    }

    /// Pad currently flashing from a player press.
    pub fn pressed(&self) -> Option<Signal> {
        self.pressed
    }

    pub fn hud(&self) -> HudState<'_> {
        HudState {
            muted: self.announcer.muted(),
            speech: self.announcer.sink_name(),
            pressed: self.pressed,
        }
    }

    /// Apply one front-end action. Returns true if anything visible changed.
    pub fn apply(&mut self, action: UiAction) -> bool {
        match action {
            UiAction::Game(GameAction::Press(signal)) => {
                if self.game.press(signal).is_none() {
                    return false;
                }
                self.pressed = Some(signal);
                self.flash_ms = PRESS_FLASH_MS;
                true
            }
            UiAction::Game(action) => self.game.apply_action(action),
            UiAction::TogglePause => {
                if self.game.paused() {
                    self.game.resume()
                } else {
                    self.game.pause()
                }
            }
            UiAction::ToggleMute => {
                self.announcer.toggle_mute();
                true
            }
        }
    }

    /// Advance game time and the press flash.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        let mut changed = self.game.tick(elapsed_ms);
        if self.pressed.is_some() {
            self.flash_ms = self.flash_ms.saturating_sub(elapsed_ms);
            if self.flash_ms == 0 {
                self.pressed = None;
                changed = true;
            }
        }
        changed
    }

    /// Speak pending announcements and pass every pending event, with the
    /// episode it was recorded in, to `sink`.
    pub fn flush_events(&mut self, mut sink: impl FnMut(u32, GameEvent)) {
        for (episode, event) in self.game.drain_events() {
            if let GameEvent::Announce { announcement } = event {
                self.announcer.announce_event(announcement);
            }
            sink(episode, event);
        }
    }
}
