//! Game controller - owns the complete game state
//!
//! Ties together the signal generator, the playback scheduler, the input
//! validator and round progression. All deferred work goes through one
//! [`TimerQueue`] advanced by [`Game::tick`]; nothing here blocks or touches
//! I/O. Side effects the front-end cares about (highlights, announcements,
//! lifecycle changes) are recorded as [`GameEvent`]s and drained by the caller.

use serde::Serialize;

use crate::playback::{Cue, Playback, PlaybackEvent};
use crate::rng::SignalGenerator;
use crate::snapshot::{Controls, GameSnapshot};
use crate::timer::{TimerQueue, Timings};
use crate::types::{Announcement, GameAction, Phase, Signal, Verdict};
use crate::validator;

/// Observable effect of a game operation or timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    Started { episode: u32 },
    SignalAdded { signal: Signal, length: u32 },
    PlaybackScheduled { generation: u32, length: u32 },
    PlaybackCancelled { generation: u32 },
    Highlight { index: u32, signal: Signal },
    Unhighlight { signal: Signal },
    PlaybackFinished,
    Pressed { signal: Signal, verdict: Verdict },
    RoundComplete { score: u32 },
    Paused,
    Resumed,
    GameOver { score: u32, length: u32 },
    Announce { announcement: Announcement },
}

/// Work waiting on the timer queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Deferred {
    Playback(Cue),
    /// Extend the sequence after a completed round of game `episode`.
    AdvanceRound { episode: u32 },
}

impl From<Cue> for Deferred {
    fn from(cue: Cue) -> Self {
        Deferred::Playback(cue)
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct Game {
    timings: Timings,
    generator: SignalGenerator,
    sequence: Vec<Signal>,
    player_input: Vec<Signal>,
    score: u32,
    phase: Phase,
    paused: bool,
    /// Monotonic game id (increments on start). Round advances of older games
    /// are ignored.
    episode: u32,
    playback: Playback,
    timers: TimerQueue<Deferred>,
    events: Vec<(u32, GameEvent)>,
}

impl Game {
    /// Create an idle game with default timings.
    pub fn new(seed: u64) -> Self {
        Self::with_timings(seed, Timings::default())
    }

    pub fn with_timings(seed: u64, timings: Timings) -> Self {
        Self {
            timings,
            generator: SignalGenerator::new(seed),
            sequence: Vec::new(),
            player_input: Vec::new(),
            score: 0,
            phase: Phase::Idle,
            paused: false,
            episode: 0,
            playback: Playback::new(timings),
            timers: TimerQueue::new(),
            events: Vec::new(),
        }
    }

    pub fn sequence(&self) -> &[Signal] {
        &self.sequence
    }

    pub fn player_input(&self) -> &[Signal] {
        &self.player_input
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// A game is in progress and not paused.
    pub fn playing(&self) -> bool {
        self.phase.in_progress() && !self.paused
    }

    pub fn episode(&self) -> u32 {
        self.episode
    }

    /// Signal currently lit by playback.
    pub fn lit(&self) -> Option<Signal> {
        self.playback.lit()
    }

    pub fn playback_running(&self) -> bool {
        self.playback.running()
    }

    /// Virtual time in milliseconds since the game was created.
    #[cfg(test)]
    pub(crate) fn clock_ms(&self) -> u64 {
        self.timers.now_ms()
    }

    /// Timers still queued.
    #[cfg(test)]
    pub(crate) fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn controls(&self) -> Controls {
        Controls::new(self.phase, self.paused)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.phase = self.phase;
        out.paused = self.paused;
        out.score = self.score;
        out.sequence_len = self.sequence.len() as u32;
        out.input_len = self.player_input.len() as u32;
        out.lit = self.playback.lit();
        out.playback_running = self.playback.running();
        out.episode = self.episode;
        out.controls = self.controls();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Events recorded since the last drain, each tagged with the episode
    /// that was current when it was recorded.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, (u32, GameEvent)> {
        self.events.drain(..)
    }

    /// Apply a game action. Returns false if it was rejected in the current state.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Press(signal) => self.press(signal).is_some(),
            GameAction::Start => self.start(),
            GameAction::Pause => self.pause(),
            GameAction::Resume => self.resume(),
        }
    }

    /// Start a new game. Allowed whenever the game is not actively playing.
    pub fn start(&mut self) -> bool {
        if self.playing() {
            return false;
        }

        self.cancel_playback();
        self.episode = self.episode.wrapping_add(1);
        self.sequence.clear();
        self.player_input.clear();
        self.score = 0;
        self.phase = Phase::Playing;
        self.paused = false;
        self.emit(GameEvent::Started {
            episode: self.episode,
        });

        self.extend_sequence();
        self.announce(Announcement::GameStarted);
        self.schedule_playback();
        true
    }

    /// Pause an active game. In-flight playback is cancelled.
    pub fn pause(&mut self) -> bool {
        if !self.playing() {
            return false;
        }

        self.paused = true;
        self.cancel_playback();
        self.emit(GameEvent::Paused);
        true
    }

    /// Resume a paused game, replaying the sequence if input is expected.
    pub fn resume(&mut self) -> bool {
        if !self.paused || !self.phase.in_progress() {
            return false;
        }

        self.paused = false;
        self.emit(GameEvent::Resumed);
        if self.phase == Phase::Playing {
            self.schedule_playback();
        }
        true
    }

    /// Player selects a signal.
    ///
    /// Returns `None` (and does nothing) unless input is currently accepted:
    /// the game must be in `Playing` and not paused. Playback in flight does
    /// not block input.
    pub fn press(&mut self, signal: Signal) -> Option<Verdict> {
        if self.phase != Phase::Playing || self.paused {
            return None;
        }

        self.announce(Announcement::Signal(signal));
        let verdict = validator::submit(signal, &mut self.player_input, &self.sequence);
        self.emit(GameEvent::Pressed { signal, verdict });

        match verdict {
            Verdict::Continue => {}
            Verdict::RoundComplete => {
                self.score += 1;
                self.player_input.clear();
                self.phase = Phase::RoundTransition;
                self.cancel_playback();
                self.emit(GameEvent::RoundComplete { score: self.score });
                self.timers.schedule(
                    self.timings.round_advance_ms as u64,
                    Deferred::AdvanceRound {
                        episode: self.episode,
                    },
                );
            }
            Verdict::Mismatch => {
                self.phase = Phase::GameOver;
                self.cancel_playback();
                self.emit(GameEvent::GameOver {
                    score: self.score,
                    length: self.sequence.len() as u32,
                });
                self.announce(Announcement::GameOver);
            }
        }

        Some(verdict)
    }

    /// Advance the virtual clock and fire every timer that came due.
    ///
    /// Returns true if any live timer changed the state.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        let target = self.timers.now_ms() + elapsed_ms as u64;
        let mut changed = false;

        while let Some(deferred) = self.timers.pop_due(target) {
            changed |= self.fire(deferred);
        }
        self.timers.advance_to(target);

        changed
    }

    fn fire(&mut self, deferred: Deferred) -> bool {
        match deferred {
            Deferred::Playback(cue) => {
                let Some(event) = self.playback.fire(cue) else {
                    return false;
                };
                match event {
                    PlaybackEvent::Highlight { index, signal } => {
                        self.emit(GameEvent::Highlight {
                            index: index as u32,
                            signal,
                        });
                        self.announce(Announcement::Signal(signal));
                    }
                    PlaybackEvent::Unhighlight { signal } => {
                        self.emit(GameEvent::Unhighlight { signal });
                    }
                    PlaybackEvent::Finished => {
                        self.emit(GameEvent::PlaybackFinished);
                    }
                }
                true
            }
            Deferred::AdvanceRound { episode } => {
                if episode != self.episode || self.phase != Phase::RoundTransition {
                    return false;
                }

                self.phase = Phase::Playing;
                self.extend_sequence();
                // While paused the extended sequence is played on resume.
                if !self.paused {
                    self.schedule_playback();
                }
                true
            }
        }
    }

    fn extend_sequence(&mut self) {
        let signal = self.generator.draw();
        self.sequence.push(signal);
        self.emit(GameEvent::SignalAdded {
            signal,
            length: self.sequence.len() as u32,
        });
    }

    fn schedule_playback(&mut self) {
        self.purge_cues();
        let generation = self.playback.play(&self.sequence, &mut self.timers);
        self.emit(GameEvent::PlaybackScheduled {
            generation,
            length: self.sequence.len() as u32,
        });
    }

    fn cancel_playback(&mut self) {
        let generation = self.playback.generation();
        if self.playback.cancel() {
            self.emit(GameEvent::PlaybackCancelled { generation });
        }
        self.purge_cues();
    }

    /// Drop queued cues of cancelled runs. Called only when no run is live,
    /// so every queued cue is stale.
    fn purge_cues(&mut self) {
        self.timers
            .retain(|deferred| !matches!(deferred, Deferred::Playback(_)));
    }

    fn emit(&mut self, event: GameEvent) {
        self.events.push((self.episode, event));
    }

    fn announce(&mut self, announcement: Announcement) {
        self.emit(GameEvent::Announce { announcement });
    }

    /// Replace the sequence of a running game (tests only).
    #[cfg(test)]
    pub(crate) fn set_sequence(&mut self, sequence: &[Signal]) {
        self.sequence = sequence.to_vec();
        self.player_input.clear();
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Signal::*;

    /// Started game with a known sequence and no queued events.
    fn game_with(sequence: &[Signal]) -> Game {
        let mut game = Game::new(12345);
        assert!(game.start());
        game.set_sequence(sequence);
        game.drain_events().for_each(drop);
        game
    }

    fn announcements(game: &mut Game) -> Vec<&'static str> {
        game.drain_events()
            .filter_map(|(_, e)| match e {
                GameEvent::Announce { announcement } => Some(announcement.text()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_new_game_is_idle() {
        let game = Game::new(1);
        assert_eq!(game.phase(), Phase::Idle);
        assert!(!game.playing());
        assert!(game.sequence().is_empty());
        assert_eq!(game.score(), 0);
        assert!(game.controls().start);
        assert!(!game.controls().pause);
        assert!(!game.controls().resume);
    }

    #[test]
    fn test_start_resets_everything() {
        let mut game = game_with(&[Red, Blue]);
        game.press(Red);
        game.press(Green);
        assert!(game.game_over());

        assert!(game.start());
        assert_eq!(game.score(), 0);
        assert_eq!(game.sequence().len(), 1);
        assert!(game.player_input().is_empty());
        assert!(!game.game_over());
        assert!(game.playing());
        assert_eq!(game.episode(), 2);
    }

    #[test]
    fn test_start_announces_after_first_signal() {
        let mut game = Game::new(3);
        game.start();
        let events: Vec<GameEvent> = game.drain_events().map(|(_, e)| e).collect();
        assert!(matches!(events[0], GameEvent::Started { episode: 1 }));
        assert!(matches!(
            events[1],
            GameEvent::SignalAdded { length: 1, .. }
        ));
        assert_eq!(
            events[2],
            GameEvent::Announce {
                announcement: Announcement::GameStarted
            }
        );
        assert!(matches!(
            events[3],
            GameEvent::PlaybackScheduled { length: 1, .. }
        ));
    }

    #[test]
    fn test_start_rejected_while_playing() {
        let mut game = Game::new(1);
        assert!(game.start());
        assert!(!game.start());
        assert_eq!(game.episode(), 1);
    }

    #[test]
    fn test_press_ignored_unless_playing() {
        let mut game = Game::new(1);
        assert_eq!(game.press(Red), None);

        let mut game = game_with(&[Red, Blue]);
        game.pause();
        assert_eq!(game.press(Red), None);
        assert!(game.player_input().is_empty());
        assert!(game.drain_events().all(|(_, e)| e == GameEvent::Paused
            || matches!(e, GameEvent::PlaybackCancelled { .. })));
    }

    #[test]
    fn test_single_round_scenario() {
        let mut game = game_with(&[Red]);
        assert_eq!(game.press(Red), Some(Verdict::RoundComplete));
        assert_eq!(game.score(), 1);
        assert!(game.player_input().is_empty());
        assert_eq!(game.phase(), Phase::RoundTransition);
        assert_eq!(game.sequence().len(), 1);

        game.tick(1499);
        assert_eq!(game.sequence().len(), 1);
        game.tick(1);
        assert_eq!(game.sequence().len(), 2);
        assert_eq!(game.sequence()[0], Red);
        assert_eq!(game.phase(), Phase::Playing);
        assert!(game.playback_running());
    }

    #[test]
    fn test_mismatch_scenario() {
        let mut game = game_with(&[Red, Blue]);
        assert_eq!(game.press(Red), Some(Verdict::Continue));
        assert_eq!(game.press(Green), Some(Verdict::Mismatch));
        assert!(game.game_over());
        assert!(!game.playing());
        assert_eq!(game.score(), 0);
        assert_eq!(game.sequence(), &[Red, Blue]);

        // Frozen: further presses are ignored.
        assert_eq!(game.press(Blue), None);
    }

    #[test]
    fn test_press_announces_before_game_over() {
        let mut game = game_with(&[Red]);
        game.press(Yellow);
        assert_eq!(announcements(&mut game), vec!["yellow", "Game Over"]);
    }

    #[test]
    fn test_press_announces_even_when_correct() {
        let mut game = game_with(&[Red, Blue]);
        game.press(Red);
        assert_eq!(announcements(&mut game), vec!["red"]);
    }

    #[test]
    fn test_input_accepted_during_playback() {
        let mut game = game_with(&[Green, Green]);
        game.resume(); // no-op: not paused
        game.pause();
        game.resume();
        game.tick(2300);
        assert!(game.playback_running());
        assert_eq!(game.press(Green), Some(Verdict::Continue));
    }

    #[test]
    fn test_completing_round_cancels_playback() {
        let mut game = game_with(&[Blue]);
        game.pause();
        game.resume();
        game.tick(2300);
        assert_eq!(game.lit(), Some(Blue));

        assert_eq!(game.press(Blue), Some(Verdict::RoundComplete));
        assert_eq!(game.lit(), None);
        assert!(!game.playback_running());
    }

    #[test]
    fn test_playback_highlights_and_announces_signals() {
        let mut game = Game::new(5);
        game.start();
        let first = game.sequence()[0];
        game.drain_events().for_each(drop);

        game.tick(2199);
        assert_eq!(game.lit(), None);
        game.tick(1);
        assert_eq!(game.lit(), Some(first));
        game.tick(500);
        assert_eq!(game.lit(), None);

        let events: Vec<GameEvent> = game.drain_events().map(|(_, e)| e).collect();
        assert_eq!(
            events,
            vec![
                GameEvent::Highlight {
                    index: 0,
                    signal: first
                },
                GameEvent::Announce {
                    announcement: Announcement::Signal(first)
                },
                GameEvent::Unhighlight { signal: first },
                GameEvent::PlaybackFinished,
            ]
        );
    }

    #[test]
    fn test_pause_immediately_after_start() {
        let mut game = Game::new(9);
        game.start();
        let sequence = game.sequence().to_vec();

        assert!(game.pause());
        assert!(!game.playing());
        assert!(game.paused());
        assert_eq!(game.sequence(), sequence.as_slice());
        assert_eq!(game.score(), 0);
        assert!(game.controls().resume);
        assert!(!game.controls().pause);

        assert!(game.resume());
        assert!(game.playing());
        assert_eq!(game.sequence(), sequence.as_slice());
        assert_eq!(game.score(), 0);
    }

    // Pause cancels in-flight playback: the cues already queued never light a pad.
    #[test]
    fn test_pause_cancels_in_flight_playback() {
        let mut game = game_with(&[Red, Blue, Green]);
        game.pause();
        game.resume();
        game.tick(2300);
        assert_eq!(game.lit(), Some(Red));

        game.pause();
        assert_eq!(game.lit(), None);
        game.drain_events().for_each(drop);

        game.tick(30_000);
        assert_eq!(game.lit(), None);
        assert!(game.drain_events().next().is_none());
        assert_eq!(game.pending_timers(), 0);
    }

    #[test]
    fn test_resume_replays_from_the_start() {
        let mut game = game_with(&[Red, Blue]);
        game.pause();
        game.tick(5000);
        game.resume();
        game.drain_events().for_each(drop);

        game.tick(2200);
        assert_eq!(game.lit(), Some(Red));
    }

    #[test]
    fn test_resume_keeps_player_input() {
        let mut game = game_with(&[Red, Blue]);
        game.press(Red);
        game.pause();
        game.resume();
        assert_eq!(game.player_input(), &[Red]);
        assert_eq!(game.press(Blue), Some(Verdict::RoundComplete));
    }

    #[test]
    fn test_pause_during_round_transition_defers_playback() {
        let mut game = game_with(&[Yellow]);
        game.press(Yellow);
        assert!(game.pause());

        game.tick(1500);
        assert_eq!(game.sequence().len(), 2);
        assert_eq!(game.phase(), Phase::Playing);
        assert!(!game.playback_running());
        assert_eq!(game.press(Yellow), None);

        assert!(game.resume());
        assert!(game.playback_running());
    }

    #[test]
    fn test_restart_during_round_transition_ignores_stale_advance() {
        let mut game = game_with(&[Yellow]);
        game.press(Yellow);
        game.pause();
        assert!(game.start());
        assert_eq!(game.sequence().len(), 1);

        game.tick(1500);
        assert_eq!(game.sequence().len(), 1);
        assert_eq!(game.phase(), Phase::Playing);
    }

    #[test]
    fn test_resume_rejected_when_idle_or_over() {
        let mut game = Game::new(1);
        assert!(!game.resume());

        let mut game = game_with(&[Red]);
        game.press(Blue);
        assert!(!game.resume());
        assert!(!game.pause());
    }

    #[test]
    fn test_tick_with_nothing_pending() {
        let mut game = Game::new(1);
        assert!(!game.tick(16));
        assert_eq!(game.clock_ms(), 16);
    }

    #[test]
    fn test_apply_action_routes() {
        let mut game = Game::new(1);
        assert!(!game.apply_action(GameAction::Pause));
        assert!(game.apply_action(GameAction::Start));
        assert!(game.apply_action(GameAction::Pause));
        assert!(game.apply_action(GameAction::Resume));
        let expected = game.sequence()[0];
        assert!(game.apply_action(GameAction::Press(expected)));
        assert_eq!(game.score(), 1);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut game = game_with(&[Red, Green]);
        game.press(Red);
        let snap = game.snapshot();
        assert_eq!(snap.phase, Phase::Playing);
        assert_eq!(snap.sequence_len, 2);
        assert_eq!(snap.input_len, 1);
        assert!(snap.playing());
        assert!(snap.accepts_input());
        assert_eq!(snap.controls, game.controls());
    }

    #[test]
    fn test_same_seed_same_game() {
        let mut a = Game::new(77);
        let mut b = Game::new(77);
        a.start();
        b.start();
        for _ in 0..10 {
            let expected = a.sequence().to_vec();
            for &s in &expected {
                a.press(s);
                b.press(s);
            }
            a.tick(1500);
            b.tick(1500);
            assert_eq!(a.sequence(), b.sequence());
        }
        assert_eq!(a.score(), 10);
    }

    #[test]
    fn test_pause_resume_keeps_only_live_cues() {
        let mut game = game_with(&[Red, Blue, Green, Yellow, Red]);
        // One run queues an activate and a clear per signal plus a finish.
        let per_run = 2 * 5 + 1;

        for _ in 0..10 {
            assert!(game.pause());
            assert_eq!(game.pending_timers(), 0);
            assert!(game.resume());
            assert_eq!(game.pending_timers(), per_run);
        }
    }

    #[test]
    fn test_round_advance_survives_cue_purge() {
        let mut game = game_with(&[Red]);
        game.press(Red);
        assert!(game.pause());
        assert_eq!(game.pending_timers(), 1);

        game.tick(1500);
        assert_eq!(game.sequence().len(), 2);
        assert!(game.resume());
        assert!(game.playback_running());
    }

    #[test]
    fn test_events_carry_episode_at_recording() {
        let mut game = game_with(&[Red]);
        game.press(Blue);
        assert!(game.start());

        let tagged: Vec<(u32, GameEvent)> = game.drain_events().collect();
        let started = tagged
            .iter()
            .position(|(_, e)| matches!(e, GameEvent::Started { .. }))
            .unwrap();
        assert!(started > 0);
        assert!(tagged[..started].iter().all(|&(episode, _)| episode == 1));
        assert!(tagged[started..].iter().all(|&(episode, _)| episode == 2));
        assert!(matches!(tagged[started - 1].1, GameEvent::Announce { .. }));
    }
}
