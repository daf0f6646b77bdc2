//! Playback scheduler - replays the sequence as timed highlight cues.
//!
//! A run is a batch of [`Cue`]s pushed onto the game's [`TimerQueue`] at once:
//! signal `i` lights at `start_delay + (i + 1) * interval` and clears
//! `highlight` later, followed by a final `Finish` cue. Every cue carries the
//! signal value it was scheduled with and the generation of its run.
//!
//! Cancelling bumps the generation. Cues of older generations are still popped
//! off the queue when they come due, but [`Playback::fire`] turns them into
//! no-ops, so a paused or superseded run can never light a pad.

use crate::timer::{TimerQueue, Timings};
use crate::types::Signal;

/// A scheduled playback step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    Activate {
        generation: u32,
        index: usize,
        signal: Signal,
    },
    Clear {
        generation: u32,
        signal: Signal,
    },
    Finish {
        generation: u32,
    },
}

impl Cue {
    pub fn generation(&self) -> u32 {
        match *self {
            Cue::Activate { generation, .. }
            | Cue::Clear { generation, .. }
            | Cue::Finish { generation } => generation,
        }
    }
}

/// Effect of a live cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaybackEvent {
    Highlight { index: usize, signal: Signal },
    Unhighlight { signal: Signal },
    Finished,
}

/// Tracks the current playback run.
#[derive(Debug, Clone)]
pub struct Playback {
    timings: Timings,
    generation: u32,
    running: bool,
    lit: Option<Signal>,
}

impl Playback {
    pub fn new(timings: Timings) -> Self {
        Self {
            timings,
            generation: 0,
            running: false,
            lit: None,
        }
    }

    /// Generation of the current (or last) run.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// True from `play` until the run finishes or is cancelled.
    pub fn running(&self) -> bool {
        self.running
    }

    /// Signal currently highlighted by playback.
    pub fn lit(&self) -> Option<Signal> {
        self.lit
    }

    /// Schedule a run over `sequence`, superseding any run in flight.
    ///
    /// Returns the generation of the new run.
    pub fn play<T: From<Cue>>(&mut self, sequence: &[Signal], timers: &mut TimerQueue<T>) -> u32 {
        self.cancel();
        let generation = self.generation;
        let highlight = self.timings.highlight_ms as u64;

        for (index, &signal) in sequence.iter().enumerate() {
            let at = self.timings.highlight_at_ms(index);
            timers.schedule(
                at,
                Cue::Activate {
                    generation,
                    index,
                    signal,
                }
                .into(),
            );
            timers.schedule(at + highlight, Cue::Clear { generation, signal }.into());
        }
        timers.schedule(
            self.timings.playback_duration_ms(sequence.len()),
            Cue::Finish { generation }.into(),
        );

        self.running = true;
        generation
    }

    /// Invalidate the run in flight. Returns true if one was running.
    pub fn cancel(&mut self) -> bool {
        let was_running = self.running;
        self.generation = self.generation.wrapping_add(1);
        self.running = false;
        self.lit = None;
        was_running
    }

    /// Apply a due cue. Stale cues yield `None`.
    pub fn fire(&mut self, cue: Cue) -> Option<PlaybackEvent> {
        if cue.generation() != self.generation {
            return None;
        }

        match cue {
            Cue::Activate { index, signal, .. } => {
                self.lit = Some(signal);
                Some(PlaybackEvent::Highlight { index, signal })
            }
            Cue::Clear { signal, .. } => {
                if self.lit == Some(signal) {
                    self.lit = None;
                }
                Some(PlaybackEvent::Unhighlight { signal })
            }
            Cue::Finish { .. } => {
                self.running = false;
                self.lit = None;
                Some(PlaybackEvent::Finished)
            }
        }
    }
}

impl Default for Playback {
    fn default() -> Self {
        Self::new(Timings::default())
    }
}
