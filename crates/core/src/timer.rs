//! Deterministic timers.
//!
//! Nothing in the game sleeps. Deferred work (playback cues, the round advance)
//! is pushed onto a [`TimerQueue`] with a delay and fired later by
//! [`crate::Game::tick`], which is called with the elapsed time of each frame.
//! Tests drive the clock directly, so every timing contract can be checked
//! without real time passing.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::types::{
    HIGHLIGHT_MS, PLAYBACK_START_DELAY_MS, ROUND_ADVANCE_DELAY_MS, SIGNAL_INTERVAL_MS,
};

/// Timing configuration, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timings {
    /// Delay before a playback run starts.
    pub start_delay_ms: u32,
    /// Delay between the starts of two consecutive highlights.
    pub signal_interval_ms: u32,
    /// How long a played signal stays lit.
    pub highlight_ms: u32,
    /// Delay between completing a round and extending the sequence.
    pub round_advance_ms: u32,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            start_delay_ms: PLAYBACK_START_DELAY_MS,
            signal_interval_ms: SIGNAL_INTERVAL_MS,
            highlight_ms: HIGHLIGHT_MS,
            round_advance_ms: ROUND_ADVANCE_DELAY_MS,
        }
    }
}

impl Timings {
    /// Offset (from the `play` call) at which signal `index` lights up.
    pub fn highlight_at_ms(&self, index: usize) -> u64 {
        self.start_delay_ms as u64 + (index as u64 + 1) * self.signal_interval_ms as u64
    }

    /// Total length of a playback run for a sequence of `len` signals.
    pub fn playback_duration_ms(&self, len: usize) -> u64 {
        if len == 0 {
            return self.start_delay_ms as u64;
        }
        self.highlight_at_ms(len - 1) + self.highlight_ms as u64
    }
}

#[derive(Debug, Clone)]
struct Pending<T> {
    due_ms: u64,
    seq: u64,
    payload: T,
}

// Min-heap on (due_ms, seq): earliest first, FIFO among equal deadlines.
impl<T> Ord for Pending<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        (other.due_ms, other.seq).cmp(&(self.due_ms, self.seq))
    }
}

impl<T> PartialOrd for Pending<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> PartialEq for Pending<T> {
    fn eq(&self, other: &Self) -> bool {
        self.due_ms == other.due_ms && self.seq == other.seq
    }
}

impl<T> Eq for Pending<T> {}

/// A queue of payloads that become due at a point on a virtual clock.
#[derive(Debug, Clone)]
pub struct TimerQueue<T> {
    now_ms: u64,
    next_seq: u64,
    pending: BinaryHeap<Pending<T>>,
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_seq: 0,
            pending: BinaryHeap::new(),
        }
    }

    /// Current position of the virtual clock.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Keep only the timers whose payload satisfies `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) {
        self.pending.retain(|p| keep(&p.payload));
    }

    /// Schedule `payload` to fire `delay_ms` after the current clock.
    pub fn schedule(&mut self, delay_ms: u64, payload: T) {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.pending.push(Pending {
            due_ms: self.now_ms.saturating_add(delay_ms),
            seq,
            payload,
        });
    }

    /// Pop the earliest timer due at or before `until_ms`.
    ///
    /// The clock moves to that timer's deadline, so anything scheduled while
    /// handling it is relative to when it fired, not to the end of the frame.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<T> {
        if self.pending.peek()?.due_ms > until_ms {
            return None;
        }
        let next = self.pending.pop()?;
        self.now_ms = self.now_ms.max(next.due_ms);
        Some(next.payload)
    }

    /// Move the clock forward without firing anything.
    pub fn advance_to(&mut self, ms: u64) {
        self.now_ms = self.now_ms.max(ms);
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
