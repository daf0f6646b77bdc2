//! Speech announcer.
//!
//! The announcer owns the mute flag and an optional [`SpeechSink`]. It never
//! fails: with no sink (no speech capability on the host) or while muted,
//! `announce` does nothing. Delivery is fire-and-forget; whether utterances
//! overlap or queue is up to the sink.

use crate::types::{Announcement, SPEECH_PITCH, SPEECH_RATE};

/// One piece of text to speak, with the fixed voice settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    /// Relative to the host's normal rate.
    pub rate: f32,
    /// Relative to the host's normal pitch.
    pub pitch: f32,
}

impl Utterance {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            rate: SPEECH_RATE,
            pitch: SPEECH_PITCH,
        }
    }
}

/// Host speech facility.
pub trait SpeechSink {
    /// Hand an utterance to the host. Must not block.
    fn speak(&mut self, utterance: Utterance);

    /// Short name for status display.
    fn name(&self) -> &str;
}

/// Mute-aware front of the speech sink.
pub struct Announcer {
    muted: bool,
    sink: Option<Box<dyn SpeechSink>>,
}

impl Announcer {
    pub fn new(sink: Option<Box<dyn SpeechSink>>) -> Self {
        Self { muted: false, sink }
    }

    /// Announcer for a host without speech.
    pub fn silent() -> Self {
        Self::new(None)
    }

    pub fn with_muted(mut self, muted: bool) -> Self {
        self.muted = muted;
        self
    }

    pub fn muted(&self) -> bool {
        self.muted
    }

    /// Flip the mute flag and return the new value.
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// Name of the speech sink, `None` when the host cannot speak.
    pub fn sink_name(&self) -> Option<&str> {
        self.sink.as_ref().map(|s| s.name())
    }

    pub fn announce(&mut self, text: &str) {
        if self.muted {
            return;
        }
        if let Some(sink) = self.sink.as_mut() {
            sink.speak(Utterance::new(text));
        }
    }

    pub fn announce_event(&mut self, announcement: Announcement) {
        self.announce(announcement.text());
    }
}

impl Default for Announcer {
    fn default() -> Self {
        Self::silent()
    }
}

impl std::fmt::Debug for Announcer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Announcer")
            .field("muted", &self.muted)
            .field("sink", &self.sink_name())
            .finish()
    }
}
