//! Host text-to-speech.
//!
//! Speech goes through an external program found on `PATH`. Utterances are
//! queued on an unbounded channel and spoken one after another by a tokio
//! task, so the game loop never waits and overlapping announcements play in
//! order. Any failure (program missing, spawn error, non-zero exit) is
//! swallowed: speech degrades to silence.

use std::ffi::OsStr;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;
use tokio::sync::mpsc;

use crate::config::SpeechMode;
use crate::core::{SpeechSink, Utterance};

/// Supported speech programs, in auto-detection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineKind {
    SpdSay,
    EspeakNg,
    Espeak,
    Say,
}

/// espeak and say both default to about 180 words per minute.
const DEFAULT_WPM: f32 = 180.0;
/// espeak pitch scale is 0..=99 with 50 as normal.
const ESPEAK_DEFAULT_PITCH: f32 = 50.0;

impl EngineKind {
    pub const ALL: [EngineKind; 4] = [
        EngineKind::SpdSay,
        EngineKind::EspeakNg,
        EngineKind::Espeak,
        EngineKind::Say,
    ];

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "spd-say" | "speech-dispatcher" => Some(EngineKind::SpdSay),
            "espeak-ng" => Some(EngineKind::EspeakNg),
            "espeak" => Some(EngineKind::Espeak),
            "say" => Some(EngineKind::Say),
            _ => None,
        }
    }

    /// Program name looked up on `PATH`.
    pub fn program(&self) -> &'static str {
        match self {
            EngineKind::SpdSay => "spd-say",
            EngineKind::EspeakNg => "espeak-ng",
            EngineKind::Espeak => "espeak",
            EngineKind::Say => "say",
        }
    }

    /// Command-line arguments speaking `utterance` with its rate and pitch.
    ///
    /// `say` has no pitch option; only the rate is applied there.
    pub fn args(&self, utterance: &Utterance) -> Vec<String> {
        let wpm = (DEFAULT_WPM * utterance.rate).round() as i32;
        match self {
            EngineKind::SpdSay => {
                // spd-say takes offsets in -100..=100 around the voice default.
                let rate = ((utterance.rate - 1.0) * 100.0).round().clamp(-100.0, 100.0) as i32;
                let pitch = ((utterance.pitch - 1.0) * 100.0).round().clamp(-100.0, 100.0) as i32;
                vec![
                    "-r".to_string(),
                    rate.to_string(),
                    "-p".to_string(),
                    pitch.to_string(),
                    utterance.text.clone(),
                ]
            }
            EngineKind::EspeakNg | EngineKind::Espeak => {
                let pitch = (ESPEAK_DEFAULT_PITCH * utterance.pitch).round().clamp(0.0, 99.0) as i32;
                vec![
                    "-s".to_string(),
                    wpm.to_string(),
                    "-p".to_string(),
                    pitch.to_string(),
                    utterance.text.clone(),
                ]
            }
            EngineKind::Say => vec!["-r".to_string(), wpm.to_string(), utterance.text.clone()],
        }
    }
}

/// A speech program that exists on this host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechEngine {
    pub kind: EngineKind,
    pub program: PathBuf,
}

impl SpeechEngine {
    /// Find an engine according to `mode`, searching the directories in `path`.
    pub fn detect(mode: SpeechMode, path: Option<&OsStr>) -> Option<Self> {
        let path = path?;
        let candidates: &[EngineKind] = match mode {
            SpeechMode::Off => return None,
            SpeechMode::Auto => &EngineKind::ALL,
            SpeechMode::Engine(ref kind) => std::slice::from_ref(kind),
        };

        candidates.iter().find_map(|&kind| {
            find_on_path(kind.program(), path).map(|program| SpeechEngine { kind, program })
        })
    }

    /// [`SpeechEngine::detect`] against the process `PATH`.
    pub fn detect_from_env(mode: SpeechMode) -> Option<Self> {
        let path = std::env::var_os("PATH");
        Self::detect(mode, path.as_deref())
    }

    pub fn name(&self) -> &'static str {
        self.kind.program()
    }

    /// Speak one utterance and wait for the program to finish. Errors are ignored.
    pub async fn speak(&self, utterance: Utterance) {
        let _ = Command::new(&self.program)
            .args(self.kind.args(&utterance))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .status()
            .await;
    }
}

/// First executable named `program` in the `PATH`-style list `path`.
pub fn find_on_path(program: &str, path: &OsStr) -> Option<PathBuf> {
    std::env::split_paths(path)
        .map(|dir| dir.join(program))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Speak queued utterances in order until every sender is dropped.
pub async fn run_speech_queue<F, Fut>(mut rx: mpsc::UnboundedReceiver<Utterance>, mut speak: F)
where
    F: FnMut(Utterance) -> Fut,
    Fut: Future<Output = ()>,
{
    while let Some(utterance) = rx.recv().await {
        speak(utterance).await;
    }
}

/// [`SpeechSink`] handing utterances to the background speech queue.
#[derive(Debug, Clone)]
pub struct SpeechWorker {
    name: &'static str,
    tx: mpsc::UnboundedSender<Utterance>,
}

impl SpeechWorker {
    pub fn new(name: &'static str, tx: mpsc::UnboundedSender<Utterance>) -> Self {
        Self { name, tx }
    }
}

impl SpeechSink for SpeechWorker {
    fn speak(&mut self, utterance: Utterance) {
        // A closed queue means the host is shutting down; stay silent.
        let _ = self.tx.send(utterance);
    }

    fn name(&self) -> &str {
        self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_espeak_args_scale_rate_and_pitch() {
        let args = EngineKind::Espeak.args(&Utterance::new("red"));
        assert_eq!(args, vec!["-s", "126", "-p", "60", "red"]);
    }

    #[test]
    fn test_spd_say_args_are_offsets() {
        let args = EngineKind::SpdSay.args(&Utterance::new("Game Over"));
        assert_eq!(args, vec!["-r", "-30", "-p", "20", "Game Over"]);
    }

    #[test]
    fn test_say_args_rate_only() {
        let args = EngineKind::Say.args(&Utterance::new("blue"));
        assert_eq!(args, vec!["-r", "126", "blue"]);
    }

    #[test]
    fn test_engine_names_round_trip() {
        for kind in EngineKind::ALL {
            assert_eq!(EngineKind::from_str(kind.program()), Some(kind));
        }
        assert_eq!(EngineKind::from_str("festival"), None);
    }

    #[test]
    fn test_detect_without_path_is_silent() {
        assert_eq!(SpeechEngine::detect(SpeechMode::Auto, None), None);
    }

    #[test]
    fn test_detect_off_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        fake_program(dir.path(), "espeak");
        let path = dir.path().as_os_str();
        assert_eq!(SpeechEngine::detect(SpeechMode::Off, Some(path)), None);
    }

    #[test]
    fn test_detect_auto_picks_first_available() {
        let dir = tempfile::tempdir().unwrap();
        fake_program(dir.path(), "espeak");
        fake_program(dir.path(), "say");

        let engine = SpeechEngine::detect(SpeechMode::Auto, Some(dir.path().as_os_str())).unwrap();
        assert_eq!(engine.kind, EngineKind::Espeak);
        assert_eq!(engine.program, dir.path().join("espeak"));
        assert_eq!(engine.name(), "espeak");
    }

    #[test]
    fn test_detect_specific_engine_missing() {
        let dir = tempfile::tempdir().unwrap();
        fake_program(dir.path(), "espeak");
        let mode = SpeechMode::Engine(EngineKind::SpdSay);
        assert_eq!(SpeechEngine::detect(mode, Some(dir.path().as_os_str())), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_executable_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("espeak"), b"").unwrap();
        assert_eq!(find_on_path("espeak", dir.path().as_os_str()), None);
    }

    #[tokio::test]
    async fn test_queue_speaks_in_order() {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut worker = SpeechWorker::new("test", tx);
        worker.speak(Utterance::new("red"));
        worker.speak(Utterance::new("blue"));
        worker.speak(Utterance::new("Game Over"));
        drop(worker);

        let spoken = Arc::new(Mutex::new(Vec::new()));
        let sink = spoken.clone();
        run_speech_queue(rx, move |u: Utterance| {
            let sink = sink.clone();
            async move {
                tokio::task::yield_now().await;
                sink.lock().unwrap().push(u.text);
            }
        })
        .await;

        assert_eq!(*spoken.lock().unwrap(), vec!["red", "blue", "Game Over"]);
    }

    #[test]
    fn test_worker_survives_closed_queue() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let mut worker = SpeechWorker::new("test", tx);
        worker.speak(Utterance::new("nobody listens"));
        assert_eq!(worker.name(), "test");
    }

    fn fake_program(dir: &Path, name: &str) {
        let path = dir.join(name);
        std::fs::write(&path, b"#!/bin/sh\n").unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        }
    }
}
