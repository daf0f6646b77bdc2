//! Host configuration from environment variables.
//!
//! - `SIMON_SPEECH`: `auto` (default), `off`, or an engine name
//!   (`spd-say`, `espeak-ng`, `espeak`, `say`)
//! - `SIMON_MUTED`: set to "1" or "true" to start muted
//! - `SIMON_LOG_PATH`: append a JSON-lines session log to this file
//! - `SIMON_SEED`: RNG seed (random when unset or invalid)

use std::path::PathBuf;

use crate::speech::EngineKind;

/// How to pick the speech engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeechMode {
    /// First engine found on `PATH`.
    Auto,
    /// Never speak.
    Off,
    /// Only this engine; silent if it is missing.
    Engine(EngineKind),
}

impl SpeechMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "auto" => Some(SpeechMode::Auto),
            "off" | "none" | "0" | "false" => Some(SpeechMode::Off),
            other => EngineKind::from_str(other).map(SpeechMode::Engine),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    pub speech: SpeechMode,
    pub muted: bool,
    pub log_path: Option<PathBuf>,
    pub seed: Option<u64>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            speech: SpeechMode::Auto,
            muted: false,
            log_path: None,
            seed: None,
        }
    }
}

impl HostConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any variable source. Unparseable values fall back to defaults.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let speech = get("SIMON_SPEECH")
            .and_then(|s| SpeechMode::from_str(&s))
            .unwrap_or(SpeechMode::Auto);

        let muted = get("SIMON_MUTED")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);

        let log_path = get("SIMON_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(PathBuf::from(s)) });

        let seed = get("SIMON_SEED").and_then(|s| s.trim().parse().ok());

        Self {
            speech,
            muted,
            log_path,
            seed,
        }
    }
}
