use std::path::PathBuf;

use anyhow::{anyhow, Result};

use crate::host::{HostConfig, SpeechMode};

pub const USAGE: &str = "\
tui-simon: Simon Says in the terminal

USAGE:
    tui-simon [OPTIONS]

OPTIONS:
    --seed <N>      Seed for the signal sequence (default: random)
    --mute          Start with speech muted
    --no-speech     Never use a speech engine
    --log <PATH>    Append a JSON-lines session log to PATH
    -h, --help      Print this help

KEYS:
    1-4 / r b g y   Press a pad
    n / Enter       Start a new game
    p / c / Space   Pause / resume / toggle
    m               Mute or unmute speech
    q / Esc         Quit

ENVIRONMENT:
    SIMON_SPEECH    auto | off | spd-say | espeak-ng | espeak | say
    SIMON_MUTED     1 to start muted
    SIMON_LOG_PATH  Session log path
    SIMON_SEED      Sequence seed
";

/// Command-line overrides. Flags win over `SIMON_*` variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub seed: Option<u64>,
    pub mute: bool,
    pub no_speech: bool,
    pub log_path: Option<PathBuf>,
}

impl RunOptions {
    pub fn apply(&self, config: &mut HostConfig) {
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if self.mute {
            config.muted = true;
        }
        if self.no_speech {
            config.speech = SpeechMode::Off;
        }
        if let Some(path) = self.log_path.as_ref() {
            config.log_path = Some(path.clone());
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(RunOptions),
    Help,
}

/// Parse arguments (without the program name).
pub fn parse_args(args: &[String]) -> Result<Command> {
    let mut options = RunOptions::default();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --seed"))?;
                let seed = v
                    .parse::<u64>()
                    .map_err(|_| anyhow!("invalid --seed value: {}", v))?;
                options.seed = Some(seed);
            }
            "--log" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --log"))?;
                options.log_path = Some(PathBuf::from(v));
            }
            "--mute" => options.mute = true,
            "--no-speech" => options.no_speech = true,
            other => {
                return Err(anyhow!("unknown argument: {} (try --help)", other));
            }
        }
        i += 1;
    }

    Ok(Command::Run(options))
}
