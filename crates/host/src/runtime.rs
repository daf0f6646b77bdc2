//! Host runtime integration.
//!
//! Bridges the sync game loop with the async speech queue and session log.
//! Both run on a small tokio runtime owned by [`HostServices`]; the loop only
//! ever pushes onto unbounded channels.

use std::time::Duration;

use anyhow::{Context, Result};
use tokio::runtime::{Builder, Runtime};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::HostConfig;
use crate::core::{Announcer, GameEvent, SpeechSink};
use crate::log::{open_log, run_log_writer, LogRecord};
use crate::speech::{run_speech_queue, SpeechEngine, SpeechWorker};

/// How long shutdown waits for the log writer to drain.
const LOG_DRAIN_TIMEOUT: Duration = Duration::from_secs(1);

/// Running host services.
pub struct HostServices {
    rt: Runtime,
    speech: Option<SpeechWorker>,
    log_tx: Option<mpsc::UnboundedSender<LogRecord>>,
    log_task: Option<JoinHandle<()>>,
}

impl HostServices {
    /// Start with the speech engine found on `PATH`.
    pub fn start(config: &HostConfig) -> Result<Self> {
        Self::start_with_engine(config, SpeechEngine::detect_from_env(config.speech))
    }

    /// Start with an explicit engine (`None` for silence).
    pub fn start_with_engine(config: &HostConfig, engine: Option<SpeechEngine>) -> Result<Self> {
        // Open before spawning anything so a bad path fails fast.
        let log_file = config.log_path.as_deref().map(open_log).transpose()?;

        let rt = Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("simon-host")
            .enable_all()
            .build()
            .context("failed to create tokio runtime")?;

        let speech = engine.map(|engine| {
            let (tx, rx) = mpsc::unbounded_channel();
            let name = engine.name();
            rt.spawn(run_speech_queue(rx, move |utterance| {
                let engine = engine.clone();
                async move { engine.speak(utterance).await }
            }));
            SpeechWorker::new(name, tx)
        });

        let (log_tx, log_task) = match log_file {
            Some(file) => {
                let (tx, rx) = mpsc::unbounded_channel();
                let file = tokio::fs::File::from_std(file);
                let task = rt.spawn(run_log_writer(file, rx));
                (Some(tx), Some(task))
            }
            None => (None, None),
        };

        Ok(Self {
            rt,
            speech,
            log_tx,
            log_task,
        })
    }

    pub fn speech_sink(&self) -> Option<Box<dyn SpeechSink>> {
        self.speech
            .clone()
            .map(|worker| Box::new(worker) as Box<dyn SpeechSink>)
    }

    /// An announcer speaking through this host.
    pub fn announcer(&self, muted: bool) -> Announcer {
        Announcer::new(self.speech_sink()).with_muted(muted)
    }

    /// Queue one event for the session log. No-op when logging is off.
    pub fn log(&self, ts_ms: u64, episode: u32, event: GameEvent) {
        if let Some(tx) = self.log_tx.as_ref() {
            let _ = tx.send(LogRecord {
                ts_ms,
                episode,
                event,
            });
        }
    }

    /// Flush the log and stop background work. Speech still playing is cut off.
    pub fn shutdown(mut self) {
        self.log_tx = None;
        self.speech = None;
        if let Some(task) = self.log_task.take() {
            let _ = self
                .rt
                .block_on(async { tokio::time::timeout(LOG_DRAIN_TIMEOUT, task).await });
        }
        self.rt.shutdown_background();
    }
}
