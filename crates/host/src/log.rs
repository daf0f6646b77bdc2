//! JSON-lines session log.
//!
//! Every game event is appended as one line:
//! `{"ts_ms":1234,"episode":1,"event":{"type":"pressed","signal":"red","verdict":"continue"}}`.
//! Records arrive over an unbounded channel and are written by a tokio task,
//! so the game loop never blocks on disk I/O.

use std::fs::OpenOptions;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;

use crate::core::GameEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LogRecord {
    /// Milliseconds since the session started.
    pub ts_ms: u64,
    /// Game episode the event belongs to (0 before the first start).
    pub episode: u32,
    pub event: GameEvent,
}

/// Open `path` for appending, creating it if needed.
///
/// Done synchronously at startup so a bad path is reported before the
/// terminal switches to the alternate screen.
pub fn open_log(path: &Path) -> Result<std::fs::File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open session log {}", path.display()))
}

/// Append records to `file` until every sender is dropped.
///
/// Records already queued are batched into one write. A write error ends
/// logging for the rest of the session.
pub async fn run_log_writer(mut file: tokio::fs::File, mut rx: mpsc::UnboundedReceiver<LogRecord>) {
    let mut buf: Vec<u8> = Vec::with_capacity(4096);

    while let Some(rec) = rx.recv().await {
        buf.clear();
        encode_line(&rec, &mut buf);
        while let Ok(rec) = rx.try_recv() {
            encode_line(&rec, &mut buf);
        }
        if file.write_all(&buf).await.is_err() {
            return;
        }
    }

    let _ = file.flush().await;
}

fn encode_line(rec: &LogRecord, buf: &mut Vec<u8>) {
    let start = buf.len();
    if serde_json::to_writer(&mut *buf, rec).is_err() {
        buf.truncate(start);
        return;
    }
    buf.push(b'\n');
}
