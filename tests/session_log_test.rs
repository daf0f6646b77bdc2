//! Session log written by the host runtime while a real game is played.

use tui_simon::app::App;
use tui_simon::core::Game;
use tui_simon::host::{HostConfig, HostServices, SpeechMode};
use tui_simon::types::{GameAction, UiAction, TICK_MS};

#[test]
fn game_session_is_logged_as_json_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.jsonl");
    let config = HostConfig {
        speech: SpeechMode::Off,
        log_path: Some(path.clone()),
        ..HostConfig::default()
    };
    let host = HostServices::start_with_engine(&config, None).unwrap();
    let mut app = App::new(Game::new(5), host.announcer(config.muted));

    let mut ts_ms = 0u64;
    app.apply(UiAction::Game(GameAction::Start));
    let first = app.game().sequence()[0];
    for _ in 0..200 {
        app.tick(TICK_MS);
        ts_ms += TICK_MS as u64;
        app.flush_events(|episode, event| host.log(ts_ms, episode, event));
    }
    app.apply(UiAction::Game(GameAction::Press(first)));
    app.flush_events(|episode, event| host.log(ts_ms, episode, event));
    host.shutdown();

    let text = std::fs::read_to_string(&path).unwrap();
    let records: Vec<serde_json::Value> = text
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    let types: Vec<&str> = records
        .iter()
        .map(|r| r["event"]["type"].as_str().unwrap())
        .collect();

    assert_eq!(types.first(), Some(&"started"));
    assert!(types.contains(&"highlight"));
    assert!(types.contains(&"playback_finished"));
    assert!(types.contains(&"round_complete"));
    assert!(records.iter().all(|r| r["episode"] == 1));

    let ts: Vec<u64> = records.iter().map(|r| r["ts_ms"].as_u64().unwrap()).collect();
    assert!(ts.windows(2).all(|w| w[0] <= w[1]));
}
