//! Terminal Simon Says runner (default binary).
//!
//! Fixed 16ms timestep: crossterm events are polled until the next tick, the
//! game clock advances by exactly one tick, and a frame is drawn only when
//! something changed.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use tui_simon::app::App;
use tui_simon::cli::{parse_args, Command, USAGE};
use tui_simon::core::{Game, GameSnapshot};
use tui_simon::host::{HostConfig, HostServices};
use tui_simon::input::{handle_key_event, left_click, should_quit};
use tui_simon::term::{FrameBuffer, GameView, Layout, TerminalRenderer, Viewport};
use tui_simon::types::TICK_MS;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match parse_args(&args)? {
        Command::Help => {
            print!("{}", USAGE);
            return Ok(());
        }
        Command::Run(options) => options,
    };

    let mut config = HostConfig::from_env();
    options.apply(&mut config);
    let host = HostServices::start(&config)?;

    let mut term = TerminalRenderer::new();
    let result = match term.enter() {
        Ok(()) => run(&mut term, &host, &config),
        Err(e) => Err(e),
    };

    // Always try to restore terminal state.
    let _ = term.exit();
    host.shutdown();
    result
}

fn run(term: &mut TerminalRenderer, host: &HostServices, config: &HostConfig) -> Result<()> {
    let seed = config.seed.unwrap_or_else(clock_seed);
    let mut app = App::new(Game::new(seed), host.announcer(config.muted));

    let view = GameView::new();
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut layout = Layout::new(Viewport::new(w, h));
    let mut fb = FrameBuffer::new(w, h);
    let mut snap = GameSnapshot::default();
    let mut dirty = true;

    let session = Instant::now();
    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        if dirty {
            app.game().snapshot_into(&mut snap);
            view.render_into(&snap, &app.hud(), &layout, &mut fb);
            term.draw_swap(&mut fb)?;
            dirty = false;
        }

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            let action = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    handle_key_event(key)
                }
                Event::Mouse(mouse) => left_click(&mouse)
                    .and_then(|(x, y)| layout.hit_test(x, y, &app.controls())),
                Event::Resize(w, h) => {
                    layout = Layout::new(Viewport::new(w, h));
                    term.invalidate();
                    dirty = true;
                    None
                }
                _ => None,
            };
            if let Some(action) = action {
                dirty |= app.apply(action);
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            dirty |= app.tick(TICK_MS);
        }

        let ts_ms = session.elapsed().as_millis() as u64;
        app.flush_events(|episode, event| host.log(ts_ms, episode, event));
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1)
}
