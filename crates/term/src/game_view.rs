//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! The screen is laid out once per viewport by [`Layout`]: a fixed rectangle
//! for each signal's pad and each control button. The same layout is used to
//! draw highlights and to hit-test mouse clicks, so a signal always maps to
//! the same pad without searching the screen.

use crate::core::{Controls, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rect, Rgb};
use crate::types::{GameAction, Phase, Signal, UiAction};

pub const PAD_W: u16 = 18;
pub const PAD_H: u16 = 5;
const PAD_GAP_X: u16 = 2;
const PAD_GAP_Y: u16 = 1;
const BUTTON_W: u16 = 10;
const BUTTON_GAP: u16 = 1;

/// Width of the whole game screen (the button row is the widest part).
pub const CONTENT_W: u16 = 4 * BUTTON_W + 3 * BUTTON_GAP;
/// Height of the whole game screen.
pub const CONTENT_H: u16 = 19;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Control buttons, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Start,
    Pause,
    Resume,
    Mute,
}

impl Button {
    pub const ALL: [Button; 4] = [Button::Start, Button::Pause, Button::Resume, Button::Mute];

    pub fn index(&self) -> usize {
        match self {
            Button::Start => 0,
            Button::Pause => 1,
            Button::Resume => 2,
            Button::Mute => 3,
        }
    }

    /// Label with its key hint; fits in `BUTTON_W - 2` columns.
    pub fn label(&self, muted: bool) -> &'static str {
        match self {
            Button::Start => "N Start",
            Button::Pause => "P Pause",
            Button::Resume => "C Resume",
            Button::Mute if muted => "M Unmute",
            Button::Mute => "M Mute",
        }
    }

    pub fn action(&self) -> UiAction {
        match self {
            Button::Start => UiAction::Game(GameAction::Start),
            Button::Pause => UiAction::Game(GameAction::Pause),
            Button::Resume => UiAction::Game(GameAction::Resume),
            Button::Mute => UiAction::ToggleMute,
        }
    }

    pub fn enabled(&self, controls: &Controls) -> bool {
        match self {
            Button::Start => controls.start,
            Button::Pause => controls.pause,
            Button::Resume => controls.resume,
            Button::Mute => true,
        }
    }
}

/// Screen positions of every element for one viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub viewport: Viewport,
    /// Top-left of the content area.
    pub origin: (u16, u16),
    /// Pad rectangle per signal, indexed by [`Signal::index`].
    pub pads: [Rect; Signal::COUNT],
    /// Button rectangle per button, indexed by [`Button::index`].
    pub buttons: [Rect; 4],
    pub title_y: u16,
    pub score_y: u16,
    pub status_y: u16,
    pub speech_y: u16,
}

impl Layout {
    pub fn new(viewport: Viewport) -> Self {
        let x0 = viewport.width.saturating_sub(CONTENT_W) / 2;
        let y0 = viewport.height.saturating_sub(CONTENT_H) / 2;

        let grid_w = 2 * PAD_W + PAD_GAP_X;
        let grid_x = x0 + (CONTENT_W - grid_w) / 2;
        let grid_y = y0 + 2;

        let pads = Signal::ALL.map(|signal| {
            let col = (signal.index() % 2) as u16;
            let row = (signal.index() / 2) as u16;
            Rect::new(
                grid_x + col * (PAD_W + PAD_GAP_X),
                grid_y + row * (PAD_H + PAD_GAP_Y),
                PAD_W,
                PAD_H,
            )
        });

        let buttons_y = grid_y + 2 * PAD_H + PAD_GAP_Y + 1;
        let buttons = Button::ALL.map(|button| {
            Rect::new(
                x0 + button.index() as u16 * (BUTTON_W + BUTTON_GAP),
                buttons_y,
                BUTTON_W,
                1,
            )
        });

        Self {
            viewport,
            origin: (x0, y0),
            pads,
            buttons,
            title_y: y0,
            score_y: buttons_y + 2,
            status_y: buttons_y + 3,
            speech_y: buttons_y + 4,
        }
    }

    /// Whether the full screen fits the viewport.
    pub fn fits(&self) -> bool {
        self.viewport.width >= CONTENT_W && self.viewport.height >= CONTENT_H
    }

    pub fn content(&self) -> Rect {
        Rect::new(self.origin.0, self.origin.1, CONTENT_W, CONTENT_H)
    }

    pub fn pad(&self, signal: Signal) -> Rect {
        self.pads[signal.index()]
    }

    pub fn button(&self, button: Button) -> Rect {
        self.buttons[button.index()]
    }

    pub fn pad_at(&self, x: u16, y: u16) -> Option<Signal> {
        Signal::ALL
            .into_iter()
            .find(|&signal| self.pad(signal).contains(x, y))
    }

    pub fn button_at(&self, x: u16, y: u16) -> Option<Button> {
        Button::ALL
            .into_iter()
            .find(|&button| self.button(button).contains(x, y))
    }

    /// Action for a click at (x, y). Disabled buttons yield nothing; pad
    /// presses are always forwarded and the game decides whether to accept them.
    /// Nothing is clickable while the screen does not fit.
    pub fn hit_test(&self, x: u16, y: u16, controls: &Controls) -> Option<UiAction> {
        if !self.fits() {
            return None;
        }
        if let Some(signal) = self.pad_at(x, y) {
            return Some(UiAction::Game(GameAction::Press(signal)));
        }
        self.button_at(x, y)
            .filter(|button| button.enabled(controls))
            .map(|button| button.action())
    }
}

/// Front-end state that is not part of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HudState<'a> {
    pub muted: bool,
    /// Name of the speech engine, `None` when the host cannot speak.
    pub speech: Option<&'a str>,
    /// Pad the player just pressed (flashes briefly).
    pub pressed: Option<Signal>,
}

/// Base color of each pad when lit.
pub fn pad_color(signal: Signal) -> Rgb {
    match signal {
        Signal::Red => Rgb::new(240, 70, 70),
        Signal::Blue => Rgb::new(80, 140, 250),
        Signal::Green => Rgb::new(80, 220, 110),
        Signal::Yellow => Rgb::new(250, 220, 70),
    }
}

fn pad_label(signal: Signal) -> &'static str {
    match signal {
        Signal::Red => "RED  1",
        Signal::Blue => "BLUE  2",
        Signal::Green => "GREEN  3",
        Signal::Yellow => "YELLOW  4",
    }
}

const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);

/// A lightweight terminal renderer for the Simon game.
#[derive(Debug, Clone, Copy, Default)]
pub struct GameView;

impl GameView {
    pub fn new() -> Self {
        Self
    }

    /// Render into an existing framebuffer (resized to the layout's viewport).
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        hud: &HudState<'_>,
        layout: &Layout,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(layout.viewport.width, layout.viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        if !layout.fits() {
            let text = "Terminal too small for Simon";
            let y = layout.viewport.height / 2;
            fb.put_str_centered(
                Rect::new(0, 0, layout.viewport.width, layout.viewport.height),
                y,
                text,
                CellStyle::default().bold(),
            );
            return;
        }

        let content = layout.content();
        let title = CellStyle::new(Rgb::new(255, 255, 255), SCREEN_BG).bold();
        fb.put_str_centered(content, layout.title_y, "S I M O N   S A Y S", title);

        for signal in Signal::ALL {
            let lit = snap.lit == Some(signal) || hud.pressed == Some(signal);
            self.draw_pad(fb, layout.pad(signal), signal, lit, snap.accepts_input());
        }

        for button in Button::ALL {
            self.draw_button(fb, layout.button(button), button, hud, &snap.controls);
        }

        self.draw_score(fb, layout, snap);
        self.draw_status(fb, layout, snap);
        self.draw_speech(fb, layout, hud);

        if snap.paused {
            self.draw_overlay_text(fb, layout, "PAUSED");
        } else if snap.game_over() {
            self.draw_overlay_text(fb, layout, "GAME OVER!");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, hud: &HudState<'_>, viewport: Viewport) -> FrameBuffer {
        let layout = Layout::new(viewport);
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, hud, &layout, &mut fb);
        fb
    }

    fn draw_pad(&self, fb: &mut FrameBuffer, rect: Rect, signal: Signal, lit: bool, active: bool) {
        let base = pad_color(signal);
        let bg = match (lit, active) {
            (true, _) => base,
            (false, true) => base.scaled_eighths(3),
            (false, false) => base.scaled_eighths(2),
        };
        let fill = CellStyle::new(bg, bg);
        fb.fill_rect(rect, ' ', fill);

        let label_fg = if lit {
            Rgb::new(20, 20, 20)
        } else {
            Rgb::new(230, 230, 230)
        };
        let mut label = CellStyle::new(label_fg, bg);
        label.bold = lit;
        label.dim = !active && !lit;
        fb.put_str_centered(rect, rect.center().1, pad_label(signal), label);
    }

    fn draw_button(
        &self,
        fb: &mut FrameBuffer,
        rect: Rect,
        button: Button,
        hud: &HudState<'_>,
        controls: &Controls,
    ) {
        let style = if button.enabled(controls) {
            CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(50, 50, 70)).bold()
        } else {
            CellStyle::new(Rgb::new(110, 110, 110), Rgb::new(25, 25, 30)).dim()
        };
        fb.fill_rect(rect, ' ', style);
        fb.put_char(rect.x, rect.y, '[', style);
        fb.put_char(rect.right() - 1, rect.y, ']', style);
        fb.put_str(rect.x + 1, rect.y, button.label(hud.muted), style);
    }

    fn draw_score(&self, fb: &mut FrameBuffer, layout: &Layout, snap: &GameSnapshot) {
        let label = CellStyle::default().bold();
        let value = CellStyle::default();
        let (x0, y) = (layout.origin.0, layout.score_y);

        let x = fb.put_str(x0, y, "Score: ", label);
        let x = fb.put_u32(x, y, snap.score, value);
        let x = fb.put_str(x + 3, y, "Round: ", label);
        fb.put_u32(x, y, snap.sequence_len, value);
    }

    fn draw_status(&self, fb: &mut FrameBuffer, layout: &Layout, snap: &GameSnapshot) {
        let (x0, y) = (layout.origin.0, layout.status_y);
        let normal = CellStyle::default();

        match snap.phase {
            Phase::Idle => {
                fb.put_str(x0, y, "Press N to start, Q to quit", normal);
            }
            Phase::GameOver => {
                let banner = CellStyle::new(Rgb::new(255, 80, 80), SCREEN_BG).bold();
                fb.put_str(x0, y, "Game Over!", banner);
            }
            _ if snap.paused => {
                fb.put_str(x0, y, "Paused - C or space to resume", normal);
            }
            Phase::RoundTransition => {
                let good = CellStyle::new(Rgb::new(120, 230, 120), SCREEN_BG).bold();
                fb.put_str(x0, y, "Correct!", good);
            }
            Phase::Playing if snap.playback_running => {
                fb.put_str(x0, y, "Watch the sequence...", normal);
            }
            Phase::Playing => {
                let x = fb.put_str(x0, y, "Your turn: ", normal);
                let x = fb.put_u32(x, y, snap.input_len, normal);
                let x = fb.put_str(x, y, "/", normal);
                fb.put_u32(x, y, snap.sequence_len, normal);
            }
        }
    }

    fn draw_speech(&self, fb: &mut FrameBuffer, layout: &Layout, hud: &HudState<'_>) {
        let dim = CellStyle::default().dim();
        let (x0, y) = (layout.origin.0, layout.speech_y);
        let x = fb.put_str(x0, y, "Speech: ", dim);
        match (hud.speech, hud.muted) {
            (None, _) => fb.put_str(x, y, "unavailable", dim),
            (Some(_), true) => fb.put_str(x, y, "muted", dim),
            (Some(name), false) => fb.put_str(x, y, name, dim),
        };
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, layout: &Layout, text: &str) {
        // Centered on the gap row between the two pad rows.
        let top = layout.pad(Signal::Red);
        let y = top.bottom();
        let style = CellStyle::new(Rgb::new(255, 255, 255), SCREEN_BG).bold();
        let padded_len = text.chars().count() as u16 + 2;
        let content = layout.content();
        let x = content.x + content.w.saturating_sub(padded_len) / 2;
        fb.fill_rect(Rect::new(x, y, padded_len, 1), ' ', style);
        fb.put_str(x + 1, y, text, style);
    }
}
