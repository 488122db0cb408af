//! Terminal-simulated board: a 16x2 "LCD" drawn with crossterm and the
//! keyboard standing in for the button pad and volume dial.
//!
//! Key map: Space play/pause, n next, b prev, i info, s shuffle, m mute,
//! q (or Ctrl+C) quit, Up/+ and Down/- turn the volume dial. A keystroke
//! counts as a held button level for a configured hold window so the
//! debouncer sees it the way it would see a real switch.

use std::io::{Stdout, Write, stdout};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
    enable_raw_mode,
};
use crossterm::{cursor, execute, queue, style::Print};

use super::{Button, Controls, Level, Panel};
use crate::error::Result;

/// The simulated character display. Content is drawn inside a one-cell
/// border at the top-left of an alternate screen.
pub struct TermPanel {
    out: Stdout,
    width: usize,
}

impl TermPanel {
    pub fn new(width: usize) -> Result<Self> {
        enable_raw_mode()?;
        let mut out = stdout();
        execute!(out, EnterAlternateScreen, cursor::Hide)?;

        let mut panel = Self { out, width };
        panel.draw_frame()?;
        Ok(panel)
    }

    fn draw_frame(&mut self) -> Result<()> {
        let bar: String = std::iter::repeat('-').take(self.width).collect();
        queue!(
            self.out,
            Clear(ClearType::All),
            cursor::MoveTo(0, 0),
            Print(format!("+{bar}+")),
            cursor::MoveTo(0, 3),
            Print(format!("+{bar}+")),
            cursor::MoveTo(0, 5),
            Print("space:play/pause  n:next  b:prev  i:info  s:shuffle  m:mute  q:quit  +/-:volume"),
        )?;
        for row in 0..2u16 {
            queue!(
                self.out,
                cursor::MoveTo(0, row + 1),
                Print("|"),
                cursor::MoveTo(self.width as u16 + 1, row + 1),
                Print("|"),
            )?;
        }
        self.out.flush()?;
        Ok(())
    }
}

impl Panel for TermPanel {
    fn clear(&mut self) {
        let blank: String = std::iter::repeat(' ').take(self.width).collect();
        let _ = execute!(
            self.out,
            cursor::MoveTo(1, 1),
            Print(&blank),
            cursor::MoveTo(1, 2),
            Print(&blank),
            cursor::MoveTo(1, 1),
        );
    }

    fn set_cursor(&mut self, col: u8, row: u8) {
        let _ = execute!(self.out, cursor::MoveTo(col as u16 + 1, row as u16 + 1));
    }

    fn write_text(&mut self, text: &str) {
        let _ = execute!(self.out, Print(text));
    }

    fn define_glyph(&mut self, _slot: u8, _bitmap: [u8; 8]) {
        // A terminal cell cannot be rasterized; write_glyph substitutes
        // a unicode note for the slot instead.
    }

    fn write_glyph(&mut self, _slot: u8) {
        let _ = execute!(self.out, Print("\u{266a}"));
    }
}

impl Drop for TermPanel {
    fn drop(&mut self) {
        let _ = execute!(self.out, LeaveAlternateScreen, cursor::Show);
        let _ = disable_raw_mode();
    }
}

/// Keyboard-backed button pad and encoder.
pub struct TermControls {
    key_hold: Duration,
    pressed_until: [Option<Instant>; Button::ALL.len()],
    encoder: i32,
}

impl TermControls {
    pub fn new(key_hold: Duration) -> Self {
        Self {
            key_hold,
            pressed_until: [None; Button::ALL.len()],
            encoder: 0,
        }
    }

    fn press(&mut self, button: Button, now: Instant) {
        self.pressed_until[button.idx()] = Some(now + self.key_hold);
    }

    fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
            return;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.press(Button::Quit, now);
            return;
        }
        match key.code {
            KeyCode::Char(' ') => self.press(Button::Play, now),
            KeyCode::Char('n') => self.press(Button::Next, now),
            KeyCode::Char('b') => self.press(Button::Prev, now),
            KeyCode::Char('i') => self.press(Button::Info, now),
            KeyCode::Char('s') => self.press(Button::Shuffle, now),
            KeyCode::Char('m') => self.press(Button::Mute, now),
            KeyCode::Char('q') | KeyCode::Esc => self.press(Button::Quit, now),
            KeyCode::Up | KeyCode::Char('+') => self.encoder += 1,
            KeyCode::Down | KeyCode::Char('-') => self.encoder -= 1,
            _ => {}
        }
    }
}

impl Controls for TermControls {
    fn pump(&mut self) -> Result<()> {
        let now = Instant::now();
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                self.handle_key(key, now);
            }
        }
        Ok(())
    }

    fn read_level(&mut self, button: Button) -> Level {
        match self.pressed_until[button.idx()] {
            Some(until) if Instant::now() < until => Level::Low,
            _ => Level::High,
        }
    }

    fn encoder_delta(&mut self) -> i32 {
        std::mem::take(&mut self.encoder)
    }
}
