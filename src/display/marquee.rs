//! Horizontally-scrolling row state machine.
//!
//! Text that fits the row is painted once and left alone. Overflowing text
//! scrolls through a padded copy (a row of blanks on either side so the
//! wrap is clean) one character per tick. Each time the visible window
//! re-aligns with the head of the text the row holds briefly; row 2 stops
//! scrolling for good once the user has watched it loop
//! [`ROW2_WRAPS_BEFORE_HOLD`] times.
//!
//! All timing compares against a caller-supplied monotonic instant; a tick
//! never sleeps, so rendering interleaves with input polling.

use std::time::{Duration, Instant};

/// Full marquee cycles row 2 scrolls before freezing on the head of the
/// text. An anti-flicker tweak inherited from the original hardware
/// player: once the content has looped twice, just display it.
pub const ROW2_WRAPS_BEFORE_HOLD: u32 = 2;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Text fits; painted once.
    Static,
    /// Advancing one character per tick.
    Scrolling,
    /// Holding at the wrap point for the configured pause.
    PausedAtWrap,
    /// Frozen on the head of the text until it changes.
    Held,
}

#[derive(Debug, Clone)]
pub struct MarqueeConfig {
    /// Visible characters in this row.
    pub width: usize,
    /// Scroll advance interval.
    pub tick: Duration,
    /// Hold time at each wrap.
    pub wrap_pause: Duration,
    /// Wraps allowed before the row freezes; `None` scrolls forever.
    pub hold_after_wraps: Option<u32>,
}

#[derive(Debug)]
pub struct Marquee {
    cfg: MarqueeConfig,
    text: String,
    /// Chars of blank-padding + text + blank-padding.
    padded: Vec<char>,
    /// First `width` chars of the text; the wrap reference window.
    head: String,
    mode: Mode,
    pos: usize,
    next_tick: Instant,
    hold_until: Instant,
    wraps: u32,
    painted: bool,
}

impl Marquee {
    pub fn new(cfg: MarqueeConfig, now: Instant) -> Self {
        let mut m = Self {
            cfg,
            text: String::new(),
            padded: Vec::new(),
            head: String::new(),
            mode: Mode::Static,
            pos: 0,
            next_tick: now,
            hold_until: now,
            wraps: 0,
            painted: false,
        };
        m.reset(now);
        m
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Replace the row text. A change resets the cursor, timers and wrap
    /// counters; identical text is a no-op.
    pub fn set_text(&mut self, text: &str, now: Instant) {
        if self.text == text {
            return;
        }
        self.text = text.to_string();
        self.reset(now);
    }

    fn reset(&mut self, now: Instant) {
        let width = self.cfg.width;
        let chars: Vec<char> = self.text.chars().collect();

        self.mode = if chars.len() <= width {
            Mode::Static
        } else {
            Mode::Scrolling
        };
        self.head = chars.iter().take(width).collect();

        self.padded.clear();
        self.padded.extend(std::iter::repeat(' ').take(width));
        self.padded.extend(chars);
        self.padded.extend(std::iter::repeat(' ').take(width));

        self.pos = 0;
        self.next_tick = now;
        self.hold_until = now;
        self.wraps = 0;
        self.painted = false;
    }

    /// Advance the state machine; returns the window to paint, if any.
    ///
    /// With `advance` false (playback paused) scrolling is suspended, but
    /// an unpainted static row still paints.
    pub fn tick(&mut self, now: Instant, advance: bool) -> Option<String> {
        match self.mode {
            Mode::Static => {
                if self.painted {
                    return None;
                }
                self.painted = true;
                Some(format!("{:<width$}", self.text, width = self.cfg.width))
            }
            Mode::Held => None,
            Mode::PausedAtWrap => {
                if advance && now >= self.hold_until {
                    self.mode = Mode::Scrolling;
                    self.next_tick = now;
                }
                None
            }
            Mode::Scrolling => {
                if !advance || now < self.next_tick {
                    return None;
                }
                self.next_tick = now + self.cfg.tick;

                let width = self.cfg.width;
                let window: String =
                    self.padded[self.pos..self.pos + width].iter().collect();
                self.pos += 1;
                if self.pos >= self.padded.len() - width {
                    self.pos = 0;
                }

                if window == self.head {
                    self.wraps += 1;
                    match self.cfg.hold_after_wraps {
                        Some(n) if self.wraps > n => self.mode = Mode::Held,
                        _ => {
                            self.mode = Mode::PausedAtWrap;
                            self.hold_until = now + self.cfg.wrap_pause;
                        }
                    }
                }

                Some(window)
            }
        }
    }
}
