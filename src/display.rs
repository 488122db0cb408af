//! Two-row display renderer.
//!
//! Each row is an independent [`Marquee`]; row 1 reserves its first cell
//! for the musical-note glyph, so its text area is one column narrower.
//! The renderer never blocks: each tick paints at most one window per row
//! and returns, so it interleaves with input polling in the control loop.

pub mod marquee;

use std::time::Instant;

use marquee::{Marquee, MarqueeConfig};

use crate::config::DisplaySettings;
use crate::hal::{NOTE_GLYPH_SLOT, Panel};

pub struct Renderer {
    row1: Marquee,
    row2: Marquee,
}

impl Renderer {
    pub fn new(settings: &DisplaySettings, now: Instant) -> Self {
        let tick = std::time::Duration::from_millis(settings.scroll_tick_ms);
        let wrap_pause = std::time::Duration::from_millis(settings.wrap_pause_ms);

        let row1 = Marquee::new(
            MarqueeConfig {
                width: settings.width - 1,
                tick,
                wrap_pause,
                hold_after_wraps: None,
            },
            now,
        );
        let row2 = Marquee::new(
            MarqueeConfig {
                width: settings.width,
                tick,
                wrap_pause,
                hold_after_wraps: Some(settings.row2_free_wraps),
            },
            now,
        );

        Self { row1, row2 }
    }

    /// Paint both rows from the current display strings. `advance` is
    /// false while playback is paused: text changes still repaint, but
    /// scrolling stands still.
    pub fn tick<P: Panel>(
        &mut self,
        panel: &mut P,
        row1: &str,
        row2: &str,
        advance: bool,
        now: Instant,
    ) {
        self.row1.set_text(row1, now);
        self.row2.set_text(row2, now);

        if let Some(window) = self.row1.tick(now, advance) {
            panel.set_cursor(0, 0);
            panel.write_glyph(NOTE_GLYPH_SLOT);
            panel.set_cursor(1, 0);
            panel.write_text(&window);
        }
        if let Some(window) = self.row2.tick(now, advance) {
            panel.set_cursor(0, 1);
            panel.write_text(&window);
        }
    }
}

/// Full-width two-line banner (startup errors, shutdown messages).
pub fn banner<P: Panel>(panel: &mut P, line1: &str, line2: &str) {
    panel.clear();
    panel.set_cursor(0, 0);
    panel.write_text(line1);
    panel.set_cursor(0, 1);
    panel.write_text(line2);
}
