//! Hardware seams: the character display and the physical controls.
//!
//! The jukebox core only talks to these traits. The shipped backend in
//! [`term`] simulates the 16x2 panel and the button pad on a terminal so
//! the player runs on a dev machine; a real LCD/GPIO board implements the
//! same traits.

pub mod term;

use crate::error::Result;

/// Custom-glyph slot used for the musical note on row 1.
pub const NOTE_GLYPH_SLOT: u8 = 2;

/// 5x8 musical-note bitmap, one byte per glyph row.
pub const MUSIC_NOTE: [u8; 8] = [
    0b01111, 0b01001, 0b01001, 0b11001, 0b11011, 0b00011, 0b00000, 0b00000,
];

/// A 2-row fixed-width character display.
pub trait Panel {
    fn clear(&mut self);
    fn set_cursor(&mut self, col: u8, row: u8);
    fn write_text(&mut self, text: &str);
    fn define_glyph(&mut self, slot: u8, bitmap: [u8; 8]);
    fn write_glyph(&mut self, slot: u8);
}

/// Raw level of an input line. Buttons are wired active-low.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Level {
    High,
    Low,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Button {
    Play,
    Prev,
    Next,
    Info,
    Shuffle,
    Mute,
    Quit,
}

impl Button {
    pub const ALL: [Button; 7] = [
        Button::Play,
        Button::Prev,
        Button::Next,
        Button::Info,
        Button::Shuffle,
        Button::Mute,
        Button::Quit,
    ];

    pub(crate) fn idx(self) -> usize {
        match self {
            Button::Play => 0,
            Button::Prev => 1,
            Button::Next => 2,
            Button::Info => 3,
            Button::Shuffle => 4,
            Button::Mute => 5,
            Button::Quit => 6,
        }
    }
}

/// Button pad plus rotary volume encoder.
pub trait Controls {
    /// Drain pending hardware events. Called once per control-loop tick,
    /// before any levels are read; must not block.
    fn pump(&mut self) -> Result<()>;

    fn read_level(&mut self, button: Button) -> Level;

    /// Rotary-encoder detents accumulated since the last call
    /// (positive = clockwise).
    fn encoder_delta(&mut self) -> i32;
}
