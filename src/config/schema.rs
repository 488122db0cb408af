use serde::Deserialize;

/// Top-level jukebox settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/lcdjuke/config.toml` or `~/.config/lcdjuke/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `LCDJUKE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub library: LibrarySettings,
    pub display: DisplaySettings,
    pub input: InputSettings,
    pub playback: PlaybackSettings,
    pub system: SystemSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether directory scans recurse into subdirectories by default.
    /// `--recursive` on the command line overrides this for `--dir`.
    pub recursive: bool,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec!["mp3".into(), "flac".into(), "wav".into(), "ogg".into()],
            recursive: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Character columns on the display.
    pub width: usize,
    /// Marquee advance interval (milliseconds).
    pub scroll_tick_ms: u64,
    /// How long a scrolling row holds at the wrap point (milliseconds).
    pub wrap_pause_ms: u64,
    /// Full marquee cycles row 2 is allowed before it freezes on the
    /// head of the text. The original hardware player stopped scrolling
    /// the artist row once the user had seen it loop twice.
    pub row2_free_wraps: u32,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            width: 16,
            scroll_tick_ms: 200,
            wrap_pause_ms: 1000,
            row2_free_wraps: 2,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InputSettings {
    /// Minimum stable duration before a raw level change is accepted
    /// as a real press (milliseconds).
    pub debounce_ms: u64,
    /// Control-loop tick interval (milliseconds). Small enough that
    /// button latency is bounded by the debounce window, not the tick.
    pub tick_ms: u64,
    /// How long a keystroke on the terminal board counts as a held
    /// button level (milliseconds). Must exceed `debounce_ms`.
    pub key_hold_ms: u64,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            debounce_ms: 50,
            tick_ms: 5,
            key_hold_ms: 120,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Whether shuffle starts enabled (same as `--shuffle`).
    pub shuffle: bool,
    /// Startup volume level, 0-100.
    pub volume: u8,
    /// Lowest level the volume dial can reach. The knob never drives
    /// the output to true silence; use the mute button for that.
    pub volume_floor: u8,
    /// Levels moved per encoder detent.
    pub volume_step: u8,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            shuffle: false,
            volume: 80,
            volume_floor: 5,
            volume_step: 2,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SystemSettings {
    /// Mountpoint scanned in `--usb` mode.
    pub music_dir: String,
    /// Block device expected to carry the music in `--usb` mode.
    pub device: String,
    /// Whether quitting may halt the host (same as `--halt`).
    pub halt_on_quit: bool,
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self {
            music_dir: "/MUSIC".to_string(),
            device: "/dev/sda1".to_string(),
            halt_on_quit: false,
        }
    }
}
