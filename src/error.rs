//! Error taxonomy for the jukebox.
//!
//! Configuration errors abort before the control loop starts. Media errors
//! degrade (the track is skipped). Storage errors surface as a banner on the
//! display rather than crashing the process.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum JukeError {
    /// Bad or missing command-line argument, or an empty resolved playlist.
    #[error("configuration error: {0}")]
    Config(String),

    /// A specific track could not be opened or decoded.
    #[error("cannot open media {path}: {reason}")]
    Media { path: PathBuf, reason: String },

    /// Removable media or the music directory is unavailable.
    #[error("storage error: {0}")]
    Storage(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, JukeError>;
