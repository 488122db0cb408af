//! Shared playback state: the single "now playing" record.
//!
//! One `PlayerSession` exists per process. It is owned by the controller
//! and handed to each playback worker as an `Arc` at spawn time. Exactly
//! two threads ever mutate the record (controller and the one live worker),
//! always under the same mutex; the condition variable wakes a paused
//! worker and nothing else.
//!
//! Transitions are requests, not confirmations: Next/Prev/Shuffle/Quit also
//! raise `song_over` to make the worker stop early, and the controller alone
//! clears `song_over` and resets the transition back to Play once it has
//! acted on it. Pause raises nothing; the worker just blocks on the condvar
//! inside [`PlayerSession::await_resume`].

mod volume;

pub use volume::Volume;

use std::path::PathBuf;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

use crate::metadata::TrackMeta;
use crate::playlist::TrackRef;

/// Requested change in playback intent.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Transition {
    Play,
    Pause,
    Next,
    Prev,
    Shuffle,
    Quit,
}

/// The active/next track and everything the display needs to show about it.
/// Allocated once; fields are reset, not reallocated, at track boundaries.
#[derive(Debug)]
pub struct NowPlaying {
    pub path: PathBuf,
    pub base_name: String,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub genre: String,
    /// Rendered display rows. Row 1 defaults to the title, row 2 to the
    /// artist; the controller rewrites row 2 for PAUSED/MUTED/info states.
    pub row1: String,
    pub row2: String,
    pub transition: Transition,
    pub song_over: bool,
    pub volume: Volume,
}

impl NowPlaying {
    fn new(volume: Volume) -> Self {
        Self {
            path: PathBuf::new(),
            base_name: String::new(),
            title: String::new(),
            artist: String::new(),
            album: String::new(),
            genre: String::new(),
            row1: String::new(),
            row2: String::new(),
            transition: Transition::Play,
            song_over: false,
            volume,
        }
    }
}

pub struct PlayerSession {
    now: Mutex<NowPlaying>,
    resume: Condvar,
}

impl PlayerSession {
    pub fn new(volume: Volume) -> Self {
        Self {
            now: Mutex::new(NowPlaying::new(volume)),
            resume: Condvar::new(),
        }
    }

    /// Lock the now-playing record for a compound read/update.
    pub fn lock(&self) -> MutexGuard<'_, NowPlaying> {
        self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Reset the record for a fresh track. The transition is expected to be
    /// `Play` at this point; the controller resets it before resolving the
    /// next index.
    pub fn begin_track(&self, track: &TrackRef, meta: &TrackMeta) {
        let mut now = self.lock();
        now.path.clear();
        now.path.push(&track.path);
        now.base_name.clone_from(&track.base_name);
        now.title.clone_from(&meta.title);
        now.artist.clone_from(&meta.artist);
        now.album.clone_from(&meta.album);
        now.genre.clone_from(&meta.genre);
        now.row1.clone_from(&meta.title);
        now.row2.clone_from(&meta.artist);
        now.song_over = false;
    }

    /// Request a transition. Everything except Pause also raises
    /// `song_over` so the worker stops after its current block; a Play
    /// request (resume) wakes a paused worker.
    pub fn request(&self, t: Transition) {
        let mut now = self.lock();
        now.transition = t;
        match t {
            Transition::Pause => {}
            Transition::Play => {
                self.resume.notify_all();
            }
            _ => {
                now.song_over = true;
            }
        }
    }

    pub fn pause(&self) {
        self.request(Transition::Pause);
    }

    pub fn resume(&self) {
        self.request(Transition::Play);
    }

    /// Block while paused. Called by the worker once per decoded block;
    /// this is the only suspension point during playback.
    pub fn await_resume(&self) {
        let mut now = self.lock();
        while now.transition == Transition::Pause {
            now = self
                .resume
                .wait(now)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    pub fn transition(&self) -> Transition {
        self.lock().transition
    }

    pub fn is_paused(&self) -> bool {
        self.transition() == Transition::Pause
    }

    /// True when a requested transition should cut the current track short.
    pub fn interrupted(&self) -> bool {
        matches!(
            self.transition(),
            Transition::Next | Transition::Prev | Transition::Shuffle | Transition::Quit
        )
    }

    pub fn song_over(&self) -> bool {
        self.lock().song_over
    }

    /// Worker epilogue: the track is done, either by reaching end of
    /// stream or by cooperative cancellation. When the transition is still
    /// the default `Play` the track simply ended, and the controller's
    /// normal advance-by-one rule applies.
    pub fn finish_track(&self) {
        let mut now = self.lock();
        now.song_over = true;
    }

    /// Linear gain for the sink, with mute folded in.
    pub fn gain(&self) -> f32 {
        self.lock().volume.gain()
    }
}

#[cfg(test)]
mod tests;
