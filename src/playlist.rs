//! Playlist store: an ordered, 1-based index -> track mapping.
//!
//! Built once at startup from a directory scan or an explicit file list,
//! and fully replaced (never mutated in place) when shuffle is toggled.
//! The controller keeps the canonical pre-shuffle playlist around so that
//! toggling shuffle off restores the original order without rescanning.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;
use rand::rng;
use walkdir::WalkDir;

use crate::error::{JukeError, Result};

/// One playable audio file. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackRef {
    pub path: PathBuf,
    pub base_name: String,
}

impl TrackRef {
    pub fn new(path: PathBuf) -> Self {
        let base_name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();
        Self { path, base_name }
    }
}

/// Ordered collection of tracks, indexed 1..=len. Index 0 is never used,
/// preserving the "zero means not found" convention of the lookup.
#[derive(Debug, Clone, Default)]
pub struct Playlist {
    entries: BTreeMap<usize, TrackRef>,
}

impl Playlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a track by 1-based index.
    pub fn get(&self, index: usize) -> Option<&TrackRef> {
        self.entries.get(&index)
    }

    /// Insert at `index`, replacing any prior entry there.
    fn insert(&mut self, index: usize, track: TrackRef) {
        self.entries.insert(index, track);
    }

    fn push(&mut self, track: TrackRef) {
        let next = self.entries.len() + 1;
        self.insert(next, track);
    }

    /// Build a playlist from an explicit ordered file list, one entry per
    /// argument.
    pub fn from_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut playlist = Self::new();
        for p in paths {
            playlist.push(TrackRef::new(p.into()));
        }
        playlist
    }

    /// Scan `root` for audio files, appending each at the next free index.
    ///
    /// The walk is depth-first; with `recursive` false only the root
    /// directory itself is listed. Any walk error aborts the whole scan so
    /// the playlist count stays consistent with what was actually read.
    pub fn scan(root: &Path, recursive: bool, extensions: &[String]) -> Result<Self> {
        let mut playlist = Self::new();

        let mut walker = WalkDir::new(root);
        if !recursive {
            walker = walker.max_depth(1);
        }

        for entry in walker {
            let entry = entry.map_err(|e| {
                JukeError::Storage(format!("cannot scan {}: {e}", root.display()))
            })?;
            let path = entry.path();
            if entry.file_type().is_file() && is_audio_file(path, extensions) {
                playlist.push(TrackRef::new(path.to_path_buf()));
            }
        }

        Ok(playlist)
    }

    /// A shuffled copy of this playlist. Fisher-Yates over a materialized
    /// array, rebuilt as a fresh 1-based playlist. Entries with abnormally
    /// short paths are left out, a legacy guard against corrupt entries.
    pub fn shuffled(&self) -> Self {
        let mut tracks: Vec<TrackRef> = self
            .entries
            .values()
            .filter(|t| is_sane_entry(t))
            .cloned()
            .collect();
        tracks.shuffle(&mut rng());

        let mut playlist = Self::new();
        for t in tracks {
            playlist.push(t);
        }
        playlist
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &TrackRef)> {
        self.entries.iter().map(|(&i, t)| (i, t))
    }
}

fn is_sane_entry(track: &TrackRef) -> bool {
    !track.base_name.is_empty() && track.path.as_os_str().len() > 1
}

fn is_audio_file(path: &Path, extensions: &[String]) -> bool {
    let exts: Vec<String> = extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}
