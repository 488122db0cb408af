//! Tag metadata extraction and cleanup.
//!
//! Tag fields can arrive as raw byte runs holding several synonymous lines
//! separated by `\n`, `\r`, `\r\n` or NUL. Only the first non-empty line is
//! kept, capped at [`MAX_FIELD_CHARS`] characters. Missing fields fall back
//! to the base filename (title) or the literal `"UNKNOWN"`.

use lofty::file::TaggedFileExt;
use lofty::tag::ItemKey;

use crate::error::{JukeError, Result};
use crate::playlist::TrackRef;

pub const UNKNOWN: &str = "UNKNOWN";

/// Cap on any single cleaned tag field.
pub const MAX_FIELD_CHARS: usize = 99;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackMeta {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub genre: String,
}

impl TrackMeta {
    /// Metadata for a track whose tags could not be read at all:
    /// title is the base filename (extension kept), the rest UNKNOWN.
    pub fn fallback(track: &TrackRef) -> Self {
        Self {
            title: track.base_name.clone(),
            artist: UNKNOWN.to_string(),
            album: UNKNOWN.to_string(),
            genre: UNKNOWN.to_string(),
        }
    }
}

/// Open `track` and extract its tag metadata.
///
/// An unreadable file is a media error; the caller substitutes
/// [`TrackMeta::fallback`]. A readable file with absent or empty fields is
/// not an error; the same per-field fallbacks apply here.
pub fn extract(track: &TrackRef) -> Result<TrackMeta> {
    let tagged = lofty::read_from_path(&track.path).map_err(|e| JukeError::Media {
        path: track.path.clone(),
        reason: e.to_string(),
    })?;

    let mut title = String::new();
    let mut artist = String::new();
    let mut album = String::new();
    let mut genre = String::new();

    if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
        if let Some(v) = tag.get_string(&ItemKey::TrackTitle) {
            title = first_tag_line(v).unwrap_or_default();
        }
        if let Some(v) = tag.get_string(&ItemKey::TrackArtist) {
            artist = first_tag_line(v).unwrap_or_default();
        }
        if let Some(v) = tag.get_string(&ItemKey::AlbumTitle) {
            album = first_tag_line(v).unwrap_or_default();
        }
        if let Some(v) = tag.get_string(&ItemKey::Genre) {
            genre = first_tag_line(v).unwrap_or_default();
        }
    }

    if title.is_empty() {
        title = track.base_name.clone();
    }
    for field in [&mut artist, &mut album, &mut genre] {
        if field.is_empty() {
            field.push_str(UNKNOWN);
        }
    }

    Ok(TrackMeta {
        title,
        artist,
        album,
        genre,
    })
}

/// Keep the first non-empty line of a raw tag value.
///
/// `\n`, `\r` and NUL all terminate a line. Runs of terminators whose `\n`
/// and `\r` counts have both come out even cancel the line being collected
/// instead of leaving stale content behind (matched CR/LF pairs bracketing
/// an empty variant). The kept line is capped at [`MAX_FIELD_CHARS`].
fn first_tag_line(raw: &str) -> Option<String> {
    let mut had_cr = 0usize;
    let mut had_lf = 0usize;
    let mut current = String::new();

    for ch in raw.chars() {
        match ch {
            '\n' | '\r' | '\0' => {
                if ch == '\n' {
                    had_lf += 1;
                }
                if ch == '\r' {
                    had_cr += 1;
                }
                if (had_cr > 0 || had_lf > 0) && had_lf % 2 == 0 && had_cr % 2 == 0 {
                    current.clear();
                }
                if !current.is_empty() {
                    return Some(truncate_chars(&current, MAX_FIELD_CHARS));
                }
            }
            _ => {
                had_cr = 0;
                had_lf = 0;
                current.push(ch);
            }
        }
    }

    if current.is_empty() {
        None
    } else {
        Some(truncate_chars(&current, MAX_FIELD_CHARS))
    }
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
