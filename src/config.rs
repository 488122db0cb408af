//! Jukebox configuration: schema types and the file/env loader.
//!
//! Everything tunable at runtime lives here, from audio-extension filters
//! to debounce and marquee timing. Configuration is optional; every field
//! has a default suited to a 16x2 appliance build.

mod load;
mod schema;

pub use schema::*;

#[cfg(test)]
mod tests;
