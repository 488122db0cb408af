//! Playback worker: decodes one track end-to-end and feeds the audio sink.
//!
//! One worker runs at a time; the controller spawns it per track and joins
//! it once the shared state reports the song over. Decoding streams block
//! by block so the shared transitions stay responsive: pause is honored
//! before each block is written (the worker parks the sink and blocks on
//! the session condvar), and Next/Prev/Shuffle/Quit cancel cooperatively
//! right after a block, never by killing the thread. Decoder and sink are
//! released on every exit path by plain scope drop.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use rodio::buffer::SamplesBuffer;
use rodio::{Decoder, OutputStreamBuilder, Sink, Source};
use tracing::{debug, warn};

use crate::error::{JukeError, Result};
use crate::playlist::TrackRef;
use crate::session::PlayerSession;

/// Samples pulled per loop iteration; the granularity of pause and
/// cancellation checks (roughly 25ms of stereo audio at 44.1 kHz).
const BLOCK_SAMPLES: usize = 2304;

/// Decoded blocks allowed to queue ahead of playback. Worst-case
/// cancellation latency is this backlog plus the block being written.
const MAX_BACKLOG: usize = 2;

const BACKLOG_POLL: Duration = Duration::from_millis(5);

/// Seam between the controller and the worker thread, so the sequencing
/// logic can be exercised without an audio device.
pub trait WorkerSpawn {
    fn spawn(&self, session: Arc<PlayerSession>, track: &TrackRef) -> JoinHandle<()>;
}

/// The real worker: rodio decode onto the default output device.
pub struct RodioWorker;

impl WorkerSpawn for RodioWorker {
    fn spawn(&self, session: Arc<PlayerSession>, track: &TrackRef) -> JoinHandle<()> {
        let path = track.path.clone();
        thread::spawn(move || run(session, path))
    }
}

fn run(session: Arc<PlayerSession>, path: PathBuf) {
    match play(&session, &path) {
        Ok(()) => debug!(path = %path.display(), "track finished"),
        // Open/decode failures skip the track; the controller sequences on.
        Err(e) => warn!(path = %path.display(), error = %e, "skipping track"),
    }
    session.finish_track();
}

fn media_err(path: &Path, e: impl std::fmt::Display) -> JukeError {
    JukeError::Media {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
}

fn play(session: &PlayerSession, path: &Path) -> Result<()> {
    let file = File::open(path).map_err(|e| media_err(path, e))?;
    let mut source = Decoder::new(BufReader::new(file)).map_err(|e| media_err(path, e))?;
    let channels = source.channels();
    let rate = source.sample_rate();

    let mut stream =
        OutputStreamBuilder::open_default_stream().map_err(|e| media_err(path, e))?;
    // rodio logs to stderr when the OutputStream is dropped; that would
    // tear the character display.
    stream.log_on_drop(false);

    let sink = Sink::connect_new(stream.mixer());
    sink.set_volume(session.gain());
    sink.play();

    loop {
        let block: Vec<f32> = source.by_ref().take(BLOCK_SAMPLES).collect();
        if block.is_empty() {
            break;
        }

        // The only suspension point during playback.
        if session.is_paused() {
            sink.pause();
            session.await_resume();
            sink.play();
        }

        sink.set_volume(session.gain());
        sink.append(SamplesBuffer::new(channels, rate, block));

        if session.interrupted() {
            sink.stop();
            return Ok(());
        }

        // Keep the queue shallow so a cancellation never has much audio
        // left to drain.
        while sink.len() > MAX_BACKLOG {
            if session.interrupted() {
                sink.stop();
                return Ok(());
            }
            if session.is_paused() {
                sink.pause();
                session.await_resume();
                sink.play();
            }
            thread::sleep(BACKLOG_POLL);
        }
    }

    // End of stream: let the queued tail play out.
    while !sink.empty() {
        if session.interrupted() {
            sink.stop();
            break;
        }
        if session.is_paused() {
            sink.pause();
            session.await_resume();
            sink.play();
        }
        thread::sleep(BACKLOG_POLL);
    }

    Ok(())
}
