//! The control loop: input polling, display driving, track sequencing.
//!
//! Single-threaded and cooperative. Each tick debounces the buttons,
//! drains the volume encoder, and gives the renderer one non-blocking
//! paint opportunity; the outer loop resolves the next track, spawns the
//! playback worker and joins it once the shared state reports the song
//! over. The controller is the only thread that touches the playlist and
//! the only one that clears `song_over`.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::config::Settings;
use crate::display::{self, Renderer};
use crate::error::Result;
use crate::hal::{Button, Controls, MUSIC_NOTE, NOTE_GLYPH_SLOT, Panel};
use crate::media;
use crate::metadata::{self, TrackMeta};
use crate::player::WorkerSpawn;
use crate::playlist::Playlist;
use crate::session::{PlayerSession, Transition};

use super::debounce::Debouncer;

const PAUSED_TEXT: &str = "PAUSED";
const MUTED_TEXT: &str = "-- MUTED --";

pub struct Controller<P, C, W> {
    settings: Settings,
    session: Arc<PlayerSession>,
    panel: P,
    controls: C,
    worker: W,
    /// The pre-shuffle ordering; kept so toggling shuffle off restores
    /// the original order without rescanning.
    canonical: Playlist,
    active: Playlist,
    index: usize,
    shuffle_on: bool,
    halt_on_quit: bool,
    debouncers: Vec<Debouncer>,
    row2_before_pause: String,
    row2_before_mute: String,
}

impl<P: Panel, C: Controls, W: WorkerSpawn> Controller<P, C, W> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        settings: Settings,
        session: Arc<PlayerSession>,
        playlist: Playlist,
        start_shuffled: bool,
        halt_on_quit: bool,
        panel: P,
        controls: C,
        worker: W,
    ) -> Self {
        let now = Instant::now();
        let window = Duration::from_millis(settings.input.debounce_ms);
        let debouncers = Button::ALL
            .iter()
            .map(|_| Debouncer::new(window, now))
            .collect();

        let active = if start_shuffled {
            playlist.shuffled()
        } else {
            playlist.clone()
        };

        Self {
            settings,
            session,
            panel,
            controls,
            worker,
            canonical: playlist,
            active,
            index: 1,
            shuffle_on: start_shuffled,
            halt_on_quit,
            debouncers,
            row2_before_pause: String::new(),
            row2_before_mute: String::new(),
        }
    }

    /// Track-sequencing loop; runs until the quit transition, then paints
    /// the shutdown banner.
    pub fn run(mut self) -> Result<()> {
        self.panel.define_glyph(NOTE_GLYPH_SLOT, MUSIC_NOTE);

        while self.session.transition() != Transition::Quit {
            // Past the end of the playlist: wrap back to the start.
            if self.index > self.active.len() {
                self.index = 1;
            }
            let Some(track) = self.active.get(self.index).cloned() else {
                break;
            };

            let meta = metadata::extract(&track).unwrap_or_else(|e| {
                warn!(track = %track.base_name, error = %e, "tags unreadable, using fallback");
                TrackMeta::fallback(&track)
            });
            self.session.begin_track(&track, &meta);
            info!(index = self.index, track = %track.base_name, "starting track");

            let worker = self.worker.spawn(self.session.clone(), &track);
            self.play_track()?;
            if worker.join().is_err() {
                warn!("playback worker panicked");
            }
            self.panel.clear();

            self.advance();
        }

        self.shutdown();
        Ok(())
    }

    /// Render + input tick loop for one track, until the song is over.
    fn play_track(&mut self) -> Result<()> {
        let mut renderer = Renderer::new(&self.settings.display, Instant::now());
        let tick = Duration::from_millis(self.settings.input.tick_ms);

        while !self.session.song_over() {
            self.controls.pump()?;
            let now = Instant::now();
            self.poll_buttons(now);
            self.poll_encoder();

            let (row1, row2, paused) = {
                let s = self.session.lock();
                (
                    s.row1.clone(),
                    s.row2.clone(),
                    s.transition == Transition::Pause,
                )
            };
            renderer.tick(&mut self.panel, &row1, &row2, !paused, now);

            thread::sleep(tick);
        }
        Ok(())
    }

    fn poll_buttons(&mut self, now: Instant) {
        let paused = self.session.is_paused();
        for button in Button::ALL {
            // While paused only play/pause works; the other buttons'
            // debounce checks are skipped entirely.
            if paused && button != Button::Play {
                continue;
            }
            let level = self.controls.read_level(button);
            if self.debouncers[button.idx()].update(level, now) {
                self.dispatch(button, paused);
            }
        }
    }

    pub(crate) fn dispatch(&mut self, button: Button, paused: bool) {
        match button {
            Button::Play => self.toggle_pause(paused),
            Button::Next => {
                if !self.active.is_empty() {
                    self.index = self.index % self.active.len() + 1;
                    self.session.request(Transition::Next);
                }
            }
            Button::Prev => {
                if !self.active.is_empty() {
                    self.index = if self.index <= 1 {
                        self.active.len()
                    } else {
                        self.index - 1
                    };
                    self.session.request(Transition::Prev);
                }
            }
            Button::Shuffle => self.toggle_shuffle(),
            Button::Info => {
                let mut now = self.session.lock();
                now.row2 = if now.row2 == now.artist {
                    now.album.clone()
                } else {
                    now.artist.clone()
                };
            }
            Button::Mute => self.toggle_mute(),
            Button::Quit => self.session.request(Transition::Quit),
        }
    }

    fn toggle_pause(&mut self, paused: bool) {
        if paused {
            {
                let mut now = self.session.lock();
                now.row2 = self.row2_before_pause.clone();
            }
            self.session.resume();
        } else {
            {
                let mut now = self.session.lock();
                self.row2_before_pause = now.row2.clone();
                now.row2 = PAUSED_TEXT.to_string();
            }
            self.session.pause();
        }
    }

    pub(crate) fn toggle_shuffle(&mut self) {
        self.shuffle_on = !self.shuffle_on;
        self.active = if self.shuffle_on {
            self.canonical.shuffled()
        } else {
            self.canonical.clone()
        };
        self.index = 1;
        self.session.request(Transition::Shuffle);
    }

    fn toggle_mute(&mut self) {
        let mut now = self.session.lock();
        if now.volume.toggle_mute() {
            self.row2_before_mute = now.row2.clone();
            now.row2 = MUTED_TEXT.to_string();
        } else {
            now.row2 = self.row2_before_mute.clone();
        }
    }

    fn poll_encoder(&mut self) {
        let detents = self.controls.encoder_delta();
        if detents == 0 || self.session.is_paused() {
            return;
        }
        let step = self.settings.playback.volume_step;
        let mut now = self.session.lock();
        now.volume.nudge(detents, step);
    }

    /// Decide the next index once a track is over. A normal end advances
    /// by one; Next/Prev/Shuffle already moved the index in their
    /// handlers, so only the transient fields are cleared.
    fn advance(&mut self) {
        let mut now = self.session.lock();
        match now.transition {
            Transition::Play | Transition::Pause => {
                now.transition = Transition::Play;
                now.song_over = false;
                drop(now);
                self.index += 1;
            }
            Transition::Next | Transition::Prev | Transition::Shuffle => {
                now.title.clear();
                now.artist.clear();
                now.album.clear();
                now.genre.clear();
                now.row1.clear();
                now.row2.clear();
                now.transition = Transition::Play;
                now.song_over = false;
            }
            Transition::Quit => {}
        }
    }

    fn shutdown(&mut self) {
        let second_row = if self.halt_on_quit {
            "Shutting down."
        } else {
            "Please shutdown."
        };
        display::banner(&mut self.panel, "Good Bye!", second_row);

        if self.halt_on_quit {
            media::wall("lcdjuke: music box is going down");
            media::unmount(&self.settings.system.music_dir);
            thread::sleep(Duration::from_secs(1));
            media::halt();
        }
    }

    #[cfg(test)]
    pub(crate) fn index(&self) -> usize {
        self.index
    }

    #[cfg(test)]
    pub(crate) fn active_paths(&self) -> Vec<std::path::PathBuf> {
        self.active.iter().map(|(_, t)| t.path.clone()).collect()
    }
}
