//! Startup wiring: configuration, CLI, playlist resolution and the
//! degraded no-media / no-songs banner states.

mod controller;
mod debounce;

pub use controller::Controller;

use std::env;
use std::path::Path;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::{info, warn};

use crate::cli::{self, Source};
use crate::config::Settings;
use crate::display;
use crate::error::{JukeError, Result};
use crate::hal::term::{TermControls, TermPanel};
use crate::media::{self, MountStatus};
use crate::player::RodioWorker;
use crate::playlist::Playlist;
use crate::session::{PlayerSession, Volume};

pub fn run() -> Result<()> {
    let settings = load_settings();
    let args = cli::parse(env::args().skip(1))?;

    let shuffle = args.shuffle || settings.playback.shuffle;
    let halt = args.halt || settings.system.halt_on_quit;

    let panel = TermPanel::new(settings.display.width)?;
    let controls = TermControls::new(Duration::from_millis(settings.input.key_hold_ms));

    let playlist = match &args.source {
        Source::Files(files) => Playlist::from_paths(files.iter().cloned()),
        Source::Dir(dir) => {
            let recursive = args.recursive.unwrap_or(settings.library.recursive);
            Playlist::scan(dir, recursive, &settings.library.extensions)?
        }
        Source::Usb => {
            let status = media::check_mount(&settings.system.device, &settings.system.music_dir);
            if status != MountStatus::Mounted {
                return park_with_banner(panel, "No USB inserted.", halt);
            }
            let root = Path::new(&settings.system.music_dir);
            match Playlist::scan(root, settings.library.recursive, &settings.library.extensions) {
                Ok(p) => p,
                Err(e) => {
                    warn!(error = %e, "cannot read music directory");
                    Playlist::new()
                }
            }
        }
    };

    if playlist.is_empty() {
        return match args.source {
            Source::Usb => park_with_banner(panel, "No songs on USB.", halt),
            _ => Err(JukeError::Config("no audio files found".into())),
        };
    }
    info!(tracks = playlist.len(), shuffle, "playlist ready");

    let volume = Volume::new(settings.playback.volume, settings.playback.volume_floor);
    let session = Arc::new(PlayerSession::new(volume));

    Controller::new(
        settings,
        session,
        playlist,
        shuffle,
        halt,
        panel,
        controls,
        RodioWorker,
    )
    .run()
}

/// Show a banner for a degraded state, hold it long enough to read, then
/// either halt the host or leave it to the user.
fn park_with_banner(mut panel: TermPanel, line1: &str, halt: bool) -> Result<()> {
    let line2 = if halt { "Shutting down." } else { "Please shutdown." };
    warn!(state = line1, "nothing to play");
    display::banner(&mut panel, line1, line2);
    thread::sleep(Duration::from_secs(3));
    if halt {
        media::halt();
    }
    Ok(())
}

fn load_settings() -> Settings {
    match Settings::load() {
        Ok(settings) => match settings.validate() {
            Ok(()) => settings,
            Err(msg) => {
                warn!(%msg, "invalid configuration, using defaults");
                Settings::default()
            }
        },
        Err(e) => {
            warn!(error = %e, "cannot load configuration, using defaults");
            Settings::default()
        }
    }
}
