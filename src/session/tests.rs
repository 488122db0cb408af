use super::*;
use crate::metadata::TrackMeta;
use crate::playlist::TrackRef;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

fn session() -> PlayerSession {
    PlayerSession::new(Volume::new(80, 5))
}

fn meta(title: &str, artist: &str) -> TrackMeta {
    TrackMeta {
        title: title.into(),
        artist: artist.into(),
        album: "UNKNOWN".into(),
        genre: "UNKNOWN".into(),
    }
}

#[test]
fn next_prev_shuffle_quit_raise_song_over() {
    for t in [
        Transition::Next,
        Transition::Prev,
        Transition::Shuffle,
        Transition::Quit,
    ] {
        let s = session();
        s.request(t);
        assert_eq!(s.transition(), t);
        assert!(s.song_over());
        assert!(s.interrupted());
    }
}

#[test]
fn pause_does_not_raise_song_over() {
    let s = session();
    s.pause();
    assert_eq!(s.transition(), Transition::Pause);
    assert!(!s.song_over());
    assert!(s.is_paused());
    assert!(!s.interrupted());
}

#[test]
fn await_resume_blocks_until_resumed() {
    let s = Arc::new(session());
    s.pause();

    let resumed = Arc::new(AtomicBool::new(false));
    let (s2, r2) = (s.clone(), resumed.clone());
    let worker = thread::spawn(move || {
        s2.await_resume();
        r2.store(true, Ordering::SeqCst);
    });

    thread::sleep(Duration::from_millis(50));
    assert!(!resumed.load(Ordering::SeqCst));

    s.resume();
    worker.join().unwrap();
    assert!(resumed.load(Ordering::SeqCst));
    assert_eq!(s.transition(), Transition::Play);
}

#[test]
fn await_resume_returns_immediately_when_not_paused() {
    let s = session();
    s.await_resume();
    assert_eq!(s.transition(), Transition::Play);
}

#[test]
fn finish_track_leaves_a_normal_end_as_play() {
    let s = session();
    s.finish_track();
    assert!(s.song_over());
    assert_eq!(s.transition(), Transition::Play);
}

#[test]
fn begin_track_resets_fields_for_the_new_track() {
    let s = session();
    s.request(Transition::Next);
    {
        let mut now = s.lock();
        now.transition = Transition::Play;
        now.song_over = false;
    }

    let track = TrackRef::new("/m/song.mp3".into());
    s.begin_track(&track, &meta("Song", "Artist"));

    let now = s.lock();
    assert_eq!(now.base_name, "song.mp3");
    assert_eq!(now.title, "Song");
    assert_eq!(now.row1, "Song");
    assert_eq!(now.row2, "Artist");
    assert!(!now.song_over);
}

#[test]
fn volume_dial_clamps_to_floor_and_ceiling() {
    let mut v = Volume::new(10, 5);
    v.nudge(-100, 2);
    assert_eq!(v.level(), 5);
    assert!(v.gain() > 0.0);

    v.nudge(1000, 2);
    assert_eq!(v.level(), 100);
    assert!((v.gain() - 1.0).abs() < 1e-6);
}

#[test]
fn gain_is_monotonic_in_level() {
    let quiet = Volume::new(20, 0);
    let loud = Volume::new(90, 0);
    assert!(quiet.gain() < loud.gain());
}

#[test]
fn mute_zeroes_gain_but_preserves_level() {
    let mut v = Volume::new(70, 5);
    let before = v.gain();
    assert!(v.toggle_mute());
    assert_eq!(v.gain(), 0.0);
    assert_eq!(v.level(), 70);
    assert!(!v.toggle_mute());
    assert_eq!(v.gain(), before);
}
