use super::*;
use crate::library::UNKNOWN_ALBUM;
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

fn make_song() -> Song {
    Song {
        path: PathBuf::from("/tmp/music/test.mp3"),
        title: "Test Title".to_string(),
        artist: "Test Artist".to_string(),
        album: UNKNOWN_ALBUM.to_string(),
        year: String::new(),
        genre: String::new(),
        track: 0,
        file_size: 0,
        duration: Duration::from_micros(1_234_567),
        cover_art: None,
        playlist: String::new(),
    }
}

fn iface() -> (PlayerIface, Arc<Mutex<SharedState>>, mpsc::Receiver<ControlCmd>) {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (tx, rx) = mpsc::channel::<ControlCmd>();
    (
        PlayerIface {
            tx,
            state: state.clone(),
        },
        state,
        rx,
    )
}

#[test]
fn set_track_metadata_sets_and_clears_shared_state() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let handle = MprisHandle {
        state: state.clone(),
    };

    let song = make_song();
    handle.set_track_metadata(Some(7), Some(&song));

    {
        let s = state.lock().unwrap();
        assert_eq!(s.title.as_deref(), Some("Test Title"));
        assert_eq!(s.artist, vec!["Test Artist".to_string()]);
        assert_eq!(s.album.as_deref(), Some(UNKNOWN_ALBUM));
        assert!(s.url.as_deref().unwrap().contains("/tmp/music/test.mp3"));
        assert_eq!(s.length_micros, Some(1_234_567));
        assert_eq!(
            s.track_id.as_ref().map(|p| p.as_str()),
            Some("/org/mpris/MediaPlayer2/track/7")
        );
    }

    handle.set_track_metadata(None, None);
    {
        let s = state.lock().unwrap();
        assert_eq!(s.title, None);
        assert!(s.artist.is_empty());
        assert_eq!(s.album, None);
        assert_eq!(s.url, None);
        assert_eq!(s.length_micros, None);
        assert!(s.track_id.is_none());
    }
}

#[test]
fn playback_and_loop_status_map_to_mpris_strings() {
    let (iface, state, _rx) = iface();
    let handle = MprisHandle {
        state: state.clone(),
    };

    assert_eq!(iface.playback_status(), "Stopped");
    handle.set_playback(TransportPhase::Playing);
    assert_eq!(iface.playback_status(), "Playing");
    handle.set_playback(TransportPhase::Paused);
    assert_eq!(iface.playback_status(), "Paused");

    assert_eq!(iface.loop_status(), "None");
    handle.set_repeat(RepeatMode::Single);
    assert_eq!(iface.loop_status(), "Track");
    handle.set_repeat(RepeatMode::All);
    assert_eq!(iface.loop_status(), "Playlist");

    handle.set_volume(0.5);
    assert_eq!(iface.volume(), 0.5);
}

#[test]
fn metadata_includes_expected_keys_when_present() {
    let (iface, state, _rx) = iface();
    MprisHandle { state }.set_track_metadata(Some(1), Some(&make_song()));

    let map = iface.metadata();
    for k in [
        "mpris:trackid",
        "xesam:title",
        "xesam:artist",
        "xesam:album",
        "xesam:url",
        "mpris:length",
    ] {
        assert!(map.contains_key(k), "missing key: {k}");
    }
}

#[test]
fn metadata_is_empty_without_a_song() {
    let (iface, _state, _rx) = iface();
    assert!(iface.metadata().is_empty());
}

#[test]
fn transport_methods_forward_commands() {
    let (iface, _state, rx) = iface();
    iface.play();
    iface.pause();
    iface.play_pause();
    iface.stop();
    iface.next();
    iface.previous();

    let got: Vec<ControlCmd> = rx.try_iter().collect();
    assert_eq!(
        got,
        vec![
            ControlCmd::Play,
            ControlCmd::Pause,
            ControlCmd::PlayPause,
            ControlCmd::Stop,
            ControlCmd::Next,
            ControlCmd::Prev,
        ]
    );
}
