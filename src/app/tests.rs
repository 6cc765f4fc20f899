use super::*;
use crate::library::test_support::{NameExtractor, touch};
use crate::library::{Library, LibraryItem};
use crate::playback::{PlaybackSnapshot, TransportPhase};
use std::path::Path;
use std::time::{Duration, Instant};
use tempfile::TempDir;

/// root/
///   A - One.mp3
///   A - Two.mp3
///   Albums/B - Three.mp3
///   Albums/Live/C - Four.mp3
fn app(show_progress: bool) -> (TempDir, App) {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    touch(&root.join("A - One.mp3"));
    touch(&root.join("A - Two.mp3"));
    touch(&root.join("Albums").join("B - Three.mp3"));
    touch(&root.join("Albums").join("Live").join("C - Four.mp3"));

    let mut library = Library::new(root).unwrap();
    library.scan(&NameExtractor, false).unwrap();
    (dir, App::new(library, show_progress, PlaybackSnapshot::default()))
}

fn titles(app: &App) -> Vec<String> {
    app.items
        .iter()
        .map(|i| match i {
            LibraryItem::Folder(f) => format!("[{}]", f.name),
            LibraryItem::Song(s) => s.title.clone(),
        })
        .collect()
}

#[test]
fn new_app_lists_root() {
    let (_dir, app) = app(false);
    assert_eq!(titles(&app), vec!["[Albums]", "One", "Two"]);
    assert_eq!(app.breadcrumb(), "/");
    assert!(app.progress.is_none());
}

#[test]
fn selection_wraps_both_ways() {
    let (_dir, mut app) = app(false);
    app.prev();
    assert_eq!(app.selected, 2);
    app.next();
    assert_eq!(app.selected, 0);
}

#[test]
fn opening_folders_and_going_back_restores_selection() {
    let (_dir, mut app) = app(false);
    assert_eq!(app.open_selected().unwrap(), None);
    assert_eq!(app.breadcrumb(), "/Albums");
    assert_eq!(titles(&app), vec!["[..]", "[Live]", "Three"]);

    app.selected = 1;
    app.open_selected().unwrap();
    assert_eq!(app.breadcrumb(), "/Albums/Live");

    // ".." entry behaves like going back.
    app.selected = 0;
    app.open_selected().unwrap();
    assert_eq!(app.breadcrumb(), "/Albums");
    assert_eq!(app.selected, 1);

    assert!(app.go_back());
    assert_eq!(app.breadcrumb(), "/");
    assert_eq!(app.selected, 0);
    assert!(!app.go_back());
}

#[test]
fn opening_a_song_queues_the_listing() {
    let (_dir, mut app) = app(false);
    app.selected = 2;
    let path = app.open_selected().unwrap().unwrap();
    assert!(path.ends_with("A - Two.mp3"));
    assert_eq!(app.queue.len(), 2);
    assert_eq!(app.queue.index(), 1);
    assert_eq!(app.queue.current(), Some(path.as_path()));
}

#[test]
fn search_filters_and_empty_query_clears() {
    let (_dir, mut app) = app(false);
    app.enter_search_mode();
    for c in "four".chars() {
        app.push_search_char(c);
    }
    app.push_search_char('x');
    app.pop_search_char();
    app.apply_search();

    assert!(!app.search_mode);
    assert_eq!(app.active_query.as_deref(), Some("four"));
    assert_eq!(titles(&app), vec!["Four"]);
    assert!(app.breadcrumb().starts_with("Search: four"));

    app.enter_search_mode();
    assert_eq!(app.search_input, "four");
    app.search_input.clear();
    app.apply_search();
    assert_eq!(app.active_query, None);
    assert_eq!(titles(&app), vec!["[Albums]", "One", "Two"]);
}

#[test]
fn cancel_search_keeps_applied_filter() {
    let (_dir, mut app) = app(false);
    app.enter_search_mode();
    app.push_search_char('a');
    app.apply_search();
    let filtered = titles(&app);

    app.enter_search_mode();
    app.push_search_char('z');
    app.cancel_search();
    assert!(!app.search_mode);
    assert_eq!(titles(&app), filtered);

    assert!(app.go_back());
    assert_eq!(app.active_query, None);
}

#[test]
fn search_results_queue_only_matches() {
    let (_dir, mut app) = app(false);
    app.enter_search_mode();
    app.push_search_char('t');
    app.apply_search();
    // "Two", "Three" match by title.
    assert_eq!(app.visible_song_paths().len(), 2);
    let path = app.open_selected().unwrap().unwrap();
    assert_eq!(app.queue.len(), 2);
    assert_eq!(app.queue.current(), Some(path.as_path()));
}

#[test]
fn status_message_expires() {
    let (_dir, mut app) = app(false);
    assert_eq!(app.status_text(Instant::now()), None);

    app.set_status("Volume: 50%");
    assert_eq!(app.status_text(Instant::now()), Some("Volume: 50%"));
    let later = Instant::now() + STATUS_TTL + Duration::from_millis(10);
    assert_eq!(app.status_text(later), None);
}

#[test]
fn progress_visibility_recreates_control() {
    let (_dir, mut app) = app(true);
    app.apply_snapshot(PlaybackSnapshot {
        phase: TransportPhase::Playing,
        position: Duration::from_secs(5),
        duration: Duration::from_secs(50),
        ..PlaybackSnapshot::default()
    });
    app.progress.as_mut().unwrap().start_drag(0.5);

    app.set_progress_visible(false);
    assert!(app.progress.is_none());
    app.set_progress_visible(true);

    let bar = app.progress.as_ref().unwrap();
    assert!(!bar.is_dragging());
    assert_eq!(bar.position(), Duration::from_secs(5));
    assert_eq!(bar.duration(), Duration::from_secs(50));
}

#[test]
fn now_playing_resolves_catalog_entry() {
    let (dir, mut app) = app(false);
    assert!(app.now_playing().is_none());

    let path = app.library.root().join("A - One.mp3");
    app.apply_snapshot(PlaybackSnapshot {
        song: Some(path),
        ..PlaybackSnapshot::default()
    });
    assert_eq!(app.now_playing().unwrap().title, "One");
    assert!(Path::new(dir.path()).exists());
}
