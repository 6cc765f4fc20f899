//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use std::path::Path;
use std::time::Instant;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::config::Settings;
use crate::library::{ART_HEIGHT, ART_WIDTH, LibraryItem, Song, placeholder_art};
use crate::playback::TransportPhase;
use crate::progress::format_duration;

const CONTROLS: &[(&str, &str)] = &[
    ("j/k", "up/down"),
    ("enter", "play/open"),
    ("backspace", "go up"),
    ("space", "play/pause"),
    ("n/p", "next/prev"),
    ("s", "stop"),
    ("←/→", "seek 5s"),
    ("+/-", "volume"),
    ("l", "repeat"),
    ("b", "progress bar"),
    ("/", "search"),
    ("a", "favorite"),
    ("?", "settings"),
    ("q", "quit"),
];

fn controls_text() -> String {
    CONTROLS
        .iter()
        .map(|(k, v)| format!("[{k}] {v}"))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Accent color for borders and labels, picked by the `theme` setting.
fn accent(theme: &str) -> Color {
    match theme.to_ascii_lowercase().as_str() {
        "green" | "forest" => Color::Green,
        "blue" | "ocean" => Color::Blue,
        "magenta" | "purple" => Color::Magenta,
        "mono" | "plain" => Color::White,
        _ => Color::Cyan,
    }
}

fn on_off(b: bool) -> &'static str {
    if b { "On" } else { "Off" }
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn bordered(title: &str, accent: Color) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent))
        .title(title)
        .padding(Padding {
            left: 1,
            right: 0,
            top: 0,
            bottom: 0,
        })
}

fn list_item(item: &LibraryItem, now_playing: Option<&Path>) -> ListItem<'static> {
    let dim = Style::default().add_modifier(Modifier::DIM);
    let line = match item {
        LibraryItem::Folder(f) if f.is_parent() => Line::from(vec![
            Span::styled("📁 ..", Style::default().fg(Color::Blue)),
            Span::styled("  up one level", dim),
        ]),
        LibraryItem::Folder(f) => Line::from(vec![
            Span::styled(format!("📁 {}", f.name), Style::default().fg(Color::Blue)),
            Span::styled(format!("  {} songs", f.song_count), dim),
        ]),
        LibraryItem::Song(s) => {
            let main = if now_playing == Some(s.path.as_path()) {
                Span::styled(format!("♪ {}", s.display()), Style::default().fg(Color::Yellow))
            } else {
                Span::raw(s.display())
            };
            Line::from(vec![
                main,
                Span::styled(format!("  {} | {}", s.album, format_duration(s.duration)), dim),
            ])
        }
    };
    ListItem::new(line)
}

fn song_lines(song: &Song, label: Color, compact: bool) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    if !compact {
        let art = song
            .cover_art
            .clone()
            .unwrap_or_else(|| placeholder_art(&song.title, &song.artist, ART_WIDTH, ART_HEIGHT));
        lines.extend(art.lines.into_iter().map(Line::from));
        lines.push(Line::default());
    }

    let field = |name: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{name}: "), Style::default().fg(label)),
            Span::raw(value),
        ])
    };
    lines.push(field("Title", song.title.clone()));
    lines.push(field("Artist", song.artist.clone()));
    lines.push(field("Album", song.album.clone()));
    if !song.year.is_empty() {
        lines.push(field("Year", song.year.clone()));
    }
    if !song.genre.is_empty() {
        lines.push(field("Genre", song.genre.clone()));
    }
    lines.push(field("Duration", format_duration(song.duration)));
    lines
}

/// Title and body for the info panel: the playing song wins over the
/// selection.
fn info_panel(app: &App, accent: Color, compact: bool) -> (&'static str, Vec<Line<'static>>) {
    if let Some(song) = app.now_playing() {
        let mut lines = song_lines(song, Color::Yellow, compact);
        lines.push(Line::default());
        lines.push(Line::from(format!("State: {}", app.playback.phase.label())));
        lines.push(Line::from(format!(
            "Volume: {:.0}%",
            app.playback.volume * 100.0
        )));
        lines.push(Line::from(format!(
            "Repeat: {}",
            app.playback.repeat_mode.label()
        )));
        return (" Now Playing ", lines);
    }

    match app.selected_item() {
        Some(LibraryItem::Song(song)) => {
            let mut lines = song_lines(song, Color::Green, compact);
            lines.push(Line::from(format!("Path: {}", song.path.display())));
            (" Song Info ", lines)
        }
        Some(LibraryItem::Folder(folder)) if folder.is_parent() => {
            (" Folder ", vec![Line::from("Back to the parent folder")])
        }
        Some(LibraryItem::Folder(folder)) => (
            " Folder ",
            vec![
                Line::from(Span::styled(
                    format!("📁 {}", folder.name),
                    Style::default().fg(accent),
                )),
                Line::default(),
                Line::from(format!("Songs: {}", folder.song_count)),
            ],
        ),
        None => (
            " Info ",
            vec![Line::from(Span::styled(
                "No item selected",
                Style::default().fg(Color::Red),
            ))],
        ),
    }
}

/// Default status line when no transient message is up.
fn status_summary(app: &App) -> String {
    let total = app.library.songs().len();
    let mut text = match &app.active_query {
        Some(_) => format!(
            " cadenza | {}/{total} songs (filtered)",
            app.items.len()
        ),
        None => format!(" cadenza | {total} songs total"),
    };
    if app.playback.phase != TransportPhase::Stopped {
        text.push_str(&format!(" | {}", app.playback.phase.label()));
        if !app.playback.duration.is_zero() {
            text.push_str(&format!(" | {:.1}%", app.playback.progress() * 100.0));
        }
    }
    text
}

fn settings_text(settings: &Settings, app: &App) -> String {
    format!(
        "Progress Bar: {}\nRepeat Mode: {}\nVolume: {:.0}%\nTheme: {}\nCompact Mode: {}\nBuffer Size: {} bytes\nUpdate Interval: {} ms",
        on_off(app.progress.is_some()),
        app.playback.repeat_mode.label(),
        app.playback.volume * 100.0,
        settings.theme,
        on_off(settings.compact_mode),
        settings.buffer_size,
        settings.update_interval_ms,
    )
}

/// Render the entire UI into `frame`. Returns the area of the progress line
/// when it is shown, for mouse hit testing.
pub fn draw(frame: &mut Frame, app: &App, settings: &Settings) -> Option<Rect> {
    let accent = accent(&settings.theme);
    let compact = settings.compact_mode;
    let show_search = app.search_mode || app.active_query.is_some();

    let mut constraints = vec![Constraint::Length(3), Constraint::Min(3)];
    if show_search {
        constraints.push(Constraint::Length(3));
    }
    if app.progress.is_some() {
        constraints.push(Constraint::Length(3));
    }
    if !compact {
        constraints.push(Constraint::Length(4));
    }
    constraints.push(Constraint::Length(1));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(frame.area());
    let mut next = 0;
    let mut take = || {
        let area = chunks[next];
        next += 1;
        area
    };

    // Header
    let header_area = take();
    let header = Paragraph::new(Line::from(vec![
        Span::styled("Music Library", Style::default().fg(accent)),
        Span::styled(" > ", Style::default().add_modifier(Modifier::DIM)),
        Span::styled(app.breadcrumb(), Style::default().fg(Color::Yellow)),
    ]))
    .block(
        bordered(" cadenza ", accent).title_alignment(Alignment::Center),
    );
    frame.render_widget(header, header_area);

    // Library list and info panel
    let body = take();
    let (list_area, info_area) = if compact {
        (body, None)
    } else {
        let split = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(body);
        (split[0], Some(split[1]))
    };

    {
        // Only build ListItems for the visible window, centering the selection.
        let total = app.items.len();
        let list_height = list_area.height.saturating_sub(2) as usize;
        let (start, end, selected_in_window) = if total <= list_height || list_height == 0 {
            (0, total, app.selected)
        } else {
            let half = list_height / 2;
            let mut start = app.selected.saturating_sub(half);
            if start + list_height > total {
                start = total - list_height;
            }
            (start, start + list_height, app.selected - start)
        };

        let now_playing = app.playback.song.as_deref();
        let visible: Vec<ListItem> = app.items[start..end]
            .iter()
            .map(|item| list_item(item, now_playing))
            .collect();

        let list = List::new(visible)
            .block(bordered(" Library Browser ", accent))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ListState::default();
        if total > 0 {
            state.select(Some(selected_in_window));
        }
        frame.render_stateful_widget(list, list_area, &mut state);
    }

    if let Some(info_area) = info_area {
        let (title, lines) = info_panel(app, accent, compact);
        let info = Paragraph::new(lines)
            .block(bordered(title, accent))
            .wrap(Wrap { trim: false });
        frame.render_widget(info, info_area);
    }

    if show_search {
        let area = take();
        let text = if app.search_mode {
            format!("{}█", app.search_input)
        } else {
            app.active_query.clone().unwrap_or_default()
        };
        let title = if app.search_mode {
            " Search (Enter apply, Esc cancel) "
        } else {
            " Search (Backspace clears) "
        };
        frame.render_widget(Paragraph::new(text).block(bordered(title, accent)), area);
    }

    let mut progress_area = None;
    if let Some(bar) = app.progress.as_ref() {
        let area = take();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent))
            .title(" Progress ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rendered = bar.render(inner.width as usize);
        let bar_color = if rendered.dragging {
            Color::Yellow
        } else {
            Color::Green
        };
        let line = Line::from(vec![
            Span::styled(rendered.time.clone(), Style::default().fg(accent)),
            Span::raw(" ["),
            Span::styled(rendered.bar(), Style::default().fg(bar_color)),
            Span::raw("]"),
            Span::raw(rendered.suffix()),
        ]);
        frame.render_widget(Paragraph::new(line), inner);
        progress_area = Some(inner);
    }

    if !compact {
        let area = take();
        let help = Paragraph::new(controls_text())
            .block(bordered(" Controls ", accent))
            .wrap(Wrap { trim: true });
        frame.render_widget(help, area);
    }

    let status_area = take();
    let status = match app.status_text(Instant::now()) {
        Some(msg) => Line::from(Span::styled(
            format!(" {msg}"),
            Style::default().fg(Color::Yellow),
        )),
        None => Line::from(status_summary(app)),
    };
    frame.render_widget(Paragraph::new(status), status_area);

    if app.show_settings {
        let popup = centered_rect_sized(44, 10, list_area);
        frame.render_widget(Clear, popup);
        let text = Paragraph::new(settings_text(settings, app))
            .block(bordered(" Settings (? closes) ", accent))
            .wrap(Wrap { trim: true });
        frame.render_widget(text, popup);
    }

    progress_area
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::Library;
    use crate::library::test_support::{NameExtractor, touch};
    use crate::playback::PlaybackSnapshot;
    use ratatui::{Terminal, backend::TestBackend};
    use std::time::Duration;

    fn app(show_progress: bool) -> (tempfile::TempDir, App) {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("Band - Song.mp3"));
        touch(&dir.path().join("Live").join("Band - Encore.mp3"));
        let mut library = Library::new(dir.path()).unwrap();
        library.scan(&NameExtractor, false).unwrap();
        (dir, App::new(library, show_progress, PlaybackSnapshot::default()))
    }

    fn render(app: &App, settings: &Settings) -> (Option<Rect>, String) {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        let mut area = None;
        terminal
            .draw(|f| area = draw(f, app, settings))
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        let text = buffer
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        (area, text)
    }

    #[test]
    fn draw_without_progress_returns_no_area() {
        let (_dir, app) = app(false);
        let (area, text) = render(&app, &Settings::default());
        assert!(area.is_none());
        assert!(text.contains("Library Browser"));
        assert!(text.contains("Band - Song"));
        assert!(text.contains("2 songs total"));
    }

    #[test]
    fn draw_with_progress_reports_one_line_area() {
        let (_dir, mut app) = app(true);
        app.apply_snapshot(PlaybackSnapshot {
            phase: TransportPhase::Playing,
            position: Duration::from_secs(30),
            duration: Duration::from_secs(120),
            ..PlaybackSnapshot::default()
        });
        let (area, text) = render(&app, &Settings::default());
        let area = area.unwrap();
        assert_eq!(area.height, 1);
        assert!(area.width > 0);
        assert!(text.contains("0:30 / 2:00"));
    }

    #[test]
    fn compact_mode_hides_info_and_controls() {
        let (_dir, app) = app(false);
        let settings = Settings {
            compact_mode: true,
            ..Settings::default()
        };
        let (_, text) = render(&app, &settings);
        assert!(!text.contains("Controls"));
        assert!(!text.contains("Folder"));
    }

    #[test]
    fn settings_popup_lists_values() {
        let (_dir, mut app) = app(false);
        app.show_settings = true;
        let (_, text) = render(&app, &Settings::default());
        assert!(text.contains("Update Interval: 500 ms"));
    }

    #[test]
    fn status_summary_mentions_filter_and_progress() {
        let (_dir, mut app) = app(false);
        app.search_input = "encore".into();
        app.apply_search();
        assert_eq!(status_summary(&app), " cadenza | 1/2 songs (filtered)");

        app.apply_snapshot(PlaybackSnapshot {
            phase: TransportPhase::Paused,
            position: Duration::from_secs(30),
            duration: Duration::from_secs(120),
            ..PlaybackSnapshot::default()
        });
        assert!(status_summary(&app).ends_with(" | Paused | 25.0%"));
    }

    #[test]
    fn unknown_theme_falls_back_to_cyan() {
        assert_eq!(accent("default"), Color::Cyan);
        assert_eq!(accent("Forest"), Color::Green);
    }
}
