//! Everything the user, the ticker or MPRIS can ask for, and the mapping
//! from terminal events to it.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::mpris::ControlCmd;

/// Seek step for Left/Right, in seconds.
pub const SEEK_STEP_SECS: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Quit,
    Play,
    Pause,
    /// Play the selection when stopped, otherwise toggle pause.
    PlayPause,
    Stop,
    /// Enter the selected folder or play the selected song.
    Activate,
    Back,
    Next,
    Prev,
    MoveDown,
    MoveUp,
    SeekBy(i64),
    VolumeUp,
    VolumeDown,
    CycleRepeat,
    ToggleProgressBar,
    AddToFavorites,
    ToggleSettingsInfo,

    StartSearch,
    SearchInput(char),
    SearchBackspace,
    ApplySearch,
    CancelSearch,

    /// Mouse press on the progress line; `column` is relative to its left
    /// edge and `width` is the line's width.
    ProgressPress { column: usize, width: usize },
    ProgressDrag { column: usize, width: usize },
    ProgressRelease,

    Tick,
}

impl From<ControlCmd> for Command {
    fn from(cmd: ControlCmd) -> Self {
        match cmd {
            ControlCmd::Quit => Command::Quit,
            ControlCmd::Play => Command::Play,
            ControlCmd::Pause => Command::Pause,
            ControlCmd::PlayPause => Command::PlayPause,
            ControlCmd::Stop => Command::Stop,
            ControlCmd::Next => Command::Next,
            ControlCmd::Prev => Command::Prev,
        }
    }
}

pub fn key_command(key: KeyEvent, search_mode: bool) -> Option<Command> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Command::Quit);
    }

    if search_mode {
        return match key.code {
            KeyCode::Esc => Some(Command::CancelSearch),
            KeyCode::Enter => Some(Command::ApplySearch),
            KeyCode::Backspace => Some(Command::SearchBackspace),
            KeyCode::Char(c) if !c.is_control() => Some(Command::SearchInput(c)),
            _ => None,
        };
    }

    let cmd = match key.code {
        KeyCode::Char('q') => Command::Quit,
        KeyCode::Char(' ') => Command::PlayPause,
        KeyCode::Enter => Command::Activate,
        KeyCode::Backspace => Command::Back,
        KeyCode::Char('n') => Command::Next,
        KeyCode::Char('p') => Command::Prev,
        KeyCode::Char('s') => Command::Stop,
        KeyCode::Char('/') => Command::StartSearch,
        KeyCode::Char('+') | KeyCode::Char('=') => Command::VolumeUp,
        KeyCode::Char('-') => Command::VolumeDown,
        KeyCode::Char('l') => Command::CycleRepeat,
        KeyCode::Char('b') => Command::ToggleProgressBar,
        KeyCode::Char('a') => Command::AddToFavorites,
        KeyCode::Char('?') => Command::ToggleSettingsInfo,
        KeyCode::Down | KeyCode::Char('j') => Command::MoveDown,
        KeyCode::Up | KeyCode::Char('k') => Command::MoveUp,
        KeyCode::Left => Command::SeekBy(-SEEK_STEP_SECS),
        KeyCode::Right => Command::SeekBy(SEEK_STEP_SECS),
        _ => return None,
    };
    Some(cmd)
}

fn inside(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

/// Map a mouse event against the progress line `area`. Presses must land on
/// the line; drags and releases are followed anywhere once a gesture began.
pub fn mouse_command(event: MouseEvent, area: Option<Rect>, dragging: bool) -> Option<Command> {
    let width = area.map(|a| usize::from(a.width)).unwrap_or_default();
    let column = area
        .map(|a| usize::from(event.column.saturating_sub(a.x)))
        .unwrap_or_default();

    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let area = area?;
            inside(area, event.column, event.row)
                .then_some(Command::ProgressPress { column, width })
        }
        MouseEventKind::Drag(MouseButton::Left) if dragging => {
            area.map(|_| Command::ProgressDrag { column, width })
        }
        MouseEventKind::Up(MouseButton::Left) if dragging => Some(Command::ProgressRelease),
        _ => None,
    }
}
