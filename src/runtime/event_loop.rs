use std::sync::mpsc::Receiver;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use ratatui::layout::Rect;
use ratatui::{Terminal, backend::CrosstermBackend};

use super::commands::{Command, key_command, mouse_command};
use super::session::Session;
use crate::mpris::ControlCmd;
use crate::ui;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Main terminal event loop: draws, then feeds MPRIS commands, ticks and
/// terminal input through the session. Returns `Ok(())` when shutdown is
/// requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    session: &mut Session,
    control_rx: &Receiver<ControlCmd>,
    tick_rx: &Receiver<()>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        let mut progress_area: Option<Rect> = None;
        terminal.draw(|f| progress_area = ui::draw(f, &session.app, session.settings()))?;

        while let Ok(cmd) = control_rx.try_recv() {
            tracing::debug!("MPRIS command {cmd:?}");
            if session.execute(Command::from(cmd)) {
                return Ok(());
            }
        }

        // A slow frame can leave several ticks queued; one is enough.
        let mut ticked = false;
        while tick_rx.try_recv().is_ok() {
            ticked = true;
        }
        if ticked {
            session.execute(Command::Tick);
        }

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        let cmd = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                key_command(key, session.app.search_mode)
            }
            Event::Mouse(mouse) => {
                let dragging = session
                    .app
                    .progress
                    .as_ref()
                    .is_some_and(|bar| bar.is_dragging());
                mouse_command(mouse, progress_area, dragging)
            }
            _ => None,
        };
        if let Some(cmd) = cmd
            && session.execute(cmd)
        {
            return Ok(());
        }
    }
}
