//! Terminal front end
//!
//! Form on the left, record table on the right, notification in the top
//! right corner and an optional log pane (F2).

pub mod app;
pub mod confirm;
pub mod format;
pub mod table;
pub mod ui;

pub use app::{Action, App, Focus};
pub use confirm::ModalConfirm;
pub use table::Tabular;

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use std::io;
use std::time::Duration;

use crate::core::DeskState;

/// Input poll interval; also the notification tick
const TICK: Duration = Duration::from_millis(100);

/// Take over the terminal and run until the user quits
pub fn run<R: Tabular>(state: DeskState<R>) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(state);
    tracing::info!(entity = R::ENTITY, "Catalog desk ready");

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &res {
        tracing::error!(error = %e, "Terminal loop failed");
    }
    res
}

fn run_app<B: Backend, R: Tabular>(terminal: &mut Terminal<B>, app: &mut App<R>) -> io::Result<()> {
    loop {
        let frame = terminal.draw(|f| ui::ui(f, app))?;
        let backdrop = frame.buffer.clone();

        if event::poll(TICK)?
            && let Event::Key(key) = event::read()?
            && matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat)
        {
            match app.handle_key(key) {
                Action::Quit => return Ok(()),
                Action::Dispatch(intent) => {
                    let mut confirm = ModalConfirm::new(terminal, Some(&backdrop));
                    app.dispatch(intent, &mut confirm);
                }
                Action::None => {}
            }
        }

        app.tick();
    }
}
