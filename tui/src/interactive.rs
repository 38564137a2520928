use anyhow::Result;
use crossterm::{
    event::{Event as TermEvent, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::prelude::*;
use std::io;

use crate::app::{Action, App};
use crate::ui;

/// Run the editor until the user quits. Terminal input and background
/// session results are multiplexed on one task.
pub async fn run_interactive(mut app: App) -> Result<App> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result.map(|()| app)
}

async fn event_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let mut input = EventStream::new();
    loop {
        app.drain_session_events();
        terminal.draw(|f| ui::draw(f, app))?;

        tokio::select! {
            maybe_ev = app.session_mut().next_event() => {
                if let Some(ev) = maybe_ev {
                    app.handle_session_event(ev);
                }
            }
            term_ev = input.next() => {
                match term_ev {
                    Some(Ok(TermEvent::Key(key))) => match app.handle_key(key) {
                        Action::Quit => break,
                        Action::Save => {
                            if let Err(e) = app.save().await {
                                app.report_error(&e);
                            }
                        }
                        Action::Logout => {
                            if let Err(e) = app.log_out() {
                                app.report_error(&anyhow::Error::from(e));
                                continue;
                            }
                            break;
                        }
                        Action::None => {}
                    },
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                }
            }
        }
    }
    app.submit(slidesmith_protocol::Op::Shutdown);
    Ok(())
}
