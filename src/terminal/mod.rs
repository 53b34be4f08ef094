pub mod events;
pub mod state;
pub mod structs;
pub mod ui;

use anyhow::{Result, anyhow};
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::DefaultTerminal;
use std::sync::mpsc;
use std::time::Duration;

use crate::api::MailApi;
use crate::backend::{self, ApiEvent, Job};
use crate::domain::email::Mailbox;
use crate::terminal::state::AppState;

const TICK: Duration = Duration::from_millis(50);

/// Run the interactive client until the user quits.
pub fn run_tui<A: MailApi + 'static>(api: A, start: Mailbox) -> Result<()> {
    color_eyre::install().map_err(|e| anyhow!("failed to install error hooks: {e}"))?;

    let (jobs, responses) = backend::spawn(api);
    let mut state = AppState::new(start);
    state.load_mailbox(start, &jobs);

    let terminal = ratatui::init();
    let result = run(terminal, &mut state, &jobs, &responses);
    ratatui::restore();

    result
}

fn run(
    mut terminal: DefaultTerminal,
    state: &mut AppState,
    jobs: &mpsc::Sender<Job>,
    responses: &mpsc::Receiver<ApiEvent>,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::render(f, state))?;

        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && events::handle_key(key, state, jobs) {
                    break;
                }
            }
        }

        while let Ok(ev) = responses.try_recv() {
            state.handle_event(ev, jobs);
        }
    }
    log::info!("session closed");
    Ok(())
}
