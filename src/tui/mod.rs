//! Interactive record browser
mod app;
mod events;
mod layout;
mod rendering;
mod terminal;

use anyhow::Result;
pub use app::App;
use tracing::info;

use self::terminal::TerminalManager;
use crate::session::Session;

/// Run the interactive viewer until the user quits
pub fn run_interactive(session: Session) -> Result<()> {
    info!(records = session.records().len(), "Starting interactive viewer");

    let mut manager = TerminalManager::new()?;
    let mut app = App::new(session);

    let result = app.run(manager.terminal_mut());
    manager.restore()?;

    result
}
