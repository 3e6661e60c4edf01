pub mod terminal;

use std::io::{self, IsTerminal};

use tracing::debug;

use crate::app::{AppContext, Result};
use crate::background::DrainReport;
use crate::session::{Response, Session};

pub use self::terminal::{CrosstermTerminal, LineTerminal, PlainTerminal};

/// Run an interactive session on the controlling terminal, or on plain
/// stdin/stdout when input is piped.
pub async fn run(ctx: &AppContext) -> Result<()> {
    let mut session = Session::new(ctx.store.clone(), ctx.renderer.clone(), ctx.page_settings());

    if io::stdin().is_terminal() {
        let mut terminal = CrosstermTerminal::setup()?;
        run_with(&mut terminal, &mut session).await?;
    } else {
        let stdin = io::stdin();
        let mut terminal = PlainTerminal::new(stdin.lock(), io::stdout());
        run_with(&mut terminal, &mut session).await?;
    }

    Ok(())
}

/// Drive `session` from `terminal` until quit or end of input.
///
/// Outstanding mark-read tasks are drained before returning, also when the
/// loop itself failed.
pub async fn run_with<T: LineTerminal>(terminal: &mut T, session: &mut Session) -> Result<DrainReport> {
    let result = run_loop(terminal, session).await;

    let pending = session.pending_writebacks();
    if pending > 0 {
        let _ = terminal.write(&format!("Waiting for {} pending updates...\n", pending));
    }
    let report = session.shutdown().await;
    for failure in &report.failures {
        let _ = terminal.write(&format!("{}\n", failure));
    }

    result.map(|()| report)
}

async fn run_loop<T: LineTerminal>(terminal: &mut T, session: &mut Session) -> Result<()> {
    let response = session.refresh().await;
    show(terminal, &response)?;

    loop {
        terminal.set_prompt(session.prompt());
        let Some(line) = terminal.read_line()? else {
            debug!("End of input");
            return Ok(());
        };

        let response = session.handle(&line).await;
        if response.quit {
            return Ok(());
        }
        show(terminal, &response)?;

        for failure in session.reap() {
            terminal.write(&format!("{}\n", failure))?;
        }
    }
}

fn show<T: LineTerminal>(terminal: &mut T, response: &Response) -> io::Result<()> {
    if let Some(page) = &response.page {
        terminal.clear()?;
        terminal.write(page)?;
        terminal.write("\n")?;
    }
    if let Some(notice) = &response.notice {
        terminal.write(notice)?;
        terminal.write("\n")?;
    }
    Ok(())
}
