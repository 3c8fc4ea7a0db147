//! Raw-mode alternate screen, restored when the session is dropped.

use std::io::{self, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::ResetColor;
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{ExecutableCommand, QueueableCommand};

pub struct TerminalSession {
    _private: (),
}

impl TerminalSession {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let session = Self { _private: () };
        let mut stdout = io::stdout();
        stdout
            .queue(EnterAlternateScreen)?
            .queue(Hide)?
            .queue(Clear(ClearType::All))?
            .queue(MoveTo(0, 0))?;
        stdout.flush()?;
        Ok(session)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let restored = stdout
            .execute(ResetColor)
            .and_then(|out| out.execute(Show))
            .and_then(|out| out.execute(LeaveAlternateScreen))
            .map(|_| ())
            .and_then(|()| terminal::disable_raw_mode());
        if let Err(err) = restored {
            tracing::warn!(%err, "failed to restore terminal");
        }
    }
}
