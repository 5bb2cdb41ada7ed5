#![forbid(unsafe_code)]

//! Terminal session guard.
//!
//! Enters raw mode, the alternate screen and hides the cursor; [`Drop`]
//! undoes each step in reverse order. A panic hook performs the same
//! cleanup so a panicking driver thread cannot leave the terminal raw.

use std::io::{self, Write};
use std::sync::OnceLock;

/// RAII guard for the showcase terminal state.
#[derive(Debug)]
pub struct TerminalSession {
    alternate_screen: bool,
    cursor_hidden: bool,
}

impl TerminalSession {
    /// Enter raw mode, switch to the alternate screen and hide the cursor.
    pub fn enter() -> io::Result<Self> {
        install_panic_hook();

        crossterm::terminal::enable_raw_mode()?;
        tracing::debug!("terminal raw mode enabled");

        let mut session = Self {
            alternate_screen: false,
            cursor_hidden: false,
        };
        let mut stdout = io::stdout();

        crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;
        session.alternate_screen = true;

        crossterm::execute!(stdout, crossterm::cursor::Hide)?;
        session.cursor_hidden = true;

        Ok(session)
    }

    /// Terminal size as (columns, rows).
    pub fn size(&self) -> io::Result<(u16, u16)> {
        crossterm::terminal::size()
    }

    /// Draw `lines` from the top row, clearing whatever each row held.
    pub fn draw(&self, lines: &[String], height: u16) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        for row in 0..height {
            crossterm::queue!(
                stdout,
                crossterm::cursor::MoveTo(0, row),
                crossterm::terminal::Clear(crossterm::terminal::ClearType::CurrentLine)
            )?;
            if let Some(line) = lines.get(usize::from(row)) {
                crossterm::queue!(stdout, crossterm::style::Print(line))?;
            }
        }
        stdout.flush()
    }

    fn cleanup(&mut self) {
        let mut stdout = io::stdout();

        if self.cursor_hidden {
            let _ = crossterm::execute!(stdout, crossterm::cursor::Show);
            self.cursor_hidden = false;
        }
        if self.alternate_screen {
            let _ = crossterm::execute!(stdout, crossterm::terminal::LeaveAlternateScreen);
            self.alternate_screen = false;
        }
        let _ = crossterm::terminal::disable_raw_mode();
        tracing::debug!("terminal restored");

        let _ = stdout.flush();
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        self.cleanup();
    }
}

fn install_panic_hook() {
    static HOOK: OnceLock<()> = OnceLock::new();
    HOOK.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            best_effort_cleanup();
            previous(info);
        }));
    });
}

fn best_effort_cleanup() {
    let mut stdout = io::stdout();
    let _ = crossterm::execute!(stdout, crossterm::cursor::Show);
    let _ = crossterm::execute!(stdout, crossterm::terminal::LeaveAlternateScreen);
    let _ = crossterm::terminal::disable_raw_mode();
    let _ = stdout.flush();
}
