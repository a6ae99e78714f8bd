use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::ui::screens::{menu, Action, Context, Screen};

const POLL_INTERVAL: Duration = Duration::from_millis(120);

struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Runs the TUI application until the user quits.
///
/// # Errors
/// Returns an error if terminal setup or rendering fails.
pub fn run(ctx: Context) -> Result<()> {
    let _guard = TerminalGuard::enter()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    if ctx.model.is_none() {
        log::warn!("starting without a model, every estimate will be refused");
    }

    let mut screen = Screen::Menu(menu::MenuState::new());

    loop {
        terminal.draw(|f| screen.draw(f, &ctx))?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        let Event::Key(k) = event::read()? else {
            continue;
        };
        if k.kind != KeyEventKind::Press {
            continue;
        }

        // Letters are form input on the estimate screen, ctrl+c quits from anywhere.
        if is_interrupt(&k) {
            log::info!("interrupted by the user");
            break;
        }

        match screen.handle_key(k.code, &ctx) {
            Action::Quit => break,
            Action::Transition(next) => {
                log::debug!("switching to the {} screen", next.name());
                screen = next;
            }
            Action::None => {}
        }
    }

    terminal.show_cursor()?;
    Ok(())
}

fn is_interrupt(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}
