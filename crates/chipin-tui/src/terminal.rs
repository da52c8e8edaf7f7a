use std::io::{self, Stdout};
use std::panic::PanicHookInfo;
use std::sync::Arc;

use anyhow::Result;
use crossterm::event::{
    DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Owns the terminal for the lifetime of one picker session.
///
/// Creating it switches to raw mode and the alternate screen and subscribes
/// to focus-change (and optionally mouse) reporting; dropping it undoes all
/// of that, on every exit path.
pub struct TerminalGuard {
    terminal: Tui,
    mouse: bool,
    _panic_hook: PanicHookGuard,
}

impl TerminalGuard {
    pub fn enter(mouse: bool) -> Result<Self> {
        let panic_hook = PanicHookGuard::install(restore_terminal);

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableFocusChange)?;
        if mouse {
            execute!(stdout, EnableMouseCapture)?;
        }

        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.clear()?;
        tracing::debug!(mouse, "terminal acquired");
        Ok(Self {
            terminal,
            mouse,
            _panic_hook: panic_hook,
        })
    }

    pub fn terminal_mut(&mut self) -> &mut Tui {
        &mut self.terminal
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.mouse {
            if let Err(e) = execute!(self.terminal.backend_mut(), DisableMouseCapture) {
                tracing::warn!("Failed to disable mouse capture: {e}");
            }
        }
        if let Err(e) = execute!(
            self.terminal.backend_mut(),
            DisableFocusChange,
            LeaveAlternateScreen
        ) {
            tracing::warn!("Failed to leave alternate screen: {e}");
        }
        if let Err(e) = disable_raw_mode() {
            tracing::warn!("Failed to disable raw mode: {e}");
        }
        let _ = self.terminal.show_cursor();
        tracing::debug!("terminal released");
    }
}

/// Best-effort terminal reset used from the panic hook.
fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(
        io::stdout(),
        DisableMouseCapture,
        DisableFocusChange,
        LeaveAlternateScreen
    );
}

type PanicHook = Box<dyn Fn(&PanicHookInfo<'_>) + Sync + Send + 'static>;

/// Runs `on_panic` before the previous panic hook while alive, and puts the
/// previous hook back when dropped.
struct PanicHookGuard {
    previous: Option<Arc<PanicHook>>,
}

impl PanicHookGuard {
    fn install(on_panic: fn()) -> Self {
        let previous: Arc<PanicHook> = Arc::new(std::panic::take_hook());
        let chained = Arc::clone(&previous);
        std::panic::set_hook(Box::new(move |info| {
            on_panic();
            chained(info);
        }));
        Self {
            previous: Some(previous),
        }
    }
}

impl Drop for PanicHookGuard {
    fn drop(&mut self) {
        // Hooks cannot be swapped while this thread is panicking.
        if std::thread::panicking() {
            return;
        }
        let Some(previous) = self.previous.take() else {
            return;
        };
        // Dropping our hook releases its clone of `previous`.
        drop(std::panic::take_hook());
        match Arc::try_unwrap(previous) {
            Ok(hook) => std::panic::set_hook(hook),
            Err(_) => tracing::warn!("panic hook still shared, leaving default hook in place"),
        }
    }
}
