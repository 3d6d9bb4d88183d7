//! Raw mode and alternate screen management with panic-safe cleanup.

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use std::io;
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};

/// Whether the terminal is currently taken over (for the panic handler).
pub(crate) static TERMINAL_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Guard that owns the terminal while the viewer runs: raw mode, the
/// alternate screen and a hidden cursor. Everything is restored on drop,
/// including when unwinding from a panic.
pub struct TerminalGuard {
    /// Whether this guard is responsible for cleanup
    active: bool,
}

impl TerminalGuard {
    /// Take over the terminal.
    ///
    /// # Errors
    /// Returns an error if raw mode cannot be enabled (e.g. stdout is not a
    /// TTY). Any partial setup is undone first.
    pub fn enter() -> io::Result<Self> {
        install_panic_hook();

        enable_raw_mode()?;
        TERMINAL_ACTIVE.store(true, Ordering::SeqCst);
        let mut guard = Self { active: true };

        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen, Hide) {
            let _ = guard.exit();
            return Err(e);
        }

        log::debug!("Terminal entered raw mode and alternate screen");
        Ok(guard)
    }

    /// Restore the terminal without dropping the guard.
    /// After calling this, the guard's drop is a no-op.
    pub fn exit(&mut self) -> io::Result<()> {
        if self.active {
            self.active = false;
            TERMINAL_ACTIVE.store(false, Ordering::SeqCst);
            restore()?;
            log::debug!("Terminal restored");
        }
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Best-effort cleanup, errors are ignored
        let _ = self.exit();
    }
}

fn restore() -> io::Result<()> {
    let screen = execute!(io::stdout(), Show, LeaveAlternateScreen);
    let raw = disable_raw_mode();
    screen.and(raw)
}

/// Install a panic hook that restores the terminal before the panic message
/// is printed, so the message lands on the normal screen.
pub(crate) fn install_panic_hook() {
    static HOOK_INSTALLED: AtomicBool = AtomicBool::new(false);

    if HOOK_INSTALLED.swap(true, Ordering::SeqCst) {
        return;
    }

    let original_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        if TERMINAL_ACTIVE.swap(false, Ordering::SeqCst) {
            let _ = restore();
        }
        original_hook(panic_info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_guard_enter_and_drop() {
        // Raw mode requires a real TTY; skip otherwise
        match TerminalGuard::enter() {
            Ok(guard) => {
                assert!(guard.is_active());
                assert!(TERMINAL_ACTIVE.load(Ordering::SeqCst));
                drop(guard);
                assert!(!TERMINAL_ACTIVE.load(Ordering::SeqCst));
            }
            Err(e) => {
                eprintln!("Skipping test (no TTY): {}", e);
            }
        }
    }

    #[test]
    fn test_terminal_guard_exit_is_idempotent() {
        match TerminalGuard::enter() {
            Ok(mut guard) => {
                guard.exit().unwrap();
                assert!(!guard.is_active());
                guard.exit().unwrap();
                drop(guard);
                assert!(!TERMINAL_ACTIVE.load(Ordering::SeqCst));
            }
            Err(e) => {
                eprintln!("Skipping test (no TTY): {}", e);
            }
        }
    }

    #[test]
    fn test_panic_hook_installation() {
        install_panic_hook();
        install_panic_hook(); // Second call should be no-op
    }
}
