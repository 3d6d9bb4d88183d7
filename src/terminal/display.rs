//! The terminal as the viewer's window.

use std::io::{self, BufWriter, Stdout, Write};
use std::time::Duration;

use crossterm::cursor::MoveTo;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::queue;

use super::layout::{place, Placement};
use super::raw_mode::TerminalGuard;
use super::renderer::render_half_blocks;
use super::status_bar::StatusBar;
use crate::camera::Frame;
use crate::display::{FrameSink, KeySource};

/// Draws frames as half-block pixels on the alternate screen and reads
/// keys from the terminal.
///
/// Creating one takes over the terminal; dropping it gives it back.
pub struct TerminalDisplay {
    out: BufWriter<Stdout>,
    status_bar: StatusBar,
    /// Layout used for the previous frame, cleared when it changes
    last_placement: Option<Placement>,
    /// Declared last so the screen is restored after the final flush
    _guard: TerminalGuard,
}

impl TerminalDisplay {
    /// Enter raw mode and the alternate screen.
    pub fn open(status_bar: StatusBar) -> io::Result<Self> {
        let guard = TerminalGuard::enter()?;
        let mut out = BufWriter::new(io::stdout());
        queue!(out, Clear(ClearType::All))?;
        out.flush()?;

        Ok(Self {
            out,
            status_bar,
            last_placement: None,
            _guard: guard,
        })
    }

    fn draw_status(&mut self, status: &str, cols: u16, term_rows: u16) -> io::Result<()> {
        if !self.status_bar.visible || term_rows == 0 {
            return Ok(());
        }
        let text = self.status_bar.format(status, cols);
        queue!(
            self.out,
            MoveTo(0, term_rows - 1),
            SetAttribute(Attribute::Reverse),
            Print(text),
            SetAttribute(Attribute::Reset)
        )
    }
}

impl FrameSink for TerminalDisplay {
    fn show(&mut self, frame: &Frame, status: &str) -> io::Result<()> {
        let (cols, term_rows) = terminal::size()?;
        let picture_rows = term_rows.saturating_sub(self.status_bar.height());
        let placement = place(frame.width, frame.height, cols, picture_rows);

        if self.last_placement != Some(placement) {
            queue!(self.out, Clear(ClearType::All))?;
            self.last_placement = Some(placement);
        }

        if !placement.is_empty() {
            let lines = render_half_blocks(frame, placement.cols, placement.rows);
            for (i, line) in lines.iter().enumerate() {
                queue!(self.out, MoveTo(placement.x, placement.y + i as u16), Print(line))?;
            }
        }

        self.draw_status(status, cols, term_rows)?;
        self.out.flush()
    }
}

impl KeySource for TerminalDisplay {
    fn poll_key(&mut self, timeout: Duration) -> io::Result<Option<KeyEvent>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) if key.kind != KeyEventKind::Release => Ok(Some(key)),
            Event::Resize(cols, rows) => {
                log::debug!("Terminal resized to {}x{}", cols, rows);
                self.last_placement = None;
                Ok(None)
            }
            _ => Ok(None),
        }
    }
}
