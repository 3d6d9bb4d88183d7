//! Output and input seams of the viewer.
//!
//! The viewer only talks to these traits, so the loop can be driven by the
//! terminal in production and by scripted fakes in tests.

use std::io;
use std::time::Duration;

use crossterm::event::KeyEvent;

use crate::camera::Frame;

/// Something that can show frames.
pub trait FrameSink {
    /// Show one composited frame along with a one-line status text.
    /// Must accept both single-channel and RGB frames.
    fn show(&mut self, frame: &Frame, status: &str) -> io::Result<()>;
}

/// Something that can be polled for key presses.
pub trait KeySource {
    /// Wait at most `timeout` for a key press.
    fn poll_key(&mut self, timeout: Duration) -> io::Result<Option<KeyEvent>>;
}

impl<T: FrameSink + ?Sized> FrameSink for &mut T {
    fn show(&mut self, frame: &Frame, status: &str) -> io::Result<()> {
        (**self).show(frame, status)
    }
}

impl<T: KeySource + ?Sized> KeySource for &mut T {
    fn poll_key(&mut self, timeout: Duration) -> io::Result<Option<KeyEvent>> {
        (**self).poll_key(timeout)
    }
}
