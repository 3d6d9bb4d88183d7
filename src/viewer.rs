//! The capture → filter → annotate → display → key-poll loop.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::KeyEvent;

use crate::camera::{Frame, FrameSource};
use crate::display::{FrameSink, KeySource};
use crate::filters::FilterMode;
use crate::input::{handle_key_event, KeyAction};
use crate::overlay::{annotate, TextStyle, INSTRUCTIONS};

/// How long each iteration waits for a key press.
pub const KEY_POLL_TIMEOUT: Duration = Duration::from_millis(1);

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The quit key was pressed
    Quit,
    /// The source ran out of frames or failed to read one
    StreamEnded,
    /// Ctrl+C, as a signal or as a key press
    Interrupted,
}

/// What a finished run looked like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub reason: StopReason,
    pub frames_shown: u64,
    pub final_mode: FilterMode,
}

/// Errors that end the loop abnormally.
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    /// Drawing or polling the display failed
    #[error("Display error: {0}")]
    Display(#[from] io::Error),
}

/// Viewer behavior that is fixed for a run.
#[derive(Debug, Clone)]
pub struct ViewerOptions {
    /// Mode active before any key is pressed
    pub initial_mode: FilterMode,
    /// Draw the key help onto frames
    pub instructions: bool,
    pub text_style: TextStyle,
    pub poll_timeout: Duration,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            initial_mode: FilterMode::None,
            instructions: true,
            text_style: TextStyle::default(),
            poll_timeout: KEY_POLL_TIMEOUT,
        }
    }
}

/// The render loop. Owns the frame source, the display and the active
/// filter mode.
///
/// [`Viewer::run`] consumes the viewer, so the source (and with it the
/// camera handle) is dropped exactly once when the loop ends, whichever way
/// it ends.
pub struct Viewer<S: FrameSource, D: FrameSink + KeySource> {
    source: S,
    display: D,
    mode: FilterMode,
    options: ViewerOptions,
    frames_shown: u64,
    message: String,
    interrupt: Option<Arc<AtomicBool>>,
}

impl<S: FrameSource, D: FrameSink + KeySource> Viewer<S, D> {
    pub fn new(source: S, display: D) -> Self {
        Self::with_options(source, display, ViewerOptions::default())
    }

    pub fn with_options(source: S, display: D, options: ViewerOptions) -> Self {
        Self {
            source,
            display,
            mode: options.initial_mode,
            options,
            frames_shown: 0,
            message: "Press 'q' to quit".to_string(),
            interrupt: None,
        }
    }

    /// Stop the loop once `flag` becomes true (set from a signal handler).
    pub fn with_interrupt_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupt = Some(flag);
        self
    }

    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    pub fn frames_shown(&self) -> u64 {
        self.frames_shown
    }

    /// Current status line text.
    pub fn status(&self) -> String {
        format!(" {} | {} ", self.mode.label(), self.message)
    }

    /// Switch the active filter and announce it.
    pub fn set_mode(&mut self, mode: FilterMode) {
        self.mode = mode;
        self.message = format!("Switched to {} Mode.", mode.label());
        log::info!("{}", self.message);
    }

    /// Filter a frame with the active mode and draw the key help over it.
    pub fn process_frame(&self, frame: &Frame) -> Frame {
        let filtered = self.mode.apply(frame);
        if self.options.instructions {
            annotate(&filtered, INSTRUCTIONS, &self.options.text_style)
        } else {
            filtered
        }
    }

    /// Apply a key press. Returns the stop reason if the key ends the loop.
    pub fn handle_key(&mut self, event: KeyEvent) -> Option<StopReason> {
        match handle_key_event(event) {
            KeyAction::SetMode(mode) => {
                self.set_mode(mode);
                None
            }
            KeyAction::Quit => Some(StopReason::Quit),
            KeyAction::Interrupt => Some(StopReason::Interrupted),
            KeyAction::None => None,
        }
    }

    fn interrupted(&self) -> bool {
        self.interrupt
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
    }

    /// Run one iteration of the loop.
    ///
    /// # Returns
    /// `Some(reason)` when the loop should stop, `None` to keep going.
    pub fn step(&mut self) -> Result<Option<StopReason>, ViewerError> {
        if self.interrupted() {
            return Ok(Some(StopReason::Interrupted));
        }

        let frame = match self.source.read_frame() {
            Ok(Some(frame)) => frame,
            Ok(None) => {
                log::info!("Can't receive frame (stream end?)");
                return Ok(Some(StopReason::StreamEnded));
            }
            Err(e) => {
                log::warn!("Can't receive frame: {}", e);
                return Ok(Some(StopReason::StreamEnded));
            }
        };

        let composited = self.process_frame(&frame);
        let status = self.status();
        self.display.show(&composited, &status)?;
        self.frames_shown += 1;

        if let Some(key) = self.display.poll_key(self.options.poll_timeout)? {
            log::trace!("Key event: {:?}", key);
            if let Some(reason) = self.handle_key(key) {
                return Ok(Some(reason));
            }
        }

        if self.interrupted() {
            return Ok(Some(StopReason::Interrupted));
        }

        Ok(None)
    }

    /// Run until quit, interrupt or end of stream.
    ///
    /// The source is released when this returns, on success and on error.
    pub fn run(mut self) -> Result<RunSummary, ViewerError> {
        log::info!("Viewer started in {} mode", self.mode);

        let reason = loop {
            if let Some(reason) = self.step()? {
                break reason;
            }
        };

        log::info!(
            "Viewer stopped ({:?}) after {} frames",
            reason,
            self.frames_shown
        );

        Ok(RunSummary {
            reason,
            frames_shown: self.frames_shown,
            final_mode: self.mode,
        })
    }
}
