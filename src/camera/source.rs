//! The frame source seam between capture hardware and the viewer.

use super::types::{CameraError, Frame};

/// Something that yields frames on demand.
///
/// `Ok(None)` signals the end of the stream. Implementations release their
/// device when dropped, so a source only needs to be dropped once to give the
/// hardware back.
pub trait FrameSource {
    /// Pull the next frame.
    fn read_frame(&mut self) -> Result<Option<Frame>, CameraError>;
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn read_frame(&mut self) -> Result<Option<Frame>, CameraError> {
        (**self).read_frame()
    }
}
