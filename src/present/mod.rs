//! Display surfaces: where composited frames go and where input comes from.

pub(crate) mod scripted;
#[cfg(feature = "sdl2")]
pub(crate) mod sdl;

use std::time::Duration;

use crate::foundation::error::PlayerResult;
use crate::nav::input::InputEvent;
use crate::render::frame::Frame;

/// Presentation contract used by the playback loop.
///
/// Frames handed to [`Presenter::present`] always have the canvas dimensions.
pub trait Presenter {
    /// Show `frame`, replacing whatever was shown before.
    fn present(&mut self, frame: &Frame) -> PlayerResult<()>;

    /// Wait up to `timeout` for input and return what arrived, oldest first.
    ///
    /// Implementations may return early once a key press, button release or close request is seen.
    fn poll_input(&mut self, timeout: Duration) -> PlayerResult<Vec<InputEvent>>;

    /// Pause between transition frames. Input arriving meanwhile stays queued.
    fn delay(&mut self, duration: Duration);
}
