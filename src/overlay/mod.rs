//! Playback UI drawn over composited frames.

pub(crate) mod hud;
pub(crate) mod paint;
pub(crate) mod text;

use crate::assets::catalog::Category;
use crate::foundation::core::{Fps, FrameIndex, Rect};
use crate::render::frame::Frame;

/// Snapshot of what the overlay should show for one presented frame.
#[derive(Clone, Copy, Debug)]
pub struct OverlayModel<'a> {
    /// Categories in button order.
    pub categories: &'a [Category],
    /// Index of the current category.
    pub current_category: usize,
    /// Index of the current video within the active list.
    pub index: usize,
    /// Number of videos in the active list.
    pub total: usize,
    /// Position of the last frame read from the active source.
    pub position: FrameIndex,
    /// Frame count of the active source, `0` without one.
    pub frame_count: u64,
    /// Effective frame rate of the active source.
    pub fps: Fps,
    /// Whether the UI is visible.
    pub show_ui: bool,
}

/// Draws playback UI into a frame.
pub trait Overlay {
    /// Draw `model` over `frame` and return the category button rectangles that were drawn,
    /// in category order. Returns an empty list when nothing clickable was drawn.
    fn draw(&mut self, frame: &mut Frame, model: &OverlayModel<'_>) -> Vec<Rect>;
}

/// Overlay that draws nothing and registers no buttons.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOverlay;

impl Overlay for NoOverlay {
    fn draw(&mut self, _frame: &mut Frame, _model: &OverlayModel<'_>) -> Vec<Rect> {
        Vec::new()
    }
}
