//! Default kiosk overlay: position label, category buttons and a progress bar.

use std::path::Path;

use crate::foundation::core::Rect;
use crate::foundation::error::PlayerResult;
use crate::overlay::paint::{blend_rect, fill_rect, stroke_rect};
use crate::overlay::text::{TextPainter, find_system_font};
use crate::overlay::{Overlay, OverlayModel};
use crate::render::frame::Frame;

const TOP_BAND: i32 = 100;
const BOTTOM_BAND: i32 = 120;
/// 30% black.
const BAND_ALPHA: u8 = 77;

const INDEX_LABEL_X: i32 = 20;
const INDEX_LABEL_BASELINE: i32 = 50;

const BUTTON_WIDTH: i32 = 60;
const BUTTON_HEIGHT: i32 = 30;
const BUTTON_GAP: i32 = 10;
const BUTTON_TOP: i32 = 20;
const BUTTON_RIGHT_MARGIN: i32 = 10;

const BAR_FROM_BOTTOM: i32 = 50;
const BAR_HEIGHT: i32 = 8;
const BAR_MARGIN: i32 = 20;

/// Label size in pixels.
pub const TEXT_PX: f32 = 16.0;

const WHITE: [u8; 3] = [255, 255, 255];
const BLACK: [u8; 3] = [0, 0, 0];
const BUTTON_GREY: [u8; 3] = [80, 80, 80];
const BUTTON_BORDER: [u8; 3] = [150, 150, 150];
const BUTTON_TEXT: [u8; 3] = [200, 200, 200];
const TRACK_GREY: [u8; 3] = [100, 100, 100];

/// The kiosk HUD.
///
/// Labels need a font; without one only the bands, buttons and progress bar are drawn.
#[derive(Debug, Default)]
pub struct HudOverlay {
    text: Option<TextPainter>,
}

impl HudOverlay {
    /// Create the overlay with the first usable system font, or without labels when none loads.
    pub fn new() -> Self {
        let Some(path) = find_system_font() else {
            tracing::warn!("no system font found, HUD labels disabled");
            return Self::default();
        };
        match TextPainter::load(&path, TEXT_PX) {
            Ok(text) => {
                tracing::debug!(font = %path.display(), "loaded HUD font");
                Self::with_text(text)
            }
            Err(e) => {
                tracing::warn!(font = %path.display(), error = %e, "HUD labels disabled");
                Self::default()
            }
        }
    }

    /// Create the overlay with the font file at `path`.
    pub fn with_font_file(path: &Path) -> PlayerResult<Self> {
        Ok(Self::with_text(TextPainter::load(path, TEXT_PX)?))
    }

    /// Create the overlay around an already loaded painter.
    pub fn with_text(text: TextPainter) -> Self {
        Self { text: Some(text) }
    }

    /// Whether labels are drawn.
    pub fn has_text(&self) -> bool {
        self.text.is_some()
    }

    /// Button rectangles for `count` categories on a canvas `width` pixels wide, right aligned.
    pub fn button_rects(width: u32, count: usize) -> Vec<Rect> {
        if count == 0 {
            return Vec::new();
        }
        let n = count as i32;
        let total = n * BUTTON_WIDTH + (n - 1) * BUTTON_GAP;
        let start = width as i32 - BUTTON_RIGHT_MARGIN - total;
        (0..n)
            .map(|i| {
                Rect::new(
                    start + i * (BUTTON_WIDTH + BUTTON_GAP),
                    BUTTON_TOP,
                    BUTTON_WIDTH,
                    BUTTON_HEIGHT,
                )
            })
            .collect()
    }

    /// Progress bar track rectangle for a frame of `width` x `height`.
    pub fn progress_track(width: u32, height: u32) -> Rect {
        Rect::new(
            BAR_MARGIN,
            height as i32 - BAR_FROM_BOTTOM,
            width as i32 - 2 * BAR_MARGIN,
            BAR_HEIGHT,
        )
    }
}

impl Overlay for HudOverlay {
    fn draw(&mut self, frame: &mut Frame, model: &OverlayModel<'_>) -> Vec<Rect> {
        if !model.show_ui {
            return Vec::new();
        }
        let w = frame.width;
        let h = frame.height;

        blend_rect(frame, Rect::new(0, 0, w as i32, TOP_BAND), BLACK, BAND_ALPHA);
        blend_rect(
            frame,
            Rect::new(0, h as i32 - BOTTOM_BAND, w as i32, BOTTOM_BAND),
            BLACK,
            BAND_ALPHA,
        );

        let shown = if model.total == 0 { 0 } else { model.index + 1 };
        let label = format!("{shown}/{}", model.total);
        if let Some(text) = self.text.as_mut() {
            text.draw(frame, INDEX_LABEL_X, INDEX_LABEL_BASELINE, &label, WHITE);
        }

        let buttons = Self::button_rects(w, model.categories.len());
        for (k, (rect, category)) in buttons.iter().zip(model.categories).enumerate() {
            let current = k == model.current_category;
            let text_rgb = if current {
                fill_rect(frame, *rect, WHITE);
                BLACK
            } else {
                fill_rect(frame, *rect, BUTTON_GREY);
                stroke_rect(frame, *rect, BUTTON_BORDER);
                BUTTON_TEXT
            };
            if let Some(text) = self.text.as_mut() {
                let (tw, th) = text.measure(&category.label);
                let tx = rect.x + (rect.width - tw) / 2;
                let baseline = rect.y + (rect.height - th) / 2 + text.ascent();
                text.draw(frame, tx, baseline, &category.label, text_rgb);
            }
        }

        let track = Self::progress_track(w, h);
        fill_rect(frame, track, TRACK_GREY);
        if model.frame_count > 0 {
            let ratio = (model.position.0 as f64 / model.frame_count as f64).clamp(0.0, 1.0);
            let filled = (f64::from(track.width) * ratio) as i32;
            fill_rect(frame, Rect::new(track.x, track.y, filled, track.height), WHITE);
        }

        if let Some(text) = self.text.as_mut() {
            let elapsed = model.fps.frames_to_secs(model.position.0).max(0.0) as u64;
            text.draw(frame, w as i32 - 60, track.y - 10, &format!("{elapsed}s"), WHITE);
        }

        buttons
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/hud.rs"]
mod tests;
