use std::time::Duration;

use crate::foundation::error::{PlayerError, PlayerResult};

/// Frames-per-second used when a source reports a non-positive rate.
pub const DEFAULT_FPS: u32 = 30;

/// 0-based frame position inside the active video source.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize,
    serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> PlayerResult<Self> {
        if den == 0 {
            return Err(PlayerError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(PlayerError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Whole-number rate reported by a video source.
    ///
    /// Fractional rates are truncated (29.97 becomes 29) and anything that truncates to zero or
    /// below falls back to `fallback`.
    pub fn from_source_rate(rate: f64, fallback: u32) -> Self {
        let whole = if rate.is_finite() { rate.trunc() } else { 0.0 };
        let num = if whole >= 1.0 {
            whole.min(f64::from(u32::MAX)) as u32
        } else {
            fallback.max(1)
        };
        Self { num, den: 1 }
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Display interval of one frame, truncated to whole milliseconds (never below 1 ms).
    pub fn frame_interval(self) -> Duration {
        let ms = (1000.0 / self.as_f64()).trunc().max(1.0) as u64;
        Duration::from_millis(ms)
    }

    /// Convert a frame position to seconds.
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * f64::from(self.den) / f64::from(self.num)
    }
}

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a validated canvas with both sides non-zero.
    pub fn new(width: u32, height: u32) -> PlayerResult<Self> {
        let canvas = Self { width, height };
        canvas.validate()?;
        Ok(canvas)
    }

    /// Reject zero-sized canvases.
    pub fn validate(self) -> PlayerResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(PlayerError::validation(format!(
                "canvas must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Number of bytes of a tightly packed RGB8 buffer of this size.
    pub fn rgb_len(self) -> usize {
        self.width as usize * self.height as usize * 3
    }
}

/// Axis-aligned integer rectangle with inclusive hit-testing bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl Rect {
    /// Build a rectangle from its top-left corner and size.
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (`x + width`).
    pub fn right(self) -> i32 {
        self.x + self.width
    }

    /// Bottom edge (`y + height`).
    pub fn bottom(self) -> i32 {
        self.y + self.height
    }

    /// Return `true` when `(px, py)` lies inside the rectangle, edges included.
    pub fn contains(self, px: i32, py: i32) -> bool {
        self.x <= px && px <= self.right() && self.y <= py && py <= self.bottom()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
