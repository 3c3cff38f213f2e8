//! Letterbox/pillarbox fitting of decoded frames into the display canvas.

use image::imageops::{self, FilterType};

use crate::foundation::core::Canvas;
use crate::foundation::error::{PlayerError, PlayerResult};
use crate::render::frame::Frame;

/// Size of a `src_width x src_height` frame scaled uniformly to fit inside `target`.
///
/// Dimensions are truncated toward zero, then kept within `1..=target` so extreme aspect ratios
/// still produce a drawable image.
pub fn scaled_size(src_width: u32, src_height: u32, target: Canvas) -> (u32, u32) {
    let sw = f64::from(src_width.max(1));
    let sh = f64::from(src_height.max(1));
    let scale = (f64::from(target.width) / sw).min(f64::from(target.height) / sh);
    let w = ((sw * scale) as u32).clamp(1, target.width.max(1));
    let h = ((sh * scale) as u32).clamp(1, target.height.max(1));
    (w, h)
}

/// Resize `frame` into a black canvas of exactly `target` size, preserving aspect ratio.
///
/// The scaled image is centered with offsets `(target - scaled) / 2`.
pub fn fit(frame: &Frame, target: Canvas) -> PlayerResult<Frame> {
    if frame.is_empty() {
        return Err(PlayerError::invalid_frame(format!(
            "cannot fit a {}x{} frame",
            frame.width, frame.height
        )));
    }
    target.validate()?;
    frame.check_len()?;

    let (new_w, new_h) = scaled_size(frame.width, frame.height, target);
    let resized;
    let scaled: &Frame = if new_w == frame.width && new_h == frame.height {
        frame
    } else {
        let img = frame.to_rgb_image()?;
        resized = Frame::from_rgb_image(imageops::resize(
            &img,
            new_w,
            new_h,
            FilterType::Triangle,
        ));
        &resized
    };

    let mut out = Frame::black(target.width, target.height);
    let off_x = ((target.width - new_w) / 2) as usize;
    let off_y = (target.height - new_h) / 2;
    let out_stride = out.row_bytes();
    let src_stride = scaled.row_bytes();
    for y in 0..new_h {
        let dst_start = (off_y + y) as usize * out_stride + off_x * 3;
        out.data[dst_start..dst_start + src_stride].copy_from_slice(scaled.row(y));
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/render/fit.rs"]
mod tests;
