//! Clipped rectangle painting and coverage blending on RGB8 frames.

use crate::foundation::core::Rect;
use crate::render::frame::Frame;

/// Clip `rect` against the frame, returning `(x0, y0, x1, y1)` with exclusive ends.
fn clip(frame: &Frame, rect: Rect) -> Option<(usize, usize, usize, usize)> {
    let x0 = rect.x.max(0);
    let y0 = rect.y.max(0);
    let x1 = rect.right().min(frame.width as i32);
    let y1 = rect.bottom().min(frame.height as i32);
    if x0 >= x1 || y0 >= y1 {
        return None;
    }
    Some((x0 as usize, y0 as usize, x1 as usize, y1 as usize))
}

/// Fill `rect` with an opaque color.
pub fn fill_rect(frame: &mut Frame, rect: Rect, rgb: [u8; 3]) {
    let Some((x0, y0, x1, y1)) = clip(frame, rect) else {
        return;
    };
    let stride = frame.row_bytes();
    for y in y0..y1 {
        let row = &mut frame.data[y * stride..(y + 1) * stride];
        for px in row[x0 * 3..x1 * 3].chunks_exact_mut(3) {
            px.copy_from_slice(&rgb);
        }
    }
}

/// Blend `rgb` over `rect` with `alpha` (0 keeps the frame, 255 replaces it).
pub fn blend_rect(frame: &mut Frame, rect: Rect, rgb: [u8; 3], alpha: u8) {
    let Some((x0, y0, x1, y1)) = clip(frame, rect) else {
        return;
    };
    let a = u16::from(alpha);
    let inv = 255 - a;
    let stride = frame.row_bytes();
    for y in y0..y1 {
        let row = &mut frame.data[y * stride..(y + 1) * stride];
        for px in row[x0 * 3..x1 * 3].chunks_exact_mut(3) {
            for (d, &c) in px.iter_mut().zip(&rgb) {
                *d = mul_div255(u16::from(c), a).saturating_add(mul_div255(u16::from(*d), inv));
            }
        }
    }
}

/// Draw a one-pixel border just inside `rect`.
pub fn stroke_rect(frame: &mut Frame, rect: Rect, rgb: [u8; 3]) {
    if rect.width <= 0 || rect.height <= 0 {
        return;
    }
    fill_rect(frame, Rect::new(rect.x, rect.y, rect.width, 1), rgb);
    fill_rect(frame, Rect::new(rect.x, rect.bottom() - 1, rect.width, 1), rgb);
    fill_rect(frame, Rect::new(rect.x, rect.y, 1, rect.height), rgb);
    fill_rect(frame, Rect::new(rect.right() - 1, rect.y, 1, rect.height), rgb);
}

/// Blend `rgb` through an 8-bit coverage mask of `width` x `height` whose top-left corner lands
/// at `(x, y)`. Parts of the mask outside the frame are skipped.
pub fn blend_coverage(
    frame: &mut Frame,
    x: i32,
    y: i32,
    width: usize,
    height: usize,
    coverage: &[u8],
    rgb: [u8; 3],
) {
    if coverage.len() < width * height {
        return;
    }
    let Some((x0, y0, x1, y1)) = clip(frame, Rect::new(x, y, width as i32, height as i32)) else {
        return;
    };
    let stride = frame.row_bytes();
    for fy in y0..y1 {
        let mask_row = (fy as i64 - i64::from(y)) as usize * width;
        let row = &mut frame.data[fy * stride..(fy + 1) * stride];
        for fx in x0..x1 {
            let a = u16::from(coverage[mask_row + (fx as i64 - i64::from(x)) as usize]);
            if a == 0 {
                continue;
            }
            let inv = 255 - a;
            for (d, &c) in row[fx * 3..fx * 3 + 3].iter_mut().zip(&rgb) {
                *d = mul_div255(u16::from(c), a).saturating_add(mul_div255(u16::from(*d), inv));
            }
        }
    }
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/paint.rs"]
mod tests;
