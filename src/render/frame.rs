use crate::foundation::core::Canvas;
use crate::foundation::error::{PlayerError, PlayerResult};

/// A decoded or composited frame as RGB8 pixels.
///
/// Pixels are tightly packed, row-major, three bytes per pixel. Every frame that leaves the
/// compositor has the dimensions of the configured [`Canvas`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGB8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}

impl Frame {
    /// An all-black frame.
    pub fn black(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; width as usize * height as usize * 3],
        }
    }

    /// A frame filled with a single color.
    pub fn solid(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let px = width as usize * height as usize;
        let mut data = Vec::with_capacity(px * 3);
        for _ in 0..px {
            data.extend_from_slice(&rgb);
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Wrap raw RGB8 bytes, checking the buffer length against the dimensions.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> PlayerResult<Self> {
        let frame = Self {
            width,
            height,
            data,
        };
        frame.check_len()?;
        Ok(frame)
    }

    /// Dimensions of this frame as a canvas.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Byte length of one row.
    pub fn row_bytes(&self) -> usize {
        self.width as usize * 3
    }

    /// Borrow row `y`.
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.row_bytes();
        let start = y as usize * stride;
        &self.data[start..start + stride]
    }

    /// Read the pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let i = (y as usize * self.width as usize + x as usize) * 3;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    /// Return `true` when the frame has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub(crate) fn check_len(&self) -> PlayerResult<()> {
        let expected = self.width as usize * self.height as usize * 3;
        if self.data.len() != expected {
            return Err(PlayerError::invalid_frame(format!(
                "{}x{} frame carries {} bytes, expected {expected}",
                self.width,
                self.height,
                self.data.len()
            )));
        }
        Ok(())
    }

    /// Copy this frame into an [`image::RgbImage`].
    pub fn to_rgb_image(&self) -> PlayerResult<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.data.clone()).ok_or_else(|| {
            PlayerError::invalid_frame(format!(
                "{}x{} frame does not match its buffer length",
                self.width, self.height
            ))
        })
    }

    /// Take ownership of an [`image::RgbImage`]'s pixels.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }
}
