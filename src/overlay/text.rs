//! Anti-aliased text rendering with `fontdue`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use fontdue::layout::{
    CoordinateSystem, GlyphRasterConfig, HorizontalAlign, Layout, LayoutSettings, TextStyle,
    VerticalAlign, WrapStyle,
};
use fontdue::{Font, FontSettings};

use crate::foundation::error::{PlayerError, PlayerResult};
use crate::overlay::paint::blend_coverage;
use crate::render::frame::Frame;

/// Fonts tried in order when no font file is configured. Hangul-capable faces come first so
/// Korean category labels render.
pub const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
    "/usr/share/fonts/truetype/unfonts-core/UnDotum.ttf",
    "/System/Library/Fonts/AppleSDGothicNeo.ttc",
    "C:\\Windows\\Fonts\\malgun.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/System/Library/Fonts/Helvetica.ttc",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// First existing entry of [`SYSTEM_FONT_CANDIDATES`].
pub fn find_system_font() -> Option<PathBuf> {
    SYSTEM_FONT_CANDIDATES
        .iter()
        .map(PathBuf::from)
        .find(|p| p.is_file())
}

struct GlyphBitmap {
    width: usize,
    height: usize,
    coverage: Vec<u8>,
}

/// One font at one pixel size, with a glyph cache.
pub struct TextPainter {
    font: Font,
    px: f32,
    ascent: f32,
    layout: Layout,
    glyphs: HashMap<GlyphRasterConfig, GlyphBitmap>,
}

impl std::fmt::Debug for TextPainter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextPainter")
            .field("font", &self.font.name())
            .field("px", &self.px)
            .field("cached_glyphs", &self.glyphs.len())
            .finish()
    }
}

impl TextPainter {
    /// Parse a TrueType/OpenType font (collections use their first face).
    pub fn from_bytes(bytes: Vec<u8>, px: f32) -> PlayerResult<Self> {
        if !(px.is_finite() && px > 0.0) {
            return Err(PlayerError::validation(format!(
                "font size must be > 0, got {px}"
            )));
        }
        let font = Font::from_bytes(bytes, FontSettings::default())
            .map_err(|e| PlayerError::validation(format!("parse font: {e}")))?;
        let ascent = font
            .horizontal_line_metrics(px)
            .map(|m| m.ascent)
            .unwrap_or(px);
        Ok(Self {
            font,
            px,
            ascent,
            layout: Layout::new(CoordinateSystem::PositiveYDown),
            glyphs: HashMap::new(),
        })
    }

    /// Load a font file from disk.
    pub fn load(path: &Path, px: f32) -> PlayerResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        Self::from_bytes(bytes, px).map_err(|e| {
            PlayerError::validation(format!("font '{}': {e}", path.display()))
        })
    }

    /// Whether the font has an outline for `c` rather than falling back to `.notdef`.
    pub fn has_glyph(&self, c: char) -> bool {
        self.font.lookup_glyph_index(c) != 0
    }

    /// Distance from the top of a line to its baseline.
    pub fn ascent(&self) -> i32 {
        self.ascent.round() as i32
    }

    /// Width and height in pixels of `text` laid out on one line.
    pub fn measure(&mut self, text: &str) -> (i32, i32) {
        self.lay_out(0.0, 0.0, text);
        let width = self
            .layout
            .glyphs()
            .iter()
            .map(|g| g.x + g.width as f32)
            .fold(0.0f32, f32::max);
        (width.ceil() as i32, self.layout.height().ceil() as i32)
    }

    /// Draw `text` with its left edge at `x` and its baseline at `baseline`.
    pub fn draw(&mut self, frame: &mut Frame, x: i32, baseline: i32, text: &str, rgb: [u8; 3]) {
        self.lay_out(x as f32, (baseline - self.ascent()) as f32, text);
        for g in self.layout.glyphs() {
            if g.width == 0 || g.height == 0 {
                continue;
            }
            let font = &self.font;
            let bitmap = self.glyphs.entry(g.key).or_insert_with(|| {
                let (metrics, coverage) = font.rasterize_config(g.key);
                GlyphBitmap {
                    width: metrics.width,
                    height: metrics.height,
                    coverage,
                }
            });
            blend_coverage(
                frame,
                g.x.round() as i32,
                g.y.round() as i32,
                bitmap.width,
                bitmap.height,
                &bitmap.coverage,
                rgb,
            );
        }
    }

    fn lay_out(&mut self, x: f32, y: f32, text: &str) {
        self.layout.reset(&LayoutSettings {
            x,
            y,
            max_width: None,
            max_height: None,
            horizontal_align: HorizontalAlign::Left,
            vertical_align: VerticalAlign::Top,
            line_height: 1.0,
            wrap_style: WrapStyle::Letter,
            wrap_hard_breaks: false,
        });
        self.layout
            .append(&[&self.font], &TextStyle::new(text, self.px, 0));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/text.rs"]
mod tests;
