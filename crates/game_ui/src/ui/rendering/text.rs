//! Text rasterization
//!
//! Labels do not choose their own size: they rasterize their content and take
//! the extent of the result. [`TextRasterizer`] is that seam.
//!
//! [`BlockFont`] is always available and fully deterministic, which keeps
//! layout reproducible in tests and headless runs. With the `fontdue` feature,
//! [`FontdueRasterizer`] renders real glyph coverage from TTF/OTF data.

use super::surface::Surface;
use crate::foundation::math::{Boundaries, Color, Size};

/// Turns text into a pre-rendered surface
pub trait TextRasterizer {
    /// Render `content` at `font_size` pixels in `color`
    ///
    /// The returned surface is exactly as large as the rendered text and is
    /// transparent wherever no glyph covers it.
    fn rasterize(&self, content: &str, font_size: u32, color: Color) -> Surface;
}

/// Fixed-metric block glyphs
///
/// Every character advances `ceil(font_size / 2)` pixels and the line is
/// `font_size` pixels tall. Visible characters draw as a solid block inset by
/// one pixel horizontally and a fifth of the line vertically; whitespace
/// advances without drawing.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockFont;

impl BlockFont {
    /// Horizontal advance of one character at `font_size`
    pub const fn advance(font_size: u32) -> u32 {
        font_size.div_ceil(2)
    }

    /// Extent of `content` rendered at `font_size`
    pub fn measure(content: &str, font_size: u32) -> Size {
        let glyphs = u32::try_from(content.chars().count()).unwrap_or(u32::MAX);
        Size::from_extents(Self::advance(font_size).saturating_mul(glyphs), font_size)
    }
}

impl TextRasterizer for BlockFont {
    fn rasterize(&self, content: &str, font_size: u32, color: Color) -> Surface {
        let mut surface = Surface::transparent(Self::measure(content, font_size));
        let advance = crate::foundation::math::to_i32(Self::advance(font_size));
        let line = crate::foundation::math::to_i32(font_size);
        let inset = line / 5;

        for (index, glyph) in content.chars().enumerate() {
            if glyph.is_whitespace() {
                continue;
            }
            let left = i32::try_from(index).unwrap_or(i32::MAX).saturating_mul(advance);
            surface.fill(
                color,
                u8::MAX,
                Boundaries {
                    top: inset,
                    left: left + 1,
                    right: left + advance - 1,
                    bottom: line - inset,
                },
            );
        }
        surface
    }
}

/// Glyph rasterizer backed by `fontdue`
#[cfg(feature = "fontdue")]
pub struct FontdueRasterizer {
    font: fontdue::Font,
}

#[cfg(feature = "fontdue")]
impl FontdueRasterizer {
    /// Load a TrueType/OpenType font from memory
    pub fn from_bytes(bytes: &[u8]) -> crate::UiResult<Self> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| crate::UiError::Font(e.to_string()))?;
        Ok(Self { font })
    }
}

#[cfg(feature = "fontdue")]
impl std::fmt::Debug for FontdueRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontdueRasterizer").finish_non_exhaustive()
    }
}

#[cfg(feature = "fontdue")]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss, clippy::cast_possible_wrap)]
impl TextRasterizer for FontdueRasterizer {
    fn rasterize(&self, content: &str, font_size: u32, color: Color) -> Surface {
        use crate::foundation::math::Point;

        let px = font_size as f32;
        let (ascent, descent) = self
            .font
            .horizontal_line_metrics(px)
            .map_or((px, 0.0), |metrics| (metrics.ascent, metrics.descent));

        let glyphs: Vec<_> = content.chars().map(|glyph| self.font.rasterize(glyph, px)).collect();
        let width = glyphs.iter().map(|(metrics, _)| metrics.advance_width).sum::<f32>().ceil();
        let height = (ascent - descent).ceil();
        let mut surface = Surface::transparent(Size::from_extents(width as u32, height as u32));

        let baseline = ascent.round() as i32;
        let mut pen = 0.0f32;
        for (metrics, coverage) in &glyphs {
            let left = pen.round() as i32 + metrics.xmin;
            let top = baseline - (metrics.height as i32 + metrics.ymin);
            for row in 0..metrics.height {
                for column in 0..metrics.width {
                    let alpha = coverage[row * metrics.width + column];
                    if alpha > 0 {
                        surface.put_pixel(
                            Point::new(left + column as i32, top + row as i32),
                            color.with_alpha(alpha),
                        );
                    }
                }
            }
            pen += metrics.advance_width;
        }
        surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_font_metrics() {
        assert_eq!(BlockFont::measure("Start", 36), Size::new(90, 36).unwrap());
        assert_eq!(BlockFont::measure("<", 9), Size::new(5, 9).unwrap());
    }

    #[test]
    fn test_block_font_leaves_spaces_transparent() {
        let surface = BlockFont.rasterize("a b", 20, Color::WHITE);
        assert_eq!(surface.size(), Size::new(30, 20).unwrap());
        // middle of the first glyph is painted, the space is not
        assert_eq!(surface.pixel(5, 10), Some([255, 255, 255, 255]));
        assert_eq!(surface.pixel(15, 10), Some([0, 0, 0, 0]));
        assert_eq!(surface.pixel(25, 10), Some([255, 255, 255, 255]));
    }
}
