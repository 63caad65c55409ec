//! Cached pixel surfaces
//!
//! Every component pre-composites its appearance into a [`Surface`] whenever
//! its geometry or color changes; rendering is then a single blit.

use image::{imageops, Rgba, RgbaImage};

use crate::foundation::math::{Boundaries, Color, Point, Size};

/// An owned RGBA pixel buffer
#[derive(Clone, PartialEq)]
pub struct Surface {
    image: RgbaImage,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface").field("size", &self.size()).finish_non_exhaustive()
    }
}

impl Surface {
    /// A surface of `size` filled with `color` at opacity `alpha`
    pub fn filled(size: Size, color: Color, alpha: u8) -> Self {
        Self {
            image: RgbaImage::from_pixel(size.width(), size.height(), Rgba(color.with_alpha(alpha))),
        }
    }

    /// A fully transparent surface of `size`
    pub fn transparent(size: Size) -> Self {
        Self {
            image: RgbaImage::from_pixel(size.width(), size.height(), Rgba([0, 0, 0, 0])),
        }
    }

    /// Surface extent
    pub fn size(&self) -> Size {
        Size::from_extents(self.image.width(), self.image.height())
    }

    /// RGBA value at a pixel, `None` outside the surface
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.image.get_pixel_checked(x, y).map(|pixel| pixel.0)
    }

    /// Underlying image buffer
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Alpha-composite `source` over this surface with its top-left at `at`
    pub fn blit(&mut self, source: &Self, at: Point) {
        imageops::overlay(&mut self.image, &source.image, i64::from(at.x), i64::from(at.y));
    }

    /// Overwrite the pixels inside `rect` (clipped to the surface)
    pub fn fill(&mut self, color: Color, alpha: u8, rect: Boundaries) {
        let size = self.size();
        let left = rect.left.max(0);
        let top = rect.top.max(0);
        let right = rect.right.min(crate::foundation::math::to_i32(size.width()));
        let bottom = rect.bottom.min(crate::foundation::math::to_i32(size.height()));
        let pixel = Rgba(color.with_alpha(alpha));
        for y in top..bottom {
            for x in left..right {
                self.put_pixel(Point::new(x, y), pixel.0);
            }
        }
    }

    /// Copy of this surface with every pixel's opacity scaled by `alpha / 255`
    pub fn with_alpha(&self, alpha: u8) -> Self {
        let mut image = self.image.clone();
        if alpha != u8::MAX {
            for pixel in image.pixels_mut() {
                let scaled = u16::from(pixel.0[3]) * u16::from(alpha) / 255;
                pixel.0[3] = u8::try_from(scaled).unwrap_or(u8::MAX);
            }
        }
        Self { image }
    }

    /// Write one pixel, ignoring coordinates outside the surface
    pub(crate) fn put_pixel(&mut self, at: Point, rgba: [u8; 4]) {
        if !self.size().contains_local(at) {
            return;
        }
        if let (Ok(x), Ok(y)) = (u32::try_from(at.x), u32::try_from(at.y)) {
            self.image.put_pixel(x, y, Rgba(rgba));
        }
    }

    /// Write the surface to disk as PNG
    pub fn save_png(&self, path: impl AsRef<std::path::Path>) -> image::ImageResult<()> {
        self.image.save_with_format(path, image::ImageFormat::Png)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blit_opaque_replaces_pixels() {
        let mut target = Surface::filled(Size::new(4, 4).unwrap(), Color::BLACK, 255);
        let red = Surface::filled(Size::new(2, 2).unwrap(), Color::new(255, 0, 0), 255);

        target.blit(&red, Point::new(1, 1));
        assert_eq!(target.pixel(0, 0), Some([0, 0, 0, 255]));
        assert_eq!(target.pixel(1, 1), Some([255, 0, 0, 255]));
        assert_eq!(target.pixel(2, 2), Some([255, 0, 0, 255]));
        assert_eq!(target.pixel(3, 3), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_blit_clips_negative_offsets() {
        let mut target = Surface::filled(Size::new(2, 2).unwrap(), Color::BLACK, 255);
        let white = Surface::filled(Size::new(2, 2).unwrap(), Color::WHITE, 255);

        target.blit(&white, Point::new(-1, -1));
        assert_eq!(target.pixel(0, 0), Some([255, 255, 255, 255]));
        assert_eq!(target.pixel(1, 1), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_with_alpha_scales_opacity() {
        let surface = Surface::filled(Size::new(1, 1).unwrap(), Color::WHITE, 255);
        assert_eq!(surface.with_alpha(128).pixel(0, 0), Some([255, 255, 255, 128]));
        assert_eq!(surface.with_alpha(255), surface);
    }

    #[test]
    fn test_fill_is_clipped() {
        let mut surface = Surface::transparent(Size::new(3, 3).unwrap());
        surface.fill(Color::GREEN, 255, Boundaries { top: -5, left: 2, right: 10, bottom: 1 });
        assert_eq!(surface.pixel(2, 0), Some([0, 255, 0, 255]));
        assert_eq!(surface.pixel(1, 0), Some([0, 0, 0, 0]));
        assert_eq!(surface.pixel(2, 1), Some([0, 0, 0, 0]));
    }
}
