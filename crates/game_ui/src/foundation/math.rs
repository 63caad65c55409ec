//! Math utilities and types
//!
//! Provides the integer screen-space types used by every component. The
//! origin is the top-left corner of the render target, x grows to the right
//! and y grows downwards.

pub use nalgebra::Vector2;

use crate::ui::error::{UiError, UiResult};

/// Screen-space position or displacement in whole pixels
pub type Point = Vector2<i32>;

/// Width and height in pixels, both strictly positive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Size {
    width: u32,
    height: u32,
}

impl Size {
    /// Create a size, rejecting zero on either axis
    pub fn new(width: u32, height: u32) -> UiResult<Self> {
        if width == 0 || height == 0 {
            return Err(UiError::InvalidSize { width, height });
        }
        Ok(Self { width, height })
    }

    /// Size from extents already known to be non-zero
    pub(crate) const fn from_extents(width: u32, height: u32) -> Self {
        Self {
            width: if width == 0 { 1 } else { width },
            height: if height == 0 { 1 } else { height },
        }
    }

    /// Width in pixels
    pub const fn width(self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub const fn height(self) -> u32 {
        self.height
    }

    /// Size as a signed vector, convenient for position arithmetic
    pub fn to_vector(self) -> Point {
        Point::new(to_i32(self.width), to_i32(self.height))
    }

    /// Whether `point`, relative to the top-left corner, lies inside (exclusive far edges)
    pub fn contains_local(self, point: Point) -> bool {
        point.x >= 0 && point.y >= 0 && point.x < to_i32(self.width) && point.y < to_i32(self.height)
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// RGB color with 8-bit channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Color {
    /// Black
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Mid gray
    pub const GRAY: Self = Self::new(128, 128, 128);
    /// Pure green
    pub const GREEN: Self = Self::new(0, 255, 0);

    /// Create a color from its channels
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Drive every non-zero channel to `intensity` and leave zero channels at zero
    ///
    /// `(0, 0, 200)` at intensity 192 becomes `(0, 0, 192)`.
    pub const fn with_intensity(self, intensity: u8) -> Self {
        const fn tier(channel: u8, intensity: u8) -> u8 {
            if channel > 0 { intensity } else { 0 }
        }
        Self::new(
            tier(self.r, intensity),
            tier(self.g, intensity),
            tier(self.b, intensity),
        )
    }

    /// Channels with an alpha value appended
    pub const fn with_alpha(self, alpha: u8) -> [u8; 4] {
        [self.r, self.g, self.b, alpha]
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

/// Axis-aligned rectangle edges in screen space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Boundaries {
    /// Top edge (y)
    pub top: i32,
    /// Left edge (x)
    pub left: i32,
    /// Right edge (x + width)
    pub right: i32,
    /// Bottom edge (y + height)
    pub bottom: i32,
}

impl Boundaries {
    /// Boundaries of a rectangle placed at `position` with `size`
    pub fn from_rect(position: Point, size: Size) -> Self {
        Self {
            top: position.y,
            left: position.x,
            right: position.x + to_i32(size.width),
            bottom: position.y + to_i32(size.height),
        }
    }

    /// Inclusive overlap test; touching edges count as overlapping
    pub const fn intersects(&self, other: &Self) -> bool {
        self.left <= other.right
            && other.left <= self.right
            && self.top <= other.bottom
            && other.top <= self.bottom
    }

    /// Inclusive containment test
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left && point.x <= self.right && point.y >= self.top && point.y <= self.bottom
    }
}

/// Round half values to the nearest even integer
pub fn round_even(value: f64) -> i32 {
    #[allow(clippy::cast_possible_truncation)]
    let rounded = value.round_ties_even() as i32;
    rounded
}

/// Half of a pixel extent, rounded half-to-even
pub fn half(extent: u32) -> i32 {
    round_even(f64::from(extent) / 2.0)
}

/// `percent` of a pixel extent, rounded half-to-even
pub fn percent_of(extent: u32, percent: i32) -> i32 {
    round_even(f64::from(extent) * f64::from(percent) / 100.0)
}

/// Saturating conversion of a pixel extent into signed space
pub fn to_i32(extent: u32) -> i32 {
    i32::try_from(extent).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_rejects_zero() {
        assert!(Size::new(0, 10).is_err());
        assert!(Size::new(10, 0).is_err());
        assert_eq!(Size::new(3, 4).unwrap().to_vector(), Point::new(3, 4));
    }

    #[test]
    fn test_boundaries_from_rect() {
        let b = Boundaries::from_rect(Point::new(10, 20), Size::new(30, 40).unwrap());
        assert_eq!(b, Boundaries { top: 20, left: 10, right: 40, bottom: 60 });
        assert!(b.contains(Point::new(40, 60)));
        assert!(!b.contains(Point::new(41, 60)));
    }

    #[test]
    fn test_intensity_tiers() {
        assert_eq!(Color::new(0, 0, 200).with_intensity(192), Color::new(0, 0, 192));
        assert_eq!(Color::new(1, 0, 1).with_intensity(128), Color::new(128, 0, 128));
    }

    #[test]
    fn test_half_rounds_to_even() {
        assert_eq!(half(50), 25);
        assert_eq!(half(5), 2);
        assert_eq!(half(7), 4);
        assert_eq!(percent_of(200, 50), 100);
    }
}
