//! UI render commands

use crate::foundation::math::{Boundaries, Color, Point, Size};

/// A single drawing primitive issued to a render target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UIRenderCommand {
    /// Composite a cached surface at a position
    Blit {
        /// Top-left corner on the target
        position: Point,
        /// Surface extent
        size: Size,
        /// RGBA of the surface's top-left pixel, enough to tell fills apart
        sample: [u8; 4],
    },
    /// Fill a rectangle with an opaque color
    FillRect {
        /// Fill color
        color: Color,
        /// Rectangle edges
        rect: Boundaries,
    },
}
