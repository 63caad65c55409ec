//! UI Render Targets
//!
//! Defines the interface between the component tree and whatever ends up
//! showing the pixels. The tree only ever needs two primitives.

use super::commands::UIRenderCommand;
use super::surface::Surface;
use crate::foundation::math::{Boundaries, Color, Point, Size};

/// Backend-agnostic drawing interface
pub trait RenderTarget {
    /// Composite a cached surface with its top-left corner at `position`
    fn blit(&mut self, surface: &Surface, position: Point);

    /// Fill a rectangle with an opaque color
    fn fill_rect(&mut self, color: Color, rect: Boundaries);
}

/// Software render target backed by an in-memory surface
#[derive(Debug, Clone)]
pub struct Canvas {
    surface: Surface,
}

impl Canvas {
    /// Create an opaque black canvas
    pub fn new(size: Size) -> Self {
        Self {
            surface: Surface::filled(size, Color::BLACK, u8::MAX),
        }
    }

    /// Reset every pixel to an opaque color
    pub fn clear(&mut self, color: Color) {
        self.surface = Surface::filled(self.surface.size(), color, u8::MAX);
    }

    /// Canvas extent
    pub fn size(&self) -> Size {
        self.surface.size()
    }

    /// Rendered pixels
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Write the current frame to disk as PNG
    pub fn save_png(&self, path: impl AsRef<std::path::Path>) -> image::ImageResult<()> {
        self.surface.save_png(path)
    }
}

impl RenderTarget for Canvas {
    fn blit(&mut self, surface: &Surface, position: Point) {
        self.surface.blit(surface, position);
    }

    fn fill_rect(&mut self, color: Color, rect: Boundaries) {
        self.surface.fill(color, u8::MAX, rect);
    }
}

/// Render target that records commands instead of drawing
///
/// Used to inspect paint order without rasterizing a full frame.
#[derive(Debug, Clone, Default)]
pub struct RecordingTarget {
    commands: Vec<UIRenderCommand>,
}

impl RecordingTarget {
    /// Create an empty recording
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands in the order they were issued
    pub fn commands(&self) -> &[UIRenderCommand] {
        &self.commands
    }

    /// Positions of every blit, in paint order
    pub fn blit_positions(&self) -> Vec<Point> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                UIRenderCommand::Blit { position, .. } => Some(*position),
                UIRenderCommand::FillRect { .. } => None,
            })
            .collect()
    }

    /// Forget everything recorded so far
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl RenderTarget for RecordingTarget {
    fn blit(&mut self, surface: &Surface, position: Point) {
        self.commands.push(UIRenderCommand::Blit {
            position,
            size: surface.size(),
            sample: surface.pixel(0, 0).unwrap_or_default(),
        });
    }

    fn fill_rect(&mut self, color: Color, rect: Boundaries) {
        self.commands.push(UIRenderCommand::FillRect { color, rect });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_fill_rect() {
        let mut canvas = Canvas::new(Size::new(4, 4).unwrap());
        canvas.fill_rect(Color::WHITE, Boundaries { top: 1, left: 1, right: 3, bottom: 3 });

        assert_eq!(canvas.surface().pixel(1, 1), Some([255, 255, 255, 255]));
        assert_eq!(canvas.surface().pixel(3, 3), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_recording_target_keeps_order() {
        let mut target = RecordingTarget::new();
        let surface = Surface::filled(Size::new(2, 2).unwrap(), Color::GREEN, 255);

        target.blit(&surface, Point::new(5, 6));
        target.fill_rect(Color::BLACK, Boundaries::default());
        target.blit(&surface, Point::new(1, 2));

        assert_eq!(target.commands().len(), 3);
        assert_eq!(target.blit_positions(), vec![Point::new(5, 6), Point::new(1, 2)]);
    }
}
