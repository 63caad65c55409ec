//! Text label widget
//!
//! A label's size is never chosen by the caller: it is the extent of the
//! rasterized text, recomputed every time the content, font size or color
//! changes.

use super::core::{UIElement, Widget};
use crate::foundation::math::{Color, Point, Size};
use crate::ui::error::UiResult;
use crate::ui::input::{InputEvent, InputState};
use crate::ui::rendering::{RenderTarget, Surface, TextRasterizer};
use crate::ui::validate;

/// Single line of pre-rendered text
#[derive(Debug, Clone)]
pub struct UILabel {
    element: UIElement,
    content: String,
    font_size: u32,
    glyphs: Surface,
}

impl UILabel {
    /// Rasterize `content` and create an inactive, hidden label at `position`
    pub fn new(
        name: impl Into<String>,
        priority: u32,
        content: impl Into<String>,
        position: Point,
        color: Color,
        font_size: u32,
        fonts: &dyn TextRasterizer,
    ) -> UiResult<Self> {
        let content = content.into();
        validate::text_content(&content)?;
        validate::font_size(font_size)?;

        let glyphs = fonts.rasterize(&content, font_size, color);
        let element = UIElement::new(name, priority, position, glyphs.size(), color, u8::MAX)?;
        let mut label = Self {
            element,
            content,
            font_size,
            glyphs,
        };
        label.update_component();
        Ok(label)
    }

    /// Current text
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Current font size in pixels
    pub const fn font_size(&self) -> u32 {
        self.font_size
    }

    /// Replace the text; returns the new size
    pub fn update_content(&mut self, content: impl Into<String>, fonts: &dyn TextRasterizer) -> UiResult<Size> {
        let content = content.into();
        validate::text_content(&content)?;
        self.content = content;
        Ok(self.rerender(fonts))
    }

    /// Change the font size; returns the new size
    pub fn update_font_size(&mut self, font_size: u32, fonts: &dyn TextRasterizer) -> UiResult<Size> {
        validate::font_size(font_size)?;
        self.font_size = font_size;
        Ok(self.rerender(fonts))
    }

    /// Change the text color
    pub fn update_color(&mut self, color: Color, fonts: &dyn TextRasterizer) {
        self.element.set_color(color, false);
        self.rerender(fonts);
    }

    fn rerender(&mut self, fonts: &dyn TextRasterizer) -> Size {
        self.glyphs = fonts.rasterize(&self.content, self.font_size, self.element.color());
        self.element.set_size(self.glyphs.size(), false);
        self.update_component();
        self.element.size()
    }
}

impl Widget for UILabel {
    fn element(&self) -> &UIElement {
        &self.element
    }

    fn element_mut(&mut self) -> &mut UIElement {
        &mut self.element
    }

    fn render(&self, target: &mut dyn RenderTarget) {
        self.element.render(target);
    }

    fn handle_event(&mut self, _event: &InputEvent, _input: &InputState) -> bool {
        false
    }

    fn update_component(&mut self) {
        self.element.update_boundaries();
        self.element.set_surface(self.glyphs.with_alpha(self.element.alpha()));
    }

    fn update_size(&mut self, size: Size, _update_component: bool) {
        log::trace!("Label '{}' keeps its text extent, ignoring resize to {}", self.element.name(), size);
    }
}
