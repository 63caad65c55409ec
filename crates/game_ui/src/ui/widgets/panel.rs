//! Container widget
//!
//! A panel is a filled rectangle that owns an ordered list of child
//! components. Children are kept sorted ascending by priority; the panel
//! paints itself first and its visible children afterwards, so higher
//! priority ends up on top. Input goes to active children in the same order
//! and stops at the first one that consumes it.

use super::core::{aligned_origin, Alignment, UIElement, Widget};
use super::label::UILabel;
use super::node::UINode;
use crate::foundation::math::{half, Color, Point, Size};
use crate::ui::error::{UiError, UiResult};
use crate::ui::input::{InputEvent, InputState};
use crate::ui::rendering::{RenderTarget, TextRasterizer};

/// Parameters for [`UIPanel::create_text_box`]
#[derive(Debug, Clone)]
pub struct TextBoxOptions {
    /// Panel name; the label is named `"{name}_Label"`
    pub name: String,
    /// Panel priority; the label sits one above
    pub priority: u32,
    /// Text content
    pub text: String,
    /// Anchor point
    pub position: Point,
    /// Horizontal anchor rule
    pub h_align: Alignment,
    /// Vertical anchor rule
    pub v_align: Alignment,
    /// Minimum panel size
    pub min_size: (u32, u32),
    /// Space between text and panel edge on each side
    pub padding: (u32, u32),
    /// Panel fill
    pub box_color: Color,
    /// Panel opacity
    pub box_alpha: u8,
    /// Text color
    pub text_color: Color,
    /// Font size in pixels
    pub text_size: u32,
}

impl Default for TextBoxOptions {
    fn default() -> Self {
        Self {
            name: "Text_Box".to_string(),
            priority: 0,
            text: "Text Box".to_string(),
            position: Point::new(0, 0),
            h_align: Alignment::Middle,
            v_align: Alignment::Middle,
            min_size: (1, 1),
            padding: (4, 2),
            box_color: Color::GRAY,
            box_alpha: u8::MAX,
            text_color: Color::WHITE,
            text_size: 36,
        }
    }
}

/// Smallest panel that fits `content` with `padding` on each side
pub(crate) fn padded_size(min_size: (u32, u32), content: Size, padding: (u32, u32)) -> UiResult<Size> {
    Size::new(
        min_size.0.max(content.width().saturating_add(padding.0.saturating_mul(2))),
        min_size.1.max(content.height().saturating_add(padding.1.saturating_mul(2))),
    )
}

/// Filled rectangle holding child components
#[derive(Debug)]
pub struct UIPanel {
    element: UIElement,
    children: Vec<UINode>,
}

impl UIPanel {
    /// Create an empty, inactive, hidden panel
    pub fn new(
        name: impl Into<String>,
        priority: u32,
        position: Point,
        size: Size,
        color: Color,
        alpha: u8,
    ) -> UiResult<Self> {
        Ok(Self {
            element: UIElement::new(name, priority, position, size, color, alpha)?,
            children: Vec::new(),
        })
    }

    /// Builder form of [`UIPanel::add_children`]
    #[must_use]
    pub fn with_children(mut self, children: Vec<UINode>) -> Self {
        self.add_children(children);
        self
    }

    /// Panel sized around a label, anchored at `options.position`
    ///
    /// The panel is at least `options.min_size` and otherwise as large as the
    /// text plus `2 * padding`; the label is centred inside it.
    pub fn create_text_box(options: TextBoxOptions, fonts: &dyn TextRasterizer) -> UiResult<Self> {
        let mut label = UILabel::new(
            format!("{}_Label", options.name),
            options.priority.saturating_add(1),
            options.text,
            options.position,
            options.text_color,
            options.text_size,
            fonts,
        )?;
        let size = padded_size(options.min_size, label.element().size(), options.padding)?;
        let origin = aligned_origin(options.position, size, options.h_align, options.v_align);

        let mut panel = Self::new(
            options.name,
            options.priority,
            origin,
            size,
            options.box_color,
            options.box_alpha,
        )?;
        panel
            .element
            .position_component_relative(&mut label, Point::new(50, 50), true, Alignment::Middle, Alignment::Middle);
        panel.add_child(UINode::Label(label), true);
        Ok(panel)
    }

    /// Children in paint order
    pub fn children(&self) -> &[UINode] {
        &self.children
    }

    /// Insert a child, adopting this panel's active and visible flags
    pub fn add_child(&mut self, mut child: UINode, sort: bool) {
        self.adopt_flags(&mut child);
        self.children.push(child);
        if sort {
            self.sort_children();
        }
    }

    /// Insert several children and sort once
    pub fn add_children(&mut self, children: Vec<UINode>) {
        for child in children {
            self.add_child(child, false);
        }
        self.sort_children();
    }

    /// Detach the first direct child called `name`
    pub fn remove_child(&mut self, name: &str, sort: bool) -> Option<UINode> {
        let index = self.children.iter().position(|child| child.name() == name)?;
        let removed = self.children.remove(index);
        if sort {
            self.sort_children();
        }
        Some(removed)
    }

    /// Detach every direct child whose name is listed
    pub fn remove_children(&mut self, names: &[&str]) -> Vec<UINode> {
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.children)
            .into_iter()
            .partition(|child| names.contains(&child.name()));
        self.children = kept;
        removed
    }

    /// Stable sort ascending by priority
    pub fn sort_children(&mut self) {
        self.children.sort_by_key(|child| child.priority());
    }

    /// Direct child called `name`
    pub fn get_child(&self, name: &str) -> Option<&UINode> {
        self.children.iter().find(|child| child.name() == name)
    }

    /// Mutable direct child called `name`
    pub fn get_child_mut(&mut self, name: &str) -> Option<&mut UINode> {
        self.children.iter_mut().find(|child| child.name() == name)
    }

    /// Direct children whose name is listed, in paint order
    pub fn get_children(&self, names: &[&str]) -> Vec<&UINode> {
        self.children
            .iter()
            .filter(|child| names.contains(&child.name()))
            .collect()
    }

    /// Depth-first search among descendants
    pub fn find(&self, name: &str) -> Option<&UINode> {
        self.children.iter().find_map(|child| child.find(name))
    }

    /// Mutable depth-first search among descendants
    pub fn find_mut(&mut self, name: &str) -> Option<&mut UINode> {
        self.children.iter_mut().find_map(|child| child.find_mut(name))
    }

    /// Replace the text of the descendant label called `label_name`
    ///
    /// The label keeps its centre; returns its new size.
    pub fn set_text(&mut self, label_name: &str, text: &str, fonts: &dyn TextRasterizer) -> UiResult<Size> {
        let node = self
            .find_mut(label_name)
            .ok_or_else(|| UiError::UnknownComponent(label_name.to_string()))?;
        let found = node.kind();
        let label = node.as_label_mut().ok_or(UiError::UnexpectedKind {
            expected: "label",
            found,
        })?;

        let before = label.element().size();
        let centre = label.element().position() + Point::new(half(before.width()), half(before.height()));
        let size = label.update_content(text, fonts)?;
        let origin = aligned_origin(centre, size, Alignment::Middle, Alignment::Middle);
        label.update_position(origin, true);
        Ok(size)
    }

    /// Resize the panel, keeping every child at the same fractional offset
    pub fn resize(&mut self, size: Size, scale_children: bool) {
        for child in &mut self.children {
            self.element.maintain_relative_position(child, size, scale_children, false);
        }
        self.element.set_size(size, false);
        self.update_component();
    }

    fn adopt_flags(&self, child: &mut UINode) {
        if self.element.is_active() {
            child.activate();
        } else {
            child.deactivate();
        }
        if self.element.is_visible() {
            child.show();
        } else {
            child.hide();
        }
    }
}

impl Widget for UIPanel {
    fn element(&self) -> &UIElement {
        &self.element
    }

    fn element_mut(&mut self) -> &mut UIElement {
        &mut self.element
    }

    fn render(&self, target: &mut dyn RenderTarget) {
        self.element.render(target);
        for child in self.children.iter().filter(|child| child.is_visible()) {
            child.render(target);
        }
    }

    fn handle_event(&mut self, event: &InputEvent, input: &InputState) -> bool {
        self.children
            .iter_mut()
            .filter(|child| child.is_active())
            .any(|child| child.handle_event(event, input))
    }

    fn update_component(&mut self) {
        for child in &mut self.children {
            child.update_component();
        }
        self.element.update_component();
    }

    fn update_position(&mut self, position: Point, update_component: bool) {
        let delta = position - self.element.position();
        for child in &mut self.children {
            child.move_by(delta, false);
        }
        self.element.set_position(position, false);
        if update_component {
            self.update_component();
        }
    }

    fn set_alpha(&mut self, alpha: u8, propagate_children: bool, update_component: bool) {
        if propagate_children {
            for child in &mut self.children {
                child.set_alpha(alpha, true, false);
            }
        }
        self.element.set_alpha(alpha, false);
        if update_component {
            self.update_component();
        }
    }

    fn activate(&mut self) {
        self.element.activate();
        for child in &mut self.children {
            child.activate();
        }
    }

    fn deactivate(&mut self) {
        self.element.deactivate();
        for child in &mut self.children {
            child.deactivate();
        }
    }

    fn show(&mut self) {
        self.element.show();
        for child in &mut self.children {
            child.show();
        }
    }

    fn hide(&mut self) {
        self.element.hide();
        for child in &mut self.children {
            child.hide();
        }
    }
}
