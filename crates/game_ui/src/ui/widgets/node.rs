//! Component tree nodes
//!
//! The set of component kinds is closed, so the tree stores a tagged enum and
//! dispatches by exhaustive match.

use super::button::UIButton;
use super::core::{UIElement, Widget};
use super::grid::UIGrid;
use super::label::UILabel;
use super::panel::UIPanel;
use crate::foundation::math::{Point, Size};
use crate::ui::error::UiError;
use crate::ui::input::{InputEvent, InputState};
use crate::ui::rendering::RenderTarget;

/// Any component that can live in an interface or a panel
#[derive(Debug)]
pub enum UINode {
    /// Plain filled rectangle
    Element(UIElement),
    /// Text label
    Label(UILabel),
    /// Container of child components
    Panel(UIPanel),
    /// Clickable button
    Button(UIButton),
    /// Tile grid
    Grid(UIGrid),
}

impl UINode {
    /// Kind name, used in error messages
    pub const fn kind(&self) -> &'static str {
        match self {
            UINode::Element(_) => "element",
            UINode::Label(_) => "label",
            UINode::Panel(_) => "panel",
            UINode::Button(_) => "button",
            UINode::Grid(_) => "grid",
        }
    }

    /// Shared widget view
    pub fn as_widget(&self) -> &dyn Widget {
        match self {
            UINode::Element(element) => element,
            UINode::Label(label) => label,
            UINode::Panel(panel) => panel,
            UINode::Button(button) => button,
            UINode::Grid(grid) => grid,
        }
    }

    /// Mutable widget view
    pub fn as_widget_mut(&mut self) -> &mut dyn Widget {
        match self {
            UINode::Element(element) => element,
            UINode::Label(label) => label,
            UINode::Panel(panel) => panel,
            UINode::Button(button) => button,
            UINode::Grid(grid) => grid,
        }
    }

    /// Label payload
    pub fn as_label(&self) -> Option<&UILabel> {
        match self {
            UINode::Label(label) => Some(label),
            _ => None,
        }
    }

    /// Mutable label payload
    pub fn as_label_mut(&mut self) -> Option<&mut UILabel> {
        match self {
            UINode::Label(label) => Some(label),
            _ => None,
        }
    }

    /// Panel payload
    pub fn as_panel(&self) -> Option<&UIPanel> {
        match self {
            UINode::Panel(panel) => Some(panel),
            _ => None,
        }
    }

    /// Mutable panel payload
    pub fn as_panel_mut(&mut self) -> Option<&mut UIPanel> {
        match self {
            UINode::Panel(panel) => Some(panel),
            _ => None,
        }
    }

    /// Button payload
    pub fn as_button(&self) -> Option<&UIButton> {
        match self {
            UINode::Button(button) => Some(button),
            _ => None,
        }
    }

    /// Mutable button payload
    pub fn as_button_mut(&mut self) -> Option<&mut UIButton> {
        match self {
            UINode::Button(button) => Some(button),
            _ => None,
        }
    }

    /// Depth-first search for a component called `name`, this node included
    pub fn find(&self, name: &str) -> Option<&UINode> {
        if self.name() == name {
            return Some(self);
        }
        match self {
            UINode::Panel(panel) => panel.find(name),
            _ => None,
        }
    }

    /// Mutable depth-first search for a component called `name`
    pub fn find_mut(&mut self, name: &str) -> Option<&mut UINode> {
        if self.name() == name {
            return Some(self);
        }
        match self {
            UINode::Panel(panel) => panel.find_mut(name),
            _ => None,
        }
    }
}

impl Widget for UINode {
    fn element(&self) -> &UIElement {
        self.as_widget().element()
    }

    fn element_mut(&mut self) -> &mut UIElement {
        self.as_widget_mut().element_mut()
    }

    fn render(&self, target: &mut dyn RenderTarget) {
        self.as_widget().render(target);
    }

    fn handle_event(&mut self, event: &InputEvent, input: &InputState) -> bool {
        self.as_widget_mut().handle_event(event, input)
    }

    fn update_component(&mut self) {
        self.as_widget_mut().update_component();
    }

    fn update_position(&mut self, position: Point, update_component: bool) {
        self.as_widget_mut().update_position(position, update_component);
    }

    fn move_by(&mut self, delta: Point, update_component: bool) {
        self.as_widget_mut().move_by(delta, update_component);
    }

    fn update_size(&mut self, size: Size, update_component: bool) {
        self.as_widget_mut().update_size(size, update_component);
    }

    fn set_alpha(&mut self, alpha: u8, propagate_children: bool, update_component: bool) {
        self.as_widget_mut().set_alpha(alpha, propagate_children, update_component);
    }

    fn activate(&mut self) {
        self.as_widget_mut().activate();
    }

    fn deactivate(&mut self) {
        self.as_widget_mut().deactivate();
    }

    fn show(&mut self) {
        self.as_widget_mut().show();
    }

    fn hide(&mut self) {
        self.as_widget_mut().hide();
    }
}

macro_rules! node_conversions {
    ($($variant:ident => $ty:ty, $kind:literal;)*) => {
        $(
            impl From<$ty> for UINode {
                fn from(widget: $ty) -> Self {
                    UINode::$variant(widget)
                }
            }

            impl TryFrom<UINode> for $ty {
                type Error = UiError;

                fn try_from(node: UINode) -> Result<Self, Self::Error> {
                    match node {
                        UINode::$variant(widget) => Ok(widget),
                        other => Err(UiError::UnexpectedKind {
                            expected: $kind,
                            found: other.kind(),
                        }),
                    }
                }
            }
        )*
    };
}

node_conversions! {
    Element => UIElement, "element";
    Label => UILabel, "label";
    Panel => UIPanel, "panel";
    Button => UIButton, "button";
    Grid => UIGrid, "grid";
}
