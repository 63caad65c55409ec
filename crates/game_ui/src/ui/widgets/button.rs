//! Button widget
//!
//! A button owns an optional label and one panel per interaction state. Only
//! the panel for the current state is drawn, with the label on top of it.

use super::core::{aligned_origin, Alignment, UIElement, Widget};
use super::label::UILabel;
use super::node::UINode;
use super::panel::{padded_size, UIPanel};
use crate::foundation::math::{Color, Point, Size};
use crate::ui::error::{UiError, UiResult};
use crate::ui::input::{InputEvent, InputState};
use crate::ui::rendering::{RenderTarget, TextRasterizer};

/// Channel intensity of the idle style in [`UIButton::quick_create`]
pub const IDLE_INTENSITY: u8 = 192;
/// Channel intensity of the hover style in [`UIButton::quick_create`]
pub const HOVER_INTENSITY: u8 = 255;
/// Channel intensity of the pressed style in [`UIButton::quick_create`]
pub const ACTIVE_INTENSITY: u8 = 128;

/// Button interaction states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ButtonState {
    /// Pointer elsewhere
    #[default]
    Idle,
    /// Pointer over the button
    Hover,
    /// Pressed
    Active,
}

impl ButtonState {
    /// Every state, in style order
    pub const ALL: [ButtonState; 3] = [ButtonState::Idle, ButtonState::Hover, ButtonState::Active];
}

/// Action run when a button is pressed
pub type ButtonCallback = Box<dyn FnMut()>;

/// One panel per [`ButtonState`]
#[derive(Debug)]
pub struct ButtonStyles {
    idle: UIPanel,
    hover: UIPanel,
    active: UIPanel,
}

impl ButtonStyles {
    /// Bundle the three state panels
    pub fn new(idle: UIPanel, hover: UIPanel, active: UIPanel) -> Self {
        Self { idle, hover, active }
    }

    /// Panel for `state`
    pub const fn get(&self, state: ButtonState) -> &UIPanel {
        match state {
            ButtonState::Idle => &self.idle,
            ButtonState::Hover => &self.hover,
            ButtonState::Active => &self.active,
        }
    }

    /// Mutable panel for `state`
    pub fn get_mut(&mut self, state: ButtonState) -> &mut UIPanel {
        match state {
            ButtonState::Idle => &mut self.idle,
            ButtonState::Hover => &mut self.hover,
            ButtonState::Active => &mut self.active,
        }
    }

    fn iter_mut(&mut self) -> impl Iterator<Item = (ButtonState, &mut UIPanel)> {
        [
            (ButtonState::Idle, &mut self.idle),
            (ButtonState::Hover, &mut self.hover),
            (ButtonState::Active, &mut self.active),
        ]
        .into_iter()
    }
}

/// Parameters for [`UIButton::quick_create`]
pub struct QuickButton {
    /// Button name; parts are named `"{name}_Label"`, `"{name}_Idle"` and so on
    pub name: String,
    /// Button priority; the label sits one above
    pub priority: u32,
    /// Label text
    pub text: String,
    /// Anchor point
    pub position: Point,
    /// Horizontal anchor rule
    pub h_align: Alignment,
    /// Vertical anchor rule
    pub v_align: Alignment,
    /// Minimum button size
    pub min_size: (u32, u32),
    /// Space between text and button edge on each side
    pub padding: (u32, u32),
    /// Text color
    pub text_color: Color,
    /// Font size in pixels
    pub text_size: u32,
    /// Base color; each style drives its non-zero channels to a fixed intensity
    pub button_color: Color,
    /// Press action
    pub callback: Option<ButtonCallback>,
}

impl Default for QuickButton {
    fn default() -> Self {
        Self {
            name: "Button".to_string(),
            priority: 0,
            text: "Button".to_string(),
            position: Point::new(0, 0),
            h_align: Alignment::Middle,
            v_align: Alignment::Middle,
            min_size: (0, 0),
            padding: (4, 2),
            text_color: Color::WHITE,
            text_size: 36,
            button_color: Color::new(0, 0, 1),
            callback: None,
        }
    }
}

impl std::fmt::Debug for QuickButton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuickButton")
            .field("name", &self.name)
            .field("text", &self.text)
            .field("position", &self.position)
            .field("has_callback", &self.callback.is_some())
            .finish_non_exhaustive()
    }
}

/// Clickable button with per-state styling
pub struct UIButton {
    element: UIElement,
    label: Option<UILabel>,
    styles: ButtonStyles,
    callback: Option<ButtonCallback>,
    state: ButtonState,
}

impl UIButton {
    /// Create an inactive, hidden button in the idle state
    pub fn new(
        name: impl Into<String>,
        priority: u32,
        position: Point,
        size: Size,
        label: Option<UILabel>,
        styles: ButtonStyles,
        callback: Option<ButtonCallback>,
    ) -> UiResult<Self> {
        let element = UIElement::new(name, priority, position, size, Color::BLACK, 0)?;
        let mut button = Self {
            element,
            label,
            styles,
            callback,
            state: ButtonState::Idle,
        };
        button.sync_styles();
        Ok(button)
    }

    /// Button sized around a label with generated state styles
    ///
    /// The size is the larger of `min_size` and the text plus `2 * padding`.
    /// The idle, hover and pressed panels use `button_color` driven to
    /// [`IDLE_INTENSITY`], [`HOVER_INTENSITY`] and [`ACTIVE_INTENSITY`].
    pub fn quick_create(options: QuickButton, fonts: &dyn TextRasterizer) -> UiResult<Self> {
        let QuickButton {
            name,
            priority,
            text,
            position,
            h_align,
            v_align,
            min_size,
            padding,
            text_color,
            text_size,
            button_color,
            callback,
        } = options;

        let label = UILabel::new(
            format!("{name}_Label"),
            priority.saturating_add(1),
            text,
            position,
            text_color,
            text_size,
            fonts,
        )?;
        let size = padded_size(min_size, label.element().size(), padding)?;
        let origin = aligned_origin(position, size, h_align, v_align);

        let style = |suffix: &str, intensity: u8| {
            UIPanel::new(
                format!("{name}_{suffix}"),
                priority,
                origin,
                size,
                button_color.with_intensity(intensity),
                u8::MAX,
            )
        };
        let styles = ButtonStyles::new(
            style("Idle", IDLE_INTENSITY)?,
            style("Hover", HOVER_INTENSITY)?,
            style("Active", ACTIVE_INTENSITY)?,
        );

        let mut button = Self::new(name, priority, origin, size, Some(label), styles, callback)?;
        button.center_label();
        Ok(button)
    }

    /// Current interaction state
    pub const fn state(&self) -> ButtonState {
        self.state
    }

    /// Label, if any
    pub const fn label(&self) -> Option<&UILabel> {
        self.label.as_ref()
    }

    /// State panels
    pub const fn styles(&self) -> &ButtonStyles {
        &self.styles
    }

    /// Panel drawn for the current state
    pub const fn current_style(&self) -> &UIPanel {
        self.styles.get(self.state)
    }

    /// Replace the panel for `state`; anything but a panel is rejected
    pub fn set_style(&mut self, state: ButtonState, style: UINode) -> UiResult<()> {
        match style {
            UINode::Panel(panel) => {
                *self.styles.get_mut(state) = panel;
                self.sync_styles();
                Ok(())
            }
            other => Err(UiError::UnexpectedKind {
                expected: "panel",
                found: other.kind(),
            }),
        }
    }

    /// Replace the press action
    pub fn set_callback(&mut self, callback: Option<ButtonCallback>) {
        self.callback = callback;
    }

    /// Whether a press action is installed
    pub const fn has_callback(&self) -> bool {
        self.callback.is_some()
    }

    /// Move to `state`, swapping which style panel is live
    pub fn change_state(&mut self, state: ButtonState) {
        if self.state != state {
            log::trace!("Button '{}' {:?} -> {:?}", self.element.name(), self.state, state);
            self.state = state;
            self.sync_styles();
        }
    }

    /// Press the button: run the action unless already pressed, then go active
    pub fn on_click(&mut self) {
        if self.state != ButtonState::Active {
            if let Some(callback) = self.callback.as_mut() {
                log::debug!("Button '{}' clicked", self.element.name());
                callback();
            }
        }
        self.change_state(ButtonState::Active);
    }

    /// Replace the label text and re-centre it; returns the label's new size
    pub fn set_text(&mut self, text: &str, fonts: &dyn TextRasterizer) -> UiResult<Size> {
        let label = self
            .label
            .as_mut()
            .ok_or_else(|| UiError::UnknownComponent(format!("{}_Label", self.element.name())))?;
        let size = label.update_content(text, fonts)?;
        self.center_label();
        Ok(size)
    }

    fn center_label(&mut self) {
        if let Some(label) = self.label.as_mut() {
            self.element
                .position_component_relative(label, Point::new(50, 50), true, Alignment::Middle, Alignment::Middle);
        }
    }

    /// The live style mirrors the button's flags; the others are off
    fn sync_styles(&mut self) {
        let current = self.state;
        let active = self.element.is_active();
        let visible = self.element.is_visible();
        for (state, style) in self.styles.iter_mut() {
            if state == current && active {
                style.activate();
            } else {
                style.deactivate();
            }
            if state == current && visible {
                style.show();
            } else {
                style.hide();
            }
        }
    }
}

impl std::fmt::Debug for UIButton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UIButton")
            .field("element", &self.element)
            .field("label", &self.label)
            .field("styles", &self.styles)
            .field("state", &self.state)
            .field("has_callback", &self.callback.is_some())
            .finish()
    }
}

impl Widget for UIButton {
    fn element(&self) -> &UIElement {
        &self.element
    }

    fn element_mut(&mut self) -> &mut UIElement {
        &mut self.element
    }

    fn render(&self, target: &mut dyn RenderTarget) {
        self.current_style().render(target);
        if let Some(label) = &self.label {
            label.render(target);
        }
    }

    fn handle_event(&mut self, event: &InputEvent, input: &InputState) -> bool {
        match *event {
            InputEvent::MouseButtonDown { position, button } => {
                if !input.mouse_button_held(button) && self.element.mouse_over(position) {
                    self.on_click();
                    return true;
                }
                false
            }
            InputEvent::MouseMotion { position } | InputEvent::MouseButtonUp { position, .. } => {
                let state = if self.element.mouse_over(position) {
                    ButtonState::Hover
                } else {
                    ButtonState::Idle
                };
                self.change_state(state);
                false
            }
            InputEvent::KeyDown { .. } | InputEvent::KeyUp { .. } | InputEvent::Quit => false,
        }
    }

    fn update_component(&mut self) {
        if let Some(label) = self.label.as_mut() {
            label.update_component();
        }
        for (_, style) in self.styles.iter_mut() {
            style.update_component();
        }
        self.element.update_component();
    }

    fn update_position(&mut self, position: Point, update_component: bool) {
        let delta = position - self.element.position();
        if let Some(label) = self.label.as_mut() {
            label.move_by(delta, false);
        }
        for (_, style) in self.styles.iter_mut() {
            style.move_by(delta, false);
        }
        self.element.set_position(position, false);
        if update_component {
            self.update_component();
        }
    }

    fn update_size(&mut self, size: Size, update_component: bool) {
        for (_, style) in self.styles.iter_mut() {
            style.update_size(size, false);
        }
        self.element.set_size(size, false);
        self.center_label();
        if update_component {
            self.update_component();
        }
    }

    fn set_alpha(&mut self, alpha: u8, propagate_children: bool, update_component: bool) {
        for (_, style) in self.styles.iter_mut() {
            style.set_alpha(alpha, propagate_children, false);
        }
        if propagate_children {
            if let Some(label) = self.label.as_mut() {
                label.set_alpha(alpha, true, false);
            }
        }
        if update_component {
            self.update_component();
        }
    }

    fn activate(&mut self) {
        self.element.activate();
        if let Some(label) = self.label.as_mut() {
            label.activate();
        }
        self.sync_styles();
    }

    fn deactivate(&mut self) {
        self.element.deactivate();
        if let Some(label) = self.label.as_mut() {
            label.deactivate();
        }
        // a release never reaches an inactive button, so drop any press
        self.state = ButtonState::Idle;
        self.sync_styles();
    }

    fn show(&mut self) {
        self.element.show();
        if let Some(label) = self.label.as_mut() {
            label.show();
        }
        self.sync_styles();
    }

    fn hide(&mut self) {
        self.element.hide();
        if let Some(label) = self.label.as_mut() {
            label.hide();
        }
        self.sync_styles();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::CommandQueue;
    use crate::ui::input::MouseButton;
    use crate::ui::rendering::{BlockFont, RecordingTarget};

    fn start_button(queue: &CommandQueue<&'static str>) -> UIButton {
        let sender = queue.clone();
        let mut button = UIButton::quick_create(
            QuickButton {
                name: "Start".to_string(),
                text: "Start".to_string(),
                position: Point::new(400, 300),
                padding: (10, 5),
                button_color: Color::new(0, 0, 200),
                callback: Some(Box::new(move || sender.send("start"))),
                ..QuickButton::default()
            },
            &BlockFont,
        )
        .unwrap();
        button.show();
        button.activate();
        button
    }

    fn press(at: Point) -> InputEvent {
        InputEvent::MouseButtonDown { position: at, button: MouseButton::Left }
    }

    #[test]
    fn test_quick_create_layout() {
        let queue = CommandQueue::new();
        let button = start_button(&queue);

        // "Start" at 36 px is 90x36, plus (10, 5) padding on each side
        assert_eq!(button.element().size(), Size::new(110, 46).unwrap());
        assert_eq!(button.element().position(), Point::new(345, 277));
        assert_eq!(button.current_style().element().color(), Color::new(0, 0, 192));
        assert_eq!(button.styles().get(ButtonState::Hover).element().color(), Color::new(0, 0, 255));
        assert_eq!(button.styles().get(ButtonState::Active).element().color(), Color::new(0, 0, 128));

        let label = button.label().unwrap();
        assert_eq!(label.element().name(), "Start_Label");
        assert_eq!(label.priority(), 1);
        assert_eq!(label.element().position(), Point::new(355, 282));
    }

    #[test]
    fn test_min_size_wins_over_text() {
        let button = UIButton::quick_create(
            QuickButton { text: "<".to_string(), text_size: 9, min_size: (40, 40), ..QuickButton::default() },
            &BlockFont,
        )
        .unwrap();
        assert_eq!(button.element().size(), Size::new(40, 40).unwrap());
    }

    #[test]
    fn test_click_fires_once_per_press() {
        let queue = CommandQueue::new();
        let mut button = start_button(&queue);
        let mut input = InputState::new();

        let event = press(Point::new(400, 300));
        input.handle_event(&event);
        assert!(button.handle_event(&event, &input));
        assert_eq!(button.state(), ButtonState::Active);

        // a second down while already pressed does not re-fire
        assert!(button.handle_event(&event, &input));
        assert_eq!(queue.drain(), vec!["start"]);

        // a held press is not a click
        input.end_frame();
        assert!(!button.handle_event(&event, &input));
    }

    #[test]
    fn test_deactivate_drops_press() {
        let queue = CommandQueue::new();
        let mut button = start_button(&queue);
        let mut input = InputState::new();

        let event = press(Point::new(400, 300));
        input.handle_event(&event);
        assert!(button.handle_event(&event, &input));
        assert_eq!(button.state(), ButtonState::Active);

        // the release lands elsewhere while the button is switched off
        button.deactivate();
        assert_eq!(button.state(), ButtonState::Idle);
        assert!(!button.styles().get(ButtonState::Active).is_visible());
        assert!(!button.current_style().is_active());

        input.handle_event(&InputEvent::MouseButtonUp { position: Point::new(0, 0), button: MouseButton::Left });
        input.end_frame();
        button.activate();
        input.handle_event(&event);
        assert!(button.handle_event(&event, &input));
        assert_eq!(queue.drain(), vec!["start", "start"]);
    }

    #[test]
    fn test_click_outside_is_ignored() {
        let queue = CommandQueue::new();
        let mut button = start_button(&queue);
        let input = InputState::new();

        assert!(!button.handle_event(&press(Point::new(0, 0)), &input));
        assert!(queue.is_empty());
        assert_eq!(button.state(), ButtonState::Idle);
    }

    #[test]
    fn test_hover_tracks_pointer() {
        let queue = CommandQueue::new();
        let mut button = start_button(&queue);
        let input = InputState::new();

        assert!(!button.handle_event(&InputEvent::MouseMotion { position: Point::new(400, 300) }, &input));
        assert_eq!(button.state(), ButtonState::Hover);
        assert!(button.styles().get(ButtonState::Hover).is_visible());
        assert!(!button.styles().get(ButtonState::Idle).is_visible());

        let release = InputEvent::MouseButtonUp { position: Point::new(10, 10), button: MouseButton::Left };
        assert!(!button.handle_event(&release, &input));
        assert_eq!(button.state(), ButtonState::Idle);
    }

    #[test]
    fn test_render_draws_current_style_then_label() {
        let queue = CommandQueue::new();
        let mut button = start_button(&queue);
        button.change_state(ButtonState::Hover);

        let mut target = RecordingTarget::new();
        button.render(&mut target);
        assert_eq!(target.blit_positions(), vec![Point::new(345, 277), Point::new(355, 282)]);
    }

    #[test]
    fn test_set_style_requires_panel() {
        let queue = CommandQueue::new();
        let mut button = start_button(&queue);
        let label = UILabel::new("x", 0, "x", Point::new(0, 0), Color::WHITE, 10, &BlockFont).unwrap();

        let err = button.set_style(ButtonState::Idle, UINode::Label(label)).unwrap_err();
        assert_eq!(err, UiError::UnexpectedKind { expected: "panel", found: "label" });

        let panel = UIPanel::new("red", 0, Point::new(0, 0), Size::new(5, 5).unwrap(), Color::new(255, 0, 0), 255).unwrap();
        button.set_style(ButtonState::Idle, UINode::Panel(panel)).unwrap();
        assert_eq!(button.current_style().element().color(), Color::new(255, 0, 0));
        assert!(button.current_style().is_visible());
    }

    #[test]
    fn test_set_text_recentres_label() {
        let queue = CommandQueue::new();
        let mut button = start_button(&queue);
        button.set_text("Go", &BlockFont).unwrap();
        // 36x36 label centred in the 110x46 button at (345, 277)
        assert_eq!(button.label().unwrap().element().position(), Point::new(382, 282));
    }

    #[test]
    fn test_move_carries_parts() {
        let queue = CommandQueue::new();
        let mut button = start_button(&queue);
        button.move_by(Point::new(-45, -77), true);
        assert_eq!(button.element().position(), Point::new(300, 200));
        assert_eq!(button.current_style().element().boundaries().left, 300);
        assert_eq!(button.label().unwrap().element().position(), Point::new(310, 205));
    }
}
