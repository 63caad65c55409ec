//! UI Input Processing
//!
//! Edge-triggered input state. Widgets never infer "held" from raw down/up
//! pairs themselves; they ask this layer whether the current press is on its
//! first frame.

use std::collections::HashMap;

use super::events::{InputEvent, KeyCode, MouseButton};

/// Logical key names and the physical keys bound to them
const KEY_BINDINGS: &[(&str, &[KeyCode])] = &[
    ("pause", &[KeyCode::P, KeyCode::Escape]),
    ("left", &[KeyCode::A, KeyCode::Left]),
    ("up", &[KeyCode::W, KeyCode::Up]),
    ("right", &[KeyCode::D, KeyCode::Right]),
    ("down", &[KeyCode::S, KeyCode::Down]),
];

/// Input state tracked across frames
///
/// Mouse buttons carry a press-frame counter: 0 when up, 1 on the frame the
/// press started, and one more for every [`InputState::end_frame`] while the
/// button stays down.
#[derive(Debug, Clone)]
pub struct InputState {
    mouse_frames: HashMap<MouseButton, u32>,
    key_states: HashMap<&'static str, bool>,
    pointer: Option<crate::foundation::math::Point>,
}

impl InputState {
    /// Create input state with every button up and every key released
    pub fn new() -> Self {
        Self {
            mouse_frames: HashMap::new(),
            key_states: KEY_BINDINGS.iter().map(|(name, _)| (*name, false)).collect(),
            pointer: None,
        }
    }

    /// Fold one raw event into the state; call before dispatching it to the UI
    pub fn handle_event(&mut self, event: &InputEvent) {
        if let Some(position) = event.position() {
            self.pointer = Some(position);
        }
        match *event {
            InputEvent::MouseButtonDown { button, .. } => {
                let frames = self.mouse_frames.entry(button).or_insert(0);
                if *frames == 0 {
                    *frames = 1;
                }
            }
            InputEvent::MouseButtonUp { button, .. } => {
                self.mouse_frames.insert(button, 0);
            }
            InputEvent::KeyDown { key } => self.set_key(key, true),
            InputEvent::KeyUp { key } => self.set_key(key, false),
            InputEvent::MouseMotion { .. } | InputEvent::Quit => {}
        }
    }

    /// Age every held button by one frame; call once after the frame's events
    pub fn end_frame(&mut self) {
        for frames in self.mouse_frames.values_mut() {
            if *frames > 0 {
                *frames = frames.saturating_add(1);
            }
        }
    }

    fn set_key(&mut self, key: KeyCode, pressed: bool) {
        match Self::key_name(key) {
            Some(name) => {
                self.key_states.insert(name, pressed);
            }
            None => log::trace!("Ignoring unbound key {:?}", key),
        }
    }

    /// Logical name bound to a physical key
    pub fn key_name(key: KeyCode) -> Option<&'static str> {
        KEY_BINDINGS
            .iter()
            .find(|(_, keys)| keys.contains(&key))
            .map(|(name, _)| *name)
    }

    /// Last known pointer position
    pub const fn pointer(&self) -> Option<crate::foundation::math::Point> {
        self.pointer
    }

    fn mouse_frames(&self, button: MouseButton) -> u32 {
        self.mouse_frames.get(&button).copied().unwrap_or(0)
    }

    /// True only on the first frame of a press
    pub fn mouse_button_click(&self, button: MouseButton) -> bool {
        self.mouse_frames(button) == 1
    }

    /// True for every frame the button is down
    pub fn mouse_button_down(&self, button: MouseButton) -> bool {
        self.mouse_frames(button) > 0
    }

    /// True once a press has outlived its first frame
    pub fn mouse_button_held(&self, button: MouseButton) -> bool {
        self.mouse_frames(button) > 1
    }

    /// Left-button click edge
    pub fn left_mouse_click(&self) -> bool {
        self.mouse_button_click(MouseButton::Left)
    }

    /// Left button is down
    pub fn left_mouse_down(&self) -> bool {
        self.mouse_button_down(MouseButton::Left)
    }

    /// Whether any key bound to `name` is currently down
    pub fn is_key_pressed(&self, name: &str) -> bool {
        self.key_states.get(name).copied().unwrap_or(false)
    }

    /// Pause binding is down
    pub fn pause_pressed(&self) -> bool {
        self.is_key_pressed("pause")
    }

    /// Left binding is down
    pub fn left_pressed(&self) -> bool {
        self.is_key_pressed("left")
    }

    /// Up binding is down
    pub fn up_pressed(&self) -> bool {
        self.is_key_pressed("up")
    }

    /// Right binding is down
    pub fn right_pressed(&self) -> bool {
        self.is_key_pressed("right")
    }

    /// Down binding is down
    pub fn down_pressed(&self) -> bool {
        self.is_key_pressed("down")
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Point;

    fn down() -> InputEvent {
        InputEvent::MouseButtonDown { position: Point::new(0, 0), button: MouseButton::Left }
    }

    #[test]
    fn test_click_is_edge_triggered() {
        let mut input = InputState::new();
        assert!(!input.left_mouse_click());

        input.handle_event(&down());
        assert!(input.left_mouse_click());
        assert!(!input.mouse_button_held(MouseButton::Left));

        input.end_frame();
        assert!(!input.left_mouse_click());
        assert!(input.left_mouse_down());
        assert!(input.mouse_button_held(MouseButton::Left));

        // a repeated down during the same press does not restart the edge
        input.handle_event(&down());
        assert!(!input.left_mouse_click());

        input.handle_event(&InputEvent::MouseButtonUp { position: Point::new(0, 0), button: MouseButton::Left });
        assert!(!input.left_mouse_down());
    }

    #[test]
    fn test_key_bindings() {
        let mut input = InputState::new();
        input.handle_event(&InputEvent::KeyDown { key: KeyCode::Escape });
        assert!(input.pause_pressed());
        assert!(!input.left_pressed());

        input.handle_event(&InputEvent::KeyUp { key: KeyCode::Escape });
        assert!(!input.pause_pressed());

        input.handle_event(&InputEvent::KeyDown { key: KeyCode::Space });
        assert!(!input.is_key_pressed("space"));
    }
}
