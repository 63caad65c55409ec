//! Raw input events as delivered by the host window

use crate::foundation::math::Point;

/// Mouse button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
}

/// Key codes the game binds to logical actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A key
    A,
    /// D key
    D,
    /// P key
    P,
    /// S key
    S,
    /// W key
    W,
    /// Space key
    Space,
    /// Enter key
    Enter,
    /// Escape key
    Escape,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
}

/// One input event, fed to the UI in arrival order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Pointer moved
    MouseMotion {
        /// Pointer position in screen space
        position: Point,
    },
    /// Mouse button went down
    MouseButtonDown {
        /// Pointer position in screen space
        position: Point,
        /// Which button
        button: MouseButton,
    },
    /// Mouse button went up
    MouseButtonUp {
        /// Pointer position in screen space
        position: Point,
        /// Which button
        button: MouseButton,
    },
    /// Key went down
    KeyDown {
        /// Which key
        key: KeyCode,
    },
    /// Key went up
    KeyUp {
        /// Which key
        key: KeyCode,
    },
    /// The window asked to close
    Quit,
}

impl InputEvent {
    /// Pointer position carried by mouse events
    pub fn position(&self) -> Option<Point> {
        match self {
            InputEvent::MouseMotion { position }
            | InputEvent::MouseButtonDown { position, .. }
            | InputEvent::MouseButtonUp { position, .. } => Some(*position),
            InputEvent::KeyDown { .. } | InputEvent::KeyUp { .. } | InputEvent::Quit => None,
        }
    }
}
