//! UI Manager
//!
//! Holds exactly one [`Interface`] per [`GameState`] and drives rendering and
//! input dispatch across all of them.

use super::input::{InputEvent, InputState};
use super::interface::Interface;
use super::rendering::RenderTarget;

/// High-level game states, each owning one interface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GameState {
    /// Title screen
    Menu,
    /// Gameplay
    Play,
    /// Pause overlay
    Pause,
    /// Game over
    End,
}

impl GameState {
    /// Every state
    pub const ALL: [GameState; 4] = [GameState::Menu, GameState::Play, GameState::Pause, GameState::End];

    const fn index(self) -> usize {
        match self {
            GameState::Menu => 0,
            GameState::Play => 1,
            GameState::Pause => 2,
            GameState::End => 3,
        }
    }
}

/// One interface per game state
#[derive(Debug)]
pub struct InterfaceManager {
    interfaces: [Interface; 4],
}

impl InterfaceManager {
    /// Assemble the manager from one interface per state
    pub fn new(menu: Interface, play: Interface, pause: Interface, end: Interface) -> Self {
        Self {
            interfaces: [menu, play, pause, end],
        }
    }

    /// Interface for `state`
    pub fn interface(&self, state: GameState) -> &Interface {
        &self.interfaces[state.index()]
    }

    /// Mutable interface for `state`
    pub fn interface_mut(&mut self, state: GameState) -> &mut Interface {
        &mut self.interfaces[state.index()]
    }

    /// Replace the interface for `state`, returning the old one
    pub fn replace(&mut self, state: GameState, interface: Interface) -> Interface {
        std::mem::replace(self.interface_mut(state), interface)
    }

    /// Every state with its interface, in state order
    pub fn iter(&self) -> impl Iterator<Item = (GameState, &Interface)> {
        GameState::ALL.into_iter().zip(self.interfaces.iter())
    }

    /// States ordered by ascending interface priority, ties in state order
    pub fn priority_order(&self) -> Vec<GameState> {
        let mut order = GameState::ALL.to_vec();
        order.sort_by_key(|state| (self.interface(*state).priority(), *state));
        order
    }

    /// Render every visible interface, lowest priority first
    pub fn render(&self, target: &mut dyn RenderTarget) {
        for state in self.priority_order() {
            let interface = self.interface(state);
            if interface.is_visible() {
                interface.render(target);
            }
        }
    }

    /// Offer an event to every active interface in ascending priority
    ///
    /// Dispatch stops at the first interface that consumes the event.
    pub fn handle_event(&mut self, event: &InputEvent, input: &InputState) -> bool {
        for state in self.priority_order() {
            let interface = self.interface_mut(state);
            if interface.is_active() && interface.handle_event(event, input) {
                log::debug!("{:?} consumed by {:?} interface", event, state);
                return true;
            }
        }
        false
    }

    /// Show and activate the interface for `state`
    pub fn open(&mut self, state: GameState) {
        let interface = self.interface_mut(state);
        interface.show();
        interface.activate();
    }

    /// Hide (and so deactivate) the interface for `state`
    pub fn close(&mut self, state: GameState) {
        self.interface_mut(state).hide();
    }

    /// Open `state` alone, closing every other interface
    pub fn switch_to(&mut self, state: GameState) {
        for other in GameState::ALL {
            if other != state {
                self.close(other);
            }
        }
        self.open(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Color, Point, Size};
    use crate::ui::rendering::RecordingTarget;
    use crate::ui::widgets::{UIElement, UINode};

    fn marked(priority: u32, x: i32) -> Interface {
        Interface::new(priority).with_components(vec![UINode::Element(
            UIElement::new("marker", 0, Point::new(x, 0), Size::new(1, 1).unwrap(), Color::WHITE, 255).unwrap(),
        )])
    }

    fn manager() -> InterfaceManager {
        InterfaceManager::new(marked(0, 0), marked(0, 1), marked(10, 2), marked(10, 3))
    }

    #[test]
    fn test_one_interface_per_state() {
        let manager = manager();
        assert_eq!(manager.iter().count(), 4);
        assert_eq!(manager.interface(GameState::Pause).priority(), 10);
    }

    #[test]
    fn test_paint_order_follows_priority() {
        let mut manager = InterfaceManager::new(marked(5, 0), marked(0, 1), marked(10, 2), marked(1, 3));
        for state in GameState::ALL {
            manager.open(state);
        }
        let mut target = RecordingTarget::new();
        manager.render(&mut target);
        assert_eq!(
            target.blit_positions(),
            vec![Point::new(1, 0), Point::new(3, 0), Point::new(0, 0), Point::new(2, 0)]
        );
    }

    #[test]
    fn test_switch_to_closes_others() {
        let mut manager = manager();
        manager.open(GameState::Play);
        manager.switch_to(GameState::Menu);
        assert!(manager.interface(GameState::Menu).is_visible());
        assert!(manager.interface(GameState::Menu).is_active());
        assert!(!manager.interface(GameState::Play).is_visible());
        assert!(!manager.interface(GameState::Play).is_active());
    }

    #[test]
    fn test_pause_overlay_keeps_play_visible() {
        let mut manager = manager();
        manager.switch_to(GameState::Play);
        manager.interface_mut(GameState::Play).deactivate();
        manager.open(GameState::Pause);

        let mut target = RecordingTarget::new();
        manager.render(&mut target);
        assert_eq!(target.blit_positions(), vec![Point::new(1, 0), Point::new(2, 0)]);
    }
}
