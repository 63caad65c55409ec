//! Event routing and layout across interfaces

use crate::events::CommandQueue;
use crate::foundation::math::{Color, Point, Size};
use crate::ui::input::{InputEvent, InputState, MouseButton};
use crate::ui::rendering::BlockFont;
use crate::ui::widgets::{Alignment, QuickButton, TileState, UIButton, UIGrid, UINode, UIPanel, Widget};
use crate::ui::{GameState, Interface, InterfaceManager};

#[cfg(test)]
mod tests {
    use super::*;

    fn button(name: &'static str, priority: u32, queue: &CommandQueue<&'static str>) -> UINode {
        let sender = queue.clone();
        let button = UIButton::quick_create(
            QuickButton {
                name: name.to_string(),
                priority,
                text: "Go".to_string(),
                position: Point::new(50, 50),
                min_size: (60, 60),
                callback: Some(Box::new(move || sender.send(name))),
                ..QuickButton::default()
            },
            &BlockFont,
        )
        .unwrap();
        UINode::Button(button)
    }

    fn click(input: &mut InputState, at: Point) -> InputEvent {
        let event = InputEvent::MouseButtonDown { position: at, button: MouseButton::Left };
        input.handle_event(&event);
        event
    }

    #[test]
    fn test_first_consumer_wins_within_interface() {
        let queue = CommandQueue::new();
        let mut interface = Interface::new(0).with_components(vec![button("upper", 5, &queue), button("lower", 1, &queue)]);
        interface.show();
        interface.activate();

        let mut input = InputState::new();
        let event = click(&mut input, Point::new(50, 50));
        assert!(interface.handle_event(&event, &input));
        assert_eq!(queue.drain(), vec!["lower"]);
    }

    #[test]
    fn test_inactive_component_is_skipped() {
        let queue = CommandQueue::new();
        let mut interface = Interface::new(0).with_components(vec![button("upper", 5, &queue), button("lower", 1, &queue)]);
        interface.show();
        interface.activate();
        interface.get_component_mut("lower").unwrap().deactivate();

        let mut input = InputState::new();
        let event = click(&mut input, Point::new(50, 50));
        assert!(interface.handle_event(&event, &input));
        assert_eq!(queue.drain(), vec!["upper"]);
    }

    #[test]
    fn test_components_before_grid() {
        let queue = CommandQueue::new();
        let grid = UIGrid::new("field", Point::new(0, 0), (4, 4), Size::new(32, 32).unwrap(), 1, Color::WHITE).unwrap();
        let mut interface = Interface::new(0).with_components(vec![button("over_grid", 0, &queue)]).with_grid(grid);
        interface.show();
        interface.activate();

        let mut input = InputState::new();
        let on_button = click(&mut input, Point::new(50, 50));
        assert!(interface.handle_event(&on_button, &input));
        assert_eq!(queue.drain(), vec!["over_grid"]);
        assert!(interface.grid().unwrap().active_cells().is_empty());

        input.end_frame();
        input.handle_event(&InputEvent::MouseButtonUp { position: Point::new(0, 0), button: MouseButton::Left });
        let on_tile = click(&mut input, Point::new(110, 110));
        assert!(interface.handle_event(&on_tile, &input));
        assert_eq!(interface.grid().unwrap().get_cell((3, 3)).unwrap().tile_state(), TileState::Active);
    }

    #[test]
    fn test_manager_routes_lowest_priority_first() {
        let queue = CommandQueue::new();
        let menu = Interface::new(5).with_components(vec![button("menu", 0, &queue)]);
        let play = Interface::new(0);
        let pause = Interface::new(1).with_components(vec![button("pause", 0, &queue)]);
        let end = Interface::new(10);
        let mut manager = InterfaceManager::new(menu, play, pause, end);
        manager.open(GameState::Menu);
        manager.open(GameState::Pause);

        let mut input = InputState::new();
        let event = click(&mut input, Point::new(50, 50));
        assert!(manager.handle_event(&event, &input));
        assert_eq!(queue.drain(), vec!["pause"]);

        manager.close(GameState::Pause);
        input.end_frame();
        input.handle_event(&InputEvent::MouseButtonUp { position: Point::new(0, 0), button: MouseButton::Left });
        let event = click(&mut input, Point::new(50, 50));
        assert!(manager.handle_event(&event, &input));
        assert_eq!(queue.drain(), vec!["menu"]);
    }

    #[test]
    fn test_unconsumed_event_reports_false() {
        let queue = CommandQueue::new();
        let menu = Interface::new(0).with_components(vec![button("menu", 0, &queue)]);
        let mut manager = InterfaceManager::new(menu, Interface::new(0), Interface::new(0), Interface::new(0));
        manager.switch_to(GameState::Menu);

        let input = InputState::new();
        assert!(!manager.handle_event(&InputEvent::MouseMotion { position: Point::new(50, 50) }, &input));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_nested_layout_survives_resize() {
        let mut outer = UIPanel::new("outer", 0, Point::new(100, 100), Size::new(200, 100).unwrap(), Color::GRAY, 255).unwrap();
        let mut inner = UIPanel::new("inner", 1, Point::new(0, 0), Size::new(50, 20).unwrap(), Color::BLACK, 255).unwrap();
        outer.element().position_component_relative(&mut inner, Point::new(50, 50), true, Alignment::Middle, Alignment::Middle);
        assert_eq!(inner.element().position(), Point::new(175, 140));

        outer.add_child(UINode::Panel(inner), true);
        outer.resize(Size::new(300, 200).unwrap(), false);
        let inner = outer.get_child("inner").unwrap();
        // still centred: 100 + round(0.5 * 250), 100 + round(0.5 * 180)
        assert_eq!(inner.element().position(), Point::new(225, 190));
        assert_eq!(inner.element().boundaries().right, 275);
    }
}
