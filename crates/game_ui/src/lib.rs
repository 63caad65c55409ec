//! # Game UI
//!
//! A retained-mode UI component tree for building and driving the screens of
//! a 2D game: menus, HUD panels, pause and game-over overlays.
//!
//! ## Features
//!
//! - **Component tree**: labels, boxes, buttons and grids with cached
//!   boundaries and pre-composited surfaces
//! - **Relative layout**: percentage offsets with START/MIDDLE/END anchoring
//! - **Event routing**: first-consumer-wins dispatch in priority order
//! - **Widget state machines**: edge-triggered buttons and grid tiles
//! - **Screens**: interfaces keyed by game state, with overlays
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use game_ui::prelude::*;
//!
//! fn main() -> Result<(), UiError> {
//!     let fonts = BlockFont;
//!     let queue: CommandQueue<&'static str> = CommandQueue::new();
//!     let sender = queue.clone();
//!
//!     let button = UIButton::quick_create(
//!         QuickButton {
//!             text: "Start".to_string(),
//!             position: Point::new(400, 300),
//!             callback: Some(Box::new(move || sender.send("start"))),
//!             ..QuickButton::default()
//!         },
//!         &fonts,
//!     )?;
//!
//!     let mut menu = Interface::new(0);
//!     menu.add_component(UINode::Button(button));
//!     menu.activate();
//!     menu.show();
//!
//!     let mut canvas = Canvas::new(Size::new(800, 600)?);
//!     menu.render(&mut canvas);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod events;
pub mod foundation;
pub mod ui;

pub use ui::error::{UiError, UiResult};

/// Common imports for UI users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, SettingValue, SettingsProvider},
        events::CommandQueue,
        foundation::math::{Boundaries, Color, Point, Size},
        ui::{
            Alignment, ButtonState, Canvas, ElementFlags, GameState, GridCell, InputEvent,
            InputState, Interface, InterfaceManager, KeyCode, MouseButton, QuickButton,
            RecordingTarget, RenderTarget, Surface, TextBoxOptions, TextRasterizer,
            TileState, UIButton, UIElement, UIGrid, UILabel, UINode, UIPanel, Widget,
            BlockFont,
        },
        UiError, UiResult,
    };
}
