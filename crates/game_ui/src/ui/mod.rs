//! UI System Module
//!
//! Retained-mode component tree for game screens.
//!
//! Architecture:
//! - widgets/: component kinds (element, label, panel, button, grid)
//! - rendering/: surfaces, render targets and text rasterization
//! - input/: raw input events and edge-triggered input state
//! - interface: one logical screen made of top-level components
//! - manager: every screen keyed by game state

pub mod error;
pub mod validate;
pub mod widgets;
pub mod rendering;
pub mod input;
pub mod interface;
pub mod manager;

#[cfg(test)]
mod tests;

pub use error::{UiError, UiResult};
pub use interface::Interface;
pub use manager::{GameState, InterfaceManager};

// Re-export widgets
pub use widgets::{
    Alignment, ButtonState, ButtonStyles, ElementFlags, GridCell, QuickButton, TextBoxOptions,
    TileState, UIButton, UIElement, UIGrid, UILabel, UINode, UIPanel, Widget,
};

// Re-export rendering types
pub use rendering::{
    BlockFont, Canvas, RecordingTarget, RenderTarget, Surface, TextRasterizer, UIRenderCommand,
};
#[cfg(feature = "fontdue")]
pub use rendering::FontdueRasterizer;

// Re-export input types
pub use input::{InputEvent, InputState, KeyCode, MouseButton};
