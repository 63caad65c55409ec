//! UI widgets module
//!
//! Contains every component kind (elements, labels, panels, buttons, grids)
//! and the tree node that holds them.

pub mod core;
pub mod label;
pub mod panel;
pub mod button;
pub mod grid;
pub mod node;

// Re-export core types
pub use core::{aligned_origin, Alignment, ElementFlags, UIElement, Widget};

// Re-export widget types
pub use label::UILabel;
pub use panel::{TextBoxOptions, UIPanel};
pub use button::{ButtonCallback, ButtonState, ButtonStyles, QuickButton, UIButton};
pub use grid::{GridCell, TileState, UIGrid};
pub use node::UINode;
