//! UI input handling module

pub mod events;
pub mod processor;

// Re-export commonly used types
pub use events::{InputEvent, KeyCode, MouseButton};
pub use processor::InputState;
