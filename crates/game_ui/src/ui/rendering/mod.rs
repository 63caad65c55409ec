//! UI rendering module
//!
//! Backend-agnostic pixel surfaces, render targets and text rasterization.

pub mod surface;
pub mod commands;
pub mod target;
pub mod text;

// Re-export commonly used types
pub use surface::Surface;
pub use commands::UIRenderCommand;
pub use target::{Canvas, RecordingTarget, RenderTarget};
pub use text::{BlockFont, TextRasterizer};
#[cfg(feature = "fontdue")]
pub use text::FontdueRasterizer;
