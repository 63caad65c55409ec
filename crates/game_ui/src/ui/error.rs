//! UI error types
//!
//! Every variant is a construction-time contract violation: the offending
//! operation is rejected and no cached state is touched.

use thiserror::Error;

/// Result type for UI operations
pub type UiResult<T> = Result<T, UiError>;

/// Errors raised while constructing or mutating components
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UiError {
    /// Component names must not be empty
    #[error("Component name can not be empty")]
    EmptyName,

    /// Label text must not be empty
    #[error("Text content can not be empty")]
    EmptyContent,

    /// Geometry with a zero dimension
    #[error("Size must be positive on both axes, got {width}x{height}")]
    InvalidSize {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },

    /// Font size outside the supported range
    #[error("Font size must be between {min} and {max}, got {value}")]
    InvalidFontSize {
        /// Requested size
        value: u32,
        /// Smallest accepted size
        min: u32,
        /// Largest accepted size
        max: u32,
    },

    /// Border too thick to leave an inner tile
    #[error("Border thickness {thickness} leaves no inner tile in a {width}x{height} cell")]
    InvalidBorderThickness {
        /// Requested thickness
        thickness: u32,
        /// Cell width
        width: u32,
        /// Cell height
        height: u32,
    },

    /// Grid with no cells on some axis
    #[error("Grid must have at least one cell on each axis, got {width}x{height}")]
    InvalidGridSize {
        /// Cells across
        width: u32,
        /// Cells down
        height: u32,
    },

    /// A specific component kind was required
    #[error("Expected a {expected} component, got {found}")]
    UnexpectedKind {
        /// Kind that was required
        expected: &'static str,
        /// Kind that was supplied
        found: &'static str,
    },

    /// No component with the given name
    #[error("No component named '{0}'")]
    UnknownComponent(String),

    /// Font data could not be loaded
    #[error("Failed to load font: {0}")]
    Font(String),
}
