//! Construction-time validation rules
//!
//! Ranges that the type system cannot express on its own. Channels, alpha and
//! priority are already bounded by their integer types.

use super::error::{UiError, UiResult};
use crate::foundation::math::Size;

/// Smallest accepted label font size
pub const FONT_SIZE_MIN: u32 = 8;
/// Largest accepted label font size
pub const FONT_SIZE_MAX: u32 = 100;

/// Reject empty component names
pub fn name(name: &str) -> UiResult<()> {
    if name.is_empty() {
        return Err(UiError::EmptyName);
    }
    Ok(())
}

/// Reject empty label text
pub fn text_content(content: &str) -> UiResult<()> {
    if content.is_empty() {
        return Err(UiError::EmptyContent);
    }
    Ok(())
}

/// Font size must lie in `FONT_SIZE_MIN..=FONT_SIZE_MAX`
pub fn font_size(value: u32) -> UiResult<()> {
    if !(FONT_SIZE_MIN..=FONT_SIZE_MAX).contains(&value) {
        return Err(UiError::InvalidFontSize {
            value,
            min: FONT_SIZE_MIN,
            max: FONT_SIZE_MAX,
        });
    }
    Ok(())
}

/// A border must leave at least one pixel of inner tile on both axes
pub fn border_thickness(thickness: u32, cell: Size) -> UiResult<()> {
    let limit = cell.width().min(cell.height());
    if thickness.saturating_mul(2) >= limit {
        return Err(UiError::InvalidBorderThickness {
            thickness,
            width: cell.width(),
            height: cell.height(),
        });
    }
    Ok(())
}

/// A grid needs at least one cell across and down
pub fn grid_size(width: u32, height: u32) -> UiResult<()> {
    if width == 0 || height == 0 {
        return Err(UiError::InvalidGridSize { width, height });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_size_bounds_inclusive() {
        assert!(font_size(8).is_ok());
        assert!(font_size(100).is_ok());
        assert!(font_size(7).is_err());
        assert!(font_size(101).is_err());
    }

    #[test]
    fn test_border_thickness_leaves_inner_tile() {
        let cell = Size::new(10, 8).unwrap();
        assert!(border_thickness(0, cell).is_ok());
        assert!(border_thickness(3, cell).is_ok());
        assert!(border_thickness(4, cell).is_err());
    }

    #[test]
    fn test_empty_strings_rejected() {
        assert_eq!(name(""), Err(UiError::EmptyName));
        assert_eq!(text_content(""), Err(UiError::EmptyContent));
        assert!(name("Menu").is_ok());
    }
}
