//! Tile grid widget
//!
//! A rectangular array of bordered cells, laid out edge to edge from the
//! grid's top-left corner. Cells are stored and visited row-major.

use super::core::{UIElement, Widget};
use crate::foundation::math::{to_i32, Color, Point, Size};
use crate::ui::error::UiResult;
use crate::ui::input::{InputEvent, InputState};
use crate::ui::rendering::{RenderTarget, Surface};
use crate::ui::validate;

/// Interaction state of one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TileState {
    /// Untouched
    #[default]
    Idle,
    /// Pointer over the cell
    Hover,
    /// Clicked
    Active,
}

impl TileState {
    /// Inner tile color for this state
    pub const fn color(self) -> Color {
        match self {
            TileState::Idle => Color::BLACK,
            TileState::Hover => Color::GRAY,
            TileState::Active => Color::GREEN,
        }
    }
}

/// One bordered tile of a [`UIGrid`]
#[derive(Debug, Clone)]
pub struct GridCell {
    element: UIElement,
    coords: (u32, u32),
    tile_state: TileState,
    border_thickness: u32,
    border_color: Color,
}

impl GridCell {
    /// Create the cell at `coords` of a grid whose top-left is `grid_position`
    pub fn new(
        grid_position: Point,
        coords: (u32, u32),
        cell_size: Size,
        border_thickness: u32,
        border_color: Color,
    ) -> UiResult<Self> {
        validate::border_thickness(border_thickness, cell_size)?;
        let element = UIElement::new(
            format!("GridCell({},{})", coords.0, coords.1),
            0,
            Self::cell_position(grid_position, coords, cell_size),
            cell_size,
            TileState::Idle.color(),
            u8::MAX,
        )?;
        let mut cell = Self {
            element,
            coords,
            tile_state: TileState::Idle,
            border_thickness,
            border_color,
        };
        cell.update_component();
        Ok(cell)
    }

    /// Top-left of the cell at `coords`
    pub fn cell_position(grid_position: Point, coords: (u32, u32), cell_size: Size) -> Point {
        grid_position
            + Point::new(
                to_i32(coords.0).saturating_mul(to_i32(cell_size.width())),
                to_i32(coords.1).saturating_mul(to_i32(cell_size.height())),
            )
    }

    /// Column and row inside the grid
    pub const fn coords(&self) -> (u32, u32) {
        self.coords
    }

    /// Current interaction state
    pub const fn tile_state(&self) -> TileState {
        self.tile_state
    }

    /// Border width in pixels
    pub const fn border_thickness(&self) -> u32 {
        self.border_thickness
    }

    /// Border color
    pub const fn border_color(&self) -> Color {
        self.border_color
    }

    /// Restyle the border; rejected if it would leave no inner tile
    pub fn set_border(&mut self, thickness: u32, color: Color) -> UiResult<()> {
        validate::border_thickness(thickness, self.element.size())?;
        self.border_thickness = thickness;
        self.border_color = color;
        self.update_component();
        Ok(())
    }

    /// Move to `state`, recoloring the inner tile
    pub fn change_state(&mut self, state: TileState) {
        if self.tile_state != state {
            self.tile_state = state;
            self.element.set_color(state.color(), false);
            self.update_component();
        }
    }
}

impl Widget for GridCell {
    fn element(&self) -> &UIElement {
        &self.element
    }

    fn element_mut(&mut self) -> &mut UIElement {
        &mut self.element
    }

    fn render(&self, target: &mut dyn RenderTarget) {
        self.element.render(target);
    }

    fn handle_event(&mut self, event: &InputEvent, input: &InputState) -> bool {
        match *event {
            InputEvent::MouseButtonDown { position, .. } => {
                if input.left_mouse_click() && self.element.mouse_over(position) {
                    self.change_state(TileState::Active);
                    return true;
                }
                false
            }
            InputEvent::MouseMotion { position } | InputEvent::MouseButtonUp { position, .. } => {
                let state = if self.element.mouse_over(position) {
                    TileState::Hover
                } else {
                    TileState::Idle
                };
                self.change_state(state);
                false
            }
            InputEvent::KeyDown { .. } | InputEvent::KeyUp { .. } | InputEvent::Quit => false,
        }
    }

    fn update_component(&mut self) {
        self.element.update_boundaries();
        let size = self.element.size();
        let alpha = self.element.alpha();
        let inset = self.border_thickness.saturating_mul(2);
        let inner = Size::from_extents(
            size.width().saturating_sub(inset),
            size.height().saturating_sub(inset),
        );

        let mut surface = Surface::filled(size, self.border_color, alpha);
        let thickness = to_i32(self.border_thickness);
        surface.blit(
            &Surface::filled(inner, self.element.color(), alpha),
            Point::new(thickness, thickness),
        );
        self.element.set_surface(surface);
    }

    fn update_size(&mut self, size: Size, _update_component: bool) {
        log::trace!("Grid cell {:?} keeps its grid-assigned size, ignoring {}", self.coords, size);
    }

    fn deactivate(&mut self) {
        self.element.deactivate();
        self.change_state(TileState::Idle);
    }
}

/// Rectangular array of [`GridCell`]s
#[derive(Debug, Clone)]
pub struct UIGrid {
    element: UIElement,
    grid_size: (u32, u32),
    cell_size: Size,
    border_thickness: u32,
    border_color: Color,
    cells: Vec<Vec<GridCell>>,
}

impl UIGrid {
    /// Create a `grid_size.0` by `grid_size.1` grid of idle cells
    pub fn new(
        name: impl Into<String>,
        position: Point,
        grid_size: (u32, u32),
        cell_size: Size,
        border_thickness: u32,
        border_color: Color,
    ) -> UiResult<Self> {
        validate::grid_size(grid_size.0, grid_size.1)?;
        validate::border_thickness(border_thickness, cell_size)?;
        let extent = Size::new(
            grid_size.0.saturating_mul(cell_size.width()),
            grid_size.1.saturating_mul(cell_size.height()),
        )?;
        let element = UIElement::new(name, 0, position, extent, Color::BLACK, 0)?;
        let mut grid = Self {
            element,
            grid_size,
            cell_size,
            border_thickness,
            border_color,
            cells: Vec::new(),
        };
        grid.reset()?;
        Ok(grid)
    }

    /// Cells across and down
    pub const fn grid_size(&self) -> (u32, u32) {
        self.grid_size
    }

    /// Extent of every cell
    pub const fn cell_size(&self) -> Size {
        self.cell_size
    }

    /// Rebuild every cell in the idle state, keeping the grid's flags
    pub fn reset(&mut self) -> UiResult<()> {
        let origin = self.element.position();
        let mut cells = Vec::with_capacity(self.grid_size.1 as usize);
        for y in 0..self.grid_size.1 {
            let mut row = Vec::with_capacity(self.grid_size.0 as usize);
            for x in 0..self.grid_size.0 {
                let mut cell = GridCell::new(origin, (x, y), self.cell_size, self.border_thickness, self.border_color)?;
                if self.element.is_active() {
                    cell.activate();
                }
                if self.element.is_visible() {
                    cell.show();
                }
                row.push(cell);
            }
            cells.push(row);
        }
        self.cells = cells;
        Ok(())
    }

    /// Cell at column `x`, row `y`
    pub fn get_cell(&self, (x, y): (u32, u32)) -> Option<&GridCell> {
        self.cells.get(y as usize)?.get(x as usize)
    }

    /// Mutable cell at column `x`, row `y`
    pub fn get_cell_mut(&mut self, (x, y): (u32, u32)) -> Option<&mut GridCell> {
        self.cells.get_mut(y as usize)?.get_mut(x as usize)
    }

    /// Every cell, row-major
    pub fn cells(&self) -> impl Iterator<Item = &GridCell> {
        self.cells.iter().flatten()
    }

    fn cells_mut(&mut self) -> impl Iterator<Item = &mut GridCell> {
        self.cells.iter_mut().flatten()
    }

    /// Coordinates of the cell under `point`, if any
    pub fn cell_at(&self, point: Point) -> Option<(u32, u32)> {
        let local = point - self.element.position();
        if local.x < 0 || local.y < 0 {
            return None;
        }
        let x = u32::try_from(local.x).ok()? / self.cell_size.width();
        let y = u32::try_from(local.y).ok()? / self.cell_size.height();
        (x < self.grid_size.0 && y < self.grid_size.1).then_some((x, y))
    }

    /// Coordinates of every clicked cell, row-major
    pub fn active_cells(&self) -> Vec<(u32, u32)> {
        self.cells()
            .filter(|cell| cell.tile_state() == TileState::Active)
            .map(GridCell::coords)
            .collect()
    }
}

impl Widget for UIGrid {
    fn element(&self) -> &UIElement {
        &self.element
    }

    fn element_mut(&mut self) -> &mut UIElement {
        &mut self.element
    }

    fn render(&self, target: &mut dyn RenderTarget) {
        for cell in self.cells().filter(|cell| cell.is_visible()) {
            cell.render(target);
        }
    }

    fn handle_event(&mut self, event: &InputEvent, input: &InputState) -> bool {
        self.cells_mut()
            .filter(|cell| cell.is_active())
            .any(|cell| cell.handle_event(event, input))
    }

    fn update_component(&mut self) {
        for cell in self.cells_mut() {
            cell.update_component();
        }
        self.element.update_boundaries();
    }

    fn update_position(&mut self, position: Point, update_component: bool) {
        let delta = position - self.element.position();
        for cell in self.cells_mut() {
            cell.move_by(delta, false);
        }
        self.element.set_position(position, false);
        if update_component {
            self.update_component();
        }
    }

    fn update_size(&mut self, size: Size, _update_component: bool) {
        log::trace!("Grid '{}' size follows its cells, ignoring {}", self.element.name(), size);
    }

    fn set_alpha(&mut self, alpha: u8, propagate_children: bool, update_component: bool) {
        if propagate_children {
            for cell in self.cells_mut() {
                cell.set_alpha(alpha, true, false);
            }
        }
        self.element.set_alpha(alpha, false);
        if update_component {
            self.update_component();
        }
    }

    fn activate(&mut self) {
        self.element.activate();
        self.cells_mut().for_each(Widget::activate);
    }

    fn deactivate(&mut self) {
        self.element.deactivate();
        self.cells_mut().for_each(Widget::deactivate);
    }

    fn show(&mut self) {
        self.element.show();
        self.cells_mut().for_each(Widget::show);
    }

    fn hide(&mut self) {
        self.element.hide();
        self.cells_mut().for_each(Widget::hide);
    }
}
