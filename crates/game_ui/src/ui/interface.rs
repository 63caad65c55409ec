//! Interfaces
//!
//! An interface is one logical screen: a priority-sorted list of top-level
//! components plus an optional tile grid. It renders the grid underneath
//! everything else and offers input to its components before the grid.

use super::input::{InputEvent, InputState};
use super::rendering::RenderTarget;
use super::widgets::{ElementFlags, UIGrid, UINode, Widget};

/// One screen worth of components
#[derive(Debug)]
pub struct Interface {
    priority: u32,
    flags: ElementFlags,
    components: Vec<UINode>,
    grid: Option<UIGrid>,
}

impl Interface {
    /// Create an empty, inactive, hidden interface
    pub fn new(priority: u32) -> Self {
        Self {
            priority,
            flags: ElementFlags::empty(),
            components: Vec::new(),
            grid: None,
        }
    }

    /// Builder form of [`Interface::add_components`]
    #[must_use]
    pub fn with_components(mut self, components: Vec<UINode>) -> Self {
        self.add_components(components);
        self
    }

    /// Builder form of [`Interface::set_grid`]
    #[must_use]
    pub fn with_grid(mut self, grid: UIGrid) -> Self {
        self.set_grid(grid);
        self
    }

    /// Paint and dispatch order among interfaces
    pub const fn priority(&self) -> u32 {
        self.priority
    }

    /// Receives input
    pub const fn is_active(&self) -> bool {
        self.flags.contains(ElementFlags::ACTIVE)
    }

    /// Is rendered
    pub const fn is_visible(&self) -> bool {
        self.flags.contains(ElementFlags::VISIBLE)
    }

    /// Start receiving input, together with every component and the grid
    pub fn activate(&mut self) {
        self.flags.insert(ElementFlags::ACTIVE);
        self.for_each_widget(|widget| widget.activate());
    }

    /// Stop receiving input, together with every component and the grid
    pub fn deactivate(&mut self) {
        self.flags.remove(ElementFlags::ACTIVE);
        self.for_each_widget(|widget| widget.deactivate());
    }

    /// Start rendering, together with every component and the grid
    pub fn show(&mut self) {
        self.flags.insert(ElementFlags::VISIBLE);
        self.for_each_widget(|widget| widget.show());
    }

    /// Stop rendering and stop receiving input
    pub fn hide(&mut self) {
        self.flags.remove(ElementFlags::VISIBLE);
        self.for_each_widget(|widget| widget.hide());
        self.deactivate();
    }

    fn for_each_widget(&mut self, mut apply: impl FnMut(&mut dyn Widget)) {
        for component in &mut self.components {
            apply(component);
        }
        if let Some(grid) = self.grid.as_mut() {
            apply(grid);
        }
    }

    fn adopt_flags(&self, widget: &mut dyn Widget) {
        if self.is_active() {
            widget.activate();
        } else {
            widget.deactivate();
        }
        if self.is_visible() {
            widget.show();
        } else {
            widget.hide();
        }
    }

    /// Top-level components in paint order
    pub fn components(&self) -> &[UINode] {
        &self.components
    }

    /// Add a top-level component, adopting this interface's flags
    pub fn add_component(&mut self, mut component: UINode) {
        self.adopt_flags(&mut component);
        self.components.push(component);
        self.sort_components();
    }

    /// Add several top-level components and sort once
    pub fn add_components(&mut self, components: Vec<UINode>) {
        for mut component in components {
            self.adopt_flags(&mut component);
            self.components.push(component);
        }
        self.sort_components();
    }

    /// Detach the first top-level component called `name`
    pub fn remove_component(&mut self, name: &str) -> Option<UINode> {
        let index = self.components.iter().position(|component| component.name() == name)?;
        Some(self.components.remove(index))
    }

    /// Detach every top-level component whose name is listed
    pub fn remove_components(&mut self, names: &[&str]) -> Vec<UINode> {
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.components)
            .into_iter()
            .partition(|component| names.contains(&component.name()));
        self.components = kept;
        removed
    }

    fn sort_components(&mut self) {
        self.components.sort_by_key(|component| component.priority());
    }

    /// Top-level component called `name`
    pub fn get_component(&self, name: &str) -> Option<&UINode> {
        self.components.iter().find(|component| component.name() == name)
    }

    /// Mutable top-level component called `name`
    pub fn get_component_mut(&mut self, name: &str) -> Option<&mut UINode> {
        self.components.iter_mut().find(|component| component.name() == name)
    }

    /// Depth-first search through every component
    pub fn find(&self, name: &str) -> Option<&UINode> {
        self.components.iter().find_map(|component| component.find(name))
    }

    /// Mutable depth-first search through every component
    pub fn find_mut(&mut self, name: &str) -> Option<&mut UINode> {
        self.components.iter_mut().find_map(|component| component.find_mut(name))
    }

    /// Install the tile grid, replacing any previous one
    pub fn set_grid(&mut self, mut grid: UIGrid) -> Option<UIGrid> {
        self.adopt_flags(&mut grid);
        self.grid.replace(grid)
    }

    /// Remove the tile grid
    pub fn take_grid(&mut self) -> Option<UIGrid> {
        self.grid.take()
    }

    /// Tile grid, if any
    pub const fn grid(&self) -> Option<&UIGrid> {
        self.grid.as_ref()
    }

    /// Mutable tile grid, if any
    pub fn grid_mut(&mut self) -> Option<&mut UIGrid> {
        self.grid.as_mut()
    }

    /// Draw the grid, then every visible component in priority order
    pub fn render(&self, target: &mut dyn RenderTarget) {
        if !self.is_visible() {
            return;
        }
        if let Some(grid) = self.grid.as_ref().filter(|grid| grid.is_visible()) {
            grid.render(target);
        }
        for component in self.components.iter().filter(|component| component.is_visible()) {
            component.render(target);
        }
    }

    /// Offer an event to active components in priority order, then the grid
    ///
    /// Returns whether something consumed it.
    pub fn handle_event(&mut self, event: &InputEvent, input: &InputState) -> bool {
        if !self.is_active() {
            return false;
        }
        let consumed = self
            .components
            .iter_mut()
            .filter(|component| component.is_active())
            .any(|component| component.handle_event(event, input));
        if consumed {
            return true;
        }
        self.grid
            .as_mut()
            .filter(|grid| grid.is_active())
            .is_some_and(|grid| grid.handle_event(event, input))
    }
}
