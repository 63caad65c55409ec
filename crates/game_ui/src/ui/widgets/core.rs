//! Core UI widget primitives
//!
//! Shared types used by all widgets: the base [`UIElement`], the [`Widget`]
//! capability trait every component kind implements, alignment anchors and
//! the relative-layout primitives.

use bitflags::bitflags;

use crate::foundation::math::{half, percent_of, round_even, Boundaries, Color, Point, Size};
use crate::ui::error::UiResult;
use crate::ui::input::{InputEvent, InputState};
use crate::ui::rendering::{RenderTarget, Surface};
use crate::ui::validate;

/// Per-axis anchor rule
///
/// Shifts an element by none, half or all of its own extent on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Alignment {
    /// Anchor at the leading edge (left or top)
    Start,
    /// Anchor at the centre
    #[default]
    Middle,
    /// Anchor at the trailing edge (right or bottom)
    End,
}

impl Alignment {
    /// Offset to subtract from an anchor so that an `extent`-long span lines up
    pub fn shift(self, extent: u32) -> i32 {
        match self {
            Alignment::Start => 0,
            Alignment::Middle => half(extent),
            Alignment::End => crate::foundation::math::to_i32(extent),
        }
    }
}

/// Top-left corner of a `size` box anchored at `anchor`
pub fn aligned_origin(anchor: Point, size: Size, h_align: Alignment, v_align: Alignment) -> Point {
    Point::new(
        anchor.x - h_align.shift(size.width()),
        anchor.y - v_align.shift(size.height()),
    )
}

bitflags! {
    /// Interaction and visibility switches of a component
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ElementFlags: u8 {
        /// Receives input events
        const ACTIVE = 1;
        /// Is rendered
        const VISIBLE = 1 << 1;
    }
}

/// Base UI element properties
///
/// Holds identity, geometry and appearance together with two caches derived
/// from them: the boundary rectangle and a pre-composited surface of
/// `color` at `alpha`. Every setter takes an `update_component` flag; passing
/// `false` defers the recomputation so batch callers can trigger a single
/// [`UIElement::update_component`] at the end.
#[derive(Debug, Clone)]
pub struct UIElement {
    name: String,
    priority: u32,
    position: Point,
    size: Size,
    color: Color,
    alpha: u8,
    flags: ElementFlags,
    boundaries: Boundaries,
    surface: Surface,
}

impl UIElement {
    /// Create an inactive, hidden element with fresh caches
    pub fn new(
        name: impl Into<String>,
        priority: u32,
        position: Point,
        size: Size,
        color: Color,
        alpha: u8,
    ) -> UiResult<Self> {
        let name = name.into();
        validate::name(&name)?;
        Ok(Self {
            name,
            priority,
            position,
            size,
            color,
            alpha,
            flags: ElementFlags::empty(),
            boundaries: Boundaries::from_rect(position, size),
            surface: Surface::filled(size, color, alpha),
        })
    }

    /// Component name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this element is called `name`
    pub fn is_named(&self, name: &str) -> bool {
        self.name == name
    }

    /// Rename the element
    pub fn set_name(&mut self, name: impl Into<String>) -> UiResult<()> {
        let name = name.into();
        validate::name(&name)?;
        self.name = name;
        Ok(())
    }

    /// Sort key; lower renders first and is offered events first
    pub const fn priority(&self) -> u32 {
        self.priority
    }

    /// Change the sort key (the owner must re-sort)
    pub fn set_priority(&mut self, priority: u32) {
        self.priority = priority;
    }

    /// Top-left corner in screen space
    pub const fn position(&self) -> Point {
        self.position
    }

    /// Extent in pixels
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Fill color
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Opacity
    pub const fn alpha(&self) -> u8 {
        self.alpha
    }

    /// Cached edges, valid as of the last [`UIElement::update_component`]
    pub const fn boundaries(&self) -> Boundaries {
        self.boundaries
    }

    /// Cached surface, valid as of the last [`UIElement::update_component`]
    pub const fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Raw flag set
    pub const fn flags(&self) -> ElementFlags {
        self.flags
    }

    /// Receives input
    pub const fn is_active(&self) -> bool {
        self.flags.contains(ElementFlags::ACTIVE)
    }

    /// Is rendered
    pub const fn is_visible(&self) -> bool {
        self.flags.contains(ElementFlags::VISIBLE)
    }

    /// Start receiving input
    pub fn activate(&mut self) {
        self.flags.insert(ElementFlags::ACTIVE);
    }

    /// Stop receiving input
    pub fn deactivate(&mut self) {
        self.flags.remove(ElementFlags::ACTIVE);
    }

    /// Start rendering
    pub fn show(&mut self) {
        self.flags.insert(ElementFlags::VISIBLE);
    }

    /// Stop rendering
    pub fn hide(&mut self) {
        self.flags.remove(ElementFlags::VISIBLE);
    }

    /// Place the top-left corner
    pub fn set_position(&mut self, position: Point, update_component: bool) {
        self.position = position;
        if update_component {
            self.update_component();
        }
    }

    /// Displace by `delta`
    pub fn move_by(&mut self, delta: Point, update_component: bool) {
        self.set_position(self.position + delta, update_component);
    }

    /// Resize
    pub fn set_size(&mut self, size: Size, update_component: bool) {
        self.size = size;
        if update_component {
            self.update_component();
        }
    }

    /// Recolor
    pub fn set_color(&mut self, color: Color, update_component: bool) {
        self.color = color;
        if update_component {
            self.update_component();
        }
    }

    /// Change opacity
    pub fn set_alpha(&mut self, alpha: u8, update_component: bool) {
        self.alpha = alpha;
        if update_component {
            self.update_component();
        }
    }

    /// Recompute boundaries and the filled surface from the current fields
    pub fn update_component(&mut self) {
        self.update_boundaries();
        self.surface = Surface::filled(self.size, self.color, self.alpha);
    }

    /// Recompute only the boundary cache
    pub(crate) fn update_boundaries(&mut self) {
        self.boundaries = Boundaries::from_rect(self.position, self.size);
    }

    /// Install a surface produced by a specialised component
    pub(crate) fn set_surface(&mut self, surface: Surface) {
        self.surface = surface;
    }

    /// Inclusive overlap test on the cached boundaries
    pub const fn collides(&self, other: &Self) -> bool {
        self.boundaries.intersects(&other.boundaries)
    }

    /// Inclusive containment test on position and size
    pub fn mouse_over(&self, point: Point) -> bool {
        Boundaries::from_rect(self.position, self.size).contains(point)
    }

    /// Blit the cached surface at the element's position
    pub fn render(&self, target: &mut dyn RenderTarget) {
        target.blit(&self.surface, self.position);
    }

    /// Place `other` relative to this element
    ///
    /// The anchor is `self.position + offset`, where `offset` is read as a
    /// percentage of this element's size when `percent` is set. `other` is
    /// then shifted by 0, half or all of its own size per axis according to
    /// `h_align` / `v_align`.
    pub fn position_component_relative(
        &self,
        other: &mut dyn Widget,
        offset: Point,
        percent: bool,
        h_align: Alignment,
        v_align: Alignment,
    ) {
        let offset = if percent {
            Point::new(
                percent_of(self.size.width(), offset.x),
                percent_of(self.size.height(), offset.y),
            )
        } else {
            offset
        };
        let target = aligned_origin(self.position + offset, other.element().size(), h_align, v_align);
        other.update_position(target, true);
    }

    /// Fractional position of `other` inside this element's free span
    ///
    /// Per axis: 0.5 when both extents are equal, 0 when the positions
    /// coincide, otherwise `(other.pos - self.pos) / (self.size - other.size)`.
    pub fn offset_ratio(&self, other: &Self) -> (f64, f64) {
        fn axis(parent_pos: i32, parent_extent: u32, child_pos: i32, child_extent: u32) -> f64 {
            if parent_extent == child_extent {
                0.5
            } else if child_pos == parent_pos {
                0.0
            } else {
                f64::from(child_pos - parent_pos) / (f64::from(parent_extent) - f64::from(child_extent))
            }
        }
        (
            axis(self.position.x, self.size.width(), other.position.x, other.size.width()),
            axis(self.position.y, self.size.height(), other.position.y, other.size.height()),
        )
    }

    /// Reposition `other` so it keeps its offset ratio once this element is `new_size`
    ///
    /// With `scale_component` the other widget is first rescaled by the same
    /// factor as this element. This element's own size is left untouched.
    pub fn maintain_relative_position(
        &self,
        other: &mut dyn Widget,
        new_size: Size,
        scale_component: bool,
        update_component: bool,
    ) {
        let (ratio_x, ratio_y) = self.offset_ratio(other.element());

        if scale_component {
            let current = other.element().size();
            let scale = |extent: u32, from: u32, to: u32| {
                let scaled = round_even(f64::from(extent) * f64::from(to) / f64::from(from));
                u32::try_from(scaled.max(1)).unwrap_or(1)
            };
            let scaled = Size::from_extents(
                scale(current.width(), self.size.width(), new_size.width()),
                scale(current.height(), self.size.height(), new_size.height()),
            );
            other.update_size(scaled, false);
        }

        let child = other.element().size();
        let target = Point::new(
            self.position.x + round_even(ratio_x * (f64::from(new_size.width()) - f64::from(child.width()))),
            self.position.y + round_even(ratio_y * (f64::from(new_size.height()) - f64::from(child.height()))),
        );
        other.update_position(target, update_component);
    }
}

/// Capability interface shared by every component kind
///
/// Geometry and appearance mutations go through these methods rather than
/// through [`Widget::element_mut`], so that composite widgets can keep their
/// parts in step and specialised widgets can rebuild their own surfaces.
pub trait Widget {
    /// Base element
    fn element(&self) -> &UIElement;

    /// Mutable base element
    fn element_mut(&mut self) -> &mut UIElement;

    /// Draw onto `target`; only called for visible widgets
    fn render(&self, target: &mut dyn RenderTarget);

    /// Offer an event; returns whether it was consumed
    fn handle_event(&mut self, _event: &InputEvent, _input: &InputState) -> bool {
        false
    }

    /// Recompute every cache this widget owns
    fn update_component(&mut self);

    /// Place the top-left corner, carrying any parts along
    fn update_position(&mut self, position: Point, update_component: bool) {
        self.element_mut().set_position(position, false);
        if update_component {
            self.update_component();
        }
    }

    /// Displace by `delta`
    fn move_by(&mut self, delta: Point, update_component: bool) {
        let target = self.element().position() + delta;
        self.update_position(target, update_component);
    }

    /// Resize; widgets whose size is derived ignore this
    fn update_size(&mut self, size: Size, update_component: bool) {
        self.element_mut().set_size(size, false);
        if update_component {
            self.update_component();
        }
    }

    /// Change opacity, optionally for every part as well
    fn set_alpha(&mut self, alpha: u8, _propagate_children: bool, update_component: bool) {
        self.element_mut().set_alpha(alpha, false);
        if update_component {
            self.update_component();
        }
    }

    /// Start receiving input
    fn activate(&mut self) {
        self.element_mut().activate();
    }

    /// Stop receiving input
    fn deactivate(&mut self) {
        self.element_mut().deactivate();
    }

    /// Start rendering
    fn show(&mut self) {
        self.element_mut().show();
    }

    /// Stop rendering
    fn hide(&mut self) {
        self.element_mut().hide();
    }

    /// Component name
    fn name(&self) -> &str {
        self.element().name()
    }

    /// Sort key
    fn priority(&self) -> u32 {
        self.element().priority()
    }

    /// Receives input
    fn is_active(&self) -> bool {
        self.element().is_active()
    }

    /// Is rendered
    fn is_visible(&self) -> bool {
        self.element().is_visible()
    }
}

impl Widget for UIElement {
    fn element(&self) -> &UIElement {
        self
    }

    fn element_mut(&mut self) -> &mut UIElement {
        self
    }

    fn render(&self, target: &mut dyn RenderTarget) {
        UIElement::render(self, target);
    }

    fn update_component(&mut self) {
        UIElement::update_component(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn element(name: &str, x: i32, y: i32, w: u32, h: u32) -> UIElement {
        UIElement::new(name, 0, Point::new(x, y), Size::new(w, h).unwrap(), Color::WHITE, 255).unwrap()
    }

    #[test]
    fn test_boundaries_follow_setters() {
        let mut e = element("e", 0, 0, 10, 10);
        e.set_position(Point::new(5, 7), true);
        e.set_size(Size::new(20, 30).unwrap(), true);
        assert_eq!(e.boundaries(), Boundaries { top: 7, left: 5, right: 25, bottom: 37 });
        assert_eq!(e.surface().size(), Size::new(20, 30).unwrap());
    }

    #[test]
    fn test_deferred_update_keeps_old_cache() {
        let mut e = element("e", 0, 0, 10, 10);
        e.move_by(Point::new(3, 4), false);
        assert_eq!(e.boundaries().left, 0);
        e.update_component();
        assert_eq!(e.boundaries(), Boundaries { top: 4, left: 3, right: 13, bottom: 14 });
    }

    #[test]
    fn test_collides_inclusive_edges() {
        let a = element("a", 0, 0, 10, 10);
        let b = element("b", 10, 10, 5, 5);
        let c = element("c", 11, 0, 5, 5);
        assert!(a.collides(&b));
        assert!(!a.collides(&c));
    }

    #[test]
    fn test_mouse_over_inclusive() {
        let e = element("e", 100, 100, 200, 100);
        assert!(e.mouse_over(Point::new(100, 100)));
        assert!(e.mouse_over(Point::new(300, 200)));
        assert!(!e.mouse_over(Point::new(301, 200)));
        assert!(!e.mouse_over(Point::new(50, 50)));
    }

    #[test]
    fn test_relative_anchor_math() {
        let parent = element("parent", 100, 100, 200, 100);
        let mut child = element("child", 0, 0, 50, 20);
        parent.position_component_relative(&mut child, Point::new(50, 50), true, Alignment::Middle, Alignment::Middle);
        assert_eq!(child.position(), Point::new(175, 140));
    }

    #[test]
    fn test_relative_anchor_end_alignment_in_pixels() {
        let parent = element("parent", 10, 10, 100, 100);
        let mut child = element("child", 0, 0, 30, 20);
        parent.position_component_relative(&mut child, Point::new(100, 0), false, Alignment::End, Alignment::Start);
        assert_eq!(child.position(), Point::new(80, 10));
        assert_eq!(child.boundaries().right, 110);
    }

    #[test]
    fn test_offset_ratio_edge_cases() {
        let parent = element("parent", 0, 0, 200, 100);
        let same = element("same", 40, 0, 200, 100);
        let corner = element("corner", 0, 0, 50, 50);
        let third = element("third", 50, 25, 50, 25);

        assert_eq!(parent.offset_ratio(&same), (0.5, 0.5));
        assert_eq!(parent.offset_ratio(&corner), (0.0, 0.0));
        let (rx, ry) = parent.offset_ratio(&third);
        assert_relative_eq!(rx, 1.0 / 3.0);
        assert_relative_eq!(ry, 1.0 / 3.0);
    }

    #[test]
    fn test_resize_keeps_child_centred() {
        let parent = element("parent", 0, 0, 200, 100);
        let mut child = element("child", 75, 40, 50, 20);
        parent.maintain_relative_position(&mut child, Size::new(300, 100).unwrap(), false, true);
        // 0 + round(0.5 * (300 - 50))
        assert_eq!(child.position(), Point::new(125, 40));
        assert_eq!(child.boundaries().left, 125);
    }

    #[test]
    fn test_resize_with_scaling() {
        let parent = element("parent", 0, 0, 100, 100);
        let mut child = element("child", 0, 0, 50, 50);
        parent.maintain_relative_position(&mut child, Size::new(200, 50).unwrap(), true, true);
        assert_eq!(child.size(), Size::new(100, 25).unwrap());
        assert_eq!(child.position(), Point::new(0, 0));
    }

    #[test]
    fn test_elements_start_inactive_and_hidden() {
        let mut e = element("e", 0, 0, 1, 1);
        assert!(!e.is_active());
        assert!(!e.is_visible());
        e.activate();
        e.show();
        assert_eq!(e.flags(), ElementFlags::ACTIVE | ElementFlags::VISIBLE);
        assert!(UIElement::new("", 0, Point::new(0, 0), Size::new(1, 1).unwrap(), Color::BLACK, 0).is_err());
    }
}
