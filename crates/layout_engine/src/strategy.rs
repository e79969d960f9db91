//! The layout strategy seam
//!
//! A layout widget delegates all arithmetic to a [`LayoutStrategy`]: given the
//! layout origin and a snapshot of its children, the strategy returns where
//! each child goes, what size it should have, and the resulting content size.
//! Strategies never touch the tree, which keeps a pass a pure function of
//! child geometry.

use widget_tree::{Point, Size, Widget, WidgetId};

/// Snapshot of a child's geometry at the start of a pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChildGeometry {
    pub id: WidgetId,
    pub pos: Point,
    pub size: Size,
}

impl ChildGeometry {
    pub fn new(id: WidgetId, pos: Point, size: Size) -> Self {
        Self { id, pos, size }
    }

    pub fn of(widget: &Widget) -> Self {
        Self::new(widget.id(), widget.pos(), widget.size())
    }

    /// Finite position and a finite, non-negative size.
    /// Children failing this are left out of measurement and placement.
    pub fn is_well_formed(&self) -> bool {
        self.pos.is_finite() && self.size.is_well_formed()
    }
}

/// Where a child ends up after a pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub id: WidgetId,
    pub pos: Point,
    pub size: Size,
}

/// Result of [`LayoutStrategy::compute`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutOutcome {
    /// Bounding size of the arranged children, padding included
    pub content_size: Size,
    /// One entry per well-formed child, in child order
    pub placements: Vec<Placement>,
}

/// A policy that arranges children inside a layout widget.
///
/// `compute` must be deterministic: the same origin and children always
/// produce the same outcome. Resize cascades rely on this to reach a fixed
/// point.
pub trait LayoutStrategy: std::fmt::Debug {
    /// Short name used in logs and reports
    fn name(&self) -> &'static str;

    fn compute(&self, origin: Point, children: &[ChildGeometry]) -> LayoutOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_formed_child() {
        let id = WidgetId::new();
        assert!(ChildGeometry::new(id, Point::ORIGIN, Size::new(1.0, 1.0)).is_well_formed());
        assert!(!ChildGeometry::new(id, Point::ORIGIN, Size::new(-1.0, 1.0)).is_well_formed());
        assert!(!ChildGeometry::new(id, Point::new(f64::NAN, 0.0), Size::ZERO).is_well_formed());
    }

    #[test]
    fn test_snapshot_from_widget() {
        let widget = Widget::with_size(4.0, 3.0).at(1.0, 2.0);
        let child = ChildGeometry::of(&widget);
        assert_eq!(child.id, widget.id());
        assert_eq!(child.pos, Point::new(1.0, 2.0));
        assert_eq!(child.size, Size::new(4.0, 3.0));
    }
}
