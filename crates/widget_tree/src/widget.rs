//! Widget node - a positioned, sized box that may own children

use crate::{Point, Rect, Size, WidgetId};
use serde::{Deserialize, Serialize};

/// Size given to widgets created without an explicit size
pub const DEFAULT_WIDGET_SIZE: Size = Size {
    width: 100.0,
    height: 100.0,
};

/// A node in the widget tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Widget {
    id: WidgetId,
    parent: Option<WidgetId>,
    /// IDs of child widgets, in layout and drawing order
    children: Vec<WidgetId>,
    /// Optional lookup name, unique by convention only
    #[serde(default)]
    pub name: Option<String>,
    pos: Point,
    size: Size,
    #[serde(default = "default_visible")]
    visible: bool,
}

fn default_visible() -> bool {
    true
}

impl Widget {
    /// Create a detached widget at the origin with the default size
    pub fn new() -> Self {
        Self {
            id: WidgetId::new(),
            parent: None,
            children: Vec::new(),
            name: None,
            pos: Point::ORIGIN,
            size: DEFAULT_WIDGET_SIZE,
            visible: true,
        }
    }

    /// Create a detached widget with a specific size
    pub fn with_size(width: f64, height: f64) -> Self {
        Self {
            size: Size::new(width, height),
            ..Self::new()
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.pos = Point::new(x, y);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn parent(&self) -> Option<WidgetId> {
        self.parent
    }

    pub fn children(&self) -> &[WidgetId] {
        &self.children
    }

    pub fn pos(&self) -> Point {
        self.pos
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn x(&self) -> f64 {
        self.pos.x
    }

    pub fn y(&self) -> f64 {
        self.pos.y
    }

    pub fn width(&self) -> f64 {
        self.size.width
    }

    pub fn height(&self) -> f64 {
        self.size.height
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_parts(self.pos, self.size)
    }

    /// Hit test against the widget box. Invisible widgets never collide.
    pub fn collide_point(&self, x: f64, y: f64) -> bool {
        self.visible && self.bounds().contains(x, y)
    }

    pub(crate) fn set_parent(&mut self, parent: Option<WidgetId>) {
        self.parent = parent;
    }

    pub(crate) fn push_child(&mut self, child: WidgetId) {
        self.children.push(child);
    }

    pub(crate) fn insert_child(&mut self, index: usize, child: WidgetId) {
        let index = index.min(self.children.len());
        self.children.insert(index, child);
    }

    pub(crate) fn remove_child(&mut self, child: WidgetId) -> bool {
        match self.children.iter().position(|&c| c == child) {
            Some(index) => {
                self.children.remove(index);
                true
            }
            None => false,
        }
    }

    pub(crate) fn clear_children(&mut self) -> Vec<WidgetId> {
        std::mem::take(&mut self.children)
    }

    pub(crate) fn set_pos(&mut self, pos: Point) -> bool {
        if self.pos == pos {
            return false;
        }
        self.pos = pos;
        true
    }

    pub(crate) fn set_size(&mut self, size: Size) -> bool {
        if self.size == size {
            return false;
        }
        self.size = size;
        true
    }

    pub(crate) fn set_visible(&mut self, visible: bool) -> bool {
        if self.visible == visible {
            return false;
        }
        self.visible = visible;
        true
    }
}

impl Default for Widget {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let widget = Widget::new();
        assert_eq!(widget.pos(), Point::ORIGIN);
        assert_eq!(widget.size(), DEFAULT_WIDGET_SIZE);
        assert!(widget.is_visible());
        assert!(widget.parent().is_none());
        assert!(widget.children().is_empty());
    }

    #[test]
    fn test_builder() {
        let widget = Widget::with_size(10.0, 5.0).named("button").at(3.0, 4.0);
        assert_eq!(widget.name.as_deref(), Some("button"));
        assert_eq!(widget.bounds(), Rect::new(3.0, 4.0, 10.0, 5.0));
    }

    #[test]
    fn test_collide_point() {
        let widget = Widget::with_size(10.0, 10.0);
        assert!(widget.collide_point(5.0, 5.0));
        assert!(!widget.collide_point(15.0, 5.0));

        let hidden = Widget::with_size(10.0, 10.0).hidden();
        assert!(!hidden.collide_point(5.0, 5.0));
    }

    #[test]
    fn test_setters_report_change() {
        let mut widget = Widget::new();
        assert!(!widget.set_pos(Point::ORIGIN));
        assert!(widget.set_pos(Point::new(1.0, 0.0)));
        assert!(!widget.set_size(DEFAULT_WIDGET_SIZE));
        assert!(widget.set_size(Size::new(1.0, 1.0)));
    }

    #[test]
    fn test_insert_child_clamps_index() {
        let mut widget = Widget::new();
        let a = WidgetId::new();
        let b = WidgetId::new();
        widget.push_child(a);
        widget.insert_child(10, b);
        assert_eq!(widget.children(), &[a, b]);
        assert!(widget.remove_child(a));
        assert!(!widget.remove_child(a));
    }

    #[test]
    fn test_serde_keeps_geometry() {
        let widget = Widget::with_size(12.0, 8.0).named("label").at(1.0, 2.0);
        let json = serde_json::to_string(&widget).unwrap();
        let parsed: Widget = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id(), widget.id());
        assert_eq!(parsed.bounds(), widget.bounds());
        assert_eq!(parsed.name.as_deref(), Some("label"));
    }
}
