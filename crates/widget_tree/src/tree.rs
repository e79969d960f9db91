//! Widget tree storage and structural operations

use crate::{
    EventDispatcher, EventKind, ListenerId, Point, Result, Size, TreeError, Widget, WidgetEvent,
    WidgetId,
};
use std::collections::HashMap;

/// Arena of widgets addressed by ID.
///
/// The tree exclusively owns every widget. A widget appears in at most one
/// parent's children list, and its `parent` field always names that parent.
#[derive(Debug, Default)]
pub struct WidgetTree {
    widgets: HashMap<WidgetId, Widget>,
    events: EventDispatcher,
}

impl WidgetTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a widget as a detached root and return its ID.
    /// An ID already present in the tree is rejected.
    pub fn insert(&mut self, mut widget: Widget) -> Result<WidgetId> {
        let id = widget.id();
        if self.widgets.contains_key(&id) {
            return Err(TreeError::DuplicateId(id));
        }
        // Structure is owned by the tree; a widget arrives without links.
        widget.set_parent(None);
        widget.clear_children();
        self.widgets.insert(id, widget);
        Ok(id)
    }

    pub fn get(&self, id: WidgetId) -> Option<&Widget> {
        self.widgets.get(&id)
    }

    /// Like [`get`](Self::get), but reports a missing widget as an error
    pub fn widget(&self, id: WidgetId) -> Result<&Widget> {
        self.widgets.get(&id).ok_or(TreeError::WidgetNotFound(id))
    }

    fn widget_mut(&mut self, id: WidgetId) -> Result<&mut Widget> {
        self.widgets.get_mut(&id).ok_or(TreeError::WidgetNotFound(id))
    }

    pub fn contains(&self, id: WidgetId) -> bool {
        self.widgets.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = WidgetId> + '_ {
        self.widgets.keys().copied()
    }

    /// Children of `id`, or an empty slice for unknown widgets
    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.widgets.get(&id).map(|w| w.children()).unwrap_or(&[])
    }

    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.widgets.get(&id).and_then(|w| w.parent())
    }

    /// Ancestors of `id`, nearest first
    pub fn ancestors(&self, id: WidgetId) -> Vec<WidgetId> {
        let mut result = Vec::new();
        let mut current = self.parent(id);
        while let Some(parent) = current {
            result.push(parent);
            current = self.parent(parent);
        }
        result
    }

    /// True if `ancestor` is `id` itself or one of its ancestors
    pub fn is_ancestor(&self, ancestor: WidgetId, id: WidgetId) -> bool {
        ancestor == id || self.ancestors(id).contains(&ancestor)
    }

    /// Find the first widget carrying `name`
    pub fn find_by_name(&self, name: &str) -> Option<WidgetId> {
        self.widgets
            .values()
            .find(|w| w.name.as_deref() == Some(name))
            .map(|w| w.id())
    }

    /// Attach `child` to `parent`.
    ///
    /// With `front` the child is appended (drawn last, laid out last),
    /// otherwise it is inserted before every existing child.
    pub fn add_child(&mut self, parent: WidgetId, child: WidgetId, front: bool) -> Result<()> {
        self.widget(parent)?;
        if self.widget(child)?.parent().is_some() {
            return Err(TreeError::AlreadyAttached(child));
        }
        if self.is_ancestor(child, parent) {
            return Err(TreeError::CycleDetected(child));
        }

        let parent_widget = self.widget_mut(parent)?;
        if front {
            parent_widget.push_child(child);
        } else {
            parent_widget.insert_child(0, child);
        }
        self.widget_mut(child)?.set_parent(Some(parent));
        self.emit(child, WidgetEvent::Parent);
        Ok(())
    }

    /// Detach `child` from `parent`. Returns false if it was not a child.
    pub fn remove_child(&mut self, parent: WidgetId, child: WidgetId) -> Result<bool> {
        if !self.widget_mut(parent)?.remove_child(child) {
            return Ok(false);
        }
        if let Some(widget) = self.widgets.get_mut(&child) {
            widget.set_parent(None);
        }
        self.emit(child, WidgetEvent::Parent);
        Ok(true)
    }

    /// Move a widget to the end of its parent's children
    pub fn bring_to_front(&mut self, id: WidgetId) -> Result<()> {
        let Some(parent) = self.widget(id)?.parent() else {
            return Ok(());
        };
        self.remove_child(parent, id)?;
        self.add_child(parent, id, true)
    }

    /// Detach a widget and drop it with all its descendants.
    /// Returns the removed IDs, the subtree root first.
    pub fn remove_subtree(&mut self, id: WidgetId) -> Result<Vec<WidgetId>> {
        if let Some(parent) = self.widget(id)?.parent() {
            self.remove_child(parent, id)?;
        }

        let mut removed = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(mut widget) = self.widgets.remove(&current) {
                stack.extend(widget.clear_children().into_iter().rev());
                self.events.clear(current);
                removed.push(current);
            }
        }
        tracing::trace!(root = %id, count = removed.len(), "removed widget subtree");
        Ok(removed)
    }

    /// Set the widget position. Emits `Move` when the value changed.
    pub fn set_pos(&mut self, id: WidgetId, pos: Point) -> Result<bool> {
        if !self.widget_mut(id)?.set_pos(pos) {
            return Ok(false);
        }
        self.emit(id, WidgetEvent::Move { x: pos.x, y: pos.y });
        Ok(true)
    }

    /// Set the widget size. Emits `Resize` to the widget and
    /// `ParentResize` to each child when the value changed.
    pub fn set_size(&mut self, id: WidgetId, size: Size) -> Result<bool> {
        let widget = self.widget_mut(id)?;
        if !widget.set_size(size) {
            return Ok(false);
        }
        let children = widget.children().to_vec();
        self.emit(id, WidgetEvent::Resize { width: size.width, height: size.height });
        for child in children {
            self.emit(child, WidgetEvent::ParentResize { width: size.width, height: size.height });
        }
        Ok(true)
    }

    pub fn set_visible(&mut self, id: WidgetId, visible: bool) -> Result<bool> {
        Ok(self.widget_mut(id)?.set_visible(visible))
    }

    pub fn emit(&mut self, id: WidgetId, event: WidgetEvent) {
        self.events.dispatch(id, &event);
    }

    pub fn subscribe<F>(&mut self, id: WidgetId, listener: F) -> ListenerId
    where
        F: FnMut(WidgetId, &WidgetEvent) + 'static,
    {
        self.events.subscribe(id, listener)
    }

    pub fn subscribe_kind<F>(&mut self, id: WidgetId, kind: EventKind, listener: F) -> ListenerId
    where
        F: FnMut(WidgetId, &WidgetEvent) + 'static,
    {
        self.events.subscribe_kind(id, kind, listener)
    }

    pub fn unsubscribe(&mut self, listener: ListenerId) -> bool {
        self.events.unsubscribe(listener)
    }
}
