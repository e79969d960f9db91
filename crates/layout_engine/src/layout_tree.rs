//! Layout tree: widgets plus the layouts that arrange them
//!
//! [`LayoutTree`] wraps a [`WidgetTree`] and attaches a [`Container`] to every
//! widget that is a layout. All mutations that can affect geometry go through
//! this type so that the layout contract holds:
//!
//! - adding a child to a layout re-runs that layout
//! - a layout pass publishes the content size and wraps the layout box to it
//! - a content size change re-runs the nearest enclosing layout, which may in
//!   turn change its own content size, one level at a time up the tree
//! - moving a layout re-runs it, because child positions are absolute
//!
//! Cascades stop once a level produces the content size it already had.

use crate::{
    BoxLayout, BoxLayoutOptions, ChildGeometry, Container, LayoutError, LayoutStats,
    LayoutStrategy, Placement, ResizePropagation, Result,
};
use std::collections::HashMap;
use widget_tree::{EventKind, ListenerId, Point, Size, Widget, WidgetEvent, WidgetId, WidgetTree};

/// Upper bound on back-to-back passes of one layout caused by requests that
/// arrived while it was already running.
pub const MAX_RELAYOUT_PASSES: usize = 8;

/// Options for [`LayoutTree::add_child_with`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddOptions {
    /// Re-run the parent layout after inserting
    pub do_layout: bool,
    /// Append (true) or insert before existing children (false)
    pub front: bool,
}

impl Default for AddOptions {
    fn default() -> Self {
        Self {
            do_layout: true,
            front: true,
        }
    }
}

/// Widget tree with layout behavior
#[derive(Debug, Default)]
pub struct LayoutTree {
    widgets: WidgetTree,
    containers: HashMap<WidgetId, Container>,
}

impl LayoutTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tree(&self) -> &WidgetTree {
        &self.widgets
    }

    pub fn widget(&self, id: WidgetId) -> Option<&Widget> {
        self.widgets.get(id)
    }

    pub fn is_layout(&self, id: WidgetId) -> bool {
        self.containers.contains_key(&id)
    }

    pub fn container(&self, id: WidgetId) -> Option<&Container> {
        self.containers.get(&id)
    }

    pub fn content_size(&self, id: WidgetId) -> Option<Size> {
        self.containers.get(&id).map(Container::content_size)
    }

    pub fn stats(&self, id: WidgetId) -> Option<LayoutStats> {
        self.containers.get(&id).map(Container::stats)
    }

    fn container_mut(&mut self, id: WidgetId) -> Result<&mut Container> {
        self.containers.get_mut(&id).ok_or(LayoutError::NotALayout(id))
    }

    // ========== Construction ==========

    /// Insert a plain widget as a detached root
    pub fn add_widget(&mut self, widget: Widget) -> Result<WidgetId> {
        Ok(self.widgets.insert(widget)?)
    }

    /// Insert a layout widget driven by `strategy`
    pub fn add_layout<S>(&mut self, widget: Widget, strategy: S) -> Result<WidgetId>
    where
        S: LayoutStrategy + 'static,
    {
        let id = self.widgets.insert(widget)?;
        self.containers.insert(id, Container::new(Box::new(strategy)));
        Ok(id)
    }

    /// Validate `options` and insert a box layout.
    /// Nothing is inserted when validation fails.
    pub fn add_box_layout(&mut self, widget: Widget, options: &BoxLayoutOptions) -> Result<WidgetId> {
        let strategy = BoxLayout::from_options(options)?;
        self.add_layout(widget, strategy)
    }

    // ========== Structure ==========

    /// Append `child` to `parent` and re-run the parent if it is a layout
    pub fn add_child(&mut self, parent: WidgetId, child: WidgetId) -> Result<()> {
        self.add_child_with(parent, child, AddOptions::default())
    }

    pub fn add_child_with(&mut self, parent: WidgetId, child: WidgetId, options: AddOptions) -> Result<()> {
        // A layout that never ran still has its initial box; wrap it to its
        // content before the parent measures it.
        let never_ran = self.stats(child).is_some_and(|s| s.passes == 0);
        if options.do_layout && never_ran && self.widgets.parent(child).is_none() {
            self.do_layout(child)?;
        }
        self.widgets.add_child(parent, child, options.front)?;
        if options.do_layout && self.is_layout(parent) {
            self.do_layout(parent)?;
        }
        Ok(())
    }

    /// Detach `child` from `parent`, re-running the parent if it is a layout.
    /// Returns false if `child` was not a child of `parent`.
    pub fn remove_child(&mut self, parent: WidgetId, child: WidgetId) -> Result<bool> {
        let removed = self.widgets.remove_child(parent, child)?;
        if removed && self.is_layout(parent) {
            self.do_layout(parent)?;
        }
        Ok(removed)
    }

    /// Move `id` to the end of its parent's children. A layout parent
    /// re-runs, since child order is layout order.
    pub fn bring_to_front(&mut self, id: WidgetId) -> Result<()> {
        self.widgets.bring_to_front(id)?;
        if let Some(parent) = self.widgets.parent(id).filter(|p| self.is_layout(*p)) {
            self.do_layout(parent)?;
        }
        Ok(())
    }

    /// Drop a widget and its descendants
    pub fn remove_subtree(&mut self, id: WidgetId) -> Result<()> {
        let parent = self.widgets.widget(id)?.parent();
        for removed in self.widgets.remove_subtree(id)? {
            self.containers.remove(&removed);
        }
        if let Some(parent) = parent.filter(|p| self.is_layout(*p)) {
            self.do_layout(parent)?;
        }
        Ok(())
    }

    /// The layout responsible for `id`: `id` itself when it is a layout,
    /// otherwise the nearest layout among its ancestors.
    pub fn get_parent_layout(&self, id: WidgetId) -> Option<WidgetId> {
        if self.is_layout(id) {
            return Some(id);
        }
        self.widgets.ancestors(id).into_iter().find(|a| self.is_layout(*a))
    }

    pub fn set_resize_propagation(&mut self, id: WidgetId, propagation: ResizePropagation) -> Result<()> {
        self.container_mut(id)?.set_propagation(propagation);
        Ok(())
    }

    // ========== Geometry ==========

    /// Move a widget. A layout re-runs itself so its children follow.
    pub fn move_to(&mut self, id: WidgetId, pos: Point) -> Result<bool> {
        let moved = self.widgets.set_pos(id, pos)?;
        if moved && self.is_layout(id) {
            self.do_layout(id)?;
        }
        Ok(moved)
    }

    /// Resize a widget. If its parent is a layout, the parent re-runs.
    pub fn resize(&mut self, id: WidgetId, size: Size) -> Result<bool> {
        let resized = self.widgets.set_size(id, size)?;
        if resized {
            if let Some(parent) = self.widgets.parent(id).filter(|p| self.is_layout(*p)) {
                self.do_layout(parent)?;
            }
        }
        Ok(resized)
    }

    /// Show or hide a widget. Hidden widgets still take part in layout.
    pub fn set_visible(&mut self, id: WidgetId, visible: bool) -> Result<bool> {
        Ok(self.widgets.set_visible(id, visible)?)
    }

    // ========== Content size ==========

    /// Set the content width. No-op when unchanged.
    pub fn set_content_width(&mut self, id: WidgetId, width: f64) -> Result<bool> {
        let current = self.container_mut(id)?.content_size();
        self.set_content_size(id, Size::new(width, current.height))
    }

    /// Set the content height. No-op when unchanged.
    pub fn set_content_height(&mut self, id: WidgetId, height: f64) -> Result<bool> {
        let current = self.container_mut(id)?.content_size();
        self.set_content_size(id, Size::new(current.width, height))
    }

    /// Set both content extents, firing `ContentResize` once if either changed
    pub fn set_content_size(&mut self, id: WidgetId, size: Size) -> Result<bool> {
        if !self.container_mut(id)?.store_content_size(size) {
            return Ok(false);
        }
        self.content_resized(id, size)?;
        Ok(true)
    }

    /// Notify listeners of a content size change and bubble it to the
    /// nearest enclosing layout.
    fn content_resized(&mut self, id: WidgetId, size: Size) -> Result<()> {
        self.widgets.emit(
            id,
            WidgetEvent::ContentResize {
                width: size.width,
                height: size.height,
            },
        );
        self.bubble(id)
    }

    /// Re-run the nearest layout enclosing `id`, unless `id` opted out
    fn bubble(&mut self, id: WidgetId) -> Result<()> {
        if self.container_mut(id)?.propagation() == ResizePropagation::Disabled {
            return Ok(());
        }
        let Some(parent) = self.widgets.parent(id) else {
            return Ok(());
        };
        if let Some(layout) = self.get_parent_layout(parent) {
            tracing::debug!(from = %id, to = %layout, "re-running enclosing layout");
            self.do_layout(layout)?;
        }
        Ok(())
    }

    // ========== Layout ==========

    /// Recompute child geometry and content size of the layout `id`.
    ///
    /// A call that arrives while `id` is already mid-pass is folded into one
    /// more pass after the current one, instead of recursing.
    pub fn do_layout(&mut self, id: WidgetId) -> Result<()> {
        if !self.container_mut(id)?.begin_pass() {
            tracing::trace!(layout = %id, "layout in progress, deferring request");
            return Ok(());
        }

        let mut passes = 0;
        loop {
            passes += 1;
            let result = self.run_pass(id);
            let Some(container) = self.containers.get_mut(&id) else {
                return result;
            };
            if result.is_err() || !container.take_pending() {
                container.end_pass();
                return result;
            }
            if passes >= MAX_RELAYOUT_PASSES {
                container.end_pass();
                tracing::warn!(layout = %id, passes, "layout did not settle, giving up");
                return Ok(());
            }
        }
    }

    fn run_pass(&mut self, id: WidgetId) -> Result<()> {
        let widget = self.widgets.widget(id)?;
        let origin = widget.pos();
        let children: Vec<ChildGeometry> = widget
            .children()
            .iter()
            .filter_map(|child| self.widgets.get(*child))
            .map(ChildGeometry::of)
            .collect();

        let container = self.container_mut(id)?;
        let outcome = container.strategy().compute(origin, &children);
        container.record_pass();
        tracing::trace!(
            layout = %id,
            strategy = container.strategy().name(),
            children = children.len(),
            placed = outcome.placements.len(),
            width = outcome.content_size.width,
            height = outcome.content_size.height,
            "layout pass"
        );

        for placement in outcome.placements {
            self.apply_placement(placement)?;
        }
        self.publish(id, outcome.content_size)?;
        self.widgets.emit(id, WidgetEvent::Layout);
        Ok(())
    }

    /// Move and size one child. A nested layout that was moved or resized
    /// re-runs, which also wraps its box back to its content.
    fn apply_placement(&mut self, placement: Placement) -> Result<()> {
        let resized = self.widgets.set_size(placement.id, placement.size)?;
        let moved = self.widgets.set_pos(placement.id, placement.pos)?;
        if (moved || resized) && self.is_layout(placement.id) {
            self.do_layout(placement.id)?;
        }
        Ok(())
    }

    /// Store the content size and wrap the layout box to it. The box is
    /// resized before the enclosing layout is notified, so that layout
    /// measures the new extent. Only a content change bubbles.
    fn publish(&mut self, id: WidgetId, content: Size) -> Result<()> {
        let changed = self.container_mut(id)?.store_content_size(content);
        self.widgets.set_size(id, content)?;
        if changed {
            self.content_resized(id, content)?;
        }
        Ok(())
    }

    // ========== Events ==========

    pub fn subscribe<F>(&mut self, id: WidgetId, listener: F) -> ListenerId
    where
        F: FnMut(WidgetId, &WidgetEvent) + 'static,
    {
        self.widgets.subscribe(id, listener)
    }

    pub fn subscribe_kind<F>(&mut self, id: WidgetId, kind: EventKind, listener: F) -> ListenerId
    where
        F: FnMut(WidgetId, &WidgetEvent) + 'static,
    {
        self.widgets.subscribe_kind(id, kind, listener)
    }

    pub fn unsubscribe(&mut self, listener: ListenerId) -> bool {
        self.widgets.unsubscribe(listener)
    }
}
