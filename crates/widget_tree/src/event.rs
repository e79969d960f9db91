//! Typed widget events and per-widget listener lists

use crate::WidgetId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Every event a widget can emit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum WidgetEvent {
    /// The widget position changed
    Move { x: f64, y: f64 },
    /// The widget size changed
    Resize { width: f64, height: f64 },
    /// The parent of this widget was resized
    ParentResize { width: f64, height: f64 },
    /// The widget was attached to or detached from a parent
    Parent,
    /// A layout pass finished on this widget
    Layout,
    /// The content size of this layout changed
    ContentResize { width: f64, height: f64 },
}

impl WidgetEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            WidgetEvent::Move { .. } => EventKind::Move,
            WidgetEvent::Resize { .. } => EventKind::Resize,
            WidgetEvent::ParentResize { .. } => EventKind::ParentResize,
            WidgetEvent::Parent => EventKind::Parent,
            WidgetEvent::Layout => EventKind::Layout,
            WidgetEvent::ContentResize { .. } => EventKind::ContentResize,
        }
    }
}

/// Discriminant of [`WidgetEvent`], used to filter subscriptions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Move,
    Resize,
    ParentResize,
    Parent,
    Layout,
    ContentResize,
}

/// Handle returned by a subscription, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// A listener receives the emitting widget and the event
pub type Listener = Box<dyn FnMut(WidgetId, &WidgetEvent)>;

struct Subscription {
    id: ListenerId,
    kind: Option<EventKind>,
    listener: Listener,
}

/// Listener registry keyed by widget.
///
/// Listeners only observe; they are handed no access to the tree, so a
/// dispatch can never mutate the structure it is reporting on.
#[derive(Default)]
pub struct EventDispatcher {
    next_id: u64,
    subscriptions: HashMap<WidgetId, Vec<Subscription>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Listen to every event emitted by `widget`
    pub fn subscribe<F>(&mut self, widget: WidgetId, listener: F) -> ListenerId
    where
        F: FnMut(WidgetId, &WidgetEvent) + 'static,
    {
        self.add(widget, None, Box::new(listener))
    }

    /// Listen to a single kind of event emitted by `widget`
    pub fn subscribe_kind<F>(&mut self, widget: WidgetId, kind: EventKind, listener: F) -> ListenerId
    where
        F: FnMut(WidgetId, &WidgetEvent) + 'static,
    {
        self.add(widget, Some(kind), Box::new(listener))
    }

    fn add(&mut self, widget: WidgetId, kind: Option<EventKind>, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.subscriptions.entry(widget).or_default().push(Subscription { id, kind, listener });
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, listener: ListenerId) -> bool {
        for subs in self.subscriptions.values_mut() {
            if let Some(index) = subs.iter().position(|s| s.id == listener) {
                subs.remove(index);
                return true;
            }
        }
        false
    }

    /// Deliver `event` to the listeners of `widget`, in subscription order
    pub fn dispatch(&mut self, widget: WidgetId, event: &WidgetEvent) {
        let Some(subs) = self.subscriptions.get_mut(&widget) else {
            return;
        };
        let kind = event.kind();
        tracing::trace!(widget = %widget, ?kind, listeners = subs.len(), "dispatching event");
        for sub in subs.iter_mut() {
            if sub.kind.map_or(true, |k| k == kind) {
                (sub.listener)(widget, event);
            }
        }
    }

    /// Drop every listener attached to `widget`
    pub fn clear(&mut self, widget: WidgetId) {
        self.subscriptions.remove(&widget);
    }

    pub fn listener_count(&self, widget: WidgetId) -> usize {
        self.subscriptions.get(&widget).map_or(0, Vec::len)
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let listeners: usize = self.subscriptions.values().map(Vec::len).sum();
        f.debug_struct("EventDispatcher")
            .field("widgets", &self.subscriptions.len())
            .field("listeners", &listeners)
            .finish()
    }
}
