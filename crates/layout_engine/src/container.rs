//! Per-layout state: strategy, content size, and re-entrancy bookkeeping

use crate::LayoutStrategy;
use serde::{Deserialize, Serialize};
use widget_tree::Size;

/// What a layout does when its content size changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResizePropagation {
    /// Re-run the nearest enclosing layout
    #[default]
    NearestLayout,
    /// Only notify listeners
    Disabled,
}

/// Counters for a single layout widget
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutStats {
    /// Completed layout passes
    pub passes: u64,
    /// Distinct content size changes that were published
    pub content_resizes: u64,
    /// Layout requests that arrived mid-pass and were folded into a re-run
    pub deferred: u64,
}

/// State attached to every layout widget
#[derive(Debug)]
pub struct Container {
    strategy: Box<dyn LayoutStrategy>,
    content_size: Size,
    propagation: ResizePropagation,
    in_layout: bool,
    pending: bool,
    stats: LayoutStats,
}

impl Container {
    pub fn new(strategy: Box<dyn LayoutStrategy>) -> Self {
        Self {
            strategy,
            content_size: Size::ZERO,
            propagation: ResizePropagation::default(),
            in_layout: false,
            pending: false,
            stats: LayoutStats::default(),
        }
    }

    pub fn strategy(&self) -> &dyn LayoutStrategy {
        self.strategy.as_ref()
    }

    pub fn content_size(&self) -> Size {
        self.content_size
    }

    pub fn propagation(&self) -> ResizePropagation {
        self.propagation
    }

    pub fn stats(&self) -> LayoutStats {
        self.stats
    }

    pub fn is_in_layout(&self) -> bool {
        self.in_layout
    }

    pub(crate) fn set_propagation(&mut self, propagation: ResizePropagation) {
        self.propagation = propagation;
    }

    /// Enter a pass. If one is already running, record the request and
    /// return false; the running pass will repeat once it finishes.
    pub(crate) fn begin_pass(&mut self) -> bool {
        if self.in_layout {
            self.pending = true;
            self.stats.deferred += 1;
            return false;
        }
        self.in_layout = true;
        true
    }

    pub(crate) fn take_pending(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    pub(crate) fn end_pass(&mut self) {
        self.in_layout = false;
        self.pending = false;
    }

    pub(crate) fn record_pass(&mut self) {
        self.stats.passes += 1;
    }

    /// Store a new content size. Exact comparison, no epsilon.
    /// Returns true when the stored value changed.
    pub(crate) fn store_content_size(&mut self, size: Size) -> bool {
        if self.content_size == size {
            return false;
        }
        self.content_size = size;
        self.stats.content_resizes += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BoxLayout;

    #[test]
    fn test_store_content_size_ignores_same_value() {
        let mut container = Container::new(Box::new(BoxLayout::horizontal()));
        assert!(!container.store_content_size(Size::ZERO));
        assert!(container.store_content_size(Size::new(1.0, 2.0)));
        assert!(!container.store_content_size(Size::new(1.0, 2.0)));
        assert_eq!(container.stats().content_resizes, 1);
    }

    #[test]
    fn test_reentrant_pass_is_deferred() {
        let mut container = Container::new(Box::new(BoxLayout::horizontal()));
        assert!(container.begin_pass());
        assert!(!container.begin_pass());
        assert!(container.take_pending());
        assert!(!container.take_pending());
        container.end_pass();
        assert!(!container.is_in_layout());
        assert!(container.begin_pass());
        assert_eq!(container.stats().deferred, 1);
    }
}
