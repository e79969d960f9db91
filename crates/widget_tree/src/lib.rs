//! Widget Tree - Widget nodes, geometry, and event dispatch
//!
//! This crate provides the widget base that layouts build on: an arena of
//! widgets addressed by stable IDs, parent/children bookkeeping, and a closed
//! set of events delivered to per-widget listeners.

mod error;
mod event;
mod geometry;
mod tree;
mod widget;
mod widget_id;

pub use error::*;
pub use event::*;
pub use geometry::*;
pub use tree::*;
pub use widget::*;
pub use widget_id::*;
