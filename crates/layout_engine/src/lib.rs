//! Layout Engine - Box layout and resize propagation
//!
//! This crate turns widgets into layouts: a layout owns a strategy that
//! positions and sizes its children, publishes the resulting content size,
//! and re-runs the nearest enclosing layout when that size changes.

mod box_layout;
mod container;
mod error;
mod layout_tree;
mod strategy;

pub use box_layout::*;
pub use container::*;
pub use error::*;
pub use layout_tree::*;
pub use strategy::*;
