//! Error types for layout engine

use thiserror::Error;
use widget_tree::{TreeError, WidgetId};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Invalid orientation '{0}', only horizontal/vertical are supported")]
    InvalidOrientation(String),

    #[error("Invalid layout configuration: {0}")]
    InvalidConfig(String),

    #[error("Layout type '{0}' is abstract and cannot be instantiated")]
    AbstractInstantiation(String),

    #[error("Widget is not a layout: {0}")]
    NotALayout(WidgetId),

    #[error("Widget tree error: {0}")]
    Tree(#[from] TreeError),
}

pub type Result<T> = std::result::Result<T, LayoutError>;
