//! Error types for widget tree operations

use crate::WidgetId;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("Widget not found: {0}")]
    WidgetNotFound(WidgetId),

    #[error("Widget {0} already has a parent")]
    AlreadyAttached(WidgetId),

    #[error("Adding widget {0} would create a cycle")]
    CycleDetected(WidgetId),

    #[error("Widget {0} is already in the tree")]
    DuplicateId(WidgetId),
}

pub type Result<T> = std::result::Result<T, TreeError>;
