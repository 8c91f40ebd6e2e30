//! Error types for dashview core.

use crate::element::ElementId;

/// Errors raised by element-tree operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// The element ID is invalid or the element has been released.
    #[error("invalid or released element {0:?}")]
    InvalidElement(ElementId),

    /// Attempted to make an element its own parent or ancestor.
    #[error("cannot make {child:?} a descendant of itself (parent {parent:?})")]
    CircularParentage {
        /// The element being moved.
        child: ElementId,
        /// The requested parent.
        parent: ElementId,
    },

    /// The element is not a direct child of the given parent.
    #[error("{child:?} is not a child of {parent:?}")]
    NotAChild {
        /// The requested parent.
        parent: ElementId,
        /// The element that was expected under it.
        child: ElementId,
    },
}

/// A specialized Result type for element-tree operations.
pub type TreeResult<T> = std::result::Result<T, TreeError>;
