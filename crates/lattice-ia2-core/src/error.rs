//! Error types for the in-memory accessible tree.

use std::fmt;

/// Errors that can occur while editing an [`AccessibleTree`](crate::AccessibleTree).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// The node key is invalid or the node has been destroyed.
    InvalidNode,
    /// Attempted to set a node as its own parent or ancestor.
    CircularParentage,
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidNode => write!(f, "Invalid or destroyed node"),
            Self::CircularParentage => {
                write!(f, "Cannot set a node as its own parent or ancestor")
            }
        }
    }
}

impl std::error::Error for TreeError {}

/// Result type for tree operations.
pub type TreeResult<T> = std::result::Result<T, TreeError>;
