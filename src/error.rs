//! Error types for the DOM monitor.
//!
//! Errors here are non-fatal: command handlers convert them into named
//! outbound events (`CHANGES_ERROR`, `INLINE_EDIT_ERROR`) rather than
//! propagating them to the hosting frame. The `Display` strings are the
//! exact `error` strings carried on the wire.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use dom_monitor::{Result, Error};
//!
//! fn resolve(key: &str) -> Result<NodeId> {
//!     targets.first().copied().ok_or_else(|| Error::element_not_found(key))
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Target resolution | [`Error::ElementNotFound`], [`Error::ArrayIndexNotFound`], [`Error::NoTargets`] |
//! | Selection | [`Error::NoSelection`] |
//! | Inline edit | [`Error::InlineTargetMissing`], [`Error::NoDirectText`], [`Error::DynamicNotEditable`] |
//! | Mutation | [`Error::Mutation`] |
//! | External | [`Error::Json`] |

// ============================================================================
// Imports
// ============================================================================

use std::result::Result as StdResult;

use thiserror::Error;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Each variant includes the context that the corresponding error event
/// reports back to the hosting frame.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Target Resolution Errors
    // ========================================================================
    /// No element carries the requested identity key.
    #[error("Element not found: x-id=\"{element_id}\"")]
    ElementNotFound {
        /// The identity key that matched nothing.
        element_id: String,
    },

    /// A grouped update named an array index past the end of the group.
    #[error("Element at arrayIndex {array_index} not found")]
    ArrayIndexNotFound {
        /// The identity key of the group.
        element_id: String,
        /// The out-of-range index.
        array_index: usize,
    },

    /// Target resolution produced an empty set.
    #[error("No elements found")]
    NoTargets {
        /// The identity key that was being resolved, if any.
        element_id: Option<String>,
    },

    // ========================================================================
    // Selection Errors
    // ========================================================================
    /// A command needed a target but neither a key nor a selection exists.
    #[error("No element selected and no elementId provided")]
    NoSelection,

    // ========================================================================
    // Inline Edit Errors
    // ========================================================================
    /// Inline editing was requested for an element that cannot be resolved.
    #[error("No element found for inline editing")]
    InlineTargetMissing {
        /// The identity key from the command, if any.
        element_id: Option<String>,
    },

    /// The element has no direct text nodes to edit.
    #[error("Element has no direct text content")]
    NoDirectText,

    /// The element is dynamically rendered and its source is not editable.
    #[error("Dynamic element is not editable (source cannot be traced)")]
    DynamicNotEditable,

    // ========================================================================
    // Mutation Errors
    // ========================================================================
    /// A document mutation failed mid-command.
    #[error("{message}")]
    Mutation {
        /// Description of the failed mutation.
        message: String,
    },

    // ========================================================================
    // External Errors
    // ========================================================================
    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates an element-not-found error.
    #[inline]
    pub fn element_not_found(element_id: impl Into<String>) -> Self {
        Self::ElementNotFound {
            element_id: element_id.into(),
        }
    }

    /// Creates an array-index-not-found error.
    #[inline]
    pub fn array_index_not_found(element_id: impl Into<String>, array_index: usize) -> Self {
        Self::ArrayIndexNotFound {
            element_id: element_id.into(),
            array_index,
        }
    }

    /// Creates a no-targets error.
    #[inline]
    pub fn no_targets(element_id: Option<String>) -> Self {
        Self::NoTargets { element_id }
    }

    /// Creates an inline-target-missing error.
    #[inline]
    pub fn inline_target_missing(element_id: Option<String>) -> Self {
        Self::InlineTargetMissing { element_id }
    }

    /// Creates a mutation error.
    #[inline]
    pub fn mutation(message: impl Into<String>) -> Self {
        Self::Mutation {
            message: message.into(),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this is a target-resolution error.
    #[inline]
    #[must_use]
    pub fn is_target_error(&self) -> bool {
        matches!(
            self,
            Self::ElementNotFound { .. }
                | Self::ArrayIndexNotFound { .. }
                | Self::NoTargets { .. }
                | Self::NoSelection
        )
    }

    /// Returns `true` if this is an inline-edit rejection.
    #[inline]
    #[must_use]
    pub fn is_inline_rejection(&self) -> bool {
        matches!(
            self,
            Self::InlineTargetMissing { .. } | Self::NoDirectText | Self::DynamicNotEditable
        )
    }

    /// Returns the identity key attached to this error, if any.
    #[inline]
    #[must_use]
    pub fn element_id(&self) -> Option<&str> {
        match self {
            Self::ElementNotFound { element_id } | Self::ArrayIndexNotFound { element_id, .. } => {
                Some(element_id)
            }
            Self::NoTargets { element_id } | Self::InlineTargetMissing { element_id } => {
                element_id.as_deref()
            }
            _ => None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
