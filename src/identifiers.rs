//! Type-safe identifiers for monitor entities.
//!
//! Newtype wrappers prevent mixing incompatible IDs at compile time:
//! a [`NodeId`] indexes the document arena, a [`BadgeId`] names a floating
//! badge owned by the badge manager.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// NodeId
// ============================================================================

/// Index of a node in the document arena.
///
/// Node IDs are only meaningful for the document that produced them and are
/// never reused within a document's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Creates a node ID from a raw arena index.
    #[inline]
    #[must_use]
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    /// Returns the raw arena index.
    #[inline]
    #[must_use]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node-{}", self.0)
    }
}

// ============================================================================
// BadgeId
// ============================================================================

/// Unique identifier for a floating annotation badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BadgeId(Uuid);

impl BadgeId {
    /// Generates a fresh random badge ID.
    #[inline]
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for BadgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "debug-badge-{}", self.0)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_roundtrip() {
        let id = NodeId::from_index(42);
        assert_eq!(id.index(), 42);
        assert_eq!(id.to_string(), "node-42");
    }

    #[test]
    fn test_badge_id_unique() {
        let a = BadgeId::generate();
        let b = BadgeId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_badge_id_display_prefix() {
        let id = BadgeId::generate();
        assert!(id.to_string().starts_with("debug-badge-"));
    }
}
