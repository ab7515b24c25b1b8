//! Node data stored in the document arena.

// ============================================================================
// Imports
// ============================================================================

use std::collections::BTreeMap;

use crate::dom::geometry::Rect;
use crate::dom::style::ComputedStyle;
use crate::identifiers::NodeId;

// ============================================================================
// NodeKind
// ============================================================================

/// Payload of an arena node: an element or a text node.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// An element with a tag, attributes, and layout data.
    Element(ElementData),
    /// A text node.
    Text(String),
}

// ============================================================================
// ElementData
// ============================================================================

/// Element-specific node data.
///
/// Attributes use an ordered map so snapshots serialize deterministically.
#[derive(Debug, Clone)]
pub struct ElementData {
    /// Lowercase tag name.
    pub tag: String,
    /// Attribute map, sorted by name.
    pub attributes: BTreeMap<String, String>,
    /// Viewport-relative bounding rectangle.
    pub rect: Rect,
    /// Computed style values.
    pub style: ComputedStyle,
    /// Whether the node is natively editable (inline edit mode).
    pub content_editable: bool,
}

impl ElementData {
    /// Creates element data for a tag with default layout and style.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            attributes: BTreeMap::new(),
            rect: Rect::default(),
            style: ComputedStyle::default(),
            content_editable: false,
        }
    }
}

// ============================================================================
// NodeData
// ============================================================================

/// One node of the document tree.
#[derive(Debug, Clone)]
pub struct NodeData {
    /// This node's arena ID.
    pub id: NodeId,
    /// Parent node, `None` for the root.
    pub parent: Option<NodeId>,
    /// Children in document order.
    pub children: Vec<NodeId>,
    /// Element or text payload.
    pub kind: NodeKind,
}

impl NodeData {
    /// Returns the element payload, or `None` for text nodes.
    #[inline]
    #[must_use]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.kind {
            NodeKind::Element(data) => Some(data),
            NodeKind::Text(_) => None,
        }
    }

    /// Returns the mutable element payload, or `None` for text nodes.
    #[inline]
    #[must_use]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.kind {
            NodeKind::Element(data) => Some(data),
            NodeKind::Text(_) => None,
        }
    }

    /// Returns the text payload, or `None` for elements.
    #[inline]
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element(_) => None,
            NodeKind::Text(text) => Some(text),
        }
    }

    /// Returns `true` if this node is an element.
    #[inline]
    #[must_use]
    pub fn is_element(&self) -> bool {
        matches!(self.kind, NodeKind::Element(_))
    }

    /// Returns `true` if this node is a text node.
    #[inline]
    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self.kind, NodeKind::Text(_))
    }
}

// ============================================================================
// Tests
// ============================================================================
