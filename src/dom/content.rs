//! Text and content extraction.
//!
//! The distinction between *direct* text (text nodes that are immediate
//! children) and descendant text drives both editability checks and the
//! mixed-content rules in `APPLY_CHANGES`.

// ============================================================================
// Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dom::document::Document;
use crate::dom::geometry::Rect;
use crate::dom::style::StyleSnapshot;
use crate::identifiers::NodeId;

// ============================================================================
// Direct Text
// ============================================================================

/// Concatenates the element's immediate text nodes and trims the result.
///
/// Text inside child elements is not included.
#[must_use]
pub fn direct_text(doc: &Document, id: NodeId) -> String {
    let mut text = String::new();
    for &child in doc.children(id) {
        if let Some(content) = doc.node(child).as_text() {
            text.push_str(content);
        }
    }
    text.trim().to_string()
}

// ============================================================================
// Content Parts
// ============================================================================

/// Kind of a content part: literal text or rendered child content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// A direct text node.
    Text,
    /// A child element's rendered text (`<br>` contributes a newline).
    Dynamic,
}

/// One ordered slice of an element's content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentPart {
    /// Part kind.
    #[serde(rename = "type")]
    pub kind: ContentKind,
    /// The text carried by this part.
    pub text: String,
}

/// Splits an element's children into ordered text/dynamic parts.
#[must_use]
pub fn content_parts(doc: &Document, id: NodeId) -> Vec<ContentPart> {
    let mut parts = Vec::new();
    for &child in doc.children(id) {
        let node = doc.node(child);
        if let Some(text) = node.as_text() {
            parts.push(ContentPart {
                kind: ContentKind::Text,
                text: text.to_string(),
            });
        } else if node.is_element() {
            let text = if doc.tag(child) == "br" {
                "\n".to_string()
            } else {
                doc.text_content(child)
            };
            parts.push(ContentPart {
                kind: ContentKind::Dynamic,
                text,
            });
        }
    }
    parts
}

// ============================================================================
// ElementSnapshot
// ============================================================================

/// The element description carried on `ELEMENT_SELECTED`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementSnapshot {
    /// Lowercase tag name.
    pub tag_name: String,
    /// The element's `id` attribute, `None` when absent or empty.
    pub id: Option<String>,
    /// The element's `class` attribute, `None` when absent or empty.
    pub class_name: Option<String>,
    /// Trimmed direct text, `None` when empty.
    pub text_content: Option<String>,
    /// Whether the element has non-blank direct text.
    pub has_direct_text_content: bool,
    /// Whether the element has element children.
    pub has_child_elements: bool,
    /// Number of element children.
    pub child_element_count: usize,
    /// Number of direct text nodes (blank ones included).
    pub text_node_count: usize,
    /// Ordered content parts.
    pub content_parts: Vec<ContentPart>,
    /// Full attribute map.
    pub attributes: BTreeMap<String, String>,
    /// Viewport-relative bounding rectangle.
    pub rect: Rect,
    /// Computed-style block with parsed colors.
    pub computed_styles: StyleSnapshot,
}

impl ElementSnapshot {
    /// Captures a snapshot of an element node.
    #[must_use]
    pub fn capture(doc: &Document, id: NodeId) -> Self {
        let direct = direct_text(doc, id);
        let parts = content_parts(doc, id);
        let text_node_count = parts
            .iter()
            .filter(|part| part.kind == ContentKind::Text)
            .count();
        let child_element_count = doc.child_elements(id).len();

        let attributes = doc
            .node(id)
            .as_element()
            .map(|e| e.attributes.clone())
            .unwrap_or_default();

        let non_empty = |value: Option<&str>| {
            value
                .filter(|v| !v.is_empty())
                .map(ToString::to_string)
        };

        Self {
            tag_name: doc.tag(id).to_string(),
            id: non_empty(doc.attribute(id, "id")),
            class_name: non_empty(doc.attribute(id, "class")),
            text_content: if direct.is_empty() {
                None
            } else {
                Some(direct.clone())
            },
            has_direct_text_content: !direct.is_empty(),
            has_child_elements: child_element_count > 0,
            child_element_count,
            text_node_count,
            content_parts: parts,
            attributes,
            rect: doc.rect(id),
            computed_styles: StyleSnapshot::from_style(&doc.style(id)),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
