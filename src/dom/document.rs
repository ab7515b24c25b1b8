//! Arena document tree.
//!
//! The monitor operates on an explicit model of the embedded frame's DOM:
//! a flat arena of nodes addressed by [`NodeId`], with the document-level
//! state the overlay cares about (viewport, cursor, root class list, focus
//! and caret). The host shell mirrors the real DOM into this model and
//! applies the monitor's mutations back out.
//!
//! Queries return nodes in document order (pre-order traversal from the
//! root), matching `querySelectorAll` semantics.

// ============================================================================
// Imports
// ============================================================================

use crate::dom::geometry::{Rect, Viewport};
use crate::dom::node::{ElementData, NodeData, NodeKind};
use crate::dom::style::ComputedStyle;
use crate::identifiers::NodeId;

// ============================================================================
// Cursor
// ============================================================================

/// Document-level cursor, controlled by the monitor's mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    /// No override (the page's own cursor).
    #[default]
    Auto,
    /// Arrow cursor, used in preview mode.
    Default,
    /// Crosshair cursor, used in select mode.
    Crosshair,
}

// ============================================================================
// Caret
// ============================================================================

/// A collapsed text caret inside a focused element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caret {
    /// The element holding the caret.
    pub node: NodeId,
    /// Character offset into the element's text content.
    pub offset: usize,
}

// ============================================================================
// Document
// ============================================================================

/// The modeled DOM of one embedded frame.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<NodeData>,
    root: NodeId,
    viewport: Viewport,
    cursor: Cursor,
    root_classes: Vec<String>,
    focused: Option<NodeId>,
    caret: Option<Caret>,
}

// ============================================================================
// Document - Construction
// ============================================================================

impl Document {
    /// Creates an empty document with a `body` root element.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        let root = NodeId::from_index(0);
        let body = NodeData {
            id: root,
            parent: None,
            children: Vec::new(),
            kind: NodeKind::Element(ElementData::new("body")),
        };
        Self {
            nodes: vec![body],
            root,
            viewport,
            cursor: Cursor::Auto,
            root_classes: Vec::new(),
            focused: None,
            caret: None,
        }
    }

    /// Allocates a detached element node.
    pub fn create_element(&mut self, tag: impl Into<String>) -> NodeId {
        self.alloc(NodeKind::Element(ElementData::new(tag)))
    }

    /// Allocates a detached text node.
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.alloc(NodeKind::Text(text.into()))
    }

    /// Appends a detached node as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child.index()].parent = Some(parent);
        self.nodes[parent.index()].children.push(child);
    }

    /// Inserts a detached node as the first child of `parent`.
    pub fn insert_first_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child.index()].parent = Some(parent);
        self.nodes[parent.index()].children.insert(0, child);
    }

    /// Starts a fluent builder for a new element appended to `parent`.
    pub fn build(&mut self, parent: NodeId, tag: impl Into<String>) -> ElementBuilder<'_> {
        let node = self.create_element(tag);
        self.append_child(parent, node);
        ElementBuilder { doc: self, node }
    }

    fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(NodeData {
            id,
            parent: None,
            children: Vec::new(),
            kind,
        });
        id
    }
}

// ============================================================================
// Document - Accessors
// ============================================================================

impl Document {
    /// Returns the root (`body`) node.
    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Returns a node by ID.
    #[inline]
    #[must_use]
    pub fn node(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }

    /// Returns a mutable node by ID.
    #[inline]
    #[must_use]
    pub fn node_mut(&mut self, id: NodeId) -> &mut NodeData {
        &mut self.nodes[id.index()]
    }

    /// Returns the current viewport.
    #[inline]
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Updates the viewport (resize).
    #[inline]
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Returns the document cursor.
    #[inline]
    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Sets the document cursor.
    #[inline]
    pub fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }

    /// Adds a class to the root element's class list.
    pub fn add_root_class(&mut self, class: &str) {
        if !self.root_classes.iter().any(|c| c == class) {
            self.root_classes.push(class.to_string());
        }
    }

    /// Removes a class from the root element's class list.
    pub fn remove_root_class(&mut self, class: &str) {
        self.root_classes.retain(|c| c != class);
    }

    /// Returns `true` if the root element carries the class.
    #[must_use]
    pub fn has_root_class(&self, class: &str) -> bool {
        self.root_classes.iter().any(|c| c == class)
    }

    /// Returns the focused node, if any.
    #[inline]
    #[must_use]
    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Moves focus (or clears it with `None`).
    #[inline]
    pub fn set_focused(&mut self, node: Option<NodeId>) {
        self.focused = node;
        if node.is_none() {
            self.caret = None;
        }
    }

    /// Returns the caret, if any.
    #[inline]
    #[must_use]
    pub fn caret(&self) -> Option<Caret> {
        self.caret
    }

    /// Places a collapsed caret.
    #[inline]
    pub fn set_caret(&mut self, caret: Caret) {
        self.caret = Some(caret);
    }
}

// ============================================================================
// Document - Element Accessors
// ============================================================================

impl Document {
    /// Returns an element's lowercase tag name (empty for text nodes).
    #[must_use]
    pub fn tag(&self, id: NodeId) -> &str {
        self.node(id)
            .as_element()
            .map(|e| e.tag.as_str())
            .unwrap_or_default()
    }

    /// Returns an attribute value.
    #[must_use]
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.node(id)
            .as_element()
            .and_then(|e| e.attributes.get(name))
            .map(String::as_str)
    }

    /// Returns `true` if the element carries the attribute.
    #[inline]
    #[must_use]
    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.attribute(id, name).is_some()
    }

    /// Sets an attribute value.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: impl Into<String>) {
        if let Some(element) = self.node_mut(id).as_element_mut() {
            element.attributes.insert(name.to_string(), value.into());
        }
    }

    /// Removes an attribute.
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) {
        if let Some(element) = self.node_mut(id).as_element_mut() {
            element.attributes.remove(name);
        }
    }

    /// Returns the element's bounding rectangle.
    #[must_use]
    pub fn rect(&self, id: NodeId) -> Rect {
        self.node(id)
            .as_element()
            .map(|e| e.rect)
            .unwrap_or_default()
    }

    /// Sets the element's bounding rectangle.
    pub fn set_rect(&mut self, id: NodeId, rect: Rect) {
        if let Some(element) = self.node_mut(id).as_element_mut() {
            element.rect = rect;
        }
    }

    /// Returns the element's computed style.
    #[must_use]
    pub fn style(&self, id: NodeId) -> ComputedStyle {
        self.node(id)
            .as_element()
            .map(|e| e.style.clone())
            .unwrap_or_default()
    }

    /// Sets the element's computed style.
    pub fn set_style(&mut self, id: NodeId, style: ComputedStyle) {
        if let Some(element) = self.node_mut(id).as_element_mut() {
            element.style = style;
        }
    }

    /// Returns `true` if the element is natively editable.
    #[must_use]
    pub fn content_editable(&self, id: NodeId) -> bool {
        self.node(id)
            .as_element()
            .map(|e| e.content_editable)
            .unwrap_or_default()
    }

    /// Sets the element's native editability.
    pub fn set_content_editable(&mut self, id: NodeId, editable: bool) {
        if let Some(element) = self.node_mut(id).as_element_mut() {
            element.content_editable = editable;
        }
    }
}

// ============================================================================
// Document - Traversal & Queries
// ============================================================================

impl Document {
    /// Returns a node's parent.
    #[inline]
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Returns a node's children in document order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Returns a node's element children in document order.
    #[must_use]
    pub fn child_elements(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|&child| self.node(child).is_element())
            .collect()
    }

    /// Returns a node's direct text-node children in document order.
    #[must_use]
    pub fn text_children(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|&child| self.node(child).is_text())
            .collect()
    }

    /// Returns every element in document order (pre-order from the root).
    #[must_use]
    pub fn elements(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.walk(self.root, &mut |doc, node| {
            if doc.node(node).is_element() {
                out.push(node);
            }
        });
        out
    }

    /// Returns elements whose attribute `name` equals `value`, in document
    /// order.
    #[must_use]
    pub fn query_attr_eq(&self, name: &str, value: &str) -> Vec<NodeId> {
        self.elements()
            .into_iter()
            .filter(|&node| self.attribute(node, name) == Some(value))
            .collect()
    }

    /// Returns elements carrying attribute `name`, in document order.
    #[must_use]
    pub fn query_has_attr(&self, name: &str) -> Vec<NodeId> {
        self.elements()
            .into_iter()
            .filter(|&node| self.has_attribute(node, name))
            .collect()
    }

    /// Walks up from `id` (inclusive) and returns the first element
    /// matching the predicate.
    #[must_use]
    pub fn closest(&self, id: NodeId, pred: impl Fn(&Self, NodeId) -> bool) -> Option<NodeId> {
        let mut current = Some(id);
        while let Some(node) = current {
            if self.node(node).is_element() && pred(self, node) {
                return Some(node);
            }
            current = self.parent(node);
        }
        None
    }

    /// Returns `true` if `ancestor` is `node` or one of its ancestors.
    #[must_use]
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    fn walk(&self, node: NodeId, visit: &mut dyn FnMut(&Self, NodeId)) {
        visit(self, node);
        // children vec is cloned so the visitor may borrow the document
        let children = self.node(node).children.clone();
        for child in children {
            self.walk(child, visit);
        }
    }
}

// ============================================================================
// Document - Text Mutation
// ============================================================================

impl Document {
    /// Returns the node's full text content (own text plus descendants).
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        match &self.node(id).kind {
            NodeKind::Text(text) => text.clone(),
            NodeKind::Element(_) => {
                let mut out = String::new();
                for &child in self.children(id) {
                    out.push_str(&self.text_content(child));
                }
                out
            }
        }
    }

    /// Replaces the node's children with a single text node.
    ///
    /// An empty string leaves the element with no children at all.
    pub fn set_text_content(&mut self, id: NodeId, text: impl Into<String>) {
        let text = text.into();
        let children = std::mem::take(&mut self.nodes[id.index()].children);
        for child in children {
            self.nodes[child.index()].parent = None;
        }
        if !text.is_empty() {
            let text_node = self.create_text(text);
            self.append_child(id, text_node);
        }
    }

    /// Rewrites the content of an existing text node.
    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) {
        if let NodeKind::Text(content) = &mut self.node_mut(id).kind {
            *content = text.into();
        }
    }
}

// ============================================================================
// ElementBuilder
// ============================================================================

/// Fluent builder for attaching elements, used by hosts and tests.
pub struct ElementBuilder<'a> {
    doc: &'a mut Document,
    node: NodeId,
}

impl ElementBuilder<'_> {
    /// Sets an attribute.
    #[must_use]
    pub fn attr(self, name: &str, value: impl Into<String>) -> Self {
        self.doc.set_attribute(self.node, name, value);
        self
    }

    /// Appends a text child.
    #[must_use]
    pub fn text(self, text: impl Into<String>) -> Self {
        let text_node = self.doc.create_text(text);
        self.doc.append_child(self.node, text_node);
        self
    }

    /// Sets the bounding rectangle.
    #[must_use]
    pub fn rect(self, rect: Rect) -> Self {
        self.doc.set_rect(self.node, rect);
        self
    }

    /// Finishes the builder, returning the node ID.
    #[inline]
    #[must_use]
    pub fn id(self) -> NodeId {
        self.node
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> Document {
        Document::new(Viewport::default())
    }

    #[test]
    fn test_build_and_query() {
        let mut doc = doc();
        let root = doc.root();
        let first = doc.build(root, "h1").attr("x-id", "title").id();
        let second = doc.build(root, "p").attr("x-id", "body").id();
        let third = doc.build(root, "p").attr("x-id", "body").id();

        assert_eq!(doc.query_attr_eq("x-id", "title"), vec![first]);
        assert_eq!(doc.query_attr_eq("x-id", "body"), vec![second, third]);
    }

    #[test]
    fn test_document_order_is_preorder() {
        let mut doc = doc();
        let root = doc.root();
        let outer = doc.build(root, "div").attr("k", "v").id();
        let inner = doc.build(outer, "span").attr("k", "v").id();
        let sibling = doc.build(root, "div").attr("k", "v").id();

        assert_eq!(doc.query_attr_eq("k", "v"), vec![outer, inner, sibling]);
    }

    #[test]
    fn test_text_content_recurses() {
        let mut doc = doc();
        let root = doc.root();
        let para = doc.build(root, "p").text("Hello ").id();
        let strong = doc.build(para, "strong").text("world").id();
        let _ = strong;

        assert_eq!(doc.text_content(para), "Hello world");
    }

    #[test]
    fn test_set_text_content_replaces_children() {
        let mut doc = doc();
        let root = doc.root();
        let para = doc.build(root, "p").text("old").id();
        let _child = doc.build(para, "em").text("nested").id();

        doc.set_text_content(para, "new");
        assert_eq!(doc.text_content(para), "new");
        assert_eq!(doc.children(para).len(), 1);

        doc.set_text_content(para, "");
        assert!(doc.children(para).is_empty());
    }

    #[test]
    fn test_closest_and_contains() {
        let mut doc = doc();
        let root = doc.root();
        let wrapper = doc.build(root, "div").attr("data-ve-dynamic", "true").id();
        let leaf = doc.build(wrapper, "span").id();

        let found = doc.closest(leaf, |d, n| d.attribute(n, "data-ve-dynamic") == Some("true"));
        assert_eq!(found, Some(wrapper));
        assert!(doc.contains(wrapper, leaf));
        assert!(!doc.contains(leaf, wrapper));
    }

    #[test]
    fn test_root_class_list() {
        let mut doc = doc();
        doc.add_root_class("debug-select-mode");
        doc.add_root_class("debug-select-mode");
        assert!(doc.has_root_class("debug-select-mode"));
        doc.remove_root_class("debug-select-mode");
        assert!(!doc.has_root_class("debug-select-mode"));
    }

    #[test]
    fn test_focus_clear_drops_caret() {
        let mut doc = doc();
        let root = doc.root();
        let node = doc.build(root, "p").text("text").id();
        doc.set_focused(Some(node));
        doc.set_caret(Caret { node, offset: 4 });
        assert!(doc.caret().is_some());

        doc.set_focused(None);
        assert!(doc.caret().is_none());
    }
}
