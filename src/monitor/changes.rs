//! `APPLY_CHANGES` application.
//!
//! Two independent phases: **content** edits (text, `id`) target a specific
//! element — the group member at the supplied array index, or the whole
//! group without one — while **appearance** edits (class, attributes)
//! always target every member of a grouped selection, since they edit the
//! template that renders all instances. Failures surface as
//! `CHANGES_ERROR` events and abort without partial side effects on the
//! failing target.

// ============================================================================
// Imports
// ============================================================================

use serde_json::Value;
use tracing::{debug, warn};

use crate::classify::{ATTR_DIRECT_TEXT, ATTR_IDENTITY, PROVENANCE_PREFIX, group_of};
use crate::error::{Error, Result};
use crate::identifiers::NodeId;
use crate::protocol::command::ChangeSet;
use crate::protocol::event::MonitorEvent;

use super::Monitor;

// ============================================================================
// Monitor - Apply Changes
// ============================================================================

impl Monitor {
    /// Applies a change set, reporting failure as a `CHANGES_ERROR` event.
    pub(crate) fn apply_changes(&mut self, changes: &ChangeSet) {
        match self.apply_changes_inner(changes) {
            Ok(()) => {
                debug!(element_id = ?changes.element_id, "Changes applied");
            }
            Err(error) => {
                warn!(%error, element_id = ?changes.element_id, "Changes rejected");
                let array_index = match &error {
                    Error::ArrayIndexNotFound { array_index, .. } => Some(*array_index),
                    _ => None,
                };
                self.emit(MonitorEvent::ChangesError {
                    error: error.to_string(),
                    element_id: changes.element_id.clone(),
                    array_index,
                });
            }
        }
    }

    fn apply_changes_inner(&mut self, changes: &ChangeSet) -> Result<()> {
        let (content_targets, appearance_targets) = self.resolve_targets(changes)?;

        // content phase: data-specific, hits the resolved targets only
        for &element in &content_targets {
            if changes.has_content_edit() {
                self.apply_content(element, changes)?;
            }

            // ids cannot be shared, so grouped updates skip them
            if let Some(id_value) = &changes.id {
                if !changes.is_multi_element {
                    if id_value.is_empty() {
                        self.document.remove_attribute(element, "id");
                    } else {
                        self.document.set_attribute(element, "id", id_value);
                    }
                }
            }
        }

        // appearance phase: template-wide, hits every sibling
        for &element in &appearance_targets {
            if let Some(class_name) = &changes.class_name {
                self.document.set_attribute(element, "class", class_name);
            }

            if let Some(attributes) = &changes.attributes {
                for (name, value) in attributes {
                    if name.starts_with(PROVENANCE_PREFIX) {
                        continue;
                    }
                    match attribute_value(value) {
                        Some(rendered) => self.document.set_attribute(element, name, rendered),
                        None => self.document.remove_attribute(element, name),
                    }
                }
            }
        }

        Ok(())
    }

    /// Resolves `(content targets, appearance targets)` for a change set.
    fn resolve_targets(&self, changes: &ChangeSet) -> Result<(Vec<NodeId>, Vec<NodeId>)> {
        if let Some(key) = &changes.element_id {
            if changes.is_multi_element {
                let group = group_of(&self.document, key);

                let content = match changes.array_index {
                    Some(index) => {
                        let target = group
                            .get(index)
                            .copied()
                            .ok_or_else(|| Error::array_index_not_found(key, index))?;
                        vec![target]
                    }
                    None => group.clone(),
                };
                if content.is_empty() {
                    return Err(Error::no_targets(Some(key.clone())));
                }
                Ok((content, group))
            } else {
                let element = self
                    .document
                    .query_attr_eq(ATTR_IDENTITY, key)
                    .first()
                    .copied()
                    .ok_or_else(|| Error::element_not_found(key))?;
                Ok((vec![element], vec![element]))
            }
        } else {
            // compatibility path: fall back to the live selection
            let element = self.state.selected_element.ok_or(Error::NoSelection)?;
            Ok((vec![element], vec![element]))
        }
    }

    /// Applies the content portion of a change set to one element.
    fn apply_content(&mut self, element: NodeId, changes: &ChangeSet) -> Result<()> {
        if let Some(parts) = &changes.text_parts {
            let text_nodes = self.document.text_children(element);
            for (position, &node) in text_nodes.iter().enumerate() {
                self.document
                    .set_text(node, parts.get(position).cloned().unwrap_or_default());
            }
            // a longer list extends the element with fresh text nodes
            for part in parts.iter().skip(text_nodes.len()) {
                let node = self.document.create_text(part.clone());
                self.document.append_child(element, node);
            }
            return Ok(());
        }

        let Some(text) = &changes.text_content else {
            return Ok(());
        };

        let direct_text_flag = self.document.attribute(element, ATTR_DIRECT_TEXT) == Some("true");
        let has_element_children = !self.document.child_elements(element).is_empty();

        if direct_text_flag || !has_element_children {
            self.document.set_text_content(element, text.clone());
            return Ok(());
        }

        // mixed text/element content: touch only the first non-blank text
        // node, keeping its original whitespace runs when the update has
        // none of its own
        let text_nodes = self.document.text_children(element);
        let target = text_nodes
            .iter()
            .copied()
            .find(|&node| {
                self.document
                    .node(node)
                    .as_text()
                    .is_some_and(|content| !content.trim().is_empty())
            })
            .or_else(|| text_nodes.first().copied());

        match target {
            Some(node) => {
                let original = self
                    .document
                    .node(node)
                    .as_text()
                    .unwrap_or_default()
                    .to_string();
                let merged = merge_preserving_whitespace(&original, text);
                self.document.set_text(node, merged);
            }
            None => {
                let node = self.document.create_text(text.clone());
                self.document.insert_first_child(element, node);
            }
        }

        Ok(())
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Renders an attribute value, `None` meaning "remove the attribute".
/// Mirrors loose host semantics: null, `false`, empty strings, and zero
/// all clear.
fn attribute_value(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::Bool(true) => Some("true".to_string()),
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        Value::Number(number) if number.as_f64() == Some(0.0) => None,
        Value::Number(number) => Some(number.to_string()),
        other => Some(other.to_string()),
    }
}

/// Splices the update into the original's leading/trailing whitespace runs
/// when the update does not carry its own.
fn merge_preserving_whitespace(original: &str, update: &str) -> String {
    let original_leading = &original[..original.len() - original.trim_start().len()];
    let original_trailing = &original[original.trim_end().len()..];
    let update_leading = &update[..update.len() - update.trim_start().len()];
    let update_trailing = &update[update.trim_end().len()..];

    let leading = if update_leading.is_empty() {
        original_leading
    } else {
        update_leading
    };
    let trailing = if update_trailing.is_empty() {
        original_trailing
    } else {
        update_trailing
    };

    format!("{leading}{}{trailing}", update.trim())
}

// ============================================================================
// Tests
// ============================================================================
