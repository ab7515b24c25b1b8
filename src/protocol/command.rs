//! Inbound command messages.
//!
//! The hosting frame drives the monitor with messages of a fixed envelope:
//!
//! ```json
//! {
//!   "type": "DEBUG_COMMAND",
//!   "action": "APPLY_CHANGES",
//!   "data": { "elementId": "row-1", "className": "highlight" }
//! }
//! ```
//!
//! Envelopes are dispatched by `action`; unrecognized actions are ignored,
//! as is recognizable-but-malformed payload data (logged at warn level).
//!
//! # Actions
//!
//! | Action | Payload |
//! |--------|---------|
//! | `ACTIVATE` | — |
//! | `DEACTIVATE` | — |
//! | `CLEAR_SELECTION` | — |
//! | `APPLY_CHANGES` | [`ChangeSet`] |
//! | `SET_INTERACTION_MODE` | `{mode}` |
//! | `ENABLE_INLINE_EDIT` | `{elementId, arrayIndex?}` |
//! | `DISABLE_INLINE_EDIT` | `{save?}` (defaults to save) |

// ============================================================================
// Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

// ============================================================================
// Constants
// ============================================================================

/// Envelope `type` for inbound commands.
pub const COMMAND_ENVELOPE_TYPE: &str = "DEBUG_COMMAND";

// ============================================================================
// InteractionMode
// ============================================================================

/// Pointer interaction mode while the monitor is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionMode {
    /// Intercept pointer input for inspection and selection.
    #[default]
    Select,
    /// Pass pointer input through to the page.
    Preview,
}

impl InteractionMode {
    /// Wire name of the mode.
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Preview => "preview",
        }
    }
}

impl fmt::Display for InteractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// ChangeSet
// ============================================================================

/// Payload of `APPLY_CHANGES`.
///
/// Content fields (`text_parts`, `text_content`, `id`) target a specific
/// element; appearance fields (`class_name`, `attributes`) target the whole
/// identity-key group on grouped updates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChangeSet {
    /// Identity key of the target; falls back to the current selection.
    pub element_id: Option<String>,
    /// Whether the key addresses a multi-instance group.
    pub is_multi_element: bool,
    /// Group member receiving content edits.
    pub array_index: Option<usize>,
    /// Plain-text replacement.
    pub text_content: Option<String>,
    /// Positional text-node replacements; preferred over `text_content`.
    pub text_parts: Option<Vec<String>>,
    /// New `id` attribute; empty removes it. Skipped on grouped updates.
    pub id: Option<String>,
    /// New `class` attribute value.
    pub class_name: Option<String>,
    /// Attribute edits; falsy values remove, provenance keys are skipped.
    pub attributes: Option<BTreeMap<String, Value>>,
}

impl ChangeSet {
    /// Returns `true` if the payload carries any content edit.
    #[inline]
    #[must_use]
    pub fn has_content_edit(&self) -> bool {
        self.text_parts.is_some() || self.text_content.is_some()
    }
}

// ============================================================================
// Command
// ============================================================================

/// A decoded inbound command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Enter debug mode.
    Activate,
    /// Leave debug mode.
    Deactivate,
    /// Drop all selection and hover decoration.
    ClearSelection,
    /// Apply content/appearance edits.
    ApplyChanges(ChangeSet),
    /// Switch the interaction mode.
    SetInteractionMode {
        /// The new mode.
        mode: InteractionMode,
    },
    /// Begin inline editing of an element.
    EnableInlineEdit {
        /// Identity key of the target.
        element_id: Option<String>,
        /// Group member when the key is grouped.
        array_index: Option<usize>,
    },
    /// End inline editing.
    DisableInlineEdit {
        /// Commit (`true`, the default) or revert.
        save: bool,
    },
}

// ============================================================================
// CommandEnvelope
// ============================================================================

/// The raw inbound envelope before dispatch.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandEnvelope {
    /// Envelope type marker; must equal [`COMMAND_ENVELOPE_TYPE`].
    #[serde(rename = "type")]
    pub envelope_type: String,
    /// Command action name.
    pub action: String,
    /// Action-specific payload.
    #[serde(default)]
    pub data: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModePayload {
    mode: InteractionMode,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct InlineEnablePayload {
    element_id: Option<String>,
    array_index: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct InlineDisablePayload {
    save: Option<bool>,
}

impl CommandEnvelope {
    /// Parses a raw message into an envelope.
    ///
    /// Returns `None` for messages that are not command envelopes at all.
    #[must_use]
    pub fn parse(message: &Value) -> Option<Self> {
        serde_json::from_value(message.clone()).ok()
    }

    /// Decodes the envelope into a typed [`Command`].
    ///
    /// Unknown actions and malformed payloads yield `None`.
    #[must_use]
    pub fn decode(self) -> Option<Command> {
        if self.envelope_type != COMMAND_ENVELOPE_TYPE {
            return None;
        }

        match self.action.as_str() {
            "ACTIVATE" => Some(Command::Activate),
            "DEACTIVATE" => Some(Command::Deactivate),
            "CLEAR_SELECTION" => Some(Command::ClearSelection),
            "APPLY_CHANGES" => match serde_json::from_value::<ChangeSet>(self.data) {
                Ok(changes) => Some(Command::ApplyChanges(changes)),
                Err(error) => {
                    warn!(%error, "Malformed APPLY_CHANGES payload");
                    None
                }
            },
            "SET_INTERACTION_MODE" => match serde_json::from_value::<ModePayload>(self.data) {
                Ok(payload) => Some(Command::SetInteractionMode { mode: payload.mode }),
                Err(error) => {
                    warn!(%error, "Malformed SET_INTERACTION_MODE payload");
                    None
                }
            },
            "ENABLE_INLINE_EDIT" => {
                // missing fields fall back to the current selection
                let payload =
                    serde_json::from_value::<InlineEnablePayload>(self.data).unwrap_or_default();
                Some(Command::EnableInlineEdit {
                    element_id: payload.element_id,
                    array_index: payload.array_index,
                })
            }
            "DISABLE_INLINE_EDIT" => {
                let payload =
                    serde_json::from_value::<InlineDisablePayload>(self.data).unwrap_or_default();
                // only an explicit `false` cancels the edit
                Some(Command::DisableInlineEdit {
                    save: payload.save != Some(false),
                })
            }
            other => {
                debug!(action = other, "Ignoring unrecognized command action");
                None
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(message: Value) -> Option<Command> {
        CommandEnvelope::parse(&message).and_then(CommandEnvelope::decode)
    }

    #[test]
    fn test_simple_actions() {
        let msg = json!({"type": "DEBUG_COMMAND", "action": "ACTIVATE"});
        assert_eq!(decode(msg), Some(Command::Activate));

        let msg = json!({"type": "DEBUG_COMMAND", "action": "CLEAR_SELECTION"});
        assert_eq!(decode(msg), Some(Command::ClearSelection));
    }

    #[test]
    fn test_wrong_envelope_type_is_ignored() {
        let msg = json!({"type": "SOMETHING_ELSE", "action": "ACTIVATE"});
        assert_eq!(decode(msg), None);
    }

    #[test]
    fn test_unknown_action_is_ignored() {
        let msg = json!({"type": "DEBUG_COMMAND", "action": "SELF_DESTRUCT"});
        assert_eq!(decode(msg), None);
    }

    #[test]
    fn test_apply_changes_payload() {
        let msg = json!({
            "type": "DEBUG_COMMAND",
            "action": "APPLY_CHANGES",
            "data": {
                "elementId": "row-1",
                "isMultiElement": true,
                "arrayIndex": 2,
                "textParts": ["Updated"],
                "className": "highlight"
            }
        });

        let Some(Command::ApplyChanges(changes)) = decode(msg) else {
            panic!("expected ApplyChanges");
        };
        assert_eq!(changes.element_id.as_deref(), Some("row-1"));
        assert!(changes.is_multi_element);
        assert_eq!(changes.array_index, Some(2));
        assert_eq!(changes.text_parts, Some(vec!["Updated".to_string()]));
        assert_eq!(changes.class_name.as_deref(), Some("highlight"));
        assert!(changes.has_content_edit());
    }

    #[test]
    fn test_set_interaction_mode() {
        let msg = json!({
            "type": "DEBUG_COMMAND",
            "action": "SET_INTERACTION_MODE",
            "data": {"mode": "preview"}
        });
        assert_eq!(
            decode(msg),
            Some(Command::SetInteractionMode {
                mode: InteractionMode::Preview
            })
        );

        let bad = json!({
            "type": "DEBUG_COMMAND",
            "action": "SET_INTERACTION_MODE",
            "data": {"mode": "laser"}
        });
        assert_eq!(decode(bad), None);
    }

    #[test]
    fn test_enable_inline_edit_optional_fields() {
        let msg = json!({
            "type": "DEBUG_COMMAND",
            "action": "ENABLE_INLINE_EDIT",
            "data": {"elementId": "title", "arrayIndex": 1}
        });
        assert_eq!(
            decode(msg),
            Some(Command::EnableInlineEdit {
                element_id: Some("title".to_string()),
                array_index: Some(1)
            })
        );

        let bare = json!({"type": "DEBUG_COMMAND", "action": "ENABLE_INLINE_EDIT"});
        assert_eq!(
            decode(bare),
            Some(Command::EnableInlineEdit {
                element_id: None,
                array_index: None
            })
        );
    }

    #[test]
    fn test_disable_inline_edit_save_defaults_true() {
        let bare = json!({"type": "DEBUG_COMMAND", "action": "DISABLE_INLINE_EDIT"});
        assert_eq!(decode(bare), Some(Command::DisableInlineEdit { save: true }));

        let explicit = json!({
            "type": "DEBUG_COMMAND",
            "action": "DISABLE_INLINE_EDIT",
            "data": {"save": false}
        });
        assert_eq!(
            decode(explicit),
            Some(Command::DisableInlineEdit { save: false })
        );
    }

    #[test]
    fn test_mode_display() {
        assert_eq!(InteractionMode::Select.to_string(), "select");
        assert_eq!(InteractionMode::Preview.to_string(), "preview");
    }
}
