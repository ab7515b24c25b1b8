//! Inline text-editing mode.
//!
//! Inline editing makes one element natively editable in place. The mode
//! is orthogonal to selection: it starts from an `ENABLE_INLINE_EDIT`
//! command, tracks the pre-edit text for revert, and ends on command,
//! Enter, Escape, focus loss (after a grace period), a click elsewhere, or
//! deactivation — always reporting how it ended.

// ============================================================================
// Imports
// ============================================================================

use tracing::debug;

use crate::classify::{ATTR_IDENTITY, classify, group_of};
use crate::dom::{Caret, direct_text};
use crate::error::Error;
use crate::protocol::event::MonitorEvent;
use crate::schedule::TimerKey;

use super::{BLUR_GRACE, Disposition, Key, Monitor};

// ============================================================================
// Monitor - Inline Editing
// ============================================================================

impl Monitor {
    /// Begins inline editing.
    ///
    /// Grouped keys resolve to the member at `array_index` (first instance
    /// without one); no key falls back to the selected element. Refusals
    /// emit `INLINE_EDIT_ERROR` with the reason and classification detail.
    pub(crate) fn enable_inline_edit(
        &mut self,
        element_id: Option<&str>,
        array_index: Option<usize>,
    ) {
        let element = match element_id {
            Some(key) => {
                let instances = group_of(&self.document, key);
                match array_index {
                    Some(index) if instances.len() > 1 => instances.get(index).copied(),
                    _ => instances.first().copied(),
                }
            }
            None => self.state.selected_element,
        };

        let Some(element) = element else {
            let error = Error::inline_target_missing(element_id.map(ToString::to_string));
            self.emit(MonitorEvent::InlineEditError {
                error: error.to_string(),
                element_id: element_id.map(ToString::to_string),
                is_dynamic: None,
                is_editable: None,
            });
            return;
        };

        let classification = classify(&self.document, element);
        let has_direct_text = !direct_text(&self.document, element).is_empty();

        if !has_direct_text || (classification.is_dynamic && !classification.is_editable) {
            let error = if classification.is_dynamic {
                Error::DynamicNotEditable
            } else {
                Error::NoDirectText
            };
            self.emit(MonitorEvent::InlineEditError {
                error: error.to_string(),
                element_id: element_id.map(ToString::to_string),
                is_dynamic: Some(classification.is_dynamic),
                is_editable: Some(classification.is_editable),
            });
            return;
        }

        let text = self.document.text_content(element);
        self.state.inline_edit_original_text = text.clone();
        self.state.inline_edit_element = Some(element);

        self.document.set_content_editable(element, true);
        self.document.set_focused(Some(element));
        // caret collapsed to the end of content
        self.document.set_caret(Caret {
            node: element,
            offset: text.chars().count(),
        });

        debug!(node = %element, "Inline edit started");
        self.emit(MonitorEvent::InlineEditStart {
            element_id: self
                .document
                .attribute(element, ATTR_IDENTITY)
                .map(ToString::to_string),
            text_content: text,
        });
    }

    /// Ends inline editing, committing (`save`) or reverting to the
    /// pre-edit snapshot. No-op when nothing is being edited.
    pub(crate) fn disable_inline_edit(&mut self, save: bool) {
        let Some(element) = self.state.inline_edit_element else {
            return;
        };

        self.scheduler.cancel(TimerKey::InlineBlurGrace);
        self.document.set_content_editable(element, false);

        let final_text = self.document.text_content(element);
        let element_key = self
            .document
            .attribute(element, ATTR_IDENTITY)
            .map(ToString::to_string);

        if !save {
            let original = self.state.inline_edit_original_text.clone();
            self.document.set_text_content(element, original);
        }

        self.state.inline_edit_element = None;
        let original_text = std::mem::take(&mut self.state.inline_edit_original_text);
        if self.document.focused() == Some(element) {
            self.document.set_focused(None);
        }

        debug!(node = %element, save, "Inline edit ended");
        self.emit(MonitorEvent::InlineEditEnd {
            element_id: element_key,
            text_content: if save {
                final_text
            } else {
                original_text.clone()
            },
            original_text,
            saved: save,
        });
    }

    /// Host text input while editing: replace the element's text and report
    /// the change.
    pub(crate) fn inline_input(&mut self, text: &str) {
        let Some(element) = self.state.inline_edit_element else {
            return;
        };
        self.document.set_text_content(element, text);
        self.emit(MonitorEvent::InlineEditChange {
            element_id: self
                .document
                .attribute(element, ATTR_IDENTITY)
                .map(ToString::to_string),
            text_content: text.to_string(),
        });
    }

    /// Keyboard handling while editing: Enter (no shift) commits, Escape
    /// reverts; everything else belongs to the text field.
    pub(crate) fn inline_keydown(&mut self, key: Key, shift: bool) -> Disposition {
        if self.state.inline_edit_element.is_none() {
            return Disposition::PassThrough;
        }
        match key {
            Key::Enter if !shift => {
                self.disable_inline_edit(true);
                Disposition::Consumed
            }
            Key::Escape => {
                self.disable_inline_edit(false);
                Disposition::Consumed
            }
            _ => Disposition::PassThrough,
        }
    }

    /// Focus left the edited element: start the grace period that commits
    /// unless focus comes back.
    pub(crate) fn inline_blur(&mut self) {
        if self.state.inline_edit_element.is_none() {
            return;
        }
        self.document.set_focused(None);
        self.scheduler.schedule(TimerKey::InlineBlurGrace, BLUR_GRACE);
    }

    /// The blur grace timer fired.
    pub(crate) fn blur_grace_elapsed(&mut self) {
        if let Some(element) = self.state.inline_edit_element {
            if self.document.focused() != Some(element) {
                self.disable_inline_edit(true);
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
