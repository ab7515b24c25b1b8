//! Pointer enter/leave decoration.

// ============================================================================
// Imports
// ============================================================================

use tracing::trace;

use crate::classify::{classify, group_of, identity_key_of, is_dynamic};
use crate::identifiers::NodeId;
use crate::protocol::command::InteractionMode;

use super::select::{has_provenance, is_excluded};
use super::{ATTR_DYNAMIC_MARK, ATTR_HOVER, ATTR_SELECTED, Monitor};

// ============================================================================
// Monitor - Hover
// ============================================================================

impl Monitor {
    /// Handles the pointer entering an element (select mode only).
    ///
    /// Dynamic, non-editable, non-mixed targets decorate their whole
    /// identity-key group with a warning badge; everything else decorates
    /// the single node with a neutral badge. Hover is suppressed entirely
    /// when any group member is already selected.
    pub(crate) fn pointer_enter(&mut self, target: NodeId) {
        if !self.state.is_active || self.state.interaction_mode == InteractionMode::Preview {
            return;
        }
        if !self.document.node(target).is_element() {
            return;
        }
        if self.document.has_attribute(target, ATTR_SELECTED) {
            return;
        }
        if is_excluded(&self.document, target) || !has_provenance(&self.document, target) {
            return;
        }

        let dynamic = is_dynamic(&self.document, target);
        let classification = classify(&self.document, target);
        let mixed = !self.document.child_elements(target).is_empty()
            && !self.document.text_children(target).is_empty();
        let show_as_dynamic = dynamic && !classification.is_editable && !mixed;

        if dynamic {
            if let Some(key) = identity_key_of(&self.document, target) {
                let group = group_of(&self.document, &key);
                let any_selected = group
                    .iter()
                    .any(|&el| self.document.has_attribute(el, ATTR_SELECTED));
                if any_selected {
                    self.state.hover_group.clear();
                    return;
                }

                for &el in &group {
                    self.document.set_attribute(el, ATTR_HOVER, "true");
                    if show_as_dynamic {
                        self.document.set_attribute(el, ATTR_DYNAMIC_MARK, "true");
                    }
                }
                self.state.hover_group = group;
            } else {
                // keyless dynamic element: decorate just the node
                self.document.set_attribute(target, ATTR_HOVER, "true");
                if show_as_dynamic {
                    self.document.set_attribute(target, ATTR_DYNAMIC_MARK, "true");
                }
            }
        } else {
            self.document.set_attribute(target, ATTR_HOVER, "true");
        }

        let tag = self.document.tag(target).to_string();
        let label = if show_as_dynamic {
            format!("{tag} (Dynamic)")
        } else {
            tag
        };

        // a replaced hover badge goes away synchronously, no fade
        if let Some(previous) = self.state.hover_badge.take() {
            self.badges.remove_now(&mut self.scheduler, previous);
        }

        trace!(node = %target, %label, "Hover enter");
        let rect = self.document.rect(target);
        let viewport = self.document.viewport();
        self.state.hover_target = Some(target);
        self.state.hover_badge =
            Some(self.badges.show_hover_badge(rect, viewport, label, show_as_dynamic));
    }

    /// Handles the pointer leaving an element (select mode only).
    ///
    /// Clears hover decoration without disturbing selection decoration:
    /// the dynamic mark stays on nodes that are selected.
    pub(crate) fn pointer_leave(&mut self, target: NodeId) {
        if !self.state.is_active || self.state.interaction_mode == InteractionMode::Preview {
            return;
        }
        if !self.document.node(target).is_element() {
            return;
        }

        if self.state.hover_group.is_empty() {
            self.document.remove_attribute(target, ATTR_HOVER);
            if !self.document.has_attribute(target, ATTR_SELECTED) {
                self.document.remove_attribute(target, ATTR_DYNAMIC_MARK);
            }
        } else {
            for element in std::mem::take(&mut self.state.hover_group) {
                self.document.remove_attribute(element, ATTR_HOVER);
                if !self.document.has_attribute(element, ATTR_SELECTED) {
                    self.document.remove_attribute(element, ATTR_DYNAMIC_MARK);
                }
            }
        }

        if let Some(badge) = self.state.hover_badge.take() {
            self.badges.remove(&mut self.scheduler, badge);
            self.state.hover_target = None;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::badge::BadgeKind;
    use crate::classify::{ATTR_DYNAMIC, ATTR_SOURCE_EDITABLE, ATTR_SOURCE_TYPE};
    use crate::monitor::InputEvent;
    use crate::monitor::tests::{selectable, test_monitor};

    #[test]
    fn test_hover_decorates_single_static_element() {
        let (mut monitor, _sink) = test_monitor();
        let node = selectable(&mut monitor, "h1", Some("title"), "Hello");
        monitor.activate();

        monitor.handle_input(InputEvent::PointerEnter { target: node });

        assert!(monitor.document().has_attribute(node, ATTR_HOVER));
        assert!(!monitor.document().has_attribute(node, ATTR_DYNAMIC_MARK));
        let badge = monitor.state().hover_badge.expect("hover badge");
        let badge = monitor.badges().get(badge).expect("badge");
        assert_eq!(badge.kind, BadgeKind::Hover);
        assert_eq!(badge.label, "h1");
    }

    #[test]
    fn test_hover_dynamic_group_gets_warning_badge() {
        let (mut monitor, _sink) = test_monitor();
        let first = selectable(&mut monitor, "li", Some("row"), "One");
        let second = selectable(&mut monitor, "li", Some("row"), "Two");
        monitor
            .document_mut()
            .set_attribute(first, ATTR_SOURCE_TYPE, "prop");
        monitor.activate();

        monitor.handle_input(InputEvent::PointerEnter { target: first });

        for node in [first, second] {
            assert!(monitor.document().has_attribute(node, ATTR_HOVER));
            assert!(monitor.document().has_attribute(node, ATTR_DYNAMIC_MARK));
        }
        let badge = monitor.state().hover_badge.expect("hover badge");
        let badge = monitor.badges().get(badge).expect("badge");
        assert_eq!(badge.kind, BadgeKind::Dynamic);
        assert_eq!(badge.label, "li (Dynamic)");
    }

    #[test]
    fn test_hover_editable_dynamic_group_stays_neutral() {
        let (mut monitor, _sink) = test_monitor();
        let first = selectable(&mut monitor, "li", Some("row"), "One");
        let _second = selectable(&mut monitor, "li", Some("row"), "Two");
        monitor
            .document_mut()
            .set_attribute(first, ATTR_SOURCE_EDITABLE, "true");
        monitor.activate();

        monitor.handle_input(InputEvent::PointerEnter { target: first });

        assert!(monitor.document().has_attribute(first, ATTR_HOVER));
        assert!(!monitor.document().has_attribute(first, ATTR_DYNAMIC_MARK));
        let badge = monitor.state().hover_badge.expect("hover badge");
        assert_eq!(
            monitor.badges().get(badge).expect("badge").label,
            "li"
        );
    }

    #[test]
    fn test_hover_suppressed_when_group_member_selected() {
        let (mut monitor, _sink) = test_monitor();
        let first = selectable(&mut monitor, "li", Some("row"), "One");
        let second = selectable(&mut monitor, "li", Some("row"), "Two");
        monitor.activate();
        monitor.handle_input(InputEvent::Click { target: second });

        monitor.handle_input(InputEvent::PointerEnter { target: first });

        assert!(!monitor.document().has_attribute(first, ATTR_HOVER));
        assert!(monitor.state().hover_group.is_empty());
    }

    #[test]
    fn test_hover_replacement_is_synchronous() {
        let (mut monitor, _sink) = test_monitor();
        let first = selectable(&mut monitor, "h1", Some("a"), "One");
        let second = selectable(&mut monitor, "h2", Some("b"), "Two");
        monitor.activate();

        monitor.handle_input(InputEvent::PointerEnter { target: first });
        let first_badge = monitor.state().hover_badge.expect("badge");

        monitor.handle_input(InputEvent::PointerEnter { target: second });

        // the replaced badge is gone immediately, with no pending fade
        assert!(monitor.badges().get(first_badge).is_none());
        assert_eq!(monitor.badges().len(), 1);
        assert_eq!(monitor.next_deadline(), None);
    }

    #[test]
    fn test_leave_keeps_dynamic_mark_on_selected_nodes() {
        let (mut monitor, _sink) = test_monitor();
        let first = selectable(&mut monitor, "li", Some("row"), "One");
        let second = selectable(&mut monitor, "li", Some("row"), "Two");
        monitor
            .document_mut()
            .set_attribute(first, ATTR_DYNAMIC, "true");
        monitor.activate();

        // select the group (dynamic, read-only: decorated with the mark)
        monitor.handle_input(InputEvent::Click { target: first });
        assert!(monitor.document().has_attribute(second, ATTR_DYNAMIC_MARK));

        // hovering a selected group is suppressed; leave must not strip
        // the selection's dynamic mark
        monitor.handle_input(InputEvent::PointerEnter { target: first });
        monitor.handle_input(InputEvent::PointerLeave { target: first });

        assert!(monitor.document().has_attribute(first, ATTR_DYNAMIC_MARK));
        assert!(monitor.document().has_attribute(second, ATTR_DYNAMIC_MARK));
    }

    #[test]
    fn test_hover_ignored_without_provenance() {
        let (mut monitor, _sink) = test_monitor();
        let root = monitor.document_mut().root();
        let bare = monitor.document_mut().build(root, "div").text("plain").id();
        monitor.activate();

        monitor.handle_input(InputEvent::PointerEnter { target: bare });

        assert!(!monitor.document().has_attribute(bare, ATTR_HOVER));
        assert!(monitor.state().hover_badge.is_none());
    }

    #[test]
    fn test_hover_inactive_or_preview_is_noop() {
        let (mut monitor, _sink) = test_monitor();
        let node = selectable(&mut monitor, "h1", Some("title"), "Hello");

        monitor.handle_input(InputEvent::PointerEnter { target: node });
        assert!(!monitor.document().has_attribute(node, ATTR_HOVER));

        monitor.activate();
        monitor.set_interaction_mode(InteractionMode::Preview);
        monitor.handle_input(InputEvent::PointerEnter { target: node });
        assert!(!monitor.document().has_attribute(node, ATTR_HOVER));
    }
}
