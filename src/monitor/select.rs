//! Click resolution and selection toggling.

// ============================================================================
// Imports
// ============================================================================

use tracing::debug;
use uuid::Uuid;

use crate::classify::{
    ATTR_COMPONENT, ATTR_FILE_NAME, ATTR_IDENTITY, ATTR_LINE_NUMBER, array_index, classify,
    group_of, is_dynamic,
};
use crate::dom::{Document, ElementSnapshot};
use crate::identifiers::NodeId;
use crate::protocol::command::InteractionMode;
use crate::protocol::event::{MonitorEvent, SelectionPayload};

use super::{
    ATTR_DYNAMIC_MARK, ATTR_DYNAMIC_WRAPPER, ATTR_SELECTED, BUILDER_BADGE_ID, Disposition,
    Monitor,
};

// ============================================================================
// Exclusion Helpers
// ============================================================================

/// Elements the overlay never decorates or selects: svg roots, the builder
/// platform's own badge, and Toast/Toaster/Sonner components (or anything
/// inside one).
pub(crate) fn is_excluded(doc: &Document, node: NodeId) -> bool {
    if doc.tag(node) == "svg" {
        return true;
    }
    if doc.attribute(node, "id") == Some(BUILDER_BADGE_ID) {
        return true;
    }
    doc.closest(node, |d, n| {
        d.attribute(n, ATTR_COMPONENT).is_some_and(|component| {
            component.starts_with("Toast") || component == "Toaster" || component == "Sonner"
        })
    })
    .is_some()
}

/// Elements without the three provenance attributes are not part of the
/// traced component tree and cannot be addressed.
pub(crate) fn has_provenance(doc: &Document, node: NodeId) -> bool {
    doc.has_attribute(node, ATTR_FILE_NAME)
        && doc.has_attribute(node, ATTR_LINE_NUMBER)
        && doc.has_attribute(node, ATTR_COMPONENT)
}

// ============================================================================
// Monitor - Click
// ============================================================================

impl Monitor {
    /// Handles a primary click (select mode only).
    ///
    /// Reselecting the selected element deselects it; selecting a new one
    /// clears prior decoration first. Dynamic targets select their whole
    /// identity-key group with a single shared badge.
    pub(crate) fn click(&mut self, target: NodeId) -> Disposition {
        if !self.state.is_active || self.state.interaction_mode == InteractionMode::Preview {
            return Disposition::PassThrough;
        }
        if !self.document.node(target).is_element() {
            return Disposition::PassThrough;
        }

        // unwrap a dynamic wrapper to the element it decorates
        let mut element = target;
        if let Some(wrapper) = self
            .document
            .closest(element, |d, n| d.attribute(n, ATTR_DYNAMIC_WRAPPER) == Some("true"))
        {
            if let Some(parent) = self.document.parent(wrapper) {
                element = parent;
            }
        }

        // clicks inside the inline-edited element position the caret
        if let Some(editing) = self.state.inline_edit_element {
            if self.document.contains(editing, element) {
                return Disposition::PassThrough;
            }
            // clicking elsewhere commits the in-progress edit first
            self.disable_inline_edit(true);
        }

        if is_excluded(&self.document, element) {
            return Disposition::Consumed;
        }

        // address the element even when the renderer left it unkeyed
        if !self.document.has_attribute(element, ATTR_IDENTITY) {
            let key = format!("temp-{}", Uuid::new_v4());
            self.document.set_attribute(element, ATTR_IDENTITY, key);
        }

        if !has_provenance(&self.document, element) {
            return Disposition::Consumed;
        }

        let snapshot = ElementSnapshot::capture(&self.document, element);
        let classification = classify(&self.document, element);
        let dynamic = is_dynamic(&self.document, element);
        let index = array_index(&self.document, element);

        // clear the previous selection when moving to a different element
        if self.state.selected_element.is_some_and(|prev| prev != element) {
            if let Some(prev) = self.state.selected_element.take() {
                self.document.remove_attribute(prev, ATTR_SELECTED);
            }
            if let Some(badge) = self.state.selected_badge.take() {
                self.badges.remove(&mut self.scheduler, badge);
            }
            for node in std::mem::take(&mut self.state.selected_group) {
                self.document.remove_attribute(node, ATTR_SELECTED);
                self.document.remove_attribute(node, ATTR_DYNAMIC_MARK);
            }
            for badge in std::mem::take(&mut self.state.selected_badges) {
                self.badges.remove(&mut self.scheduler, badge);
            }
        }

        if self.state.selected_element == Some(element) {
            self.deselect(element);
        } else {
            self.select(element, snapshot, classification, dynamic, index);
        }

        Disposition::Consumed
    }

    fn deselect(&mut self, element: NodeId) {
        debug!(node = %element, "Element deselected");
        self.state.selected_element = None;
        self.document.remove_attribute(element, ATTR_SELECTED);

        if let Some(badge) = self.state.selected_badge.take() {
            self.badges.remove(&mut self.scheduler, badge);
        }
        for node in std::mem::take(&mut self.state.selected_group) {
            self.document.remove_attribute(node, ATTR_SELECTED);
            self.document.remove_attribute(node, ATTR_DYNAMIC_MARK);
        }
        for badge in std::mem::take(&mut self.state.selected_badges) {
            self.badges.remove(&mut self.scheduler, badge);
        }

        self.emit(MonitorEvent::ElementDeselected);
    }

    fn select(
        &mut self,
        element: NodeId,
        snapshot: ElementSnapshot,
        classification: crate::classify::Classification,
        dynamic: bool,
        index: Option<usize>,
    ) {
        self.state.selected_element = Some(element);

        let mixed = snapshot.has_child_elements && snapshot.text_node_count > 0;
        let show_as_dynamic = dynamic && !classification.is_editable && !mixed;

        let tag = self.document.tag(element).to_string();
        let label = if show_as_dynamic {
            format!("{tag} (Dynamic)")
        } else {
            tag
        };
        let rect = self.document.rect(element);
        let viewport = self.document.viewport();

        if dynamic {
            let key = self
                .document
                .attribute(element, ATTR_IDENTITY)
                .map(ToString::to_string)
                .unwrap_or_default();
            let group = group_of(&self.document, &key);
            for &node in &group {
                self.document.set_attribute(node, ATTR_SELECTED, "true");
                if show_as_dynamic {
                    self.document.set_attribute(node, ATTR_DYNAMIC_MARK, "true");
                }
            }
            self.state.selected_group = group;

            let badge = self
                .badges
                .show_selected_badge(rect, viewport, label, show_as_dynamic);
            self.state.selected_badges = vec![badge];
        } else {
            self.document.set_attribute(element, ATTR_SELECTED, "true");
            let badge = self.badges.show_selected_badge(rect, viewport, label, false);
            self.state.selected_badge = Some(badge);
        }

        let element_count = if dynamic {
            self.state.selected_group.len()
        } else {
            1
        };
        debug!(node = %element, dynamic, element_count, "Element selected");

        self.emit(MonitorEvent::ElementSelected(SelectionPayload {
            element: snapshot,
            is_dynamic: dynamic,
            is_editable: classification.is_editable,
            edit_type: classification.edit_type,
            source_info: classification.source_info,
            array_index: index,
            element_count,
            is_multi_element: dynamic && self.state.selected_group.len() > 1,
            position: rect.into(),
        }));
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::badge::BadgeKind;
    use crate::classify::EditType;
    use crate::monitor::InputEvent;
    use crate::monitor::tests::{selectable, test_monitor};

    #[test]
    fn test_select_then_reselect_deselects_once() {
        let (mut monitor, sink) = test_monitor();
        let node = selectable(&mut monitor, "h1", Some("title"), "Hello");
        monitor.activate();
        sink.clear();

        monitor.handle_input(InputEvent::Click { target: node });
        assert_eq!(monitor.state().selected_element, Some(node));
        assert!(monitor.document().has_attribute(node, ATTR_SELECTED));

        monitor.handle_input(InputEvent::Click { target: node });
        assert_eq!(monitor.state().selected_element, None);
        assert!(!monitor.document().has_attribute(node, ATTR_SELECTED));

        let deselections = sink
            .actions()
            .iter()
            .filter(|&&action| action == "ELEMENT_DESELECTED")
            .count();
        assert_eq!(deselections, 1);
    }

    #[test]
    fn test_selection_payload_contents() {
        let (mut monitor, sink) = test_monitor();
        let node = selectable(&mut monitor, "h1", Some("title"), "Hello");
        monitor.activate();
        sink.clear();

        monitor.handle_input(InputEvent::Click { target: node });

        let events = sink.events();
        let MonitorEvent::ElementSelected(payload) = &events[0] else {
            panic!("expected ELEMENT_SELECTED, got {events:?}");
        };
        assert_eq!(payload.element.tag_name, "h1");
        assert!(!payload.is_dynamic);
        assert!(payload.is_editable);
        assert_eq!(payload.edit_type, EditType::TextContent);
        assert_eq!(payload.element_count, 1);
        assert!(!payload.is_multi_element);
        assert_eq!(payload.position.x, 100.0);
        assert_eq!(payload.position.y, 150.0);
    }

    #[test]
    fn test_group_click_selects_every_instance_with_one_badge() {
        let (mut monitor, sink) = test_monitor();
        let instances: Vec<_> = (0..3)
            .map(|i| selectable(&mut monitor, "li", Some("row-1"), &format!("Item {i}")))
            .collect();
        monitor.activate();
        sink.clear();

        monitor.handle_input(InputEvent::Click {
            target: instances[1],
        });

        for &node in &instances {
            assert!(monitor.document().has_attribute(node, ATTR_SELECTED));
        }
        assert_eq!(monitor.state().selected_group, instances);
        assert_eq!(monitor.state().selected_badges.len(), 1);
        assert_eq!(monitor.badges().len(), 1);

        let events = sink.events();
        let MonitorEvent::ElementSelected(payload) = &events[0] else {
            panic!("expected ELEMENT_SELECTED");
        };
        assert!(payload.is_dynamic);
        assert_eq!(payload.element_count, 3);
        assert!(payload.is_multi_element);
        assert_eq!(payload.array_index, Some(1));
    }

    #[test]
    fn test_readonly_group_shows_dynamic_badge_and_marks() {
        let (mut monitor, _sink) = test_monitor();
        let first = selectable(&mut monitor, "li", Some("row"), "One");
        let second = selectable(&mut monitor, "li", Some("row"), "Two");
        monitor.activate();

        monitor.handle_input(InputEvent::Click { target: first });

        assert!(monitor.document().has_attribute(second, ATTR_DYNAMIC_MARK));
        let badge = monitor.state().selected_badges[0];
        let badge = monitor.badges().get(badge).expect("badge");
        assert_eq!(badge.kind, BadgeKind::SelectedDynamic);
        assert_eq!(badge.label, "li (Dynamic)");
    }

    #[test]
    fn test_switching_selection_clears_previous_decoration() {
        let (mut monitor, sink) = test_monitor();
        let first = selectable(&mut monitor, "h1", Some("a"), "One");
        let second = selectable(&mut monitor, "h2", Some("b"), "Two");
        monitor.activate();
        sink.clear();

        monitor.handle_input(InputEvent::Click { target: first });
        monitor.handle_input(InputEvent::Click { target: second });

        assert!(!monitor.document().has_attribute(first, ATTR_SELECTED));
        assert!(monitor.document().has_attribute(second, ATTR_SELECTED));
        assert_eq!(monitor.state().selected_element, Some(second));
        // two selections, no deselection event
        assert_eq!(
            sink.actions(),
            vec!["ELEMENT_SELECTED", "ELEMENT_SELECTED"]
        );
    }

    #[test]
    fn test_click_synthesizes_temporary_identity_key() {
        let (mut monitor, _sink) = test_monitor();
        let node = selectable(&mut monitor, "p", None, "Loose");
        monitor.activate();

        monitor.handle_input(InputEvent::Click { target: node });

        let key = monitor
            .document()
            .attribute(node, ATTR_IDENTITY)
            .expect("synthesized key");
        assert!(key.starts_with("temp-"));
        assert_eq!(monitor.state().selected_element, Some(node));
    }

    #[test]
    fn test_click_without_provenance_is_consumed_but_ignored() {
        let (mut monitor, sink) = test_monitor();
        let root = monitor.document_mut().root();
        let bare = monitor.document_mut().build(root, "div").text("x").id();
        monitor.activate();
        sink.clear();

        let disposition = monitor.handle_input(InputEvent::Click { target: bare });

        assert_eq!(disposition, Disposition::Consumed);
        assert_eq!(monitor.state().selected_element, None);
        assert!(sink.events().is_empty());
        // the key is still synthesized so later commands can address it
        assert!(monitor.document().has_attribute(bare, ATTR_IDENTITY));
    }

    #[test]
    fn test_click_exclusions() {
        let (mut monitor, _sink) = test_monitor();
        let root = monitor.document_mut().root();
        let svg = monitor.document_mut().build(root, "svg").id();
        let badge_widget = monitor
            .document_mut()
            .build(root, "div")
            .attr("id", BUILDER_BADGE_ID)
            .id();
        let toaster = monitor
            .document_mut()
            .build(root, "div")
            .attr(ATTR_COMPONENT, "Toaster")
            .id();
        let inside_toast = monitor
            .document_mut()
            .build(toaster, "p")
            .attr(ATTR_COMPONENT, "Text")
            .attr(ATTR_FILE_NAME, "T.jsx")
            .attr(ATTR_LINE_NUMBER, "3")
            .id();
        monitor.activate();

        for node in [svg, badge_widget, toaster, inside_toast] {
            let disposition = monitor.handle_input(InputEvent::Click { target: node });
            assert_eq!(disposition, Disposition::Consumed);
            assert_eq!(monitor.state().selected_element, None);
        }
    }

    #[test]
    fn test_click_unwraps_dynamic_wrapper_to_parent() {
        let (mut monitor, _sink) = test_monitor();
        let host = selectable(&mut monitor, "div", Some("card"), "");
        let wrapper = monitor
            .document_mut()
            .build(host, "span")
            .attr(ATTR_DYNAMIC_WRAPPER, "true")
            .id();
        let leaf = monitor.document_mut().build(wrapper, "b").text("deep").id();
        monitor.activate();

        monitor.handle_input(InputEvent::Click { target: leaf });

        assert_eq!(monitor.state().selected_element, Some(host));
    }

    #[test]
    fn test_preview_mode_clicks_pass_through() {
        let (mut monitor, sink) = test_monitor();
        let node = selectable(&mut monitor, "h1", Some("title"), "Hello");
        monitor.activate();
        monitor.set_interaction_mode(InteractionMode::Preview);
        sink.clear();

        let disposition = monitor.handle_input(InputEvent::Click { target: node });

        assert_eq!(disposition, Disposition::PassThrough);
        assert!(sink.events().is_empty());
    }
}
