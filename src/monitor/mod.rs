//! Interaction state machine.
//!
//! One [`Monitor`] instance owns everything for one embedded frame: the
//! modeled document, the hover/selection/inline-edit state, the badge
//! manager, and the timer scheduler. Commands arrive from the protocol
//! adapter; pointer, keyboard, and viewport input arrives from the host
//! shell; outcomes leave as events through the sink.
//!
//! # Module Structure
//!
//! | Module | Description |
//! |--------|-------------|
//! | `hover` | Pointer enter/leave decoration |
//! | `select` | Click resolution and selection toggling |
//! | `changes` | `APPLY_CHANGES` application |
//! | `inline` | Inline text-editing mode |
//!
//! # Decoration Ownership
//!
//! The monitor is the sole mutator of the debug decoration attributes
//! (`data-debug-hover`, `data-debug-selected`, `data-debug-dynamic`).
//! Hover and selection bookkeeping are independent owners: clearing hover
//! never strips a selected node's decoration, and vice versa.

// ============================================================================
// Submodules
// ============================================================================

mod changes;
mod hover;
mod inline;
mod select;

// ============================================================================
// Imports
// ============================================================================

use serde::Serialize;
use tokio::time::{Duration, Instant};
use tracing::debug;

use crate::badge::BadgeManager;
use crate::config::MonitorConfig;
use crate::dom::{Cursor, Document, Viewport};
use crate::identifiers::{BadgeId, NodeId};
use crate::protocol::command::{Command, InteractionMode};
use crate::protocol::event::{EventSink, MonitorEvent};
use crate::schedule::{Scheduler, TimerKey};

// ============================================================================
// Constants
// ============================================================================

/// Hover decoration attribute.
pub const ATTR_HOVER: &str = "data-debug-hover";

/// Selection decoration attribute.
pub const ATTR_SELECTED: &str = "data-debug-selected";

/// Warning decoration attribute for non-editable dynamic elements.
pub const ATTR_DYNAMIC_MARK: &str = "data-debug-dynamic";

/// Wrapper attribute whose carrier is unwrapped to its parent on click.
pub const ATTR_DYNAMIC_WRAPPER: &str = "data-ve-dynamic";

/// Root class toggled while select mode is active.
const SELECT_MODE_CLASS: &str = "debug-select-mode";

/// The builder platform's own floating badge; never hoverable/selectable.
pub(crate) const BUILDER_BADGE_ID: &str = "builder-badge";

/// Scroll/resize debounce before badges reposition.
const REPOSITION_DEBOUNCE: Duration = Duration::from_millis(50);

/// Delay standing in for the coalesced animation frame.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Grace period after focus leaves the inline-edited element.
pub(crate) const BLUR_GRACE: Duration = Duration::from_millis(100);

// ============================================================================
// Input Types
// ============================================================================

/// Modifier keys held during a pointer event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Control key.
    pub ctrl: bool,
    /// Alt/Option key.
    pub alt: bool,
    /// Shift key.
    pub shift: bool,
    /// Meta/Command key.
    pub meta: bool,
}

impl Modifiers {
    /// Returns `true` if any modifier that re-enables native behavior is
    /// held (shift alone does not).
    #[inline]
    #[must_use]
    pub fn bypasses_interception(self) -> bool {
        self.ctrl || self.alt || self.meta
    }
}

/// Keys the inline editor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Commit (without shift).
    Enter,
    /// Revert.
    Escape,
    /// Anything else; passes through.
    Other,
}

/// Host input delivered to the monitor.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer entered an element.
    PointerEnter {
        /// The element under the pointer.
        target: NodeId,
    },
    /// Pointer left an element.
    PointerLeave {
        /// The element the pointer left.
        target: NodeId,
    },
    /// Primary click on an element.
    Click {
        /// The clicked element.
        target: NodeId,
    },
    /// The frame scrolled.
    Scroll,
    /// The frame resized.
    Resize {
        /// The new viewport.
        viewport: Viewport,
    },
    /// Text typed into the inline-edited element.
    TextInput {
        /// The element's full new text.
        text: String,
    },
    /// Key pressed while inline editing.
    KeyDown {
        /// The key.
        key: Key,
        /// Whether shift was held.
        shift: bool,
    },
    /// Focus left the inline-edited element.
    Blur,
}

/// Whether the monitor consumed an input event.
///
/// `Consumed` means the host should suppress the page's default handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// The monitor handled the event; suppress defaults.
    Consumed,
    /// The event belongs to the page.
    PassThrough,
}

// ============================================================================
// MonitorState
// ============================================================================

/// Mutable interaction state, one per embedded frame.
#[derive(Debug, Default)]
pub(crate) struct MonitorState {
    pub is_active: bool,
    pub interaction_mode: InteractionMode,
    pub selected_element: Option<NodeId>,
    pub selected_group: Vec<NodeId>,
    pub hover_group: Vec<NodeId>,
    pub hover_target: Option<NodeId>,
    pub hover_badge: Option<BadgeId>,
    pub selected_badge: Option<BadgeId>,
    pub selected_badges: Vec<BadgeId>,
    pub inline_edit_element: Option<NodeId>,
    pub inline_edit_original_text: String,
}

/// Defensive copy of the monitor state, exposed to the hosting shell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSnapshot {
    /// Whether debug mode is active.
    pub is_active: bool,
    /// Current interaction mode.
    pub interaction_mode: InteractionMode,
    /// The selected element.
    pub selected_element: Option<NodeId>,
    /// The selected identity-key group.
    pub selected_group: Vec<NodeId>,
    /// The hovered identity-key group.
    pub hover_group: Vec<NodeId>,
    /// The live hover badge.
    pub hover_badge: Option<BadgeId>,
    /// The live single-selection badge.
    pub selected_badge: Option<BadgeId>,
    /// The live group-selection badges.
    pub selected_badges: Vec<BadgeId>,
    /// The element being inline edited.
    pub inline_edit_element: Option<NodeId>,
    /// The pre-edit text snapshot.
    pub inline_edit_original_text: String,
}

// ============================================================================
// ListenerSet
// ============================================================================

/// Scoped subscription to document/window events.
///
/// Acquired on `ACTIVATE`, released (even on abnormal teardown) when the
/// monitor drops it; handlers gate on its presence.
#[derive(Debug)]
pub(crate) struct ListenerSet;

impl ListenerSet {
    fn attach() -> Self {
        debug!("Attaching document listeners");
        Self
    }
}

impl Drop for ListenerSet {
    fn drop(&mut self) {
        debug!("Detaching document listeners");
    }
}

// ============================================================================
// Monitor
// ============================================================================

/// The interaction state machine for one embedded frame.
pub struct Monitor {
    pub(crate) config: MonitorConfig,
    pub(crate) document: Document,
    pub(crate) state: MonitorState,
    pub(crate) badges: BadgeManager,
    pub(crate) scheduler: Scheduler,
    pub(crate) sink: Box<dyn EventSink>,
    listeners: Option<ListenerSet>,
}

// ============================================================================
// Monitor - Construction & Accessors
// ============================================================================

impl Monitor {
    /// Creates a monitor over a document, emitting events into `sink`.
    #[must_use]
    pub fn new(config: MonitorConfig, document: Document, sink: Box<dyn EventSink>) -> Self {
        Self {
            config,
            document,
            state: MonitorState::default(),
            badges: BadgeManager::new(),
            scheduler: Scheduler::new(),
            sink,
            listeners: None,
        }
    }

    /// Returns the monitor configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Returns the modeled document.
    #[inline]
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Returns the modeled document mutably (the host mirrors real DOM
    /// changes through this).
    #[inline]
    #[must_use]
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Returns the badge manager.
    #[inline]
    #[must_use]
    pub fn badges(&self) -> &BadgeManager {
        &self.badges
    }

    /// Returns `true` while debug mode is active.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state.is_active
    }

    /// Returns the current interaction mode.
    #[inline]
    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.state.interaction_mode
    }

    /// Returns a defensive copy of the interaction state.
    #[must_use]
    pub fn state(&self) -> StateSnapshot {
        StateSnapshot {
            is_active: self.state.is_active,
            interaction_mode: self.state.interaction_mode,
            selected_element: self.state.selected_element,
            selected_group: self.state.selected_group.clone(),
            hover_group: self.state.hover_group.clone(),
            hover_badge: self.state.hover_badge,
            selected_badge: self.state.selected_badge,
            selected_badges: self.state.selected_badges.clone(),
            inline_edit_element: self.state.inline_edit_element,
            inline_edit_original_text: self.state.inline_edit_original_text.clone(),
        }
    }

    /// Emits an event through the sink, best-effort.
    pub(crate) fn emit(&self, event: MonitorEvent) {
        self.sink.emit(&event);
    }
}

// ============================================================================
// Monitor - Lifecycle
// ============================================================================

impl Monitor {
    /// Enters debug mode: attaches listeners, sets the mode chrome, and
    /// announces activation.
    pub fn activate(&mut self) {
        self.state.is_active = true;
        self.apply_mode_chrome();
        self.listeners = Some(ListenerSet::attach());
        debug!(url = %self.config.frame_url, "Debug mode activated");
        self.emit(MonitorEvent::DebugModeActivated {
            url: self.config.frame_url.to_string(),
        });
    }

    /// Leaves debug mode: detaches listeners, cancels every pending timer,
    /// clears selection (committing any inline edit), and removes every
    /// badge.
    pub fn deactivate(&mut self) {
        self.state.is_active = false;
        self.document.set_cursor(Cursor::Auto);
        self.document.remove_root_class(SELECT_MODE_CLASS);
        self.listeners = None;

        self.scheduler.cancel(TimerKey::RepositionDebounce);
        self.scheduler.cancel(TimerKey::RepositionFrame);

        self.clear_selection();
        self.badges.cleanup(&mut self.scheduler);
        // nothing may outlive deactivation
        self.scheduler.cancel_all();

        debug!("Debug mode deactivated");
        self.emit(MonitorEvent::DebugModeDeactivated);
    }

    /// Switches between select and preview interaction.
    pub fn set_interaction_mode(&mut self, mode: InteractionMode) {
        self.state.interaction_mode = mode;
        if self.state.is_active {
            self.apply_mode_chrome();
        }
        debug!(%mode, "Interaction mode changed");
        self.emit(MonitorEvent::InteractionModeChanged { mode });
    }

    /// Drops all selection and hover decoration across the whole document
    /// and announces deselection.
    pub fn clear_selection(&mut self) {
        if self.state.inline_edit_element.is_some() {
            self.disable_inline_edit(true);
        }

        if let Some(element) = self.state.selected_element.take() {
            self.document.remove_attribute(element, ATTR_SELECTED);
        }
        if let Some(badge) = self.state.selected_badge.take() {
            self.badges.remove(&mut self.scheduler, badge);
        }
        for element in std::mem::take(&mut self.state.selected_group) {
            self.document.remove_attribute(element, ATTR_SELECTED);
            self.document.remove_attribute(element, ATTR_DYNAMIC_MARK);
        }
        for badge in std::mem::take(&mut self.state.selected_badges) {
            self.badges.remove(&mut self.scheduler, badge);
        }
        if let Some(badge) = self.state.hover_badge.take() {
            self.badges.remove(&mut self.scheduler, badge);
        }
        self.state.hover_target = None;

        // untracked stragglers too, not just the bookkept references
        for element in self.document.query_has_attr(ATTR_HOVER) {
            self.document.remove_attribute(element, ATTR_HOVER);
            self.document.remove_attribute(element, ATTR_DYNAMIC_MARK);
        }
        self.state.hover_group.clear();

        self.emit(MonitorEvent::ElementDeselected);
    }

    fn apply_mode_chrome(&mut self) {
        match self.state.interaction_mode {
            InteractionMode::Select => {
                self.document.set_cursor(Cursor::Crosshair);
                self.document.add_root_class(SELECT_MODE_CLASS);
            }
            InteractionMode::Preview => {
                self.document.set_cursor(Cursor::Default);
                self.document.remove_root_class(SELECT_MODE_CLASS);
            }
        }
    }
}

// ============================================================================
// Monitor - Dispatch
// ============================================================================

impl Monitor {
    /// Dispatches a decoded protocol command.
    pub fn handle_command(&mut self, command: Command) {
        match command {
            Command::Activate => self.activate(),
            Command::Deactivate => self.deactivate(),
            Command::ClearSelection => self.clear_selection(),
            Command::ApplyChanges(changes) => self.apply_changes(&changes),
            Command::SetInteractionMode { mode } => self.set_interaction_mode(mode),
            Command::EnableInlineEdit {
                element_id,
                array_index,
            } => self.enable_inline_edit(element_id.as_deref(), array_index),
            Command::DisableInlineEdit { save } => self.disable_inline_edit(save),
        }
    }

    /// Dispatches one host input event.
    pub fn handle_input(&mut self, event: InputEvent) -> Disposition {
        match event {
            InputEvent::PointerEnter { target } => {
                self.pointer_enter(target);
                Disposition::PassThrough
            }
            InputEvent::PointerLeave { target } => {
                self.pointer_leave(target);
                Disposition::PassThrough
            }
            InputEvent::Click { target } => self.click(target),
            InputEvent::Scroll => {
                self.handle_viewport_change();
                Disposition::PassThrough
            }
            InputEvent::Resize { viewport } => {
                self.document.set_viewport(viewport);
                self.handle_viewport_change();
                Disposition::PassThrough
            }
            InputEvent::TextInput { text } => {
                self.inline_input(&text);
                Disposition::PassThrough
            }
            InputEvent::KeyDown { key, shift } => self.inline_keydown(key, shift),
            InputEvent::Blur => {
                self.inline_blur();
                Disposition::PassThrough
            }
        }
    }

    /// Whether the host should suppress default pointer/touch/context-menu
    /// behavior for an event on `target`.
    ///
    /// Interception applies only in active select mode, is bypassed by
    /// modifier keys, and never applies inside the inline-edited element.
    #[must_use]
    pub fn suppresses_native_event(&self, target: NodeId, modifiers: Modifiers) -> bool {
        if !self.state.is_active || self.state.interaction_mode != InteractionMode::Select {
            return false;
        }
        if modifiers.bypasses_interception() {
            return false;
        }
        if let Some(editing) = self.state.inline_edit_element {
            if self.document.contains(editing, target) {
                return false;
            }
        }
        true
    }
}

// ============================================================================
// Monitor - Timers & Reposition
// ============================================================================

impl Monitor {
    /// Earliest pending timer deadline, for the runtime's sleep.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    /// Fires every timer due at `now`.
    pub fn fire_due_timers(&mut self, now: Instant) {
        for key in self.scheduler.fire_due(now) {
            self.on_timer(key);
        }
    }

    fn on_timer(&mut self, key: TimerKey) {
        match key {
            TimerKey::BadgeRemoval(id) => self.badges.finish_removal(id),
            TimerKey::RepositionDebounce => {
                // coalesce into a single frame; a pending frame is replaced
                self.scheduler
                    .schedule(TimerKey::RepositionFrame, FRAME_INTERVAL);
            }
            TimerKey::RepositionFrame => self.reposition_badges(),
            TimerKey::InlineBlurGrace => self.blur_grace_elapsed(),
        }
    }

    /// Scroll/resize entry: hide tracked badges and restart the debounce.
    fn handle_viewport_change(&mut self) {
        if !self.state.is_active {
            return;
        }

        if let Some(badge) = self.state.hover_badge {
            self.badges.hide_for_reposition(badge);
        }
        if let Some(badge) = self.state.selected_badge {
            self.badges.hide_for_reposition(badge);
        }
        for &badge in &self.state.selected_badges {
            self.badges.hide_for_reposition(badge);
        }

        self.scheduler
            .schedule(TimerKey::RepositionDebounce, REPOSITION_DEBOUNCE);
    }

    /// Commits new positions for every tracked badge and restores their
    /// visibility. Runs on the coalesced frame, never more than once per
    /// debounce cycle.
    fn reposition_badges(&mut self) {
        let viewport = self.document.viewport();

        if let (Some(badge), Some(target)) = (self.state.hover_badge, self.state.hover_target) {
            let rect = self.document.rect(target);
            self.badges.position_badge(badge, rect, viewport, false);
            self.badges.restore_after_reposition(badge);
        }

        if let (Some(badge), Some(element)) =
            (self.state.selected_badge, self.state.selected_element)
        {
            let rect = self.document.rect(element);
            self.badges.position_badge(badge, rect, viewport, false);
            self.badges.restore_after_reposition(badge);
        }

        if let (Some(&badge), Some(&element)) = (
            self.state.selected_badges.first(),
            self.state.selected_group.first(),
        ) {
            let rect = self.document.rect(element);
            self.badges.position_badge(badge, rect, viewport, false);
            self.badges.restore_after_reposition(badge);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    use std::sync::Arc;

    use parking_lot::Mutex;
    use url::Url;

    use crate::classify::{ATTR_COMPONENT, ATTR_FILE_NAME, ATTR_IDENTITY, ATTR_LINE_NUMBER};
    use crate::dom::Rect;

    /// Sink capturing every emitted event for assertions.
    #[derive(Clone, Default)]
    pub(crate) struct RecordingSink {
        events: Arc<Mutex<Vec<MonitorEvent>>>,
    }

    impl RecordingSink {
        pub(crate) fn events(&self) -> Vec<MonitorEvent> {
            self.events.lock().clone()
        }

        pub(crate) fn actions(&self) -> Vec<&'static str> {
            self.events.lock().iter().map(MonitorEvent::action).collect()
        }

        pub(crate) fn clear(&self) {
            self.events.lock().clear();
        }
    }

    impl EventSink for RecordingSink {
        fn emit(&self, event: &MonitorEvent) {
            self.events.lock().push(event.clone());
        }
    }

    pub(crate) fn test_monitor() -> (Monitor, RecordingSink) {
        let sink = RecordingSink::default();
        let config = MonitorConfig::new(
            Url::parse("https://site.example/preview").expect("valid url"),
        );
        let monitor = Monitor::new(
            config,
            Document::new(Viewport::default()),
            Box::new(sink.clone()),
        );
        (monitor, sink)
    }

    /// Appends a selectable element carrying the mandatory provenance
    /// attributes.
    pub(crate) fn selectable(
        monitor: &mut Monitor,
        tag: &str,
        key: Option<&str>,
        text: &str,
    ) -> NodeId {
        let root = monitor.document.root();
        let mut builder = monitor
            .document
            .build(root, tag)
            .attr(ATTR_FILE_NAME, "Page.jsx")
            .attr(ATTR_LINE_NUMBER, "12")
            .attr(ATTR_COMPONENT, "Page")
            .rect(Rect::new(100.0, 100.0, 200.0, 50.0));
        if let Some(key) = key {
            builder = builder.attr(ATTR_IDENTITY, key);
        }
        if !text.is_empty() {
            builder = builder.text(text);
        }
        builder.id()
    }

    #[test]
    fn test_activate_sets_chrome_and_emits() {
        let (mut monitor, sink) = test_monitor();
        monitor.activate();

        assert!(monitor.is_active());
        assert_eq!(monitor.document().cursor(), Cursor::Crosshair);
        assert!(monitor.document().has_root_class(SELECT_MODE_CLASS));
        assert_eq!(sink.actions(), vec!["DEBUG_MODE_ACTIVATED"]);
    }

    #[test]
    fn test_deactivate_tears_everything_down() {
        let (mut monitor, sink) = test_monitor();
        let node = selectable(&mut monitor, "h1", Some("title"), "Hello");
        monitor.activate();
        monitor.handle_input(InputEvent::Click { target: node });
        monitor.handle_input(InputEvent::Scroll);
        sink.clear();

        monitor.deactivate();

        assert!(!monitor.is_active());
        assert_eq!(monitor.document().cursor(), Cursor::Auto);
        assert!(!monitor.document().has_root_class(SELECT_MODE_CLASS));
        assert!(monitor.badges().is_empty());
        assert_eq!(monitor.next_deadline(), None);
        assert_eq!(
            sink.actions(),
            vec!["ELEMENT_DESELECTED", "DEBUG_MODE_DEACTIVATED"]
        );
    }

    #[test]
    fn test_mode_switch_updates_chrome() {
        let (mut monitor, sink) = test_monitor();
        monitor.activate();
        sink.clear();

        monitor.set_interaction_mode(InteractionMode::Preview);
        assert_eq!(monitor.document().cursor(), Cursor::Default);
        assert!(!monitor.document().has_root_class(SELECT_MODE_CLASS));
        assert_eq!(sink.actions(), vec!["INTERACTION_MODE_CHANGED"]);

        monitor.set_interaction_mode(InteractionMode::Select);
        assert_eq!(monitor.document().cursor(), Cursor::Crosshair);
        assert!(monitor.document().has_root_class(SELECT_MODE_CLASS));
    }

    #[test]
    fn test_suppresses_native_event_rules() {
        let (mut monitor, _sink) = test_monitor();
        let node = selectable(&mut monitor, "button", None, "Go");

        // inactive: never suppress
        assert!(!monitor.suppresses_native_event(node, Modifiers::default()));

        monitor.activate();
        assert!(monitor.suppresses_native_event(node, Modifiers::default()));

        // modifier bypass
        let meta = Modifiers {
            meta: true,
            ..Modifiers::default()
        };
        assert!(!monitor.suppresses_native_event(node, meta));

        // preview mode: pass-through
        monitor.set_interaction_mode(InteractionMode::Preview);
        assert!(!monitor.suppresses_native_event(node, Modifiers::default()));
    }

    #[test]
    fn test_scroll_debounce_coalesces_into_one_frame() {
        let (mut monitor, _sink) = test_monitor();
        let node = selectable(&mut monitor, "h1", Some("title"), "Hello");
        monitor.activate();
        monitor.handle_input(InputEvent::Click { target: node });

        let badge = monitor.state().selected_badge.expect("badge");
        assert_eq!(monitor.badges().get(badge).expect("badge").opacity, 1.0);

        // a burst of scroll events keeps exactly one debounce pending
        for _ in 0..5 {
            monitor.handle_input(InputEvent::Scroll);
        }
        assert_eq!(monitor.badges().get(badge).expect("badge").opacity, 0.0);
        assert!(monitor.scheduler.is_pending(TimerKey::RepositionDebounce));

        // debounce fires -> one frame; frame fires -> badge restored
        let far = Instant::now() + Duration::from_secs(1);
        monitor.fire_due_timers(far);
        assert!(monitor.scheduler.is_pending(TimerKey::RepositionFrame));
        monitor.fire_due_timers(far + Duration::from_secs(1));

        let restored = monitor.badges().get(badge).expect("badge");
        assert_eq!(restored.opacity, 1.0);
        assert!(restored.transitions_enabled);
        assert_eq!(monitor.next_deadline(), None);
    }

    #[test]
    fn test_resize_updates_viewport_and_repositions() {
        let (mut monitor, _sink) = test_monitor();
        let node = selectable(&mut monitor, "h1", Some("title"), "Hello");
        monitor.activate();
        monitor.handle_input(InputEvent::Click { target: node });

        monitor.handle_input(InputEvent::Resize {
            viewport: Viewport::new(640.0, 480.0),
        });
        assert_eq!(monitor.document().viewport().width, 640.0);
        assert!(monitor.scheduler.is_pending(TimerKey::RepositionDebounce));
    }

    #[test]
    fn test_state_snapshot_is_defensive_copy() {
        let (mut monitor, _sink) = test_monitor();
        let node = selectable(&mut monitor, "h1", Some("title"), "Hello");
        monitor.activate();
        monitor.handle_input(InputEvent::Click { target: node });

        let mut snapshot = monitor.state();
        snapshot.selected_group.push(node);
        snapshot.is_active = false;

        // mutating the copy leaves the monitor untouched
        assert!(monitor.is_active());
        assert_eq!(monitor.state().selected_element, Some(node));
    }
}
