//! Outbound event messages.
//!
//! Events are notifications sent from the monitor to the hosting frame
//! when debug activity occurs. Delivery is best-effort: the channel is
//! telemetry, not control, and send failures are swallowed.
//!
//! # Format
//!
//! ```json
//! {
//!   "type": "DEBUG_EVENT",
//!   "source": "https://site.example/preview",
//!   "timestamp": 1723022400000,
//!   "action": "ELEMENT_SELECTED",
//!   "element": { ... },
//!   "isDynamic": true
//! }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::classify::{EditType, SourceInfo};
use crate::dom::{ElementSnapshot, Rect};
use crate::protocol::command::InteractionMode;

// ============================================================================
// Constants
// ============================================================================

/// Envelope `type` for outbound events.
pub const EVENT_ENVELOPE_TYPE: &str = "DEBUG_EVENT";

// ============================================================================
// Selection Payload
// ============================================================================

/// Edge form of a rectangle, reported alongside the origin/extent form so
/// the parent can place its editing widget without re-deriving edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeRect {
    /// Top edge.
    pub top: f64,
    /// Left edge.
    pub left: f64,
    /// Bottom edge.
    pub bottom: f64,
    /// Right edge.
    pub right: f64,
}

impl From<Rect> for EdgeRect {
    fn from(rect: Rect) -> Self {
        Self {
            top: rect.top(),
            left: rect.left(),
            bottom: rect.bottom(),
            right: rect.right(),
        }
    }
}

/// Widget-placement block of `ELEMENT_SELECTED`.
///
/// Viewport-relative; the parent adds the frame's own offset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionPosition {
    /// Left edge of the element.
    pub x: f64,
    /// Bottom edge of the element (the widget goes below it).
    pub y: f64,
    /// Element width.
    pub width: f64,
    /// Element height.
    pub height: f64,
    /// Full edge rectangle.
    pub element_rect: EdgeRect,
}

impl From<Rect> for SelectionPosition {
    fn from(rect: Rect) -> Self {
        Self {
            x: rect.left(),
            y: rect.bottom(),
            width: rect.width,
            height: rect.height,
            element_rect: rect.into(),
        }
    }
}

/// Payload of `ELEMENT_SELECTED`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionPayload {
    /// Snapshot of the selected element.
    pub element: ElementSnapshot,
    /// Classification: dynamic?
    pub is_dynamic: bool,
    /// Classification: editable?
    pub is_editable: bool,
    /// Classification: edit mechanism.
    pub edit_type: EditType,
    /// Classification: source description.
    pub source_info: Option<SourceInfo>,
    /// Position among same-key siblings, when grouped.
    pub array_index: Option<usize>,
    /// Size of the selected group (1 for static elements).
    pub element_count: usize,
    /// Whether the selection spans multiple instances.
    pub is_multi_element: bool,
    /// Widget-placement block.
    pub position: SelectionPosition,
}

// ============================================================================
// MonitorEvent
// ============================================================================

/// All events the monitor can emit, tagged by `action` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum MonitorEvent {
    /// Debug mode entered.
    #[serde(rename = "DEBUG_MODE_ACTIVATED")]
    DebugModeActivated {
        /// The frame's URL.
        url: String,
    },

    /// Debug mode left.
    #[serde(rename = "DEBUG_MODE_DEACTIVATED")]
    DebugModeDeactivated,

    /// An element was selected.
    #[serde(rename = "ELEMENT_SELECTED")]
    ElementSelected(SelectionPayload),

    /// The selection was cleared (by click-toggle or command).
    #[serde(rename = "ELEMENT_DESELECTED")]
    ElementDeselected,

    /// The interaction mode changed.
    #[serde(rename = "INTERACTION_MODE_CHANGED")]
    #[serde(rename_all = "camelCase")]
    InteractionModeChanged {
        /// The new mode.
        mode: InteractionMode,
    },

    /// An `APPLY_CHANGES` command failed.
    #[serde(rename = "CHANGES_ERROR")]
    #[serde(rename_all = "camelCase")]
    ChangesError {
        /// Failure description.
        error: String,
        /// Identity key the command named, if any.
        element_id: Option<String>,
        /// Array index the command named, if any.
        #[serde(skip_serializing_if = "Option::is_none")]
        array_index: Option<usize>,
    },

    /// Inline editing started.
    #[serde(rename = "INLINE_EDIT_START")]
    #[serde(rename_all = "camelCase")]
    InlineEditStart {
        /// Identity key of the edited element.
        element_id: Option<String>,
        /// Current text.
        text_content: String,
    },

    /// The inline-edited text changed.
    #[serde(rename = "INLINE_EDIT_CHANGE")]
    #[serde(rename_all = "camelCase")]
    InlineEditChange {
        /// Identity key of the edited element.
        element_id: Option<String>,
        /// Current text.
        text_content: String,
    },

    /// Inline editing ended.
    #[serde(rename = "INLINE_EDIT_END")]
    #[serde(rename_all = "camelCase")]
    InlineEditEnd {
        /// Identity key of the edited element.
        element_id: Option<String>,
        /// Final text when saved, original text when reverted.
        text_content: String,
        /// The pre-edit snapshot.
        original_text: String,
        /// Whether the edit was committed.
        saved: bool,
    },

    /// Inline editing was refused or failed.
    #[serde(rename = "INLINE_EDIT_ERROR")]
    #[serde(rename_all = "camelCase")]
    InlineEditError {
        /// Failure description.
        error: String,
        /// Identity key the command named, if any.
        element_id: Option<String>,
        /// Classification detail for rejections.
        #[serde(skip_serializing_if = "Option::is_none")]
        is_dynamic: Option<bool>,
        /// Classification detail for rejections.
        #[serde(skip_serializing_if = "Option::is_none")]
        is_editable: Option<bool>,
    },
}

impl MonitorEvent {
    /// The wire `action` name, for logging.
    #[must_use]
    pub fn action(&self) -> &'static str {
        match self {
            Self::DebugModeActivated { .. } => "DEBUG_MODE_ACTIVATED",
            Self::DebugModeDeactivated => "DEBUG_MODE_DEACTIVATED",
            Self::ElementSelected(_) => "ELEMENT_SELECTED",
            Self::ElementDeselected => "ELEMENT_DESELECTED",
            Self::InteractionModeChanged { .. } => "INTERACTION_MODE_CHANGED",
            Self::ChangesError { .. } => "CHANGES_ERROR",
            Self::InlineEditStart { .. } => "INLINE_EDIT_START",
            Self::InlineEditChange { .. } => "INLINE_EDIT_CHANGE",
            Self::InlineEditEnd { .. } => "INLINE_EDIT_END",
            Self::InlineEditError { .. } => "INLINE_EDIT_ERROR",
        }
    }
}

// ============================================================================
// EventEnvelope
// ============================================================================

/// The outbound envelope wrapping an event with its provenance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventEnvelope {
    /// Envelope type marker (always [`EVENT_ENVELOPE_TYPE`]).
    #[serde(rename = "type")]
    pub envelope_type: &'static str,
    /// The emitting frame's URL.
    pub source: String,
    /// Unix timestamp in milliseconds.
    pub timestamp: u64,
    /// The event, flattened (its `action` tag lands at the top level).
    #[serde(flatten)]
    pub event: MonitorEvent,
}

impl EventEnvelope {
    /// Wraps an event, stamping the current time.
    #[must_use]
    pub fn new(source: &Url, event: MonitorEvent) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;
        Self {
            envelope_type: EVENT_ENVELOPE_TYPE,
            source: source.to_string(),
            timestamp,
            event,
        }
    }
}

// ============================================================================
// EventSink
// ============================================================================

/// Best-effort outbound channel to the hosting frame.
///
/// Implementations must never block and never fail loudly: a monitor with
/// no hosting frame attached simply drops its telemetry.
pub trait EventSink: Send {
    /// Delivers one event.
    fn emit(&self, event: &MonitorEvent);
}

/// Sink that silently drops every event (no hosting frame present).
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: &MonitorEvent) {}
}

// ============================================================================
// Tests
// ============================================================================
