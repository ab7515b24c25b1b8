//! Channel bridge between the monitor and its hosting frame.
//!
//! Stands in for the browser's cross-frame message boundary: the host
//! posts command payloads tagged with its origin, and receives enveloped
//! events. Both directions are best-effort — a missing peer drops
//! messages silently, exactly like posting into a detached frame.

// ============================================================================
// Imports
// ============================================================================

use serde_json::Value;
use tokio::sync::mpsc;
use tracing::trace;
use url::Url;

use crate::protocol::event::{EventEnvelope, EventSink, MonitorEvent};

// ============================================================================
// InboundMessage
// ============================================================================

/// A raw message from the hosting frame, tagged with its origin.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    /// The sender's origin, checked against the configured filter.
    pub origin: String,
    /// The raw message payload.
    pub payload: Value,
}

// ============================================================================
// Bridge Construction
// ============================================================================

/// Creates a connected bridge: the monitor-side endpoints and the
/// host-side handle. `host_origin` tags every message the host posts.
#[must_use]
pub fn pair(host_origin: impl Into<String>) -> (FrameBridge, HostFrame) {
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    (
        FrameBridge {
            command_rx,
            event_tx,
        },
        HostFrame {
            origin: host_origin.into(),
            command_tx,
            event_rx,
        },
    )
}

// ============================================================================
// FrameBridge
// ============================================================================

/// The monitor-side endpoints of the bridge.
pub struct FrameBridge {
    /// Inbound command messages.
    pub(crate) command_rx: mpsc::UnboundedReceiver<InboundMessage>,
    /// Outbound event envelopes.
    pub(crate) event_tx: mpsc::UnboundedSender<Value>,
}

impl FrameBridge {
    /// Builds the event sink that envelopes and forwards monitor events.
    #[must_use]
    pub fn sink(&self, source: Url) -> ChannelSink {
        ChannelSink {
            source,
            tx: self.event_tx.clone(),
        }
    }
}

// ============================================================================
// HostFrame
// ============================================================================

/// The hosting frame's handle: post commands, receive events.
pub struct HostFrame {
    origin: String,
    command_tx: mpsc::UnboundedSender<InboundMessage>,
    event_rx: mpsc::UnboundedReceiver<Value>,
}

impl HostFrame {
    /// Posts a raw message to the monitor. Returns `false` when the
    /// monitor side is gone.
    pub fn post(&self, payload: Value) -> bool {
        self.command_tx
            .send(InboundMessage {
                origin: self.origin.clone(),
                payload,
            })
            .is_ok()
    }

    /// Awaits the next event envelope.
    pub async fn next_event(&mut self) -> Option<Value> {
        self.event_rx.recv().await
    }

    /// Returns an already-delivered event envelope, if any.
    pub fn try_next_event(&mut self) -> Option<Value> {
        self.event_rx.try_recv().ok()
    }
}

// ============================================================================
// ChannelSink
// ============================================================================

/// [`EventSink`] that envelopes events and forwards them to the host.
///
/// Send failures are swallowed: the event channel is telemetry, not
/// control.
pub struct ChannelSink {
    source: Url,
    tx: mpsc::UnboundedSender<Value>,
}

impl EventSink for ChannelSink {
    fn emit(&self, event: &MonitorEvent) {
        let envelope = EventEnvelope::new(&self.source, event.clone());
        match serde_json::to_value(&envelope) {
            Ok(message) => {
                if self.tx.send(message).is_err() {
                    trace!(action = event.action(), "No hosting frame; event dropped");
                }
            }
            Err(error) => {
                trace!(action = event.action(), %error, "Event serialization failed");
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

    #[test]
    fn test_post_tags_origin() {
        let (mut bridge, host) = pair("https://builder.example");
        assert!(host.post(json!({"type": "DEBUG_COMMAND", "action": "ACTIVATE"})));

        let message = bridge.command_rx.try_recv().expect("message");
        assert_eq!(message.origin, "https://builder.example");
        assert_eq!(message.payload["action"], "ACTIVATE");
    }

    #[test]
    fn test_sink_envelopes_events() {
        let (bridge, mut host) = pair("https://builder.example");
        let sink = bridge.sink(Url::parse("https://site.example/preview").expect("url"));

        sink.emit(&MonitorEvent::DebugModeDeactivated);

        let envelope = host.try_next_event().expect("event");
        assert_eq!(envelope["type"], "DEBUG_EVENT");
        assert_eq!(envelope["action"], "DEBUG_MODE_DEACTIVATED");
        assert_eq!(envelope["source"], "https://site.example/preview");
    }

    #[test]
    fn test_sink_swallows_send_failures() {
        let (bridge, host) = pair("https://builder.example");
        let sink = bridge.sink(Url::parse("https://site.example/").expect("url"));
        drop(host);

        // no panic, no error surfaced
        sink.emit(&MonitorEvent::ElementDeselected);
    }

    #[test]
    fn test_post_after_monitor_gone() {
        let (bridge, host) = pair("https://builder.example");
        drop(bridge);
        assert!(!host.post(json!({"type": "DEBUG_COMMAND", "action": "ACTIVATE"})));
    }
}
