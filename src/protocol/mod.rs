//! Cross-frame protocol message types.
//!
//! This module defines the message contract between the monitor (inside
//! the embedded frame) and the hosting builder application.
//!
//! # Protocol Overview
//!
//! | Message Type | Direction | Purpose |
//! |--------------|-----------|---------|
//! | [`CommandEnvelope`] | Host → Monitor | Command request |
//! | [`EventEnvelope`] | Monitor → Host | Debug notification |
//!
//! Commands use a fixed envelope `{type: "DEBUG_COMMAND", action, data}`
//! and are dispatched by `action`. Events are enveloped with the frame URL
//! and a millisecond timestamp, and delivered best-effort.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `command` | Inbound envelope, `Command`, `ChangeSet`, `InteractionMode` |
//! | `event` | Outbound `MonitorEvent`, envelope, `EventSink` |

// ============================================================================
// Submodules
// ============================================================================

/// Inbound command definitions.
pub mod command;

/// Outbound event definitions.
pub mod event;

// ============================================================================
// Re-exports
// ============================================================================

pub use command::{
    COMMAND_ENVELOPE_TYPE, ChangeSet, Command, CommandEnvelope, InteractionMode,
};
pub use event::{
    EVENT_ENVELOPE_TYPE, EdgeRect, EventEnvelope, EventSink, MonitorEvent, NullSink,
    SelectionPayload, SelectionPosition,
};
