//! DOM Monitor - embedded-frame inspection and live-edit overlay engine.
//!
//! This library is the core of a browser-injected overlay tool: an
//! external "builder" application visually inspects and edits a live DOM
//! tree rendered inside an embedded frame, driving the monitor over a
//! cross-frame command/event protocol.
//!
//! # Architecture
//!
//! The engine operates on an explicit model of the frame's DOM so every
//! behavior is deterministic and testable without a browser:
//!
//! - **Local end (host shell)**: mirrors the real DOM into [`dom::Document`],
//!   feeds pointer/keyboard/viewport input, applies mutations back out
//! - **Monitor**: classifies elements, decorates hover/selection state,
//!   places badges, edits content, and reports everything as events
//!
//! Key design principles:
//!
//! - One [`Monitor`] instance owns all state for one embedded frame
//!   (no globals; handlers are methods, not closures over a singleton)
//! - Every delayed action is an explicit [`schedule::Scheduler`] entry
//!   (cancel-previous-then-schedule; no ad hoc timer bookkeeping)
//! - Commands arrive only through the protocol adapter; events leave
//!   best-effort through an [`protocol::EventSink`]
//! - Event-driven: one runtime loop serializes messages, input, timers
//!
//! # Quick Start
//!
//! ```no_run
//! use dom_monitor::{bridge, Document, MonitorConfig, MonitorRuntime, Viewport};
//! use serde_json::json;
//! use url::Url;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = MonitorConfig::new(Url::parse("https://site.example/preview").unwrap());
//!     let (frame, mut host) = bridge::pair("https://builder.example");
//!
//!     let document = Document::new(Viewport::default());
//!     let runtime = MonitorRuntime::new(config, document, frame);
//!     let controller = runtime.controller();
//!     tokio::spawn(runtime.run());
//!
//!     // the builder activates debug mode and listens for events
//!     host.post(json!({"type": "DEBUG_COMMAND", "action": "ACTIVATE"}));
//!     let event = host.next_event().await.unwrap();
//!     println!("monitor says: {}", event["action"]);
//!     let _ = controller.state();
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`dom`] | Modeled document tree, geometry, styles, snapshots |
//! | [`classify`] | Dynamic/editable/shared-source classification |
//! | [`badge`] | Badge placement engine and badge lifecycle |
//! | [`monitor`] | Hover/selection/inline-edit state machine |
//! | [`protocol`] | Cross-frame command/event message types |
//! | [`bridge`] | Channel bridge standing in for `postMessage` |
//! | [`runtime`] | Event loop and controller handle |
//! | [`schedule`] | Debounce + single-flight timer scheduler |
//! | [`config`] | Frame URL and origin filtering |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`identifiers`] | Type-safe ID wrappers |

// ============================================================================
// Modules
// ============================================================================

/// Badge placement engine and badge lifecycle management.
pub mod badge;

/// Channel bridge standing in for the cross-frame message boundary.
pub mod bridge;

/// Element classification from declarative marker attributes.
pub mod classify;

/// Monitor configuration.
pub mod config;

/// The modeled DOM the monitor inspects and mutates.
pub mod dom;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Type-safe identifiers for monitor entities.
///
/// Newtype wrappers prevent mixing incompatible IDs at compile time.
pub mod identifiers;

/// Interaction state machine.
pub mod monitor;

/// Cross-frame protocol message types.
pub mod protocol;

/// Monitor event loop and controller handle.
pub mod runtime;

/// Keyed timer scheduler (debounce + single-flight).
pub mod schedule;

// ============================================================================
// Re-exports
// ============================================================================

// DOM types
pub use dom::{Document, ElementSnapshot, Rect, Size, Viewport};

// Classification types
pub use classify::{Classification, EditType, SourceDescriptor, SourceInfo, classify};

// Badge types
pub use badge::{Badge, BadgeKind, BadgeManager, Placement, Side};

// Monitor types
pub use monitor::{Disposition, InputEvent, Key, Modifiers, Monitor, StateSnapshot};

// Protocol types
pub use protocol::{
    ChangeSet, Command, CommandEnvelope, EventEnvelope, EventSink, InteractionMode, MonitorEvent,
    NullSink, SelectionPayload,
};

// Configuration types
pub use config::{MonitorConfig, OriginFilter};

// Runtime types
pub use runtime::{MonitorController, MonitorRuntime};

// Error types
pub use error::{Error, Result};

// Identifier types
pub use identifiers::{BadgeId, NodeId};
