//! Monitor event loop and controller handle.
//!
//! The runtime serializes everything the monitor reacts to — inbound
//! protocol messages, host input events, and scheduler deadlines — onto
//! one loop, so handlers never run concurrently. The cloneable
//! [`MonitorController`] is the manual-testing surface the hosting shell
//! exposes to its page/console.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::time::{Duration, Instant, sleep_until};
use tracing::{debug, trace};

use crate::bridge::{FrameBridge, InboundMessage};
use crate::config::{MonitorConfig, OriginFilter};
use crate::dom::Document;
use crate::monitor::{InputEvent, Monitor, StateSnapshot};
use crate::protocol::command::CommandEnvelope;

// ============================================================================
// Constants
// ============================================================================

/// Sleep horizon while no timer is pending.
const IDLE_TICK: Duration = Duration::from_secs(60);

// ============================================================================
// MonitorRuntime
// ============================================================================

/// Owns the monitor and drives it from bridge messages, host input, and
/// timer deadlines.
pub struct MonitorRuntime {
    monitor: Arc<Mutex<Monitor>>,
    origin: OriginFilter,
    commands: mpsc::UnboundedReceiver<InboundMessage>,
    input_rx: mpsc::UnboundedReceiver<InputEvent>,
    input_tx: mpsc::UnboundedSender<InputEvent>,
}

impl MonitorRuntime {
    /// Builds a runtime over a document, wired to a bridge.
    #[must_use]
    pub fn new(config: MonitorConfig, document: Document, bridge: FrameBridge) -> Self {
        let sink = bridge.sink(config.frame_url.clone());
        let origin = config.origin.clone();
        let monitor = Monitor::new(config, document, Box::new(sink));
        let (input_tx, input_rx) = mpsc::unbounded_channel();

        Self {
            monitor: Arc::new(Mutex::new(monitor)),
            origin,
            commands: bridge.command_rx,
            input_rx,
            input_tx,
        }
    }

    /// Returns a cloneable controller for this runtime's monitor.
    #[must_use]
    pub fn controller(&self) -> MonitorController {
        MonitorController {
            monitor: Arc::clone(&self.monitor),
            input_tx: self.input_tx.clone(),
        }
    }

    /// Runs the event loop until the bridge's command channel closes.
    pub async fn run(mut self) {
        debug!("Monitor runtime started");

        loop {
            let deadline = self.monitor.lock().next_deadline();
            let sleep_target = deadline.unwrap_or_else(|| Instant::now() + IDLE_TICK);

            tokio::select! {
                message = self.commands.recv() => {
                    match message {
                        Some(message) => self.dispatch(message),
                        None => break,
                    }
                }
                event = self.input_rx.recv() => {
                    match event {
                        Some(event) => {
                            self.monitor.lock().handle_input(event);
                        }
                        None => break,
                    }
                }
                () = sleep_until(sleep_target), if deadline.is_some() => {
                    self.monitor.lock().fire_due_timers(Instant::now());
                }
            }
        }

        debug!("Monitor runtime stopped");
    }

    /// Filters, parses, and dispatches one inbound message.
    fn dispatch(&self, message: InboundMessage) {
        if !self.origin.accepts(&message.origin) {
            trace!(origin = %message.origin, "Dropping message from filtered origin");
            return;
        }
        let Some(envelope) = CommandEnvelope::parse(&message.payload) else {
            trace!("Ignoring non-command message");
            return;
        };
        let Some(command) = envelope.decode() else {
            return;
        };
        self.monitor.lock().handle_command(command);
    }
}

// ============================================================================
// MonitorController
// ============================================================================

/// Cloneable handle to a running monitor.
///
/// Mirrors the surface the embedded script exposes for manual testing:
/// `activate()`, `deactivate()`, `clear_selection()`, and a defensive
/// state copy — plus input injection and document access for the host
/// shell.
#[derive(Clone)]
pub struct MonitorController {
    monitor: Arc<Mutex<Monitor>>,
    input_tx: mpsc::UnboundedSender<InputEvent>,
}

impl MonitorController {
    /// Enters debug mode.
    pub fn activate(&self) {
        self.monitor.lock().activate();
    }

    /// Leaves debug mode.
    pub fn deactivate(&self) {
        self.monitor.lock().deactivate();
    }

    /// Drops all selection and hover decoration.
    pub fn clear_selection(&self) {
        self.monitor.lock().clear_selection();
    }

    /// Returns a defensive copy of the monitor state.
    #[must_use]
    pub fn state(&self) -> StateSnapshot {
        self.monitor.lock().state()
    }

    /// Queues a host input event onto the runtime loop. Returns `false`
    /// when the runtime has stopped.
    pub fn send_input(&self, event: InputEvent) -> bool {
        self.input_tx.send(event).is_ok()
    }

    /// Runs a closure against the modeled document (the host mirrors real
    /// DOM changes through this).
    pub fn with_document<R>(&self, f: impl FnOnce(&mut Document) -> R) -> R {
        f(self.monitor.lock().document_mut())
    }

    /// Runs a read-only closure against the monitor.
    pub fn inspect<R>(&self, f: impl FnOnce(&Monitor) -> R) -> R {
        f(&self.monitor.lock())
    }
}

// ============================================================================
// Tests
// ============================================================================
