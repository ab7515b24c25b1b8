//! Keyed timer scheduler.
//!
//! Every delayed action in the monitor — badge fade-out, reposition
//! debounce, the coalesced reposition frame, the inline-edit blur grace
//! period — is a keyed entry here. Scheduling a key that is already
//! pending cancels the previous deadline first, which gives debounce and
//! single-flight semantics for free: re-triggering a fade restarts it,
//! and at most one reposition frame is ever outstanding.
//!
//! The scheduler only stores deadlines; the runtime sleeps until
//! [`Scheduler::next_deadline`] and then drains [`Scheduler::fire_due`].
//! Deadlines use [`tokio::time::Instant`] so paused-clock tests can drive
//! them deterministically.

// ============================================================================
// Imports
// ============================================================================

use rustc_hash::FxHashMap;
use tokio::time::{Duration, Instant};

use crate::identifiers::BadgeId;

// ============================================================================
// TimerKey
// ============================================================================

/// Identity of a pending timer. One entry per key at most.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKey {
    /// Fade-out completion for one badge.
    BadgeRemoval(BadgeId),
    /// Scroll/resize debounce window.
    RepositionDebounce,
    /// The coalesced reposition frame.
    RepositionFrame,
    /// Grace period after focus leaves the inline-edited element.
    InlineBlurGrace,
}

// ============================================================================
// Scheduler
// ============================================================================

/// Cancel-previous-then-schedule timer table.
#[derive(Debug, Default)]
pub struct Scheduler {
    deadlines: FxHashMap<TimerKey, Entry>,
    seq: u64,
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    deadline: Instant,
    seq: u64,
}

impl Scheduler {
    /// Creates an empty scheduler.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `key` to fire after `delay`, cancelling any pending
    /// deadline for the same key first.
    pub fn schedule(&mut self, key: TimerKey, delay: Duration) {
        self.seq += 1;
        self.deadlines.insert(
            key,
            Entry {
                deadline: Instant::now() + delay,
                seq: self.seq,
            },
        );
    }

    /// Cancels a pending timer. Returns `true` if one was pending.
    pub fn cancel(&mut self, key: TimerKey) -> bool {
        self.deadlines.remove(&key).is_some()
    }

    /// Cancels every pending timer matching the predicate.
    pub fn cancel_where(&mut self, pred: impl Fn(TimerKey) -> bool) {
        self.deadlines.retain(|&key, _| !pred(key));
    }

    /// Cancels every pending timer.
    pub fn cancel_all(&mut self) {
        self.deadlines.clear();
    }

    /// Returns `true` if the key has a pending deadline.
    #[inline]
    #[must_use]
    pub fn is_pending(&self, key: TimerKey) -> bool {
        self.deadlines.contains_key(&key)
    }

    /// Returns the earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadlines.values().map(|entry| entry.deadline).min()
    }

    /// Removes and returns every key due at `now`, in scheduling order
    /// within equal deadlines.
    pub fn fire_due(&mut self, now: Instant) -> Vec<TimerKey> {
        let mut due: Vec<(TimerKey, Entry)> = self
            .deadlines
            .iter()
            .filter(|(_, entry)| entry.deadline <= now)
            .map(|(&key, &entry)| (key, entry))
            .collect();
        due.sort_by_key(|(_, entry)| (entry.deadline, entry.seq));

        for (key, _) in &due {
            self.deadlines.remove(key);
        }
        due.into_iter().map(|(key, _)| key).collect()
    }

    /// Number of pending timers.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.deadlines.len()
    }

    /// Returns `true` when nothing is pending.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deadlines.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_replaces_pending_deadline() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(TimerKey::RepositionDebounce, Duration::from_millis(50));
        let first = scheduler.next_deadline().expect("pending");

        scheduler.schedule(TimerKey::RepositionDebounce, Duration::from_millis(50));
        let second = scheduler.next_deadline().expect("pending");

        assert_eq!(scheduler.len(), 1);
        assert!(second >= first);
    }

    #[test]
    fn test_fire_due_removes_and_orders() {
        let mut scheduler = Scheduler::new();
        let badge = BadgeId::generate();
        scheduler.schedule(TimerKey::BadgeRemoval(badge), Duration::from_millis(0));
        scheduler.schedule(TimerKey::RepositionDebounce, Duration::from_millis(0));
        scheduler.schedule(TimerKey::InlineBlurGrace, Duration::from_secs(60));

        let fired = scheduler.fire_due(Instant::now() + Duration::from_millis(1));
        assert_eq!(fired.len(), 2);
        assert_eq!(fired[0], TimerKey::BadgeRemoval(badge));
        assert_eq!(fired[1], TimerKey::RepositionDebounce);
        assert!(scheduler.is_pending(TimerKey::InlineBlurGrace));
    }

    #[test]
    fn test_cancel_where() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(
            TimerKey::BadgeRemoval(BadgeId::generate()),
            Duration::from_millis(150),
        );
        scheduler.schedule(
            TimerKey::BadgeRemoval(BadgeId::generate()),
            Duration::from_millis(150),
        );
        scheduler.schedule(TimerKey::RepositionFrame, Duration::from_millis(16));

        scheduler.cancel_where(|key| matches!(key, TimerKey::BadgeRemoval(_)));
        assert_eq!(scheduler.len(), 1);
        assert!(scheduler.is_pending(TimerKey::RepositionFrame));
    }

    #[test]
    fn test_cancel_all_leaves_nothing() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(TimerKey::RepositionDebounce, Duration::from_millis(50));
        scheduler.schedule(TimerKey::InlineBlurGrace, Duration::from_millis(100));
        scheduler.cancel_all();

        assert!(scheduler.is_empty());
        assert_eq!(scheduler.next_deadline(), None);
    }
}
