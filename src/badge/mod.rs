//! Floating annotation badges.
//!
//! Badges are transient overlay nodes labeling the hovered or selected
//! element. The manager owns every live badge; state fields in the monitor
//! only hold [`BadgeId`]s. Removal is asynchronous — fade to transparent,
//! then detach when the fade timer fires — and re-triggering a pending
//! removal restarts its timer, so rapid hover churn never produces
//! duplicate or out-of-order removals.
//!
//! # Module Structure
//!
//! | Module | Description |
//! |--------|-------------|
//! | `position` | Pure placement algorithm with viewport collision fallback |

// ============================================================================
// Submodules
// ============================================================================

mod position;

pub use position::{GAP, Placement, Side, VIEWPORT_PADDING, position};

// ============================================================================
// Imports
// ============================================================================

use rustc_hash::FxHashMap;
use tokio::time::Duration;
use tracing::trace;

use crate::dom::{Rect, Size, Viewport};
use crate::identifiers::BadgeId;
use crate::schedule::{Scheduler, TimerKey};

// ============================================================================
// Constants
// ============================================================================

/// Fade-out duration before a removed badge detaches.
pub const FADE_DURATION: Duration = Duration::from_millis(150);

/// Fixed badge height.
const BADGE_HEIGHT: f64 = 22.0;

/// Horizontal padding: icon gutter on the left plus text padding.
const BADGE_H_PADDING: f64 = 28.0;

/// Per-character advance of the badge label.
///
/// No renderer measures badges in this model; the fixed metric keeps
/// placement deterministic.
const BADGE_CHAR_ADVANCE: f64 = 7.0;

// ============================================================================
// BadgeKind
// ============================================================================

/// Visual variant of a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeKind {
    /// Neutral hover annotation.
    Hover,
    /// Warning-colored hover annotation for non-editable dynamic groups.
    Dynamic,
    /// Selection annotation.
    Selected,
    /// Warning-colored selection annotation for dynamic groups.
    SelectedDynamic,
}

impl BadgeKind {
    /// Class-name form of the kind.
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hover => "hover",
            Self::Dynamic => "dynamic",
            Self::Selected => "selected",
            Self::SelectedDynamic => "selected-dynamic",
        }
    }
}

// ============================================================================
// Badge
// ============================================================================

/// One live badge.
#[derive(Debug, Clone)]
pub struct Badge {
    /// Unique badge ID.
    pub id: BadgeId,
    /// Label text.
    pub label: String,
    /// Visual variant.
    pub kind: BadgeKind,
    /// Deterministic size derived from the label.
    pub size: Size,
    /// Current opacity (0.0–1.0).
    pub opacity: f64,
    /// Whether position/opacity transitions are enabled.
    pub transitions_enabled: bool,
    /// Last committed placement, `None` until first positioned.
    pub placement: Option<Placement>,
}

// ============================================================================
// BadgeManager
// ============================================================================

/// Owner of all live badges.
#[derive(Debug, Default)]
pub struct BadgeManager {
    badges: FxHashMap<BadgeId, Badge>,
}

impl BadgeManager {
    /// Creates an empty manager.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a badge by ID.
    #[inline]
    #[must_use]
    pub fn get(&self, id: BadgeId) -> Option<&Badge> {
        self.badges.get(&id)
    }

    /// Number of live badges.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.badges.len()
    }

    /// Returns `true` when no badges are live.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.badges.is_empty()
    }

    /// Creates a detached, fully transparent badge.
    pub fn create(&mut self, label: impl Into<String>, kind: BadgeKind) -> BadgeId {
        let label = label.into();
        let id = BadgeId::generate();
        trace!(badge = %id, kind = kind.as_str(), %label, "Creating badge");
        self.badges.insert(
            id,
            Badge {
                id,
                label: label.clone(),
                kind,
                size: Self::measure(&label),
                opacity: 0.0,
                transitions_enabled: true,
                placement: None,
            },
        );
        id
    }

    /// Shows a hover badge positioned against the target.
    pub fn show_hover_badge(
        &mut self,
        target: Rect,
        viewport: Viewport,
        label: impl Into<String>,
        is_dynamic: bool,
    ) -> BadgeId {
        let kind = if is_dynamic {
            BadgeKind::Dynamic
        } else {
            BadgeKind::Hover
        };
        let id = self.create(label, kind);
        self.position_badge(id, target, viewport, true);
        id
    }

    /// Shows a selection badge positioned against the target.
    pub fn show_selected_badge(
        &mut self,
        target: Rect,
        viewport: Viewport,
        label: impl Into<String>,
        is_dynamic: bool,
    ) -> BadgeId {
        let kind = if is_dynamic {
            BadgeKind::SelectedDynamic
        } else {
            BadgeKind::Selected
        };
        let id = self.create(label, kind);
        self.position_badge(id, target, viewport, true);
        id
    }

    /// Positions (or repositions) a badge against a target rectangle.
    ///
    /// `fade_in` applies only to the first placement; repositions leave
    /// opacity untouched so the caller controls visibility restoration.
    pub fn position_badge(&mut self, id: BadgeId, target: Rect, viewport: Viewport, fade_in: bool) {
        if let Some(badge) = self.badges.get_mut(&id) {
            badge.placement = Some(position(target, badge.size, viewport));
            if fade_in {
                badge.opacity = 1.0;
            }
        }
    }

    /// Starts the asynchronous fade-out removal of a badge.
    ///
    /// Re-invoking for a badge already fading cancels and restarts the
    /// detach timer.
    pub fn remove(&mut self, scheduler: &mut Scheduler, id: BadgeId) {
        if let Some(badge) = self.badges.get_mut(&id) {
            badge.opacity = 0.0;
            scheduler.schedule(TimerKey::BadgeRemoval(id), FADE_DURATION);
        }
    }

    /// Removes a badge immediately, without a fade.
    pub fn remove_now(&mut self, scheduler: &mut Scheduler, id: BadgeId) {
        scheduler.cancel(TimerKey::BadgeRemoval(id));
        self.badges.remove(&id);
    }

    /// Detaches a badge whose fade timer fired.
    pub fn finish_removal(&mut self, id: BadgeId) {
        if self.badges.remove(&id).is_some() {
            trace!(badge = %id, "Badge detached");
        }
    }

    /// Hides a badge and disables its transitions for a reposition cycle.
    pub fn hide_for_reposition(&mut self, id: BadgeId) {
        if let Some(badge) = self.badges.get_mut(&id) {
            badge.opacity = 0.0;
            badge.transitions_enabled = false;
        }
    }

    /// Restores visibility after a reposition commit.
    pub fn restore_after_reposition(&mut self, id: BadgeId) {
        if let Some(badge) = self.badges.get_mut(&id) {
            badge.transitions_enabled = true;
            badge.opacity = 1.0;
        }
    }

    /// Cancels every pending removal and drops every badge immediately.
    pub fn cleanup(&mut self, scheduler: &mut Scheduler) {
        scheduler.cancel_where(|key| matches!(key, TimerKey::BadgeRemoval(_)));
        self.badges.clear();
    }

    /// Deterministic badge size for a label.
    #[must_use]
    fn measure(label: &str) -> Size {
        Size::new(
            BADGE_H_PADDING + label.chars().count() as f64 * BADGE_CHAR_ADVANCE,
            BADGE_HEIGHT,
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
