//! Badge placement with viewport collision avoidance.
//!
//! Pure geometry: given the target's bounding rectangle, the badge's size,
//! and the viewport, pick the first side in a fixed priority order whose
//! principal axis fits, clamping the orthogonal axis into the padded
//! viewport. Degenerate viewports fall back to a fully clamped placement
//! tagged [`Side::Constrained`].

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};

use crate::dom::{Rect, Size, Viewport};

// ============================================================================
// Constants
// ============================================================================

/// Gap between the target element and the badge.
pub const GAP: f64 = 8.0;

/// Minimum distance kept between a badge and the viewport edges.
pub const VIEWPORT_PADDING: f64 = 8.0;

/// Horizontal shift aligning top/bottom badges with the outline's outer
/// edge (3px offset + 1.5px stroke).
const OUTLINE_ALIGN: f64 = 4.5;

// ============================================================================
// Side
// ============================================================================

/// Which side of the target a badge landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Above the target.
    Top,
    /// Below the target.
    Bottom,
    /// Left of the target.
    Left,
    /// Right of the target.
    Right,
    /// No side fit; clamped on both axes.
    Constrained,
}

impl Side {
    /// Wire name of the side.
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
            Self::Constrained => "constrained",
        }
    }
}

// ============================================================================
// Placement
// ============================================================================

/// A computed badge position in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Top edge of the badge.
    pub top: f64,
    /// Left edge of the badge.
    pub left: f64,
    /// The side that was chosen.
    pub side: Side,
}

// ============================================================================
// Positioning
// ============================================================================

/// Computes the badge placement for a target rectangle.
///
/// Candidate sides are tried in fixed priority top → bottom → left →
/// right. Each candidate clamps its orthogonal axis into the padded
/// viewport before the fit check, so a badge never clips the edges
/// perpendicular to its side. The function is pure and idempotent.
#[must_use]
pub fn position(target: Rect, badge: Size, viewport: Viewport) -> Placement {
    let sides = [Side::Top, Side::Bottom, Side::Left, Side::Right];

    for side in sides {
        let (mut top, mut left) = candidate(side, target, badge);

        match side {
            Side::Top | Side::Bottom => {
                if left + badge.width > viewport.width - VIEWPORT_PADDING {
                    left = viewport.width - badge.width - VIEWPORT_PADDING;
                }
                if left < VIEWPORT_PADDING {
                    left = VIEWPORT_PADDING;
                }
            }
            Side::Left | Side::Right => {
                if top + badge.height > viewport.height - VIEWPORT_PADDING {
                    top = viewport.height - badge.height - VIEWPORT_PADDING;
                }
                if top < VIEWPORT_PADDING {
                    top = VIEWPORT_PADDING;
                }
            }
            Side::Constrained => unreachable!("not a candidate side"),
        }

        let fits = match side {
            Side::Top => top >= VIEWPORT_PADDING,
            Side::Bottom => top + badge.height <= viewport.height - VIEWPORT_PADDING,
            Side::Left => left >= VIEWPORT_PADDING,
            Side::Right => left + badge.width <= viewport.width - VIEWPORT_PADDING,
            Side::Constrained => false,
        };

        if fits {
            return Placement { top, left, side };
        }
    }

    // Nothing fit: clamp the top candidate on both axes.
    let (top, left) = candidate(Side::Top, target, badge);
    Placement {
        top: top
            .min(viewport.height - badge.height - VIEWPORT_PADDING)
            .max(VIEWPORT_PADDING),
        left: left
            .min(viewport.width - badge.width - VIEWPORT_PADDING)
            .max(VIEWPORT_PADDING),
        side: Side::Constrained,
    }
}

/// Raw (pre-clamp) coordinates for one candidate side.
fn candidate(side: Side, target: Rect, badge: Size) -> (f64, f64) {
    match side {
        Side::Top => (
            target.top() - badge.height - GAP,
            target.left() - OUTLINE_ALIGN,
        ),
        Side::Bottom => (target.bottom() + GAP, target.left() - OUTLINE_ALIGN),
        Side::Left => (target.top(), target.left() - badge.width - GAP),
        Side::Right => (target.top(), target.right() + GAP),
        Side::Constrained => unreachable!("not a candidate side"),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    const BADGE: Size = Size {
        width: 80.0,
        height: 22.0,
    };

    fn viewport() -> Viewport {
        Viewport::new(1280.0, 720.0)
    }

    #[test]
    fn test_prefers_top_side() {
        let placement = position(Rect::new(100.0, 100.0, 200.0, 50.0), BADGE, viewport());
        assert_eq!(placement.side, Side::Top);
        assert_eq!(placement.top, 100.0 - BADGE.height - GAP);
        assert_eq!(placement.left, 100.0 - 4.5);
    }

    #[test]
    fn test_falls_back_to_bottom() {
        // 20px above the target is not enough for badge + gap
        let placement = position(Rect::new(100.0, 20.0, 200.0, 50.0), BADGE, viewport());
        assert_eq!(placement.side, Side::Bottom);
        assert_eq!(placement.top, 70.0 + GAP);
    }

    #[test]
    fn test_falls_back_to_left() {
        // tall target starves both top and bottom
        let placement = position(Rect::new(100.0, 20.0, 200.0, 680.0), BADGE, viewport());
        assert_eq!(placement.side, Side::Left);
        assert_eq!(placement.top, 20.0);
        assert_eq!(placement.left, 100.0 - BADGE.width - GAP);
    }

    #[test]
    fn test_falls_back_to_right() {
        // tall target hugging the left edge leaves only the right side
        let placement = position(Rect::new(4.0, 20.0, 1100.0, 690.0), BADGE, viewport());
        assert_eq!(placement.side, Side::Right);
        assert_eq!(placement.left, 1104.0 + GAP);
    }

    #[test]
    fn test_constrained_when_nothing_fits() {
        // target covering nearly the whole viewport
        let placement = position(Rect::new(4.0, 20.0, 1272.0, 690.0), BADGE, viewport());
        assert_eq!(placement.side, Side::Constrained);
        assert_eq!(placement.top, VIEWPORT_PADDING);
        assert_eq!(placement.left, VIEWPORT_PADDING);
    }

    #[test]
    fn test_orthogonal_clamp_on_top_side() {
        // target extends past the right edge; the badge stays padded
        let placement = position(Rect::new(1250.0, 200.0, 100.0, 40.0), BADGE, viewport());
        assert_eq!(placement.side, Side::Top);
        assert_eq!(
            placement.left,
            1280.0 - BADGE.width - VIEWPORT_PADDING
        );
    }

    #[test]
    fn test_positioning_is_idempotent() {
        let target = Rect::new(300.0, 45.0, 120.0, 60.0);
        let first = position(target, BADGE, viewport());
        let second = position(target, BADGE, viewport());
        assert_eq!(first, second);
    }

    proptest! {
        #[test]
        fn prop_constrained_stays_inside_padded_viewport(
            x in -500.0f64..1500.0,
            y in -500.0f64..1500.0,
            w in 0.0f64..800.0,
            h in 0.0f64..800.0,
            bw in 20.0f64..200.0,
            bh in 10.0f64..40.0,
        ) {
            let vp = viewport();
            let badge = Size::new(bw, bh);
            let placement = position(Rect::new(x, y, w, h), badge, vp);

            if placement.side == Side::Constrained {
                prop_assert!(placement.top >= VIEWPORT_PADDING);
                prop_assert!(placement.top + bh <= vp.height - VIEWPORT_PADDING);
                prop_assert!(placement.left >= VIEWPORT_PADDING);
                prop_assert!(placement.left + bw <= vp.width - VIEWPORT_PADDING);
            }
        }

        #[test]
        fn prop_accepted_side_satisfies_its_fit_predicate(
            x in -500.0f64..1500.0,
            y in -500.0f64..1500.0,
            w in 0.0f64..800.0,
            h in 0.0f64..800.0,
        ) {
            let vp = viewport();
            let placement = position(Rect::new(x, y, w, h), BADGE, vp);
            match placement.side {
                Side::Top => prop_assert!(placement.top >= VIEWPORT_PADDING),
                Side::Bottom => {
                    prop_assert!(placement.top + BADGE.height <= vp.height - VIEWPORT_PADDING);
                }
                Side::Left => prop_assert!(placement.left >= VIEWPORT_PADDING),
                Side::Right => {
                    prop_assert!(placement.left + BADGE.width <= vp.width - VIEWPORT_PADDING);
                }
                Side::Constrained => {}
            }
        }
    }
}
