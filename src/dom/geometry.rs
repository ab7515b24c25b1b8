//! Viewport-relative geometry.
//!
//! Coordinates follow browser conventions: the origin is the top-left of
//! the viewport, `x` grows right, `y` grows down. All values are CSS
//! pixels.

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};

// ============================================================================
// Rect
// ============================================================================

/// A bounding rectangle in viewport coordinates.
///
/// Mirrors the fields of a DOM bounding client rect: stored as origin plus
/// extent, with edge accessors derived.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Rect {
    /// Creates a rectangle from origin and extent.
    #[inline]
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top edge (same as `y`).
    #[inline]
    #[must_use]
    pub fn top(&self) -> f64 {
        self.y
    }

    /// Left edge (same as `x`).
    #[inline]
    #[must_use]
    pub fn left(&self) -> f64 {
        self.x
    }

    /// Bottom edge.
    #[inline]
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Right edge.
    #[inline]
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }
}

// ============================================================================
// Size
// ============================================================================

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Size {
    /// Creates a size.
    #[inline]
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

// ============================================================================
// Viewport
// ============================================================================

/// The visible extent of the embedded frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Inner width in pixels.
    pub width: f64,
    /// Inner height in pixels.
    pub height: f64,
}

impl Viewport {
    /// Creates a viewport.
    #[inline]
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(rect.left(), 10.0);
        assert_eq!(rect.top(), 20.0);
        assert_eq!(rect.right(), 110.0);
        assert_eq!(rect.bottom(), 70.0);
    }

    #[test]
    fn test_rect_serialization() {
        let rect = Rect::new(1.0, 2.0, 3.0, 4.0);
        let json = serde_json::to_value(&rect).expect("serialize");
        assert_eq!(json["x"], 1.0);
        assert_eq!(json["height"], 4.0);
    }

    #[test]
    fn test_viewport_default() {
        let viewport = Viewport::default();
        assert_eq!(viewport.width, 1280.0);
        assert_eq!(viewport.height, 720.0);
    }
}
