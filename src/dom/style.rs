//! Computed styles and CSS color parsing.
//!
//! The style record carries the subset of computed properties that the
//! selection payload reports to the hosting frame. Color values arrive as
//! `rgb(r, g, b)` / `rgba(r, g, b, a)` strings and are normalized to an
//! uppercase hex triplet plus an opacity percentage.

// ============================================================================
// Imports
// ============================================================================

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

// ============================================================================
// Color Parsing
// ============================================================================

/// Matches the component list of `rgb(...)` / `rgba(...)`.
static RGB_COMPONENTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"rgba?\(([^)]+)\)").expect("valid rgb pattern"));

/// A parsed color: hex triplet, opacity percentage, and presence flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorInfo {
    /// Uppercase `#RRGGBB` value, or `None` when the color is absent.
    pub hex: Option<String>,
    /// Opacity as a whole percentage (0–100).
    pub opacity: u8,
    /// Whether the source value named a visible color at all.
    pub has_color: bool,
}

impl ColorInfo {
    /// The "no color" value reported for transparent/absent inputs.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        Self {
            hex: None,
            opacity: 0,
            has_color: false,
        }
    }
}

/// Extracts the numeric components of an `rgb()`/`rgba()` string.
fn rgb_components(value: &str) -> Option<Vec<f64>> {
    let captures = RGB_COMPONENTS.captures(value)?;
    let components: Vec<f64> = captures[1]
        .split(',')
        .filter_map(|part| part.trim().parse::<f64>().ok())
        .collect();
    Some(components)
}

/// Converts an `rgb()`/`rgba()` string to an uppercase hex triplet.
///
/// Returns `None` when the value is not a recognizable rgb form.
#[must_use]
pub fn rgb_to_hex(value: &str) -> Option<String> {
    let components = rgb_components(value)?;
    if components.len() < 3 {
        return None;
    }

    let channel = |c: f64| (c.round() as i64).clamp(0, 255) as u8;
    Some(format!(
        "#{:02X}{:02X}{:02X}",
        channel(components[0]),
        channel(components[1]),
        channel(components[2]),
    ))
}

/// Extracts the alpha channel of an `rgba()` string, defaulting to 1.
#[must_use]
pub fn extract_opacity(value: &str) -> f64 {
    match rgb_components(value) {
        Some(components) if components.len() == 4 => components[3],
        _ => 1.0,
    }
}

/// Parses a computed color value into a [`ColorInfo`].
///
/// Transparent and absent values report `has_color = false`.
#[must_use]
pub fn parse_color(value: &str) -> ColorInfo {
    if value.is_empty() || value == "transparent" || value == "rgba(0, 0, 0, 0)" {
        return ColorInfo::none();
    }

    let hex = rgb_to_hex(value);
    let opacity = (extract_opacity(value) * 100.0).round().clamp(0.0, 100.0) as u8;

    ColorInfo {
        hex,
        opacity,
        has_color: true,
    }
}

// ============================================================================
// ComputedStyle
// ============================================================================

/// Computed style values attached to an element node.
///
/// Raw strings, exactly as a rendering engine would report them; the
/// selection payload derives parsed colors from the three color fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedStyle {
    /// Text color (`rgb()`/`rgba()` form).
    pub color: String,
    /// Background color.
    pub background_color: String,
    /// Border color.
    pub border_color: String,
    /// Font size, e.g. `16px`.
    pub font_size: String,
    /// Font weight, e.g. `400`.
    pub font_weight: String,
    /// Font family list.
    pub font_family: String,
    /// Text alignment.
    pub text_align: String,
    /// Line height.
    pub line_height: String,
    /// Letter spacing.
    pub letter_spacing: String,
    /// Text decoration.
    pub text_decoration: String,
    /// Font style.
    pub font_style: String,
    /// Display mode.
    pub display: String,
    /// Position mode.
    pub position: String,
    /// Margins, clockwise from top.
    pub margin_top: String,
    /// Right margin.
    pub margin_right: String,
    /// Bottom margin.
    pub margin_bottom: String,
    /// Left margin.
    pub margin_left: String,
    /// Paddings, clockwise from top.
    pub padding_top: String,
    /// Right padding.
    pub padding_right: String,
    /// Bottom padding.
    pub padding_bottom: String,
    /// Left padding.
    pub padding_left: String,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            color: "rgb(0, 0, 0)".to_string(),
            background_color: "rgba(0, 0, 0, 0)".to_string(),
            border_color: "rgb(0, 0, 0)".to_string(),
            font_size: "16px".to_string(),
            font_weight: "400".to_string(),
            font_family: "sans-serif".to_string(),
            text_align: "start".to_string(),
            line_height: "normal".to_string(),
            letter_spacing: "normal".to_string(),
            text_decoration: "none".to_string(),
            font_style: "normal".to_string(),
            display: "block".to_string(),
            position: "static".to_string(),
            margin_top: "0px".to_string(),
            margin_right: "0px".to_string(),
            margin_bottom: "0px".to_string(),
            margin_left: "0px".to_string(),
            padding_top: "0px".to_string(),
            padding_right: "0px".to_string(),
            padding_bottom: "0px".to_string(),
            padding_left: "0px".to_string(),
        }
    }
}

// ============================================================================
// StyleSnapshot
// ============================================================================

/// The computed-style block reported on `ELEMENT_SELECTED`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleSnapshot {
    /// Parsed text color.
    pub color: ColorInfo,
    /// Parsed background color.
    pub background_color: ColorInfo,
    /// Parsed border color.
    pub border_color: ColorInfo,
    /// Font size.
    pub font_size: String,
    /// Font weight.
    pub font_weight: String,
    /// Font family.
    pub font_family: String,
    /// Text alignment.
    pub text_align: String,
    /// Line height.
    pub line_height: String,
    /// Letter spacing.
    pub letter_spacing: String,
    /// Text decoration.
    pub text_decoration: String,
    /// Font style.
    pub font_style: String,
    /// Display mode.
    pub display: String,
    /// Position mode.
    pub position: String,
    /// Top margin.
    pub margin_top: String,
    /// Right margin.
    pub margin_right: String,
    /// Bottom margin.
    pub margin_bottom: String,
    /// Left margin.
    pub margin_left: String,
    /// Top padding.
    pub padding_top: String,
    /// Right padding.
    pub padding_right: String,
    /// Bottom padding.
    pub padding_bottom: String,
    /// Left padding.
    pub padding_left: String,
}

impl StyleSnapshot {
    /// Builds the wire snapshot from an element's computed style.
    #[must_use]
    pub fn from_style(style: &ComputedStyle) -> Self {
        Self {
            color: parse_color(&style.color),
            background_color: parse_color(&style.background_color),
            border_color: parse_color(&style.border_color),
            font_size: style.font_size.clone(),
            font_weight: style.font_weight.clone(),
            font_family: style.font_family.clone(),
            text_align: style.text_align.clone(),
            line_height: style.line_height.clone(),
            letter_spacing: style.letter_spacing.clone(),
            text_decoration: style.text_decoration.clone(),
            font_style: style.font_style.clone(),
            display: style.display.clone(),
            position: style.position.clone(),
            margin_top: style.margin_top.clone(),
            margin_right: style.margin_right.clone(),
            margin_bottom: style.margin_bottom.clone(),
            margin_left: style.margin_left.clone(),
            padding_top: style.padding_top.clone(),
            padding_right: style.padding_right.clone(),
            padding_bottom: style.padding_bottom.clone(),
            padding_left: style.padding_left.clone(),
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
    fn test_rgb_to_hex() {
        assert_eq!(rgb_to_hex("rgb(255, 140, 66)"), Some("#FF8C42".to_string()));
        assert_eq!(rgb_to_hex("rgb(0, 0, 0)"), Some("#000000".to_string()));
        assert_eq!(
            rgb_to_hex("rgba(30, 78, 216, 0.5)"),
            Some("#1E4ED8".to_string())
        );
        assert_eq!(rgb_to_hex("hotpink"), None);
    }

    #[test]
    fn test_extract_opacity() {
        assert_eq!(extract_opacity("rgb(1, 2, 3)"), 1.0);
        assert_eq!(extract_opacity("rgba(1, 2, 3, 0.25)"), 0.25);
        assert_eq!(extract_opacity("not a color"), 1.0);
    }

    #[test]
    fn test_parse_color_transparent() {
        assert_eq!(parse_color("transparent"), ColorInfo::none());
        assert_eq!(parse_color("rgba(0, 0, 0, 0)"), ColorInfo::none());
        assert_eq!(parse_color(""), ColorInfo::none());
    }

    #[test]
    fn test_parse_color_opaque() {
        let info = parse_color("rgb(82, 136, 204)");
        assert_eq!(info.hex.as_deref(), Some("#5288CC"));
        assert_eq!(info.opacity, 100);
        assert!(info.has_color);
    }

    #[test]
    fn test_parse_color_alpha_percentage() {
        let info = parse_color("rgba(82, 136, 204, 0.3)");
        assert_eq!(info.opacity, 30);
        assert!(info.has_color);
    }

    #[test]
    fn test_style_snapshot_parses_colors() {
        let style = ComputedStyle {
            color: "rgb(255, 255, 255)".to_string(),
            background_color: "transparent".to_string(),
            ..ComputedStyle::default()
        };
        let snapshot = StyleSnapshot::from_style(&style);
        assert_eq!(snapshot.color.hex.as_deref(), Some("#FFFFFF"));
        assert!(!snapshot.background_color.has_color);
    }

    #[test]
    fn test_snapshot_wire_names() {
        let snapshot = StyleSnapshot::from_style(&ComputedStyle::default());
        let json = serde_json::to_value(&snapshot).expect("serialize");
        assert!(json.get("backgroundColor").is_some());
        assert!(json.get("fontSize").is_some());
        assert!(json.get("paddingLeft").is_some());
    }
}
