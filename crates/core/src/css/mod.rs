//! Style inference: a flat computed-style record per element, resolved from
//! the inline `style` attribute and utility-class heuristics only. There is
//! no cascade, no inheritance and no stylesheet matching.

pub mod properties;

use crate::dom::DomNode;
use properties::*;
use serde::Serialize;
use std::collections::HashMap;

/// Resolved style for one element. Every field is always populated; absent
/// properties are `""` except the documented defaults (`display: block`,
/// `position: static`, `opacity: 1`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputedStyleInfo {
    pub display: String,
    pub position: String,

    // Flex / grid
    pub flex_direction: String,
    pub justify_content: String,
    pub align_items: String,
    pub grid_template_columns: String,
    pub grid_template_rows: String,
    pub gap: String,

    // Box
    pub padding: String,
    pub margin: String,
    pub width: String,
    pub height: String,
    pub max_width: String,
    pub min_height: String,

    // Paint
    pub background_color: String,
    pub color: String,
    pub border_radius: String,
    pub border: String,
    pub box_shadow: String,
    pub z_index: String,
    pub overflow: String,
    pub opacity: String,
    pub transform: String,
    pub transition: String,

    // Text
    pub font_size: String,
    pub font_family: String,
    pub font_weight: String,
}

impl Default for ComputedStyleInfo {
    fn default() -> Self {
        Self {
            display: "block".to_string(),
            position: "static".to_string(),
            flex_direction: String::new(),
            justify_content: String::new(),
            align_items: String::new(),
            grid_template_columns: String::new(),
            grid_template_rows: String::new(),
            gap: String::new(),
            padding: String::new(),
            margin: String::new(),
            width: String::new(),
            height: String::new(),
            max_width: String::new(),
            min_height: String::new(),
            background_color: String::new(),
            color: String::new(),
            border_radius: String::new(),
            border: String::new(),
            box_shadow: String::new(),
            z_index: String::new(),
            overflow: String::new(),
            opacity: "1".to_string(),
            transform: String::new(),
            transition: String::new(),
            font_size: String::new(),
            font_family: String::new(),
            font_weight: String::new(),
        }
    }
}

/// Structural classes that force `display`, checked in order with the last
/// match winning. These beat an inline `display` declaration.
const DISPLAY_CLASS_OVERRIDES: &[(&str, &str)] = &[("flex", "flex"), ("grid", "grid"), ("block", "block")];

/// Infer the computed style of a single element.
pub fn infer_style(node: &DomNode) -> ComputedStyleInfo {
    let inline = node
        .get_attr("style")
        .map(parse_inline_style)
        .unwrap_or_default();
    resolve_style(&inline, node.class_attr())
}

/// Resolve every tracked property from parsed inline declarations and a raw
/// class string.
///
/// Precedence is inline, then the property's class rules, then the default.
/// `display` is the exception: a `flex`, `grid` or `block` substring in the
/// class string overrides even an inline declaration, because framework
/// classes are the more reliable container signal.
pub fn resolve_style(inline: &HashMap<String, String>, class: &str) -> ComputedStyleInfo {
    let defaults = ComputedStyleInfo::default();

    let pick = |property: &str, rules: &[ClassRule], default: &str| -> String {
        inline
            .get(property)
            .cloned()
            .or_else(|| resolve_class(rules, class))
            .unwrap_or_else(|| default.to_string())
    };

    let mut display = inline
        .get("display")
        .cloned()
        .unwrap_or_else(|| defaults.display.clone());
    for (needle, value) in DISPLAY_CLASS_OVERRIDES {
        if class.contains(needle) {
            display = value.to_string();
        }
    }

    ComputedStyleInfo {
        display,
        position: pick("position", &[], &defaults.position),
        flex_direction: pick("flex-direction", FLEX_DIRECTION_RULES, ""),
        justify_content: pick("justify-content", JUSTIFY_RULES, ""),
        align_items: pick("align-items", ALIGN_RULES, ""),
        grid_template_columns: pick("grid-template-columns", GRID_COLUMNS_RULES, ""),
        grid_template_rows: pick("grid-template-rows", &[], ""),
        gap: pick("gap", GAP_RULES, ""),
        padding: pick("padding", PADDING_RULES, ""),
        margin: pick("margin", MARGIN_RULES, ""),
        width: pick("width", WIDTH_RULES, ""),
        height: pick("height", HEIGHT_RULES, ""),
        max_width: pick("max-width", MAX_WIDTH_RULES, ""),
        min_height: pick("min-height", &[], ""),
        background_color: pick("background-color", BACKGROUND_RULES, ""),
        color: pick("color", &[], ""),
        border_radius: pick("border-radius", RADIUS_RULES, ""),
        border: pick("border", &[], ""),
        box_shadow: pick("box-shadow", SHADOW_RULES, ""),
        z_index: pick("z-index", &[], ""),
        overflow: pick("overflow", &[], ""),
        opacity: pick("opacity", &[], &defaults.opacity),
        transform: pick("transform", &[], ""),
        transition: pick("transition", &[], ""),
        font_size: pick("font-size", FONT_SIZE_RULES, ""),
        font_family: pick("font-family", &[], ""),
        font_weight: pick("font-weight", FONT_WEIGHT_RULES, ""),
    }
}
