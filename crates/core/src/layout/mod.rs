//! Container classification from computed styles.

pub mod geometry;

use crate::css::ComputedStyleInfo;
use serde::Serialize;

/// Coarse display category derived from the computed `display` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayType {
    Block,
    Inline,
    Flex,
    Grid,
    InlineBlock,
    None,
    Other,
}

impl DisplayType {
    /// `inline-flex` counts as flex and `inline-grid` as grid.
    pub fn from_display(display: &str) -> Self {
        if display.contains("flex") {
            return DisplayType::Flex;
        }
        if display.contains("grid") {
            return DisplayType::Grid;
        }
        match display {
            "block" => DisplayType::Block,
            "inline-block" => DisplayType::InlineBlock,
            "inline" => DisplayType::Inline,
            "none" => DisplayType::None,
            _ => DisplayType::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutInfo {
    pub is_flex_container: bool,
    pub is_grid_container: bool,
    /// Set by the parent during tree building.
    pub is_flex_item: bool,
    /// Set by the parent during tree building.
    pub is_grid_item: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flex_properties: Option<FlexProperties>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid_properties: Option<GridProperties>,
}

impl LayoutInfo {
    /// A plain block: no container, no item flags.
    pub fn none() -> Self {
        Self {
            is_flex_container: false,
            is_grid_container: false,
            is_flex_item: false,
            is_grid_item: false,
            flex_properties: None,
            grid_properties: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlexProperties {
    pub direction: String,
    pub wrap: String,
    pub justify: String,
    pub align: String,
    pub gap: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridProperties {
    pub columns: String,
    pub rows: String,
    pub gap: String,
    /// Always empty; template areas are not reconstructed.
    pub areas: String,
}

fn or_default(value: &str, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

/// Decide whether an element establishes a flex and/or grid container and
/// pull out the container-level parameters.
///
/// Item flags always come back `false`: item-ness belongs to the parent-child
/// relationship, so the tree builder fills them in from the parent.
pub fn classify_layout(style: &ComputedStyleInfo, class: &str) -> LayoutInfo {
    let is_flex_container = style.display.contains("flex");
    let is_grid_container = style.display.contains("grid");

    let flex_properties = is_flex_container.then(|| FlexProperties {
        direction: or_default(&style.flex_direction, "row"),
        wrap: if class.contains("flex-wrap") { "wrap" } else { "nowrap" }.to_string(),
        justify: or_default(&style.justify_content, "flex-start"),
        align: or_default(&style.align_items, "stretch"),
        gap: or_default(&style.gap, "0"),
    });

    let grid_properties = is_grid_container.then(|| GridProperties {
        columns: or_default(&style.grid_template_columns, "none"),
        rows: or_default(&style.grid_template_rows, "none"),
        gap: or_default(&style.gap, "0"),
        areas: String::new(),
    });

    LayoutInfo {
        is_flex_container,
        is_grid_container,
        is_flex_item: false,
        is_grid_item: false,
        flex_properties,
        grid_properties,
    }
}
