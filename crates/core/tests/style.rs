//! Tests for inline style parsing and utility-class style inference.

use domscope_core::css::properties::{
    parse_inline_style, resolve_class, token_number, PADDING_RULES, RADIUS_RULES, WIDTH_RULES,
};
use domscope_core::css::{infer_style, resolve_style, ComputedStyleInfo};
use domscope_core::dom::DomNode;
use pretty_assertions::assert_eq;
use std::collections::HashMap;

fn element(tag: &str, class: &str, style: &str) -> DomNode {
    let mut node = DomNode::new_element(tag);
    if !class.is_empty() {
        node.attributes.insert("class".to_string(), class.to_string());
    }
    if !style.is_empty() {
        node.attributes.insert("style".to_string(), style.to_string());
    }
    node
}

#[test]
fn test_bare_element_gets_defaults() {
    let style = infer_style(&DomNode::new_element("div"));
    assert_eq!(style, ComputedStyleInfo::default());
    assert_eq!(style.display, "block");
    assert_eq!(style.position, "static");
    assert_eq!(style.opacity, "1");
    assert_eq!(style.padding, "");
    assert_eq!(style.font_family, "");
}

#[test]
fn test_malformed_declarations_are_skipped() {
    let map = parse_inline_style("color: red; ; bogus; :orphan; font-size:; Margin : 4px");
    assert_eq!(map.len(), 2);
    assert_eq!(map.get("color").map(String::as_str), Some("red"));
    assert_eq!(map.get("margin").map(String::as_str), Some("4px"));
}

#[test]
fn test_later_declaration_wins() {
    let map = parse_inline_style("color: red; color: blue");
    assert_eq!(map.get("color").map(String::as_str), Some("blue"));
}

#[test]
fn test_value_keeps_colons() {
    let map = parse_inline_style("background-color: url(http://x/y.png)");
    assert_eq!(
        map.get("background-color").map(String::as_str),
        Some("url(http://x/y.png)")
    );
}

#[test]
fn test_inline_style_beats_class_rules() {
    let style = infer_style(&element("div", "p-4 rounded-lg", "padding: 3px; border-radius: 1px"));
    assert_eq!(style.padding, "3px");
    assert_eq!(style.border_radius, "1px");
}

#[test]
fn test_flex_class_overrides_inline_display() {
    let style = infer_style(&element("div", "flex", "display:block"));
    assert_eq!(style.display, "flex");
}

#[test]
fn test_grid_class_overrides_inline_display() {
    let style = infer_style(&element("div", "grid grid-cols-3", "display: none"));
    assert_eq!(style.display, "grid");
}

#[test]
fn test_block_class_is_checked_last() {
    // `inline-block` contains "block"; structural classes are substring matches
    let style = infer_style(&element("span", "flex inline-block", ""));
    assert_eq!(style.display, "block");
}

#[test]
fn test_inline_display_used_without_structural_class() {
    let style = infer_style(&element("div", "p-2", "display: none"));
    assert_eq!(style.display, "none");
}

#[test]
fn test_tailwind_flex_container_classes() {
    let style = infer_style(&element(
        "div",
        "flex flex-col justify-between items-center gap-4",
        "",
    ));
    assert_eq!(style.display, "flex");
    assert_eq!(style.flex_direction, "column");
    assert_eq!(style.justify_content, "space-between");
    assert_eq!(style.align_items, "center");
    assert_eq!(style.gap, "16px");
}

#[test]
fn test_grid_columns_class() {
    let style = infer_style(&element("div", "grid grid-cols-3", ""));
    assert_eq!(style.grid_template_columns, "repeat(3, minmax(0, 1fr))");
    assert_eq!(style.grid_template_rows, "");
}

#[test]
fn test_padding_rules() {
    assert_eq!(infer_style(&element("div", "p-6", "")).padding, "24px");
    assert_eq!(infer_style(&element("div", "px-4 py-2", "")).padding, "8px 16px");
    assert_eq!(infer_style(&element("div", "px-3", "")).padding, "0px 12px");
    assert_eq!(infer_style(&element("div", "md:p-2", "")).padding, "8px");
}

#[test]
fn test_spacing_rules_need_token_start() {
    // `gap-4` contains "p-4" but is not a padding class
    let style = infer_style(&element("div", "gap-4", ""));
    assert_eq!(style.padding, "");
    assert_eq!(style.gap, "16px");

    // `max-w-4xl` is not a width class
    let style = infer_style(&element("div", "max-w-4xl", ""));
    assert_eq!(style.width, "");
    assert_eq!(style.max_width, "896px");
}

#[test]
fn test_margin_rules() {
    assert_eq!(infer_style(&element("div", "m-2", "")).margin, "8px");
    assert_eq!(infer_style(&element("div", "mx-auto", "")).margin, "0 auto");
}

#[test]
fn test_first_matching_radius_rule_wins() {
    assert_eq!(resolve_class(RADIUS_RULES, "rounded-full").as_deref(), Some("9999px"));
    assert_eq!(resolve_class(RADIUS_RULES, "rounded").as_deref(), Some("4px"));
    assert_eq!(resolve_class(RADIUS_RULES, "rounded-md").as_deref(), Some("6px"));
    assert_eq!(resolve_class(RADIUS_RULES, "square"), None);
}

#[test]
fn test_paint_and_text_rules() {
    let style = infer_style(&element(
        "h1",
        "bg-blue-500 text-4xl font-semibold shadow-lg w-full h-12",
        "",
    ));
    assert_eq!(style.background_color, "#3b82f6");
    assert_eq!(style.font_size, "36px");
    assert_eq!(style.font_weight, "600");
    assert_eq!(style.box_shadow, "0 10px 15px -3px rgba(0,0,0,0.1)");
    assert_eq!(style.width, "100%");
    assert_eq!(style.height, "48px");
}

#[test]
fn test_inline_only_properties() {
    let style = infer_style(&element(
        "div",
        "",
        "position: absolute; z-index: 10; opacity: 0.5; transform: scale(2); min-height: 50vh",
    ));
    assert_eq!(style.position, "absolute");
    assert_eq!(style.z_index, "10");
    assert_eq!(style.opacity, "0.5");
    assert_eq!(style.transform, "scale(2)");
    assert_eq!(style.min_height, "50vh");
}

#[test]
fn test_resolve_style_without_element() {
    let mut inline = HashMap::new();
    inline.insert("color".to_string(), "#333".to_string());
    let style = resolve_style(&inline, "text-sm");
    assert_eq!(style.color, "#333");
    assert_eq!(style.font_size, "14px");
}

#[test]
fn test_token_number() {
    assert_eq!(token_number("p-4", "p-"), Some(4));
    assert_eq!(token_number("gap-4 p-12", "p-"), Some(12));
    assert_eq!(token_number("lg:w-64", "w-"), Some(64));
    assert_eq!(token_number("p-x", "p-"), None);
    assert_eq!(token_number("", "p-"), None);
}

#[test]
fn test_oversized_spacing_tokens_do_not_match() {
    // 2_000_000_000 parses as a step count but does not scale to pixels
    assert_eq!(resolve_class(PADDING_RULES, "p-2000000000"), None);
    assert_eq!(resolve_class(PADDING_RULES, "px-2000000000 py-2"), None);
    assert_eq!(resolve_class(WIDTH_RULES, "w-2000000000"), None);
    assert_eq!(token_number("p-99999999999", "p-"), None);

    let style = infer_style(&element("div", "w-2000000000 h-2000000000 gap-2000000000 m-2", ""));
    assert_eq!(style.width, "");
    assert_eq!(style.height, "");
    assert_eq!(style.gap, "");
    assert_eq!(style.margin, "8px");
}

#[test]
fn test_oversized_spacing_tokens_still_build() {
    let page = domscope_core::parse(
        r#"<body><div class="w-2000000000 p-2000000000 px-4000000000"></div></body>"#,
    );
    let div = &page.root_node.children[0];
    assert_eq!(div.computed_style.width, "");
    assert_eq!(div.computed_style.padding, "");
}
