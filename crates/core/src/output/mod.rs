use crate::tree::{LayoutPattern, LayoutSummary, Node, PageStructure};
use serde::Serialize;
use std::collections::BTreeMap;

/// The inspector's JSON export: headline numbers plus the layout summary.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSummary {
    pub url: String,
    pub structure: StructureSummary,
    pub layout_summary: LayoutSummary,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureSummary {
    pub total_elements: usize,
    pub max_depth: usize,
    pub layout_pattern: LayoutPattern,
    pub elements: BTreeMap<String, usize>,
}

/// Build the export summary. `url` defaults to `"analyzed-page"`.
pub fn export_summary(structure: &PageStructure, url: Option<&str>) -> ExportSummary {
    ExportSummary {
        url: url.unwrap_or("analyzed-page").to_string(),
        structure: StructureSummary {
            total_elements: structure.total_elements,
            max_depth: structure.max_depth,
            layout_pattern: structure.layout_summary.layout_pattern,
            elements: structure.element_counts.clone(),
        },
        layout_summary: structure.layout_summary.clone(),
    }
}

/// Limits for the textual outline.
#[derive(Debug, Clone)]
pub struct OutlineConfig {
    /// Nodes at this depth are printed but not descended into.
    pub max_depth: usize,
    /// Children printed per node.
    pub max_children: usize,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            max_depth: 4,
            max_children: 10,
        }
    }
}

/// Indented `<tag#id.cls1.cls2>` dump, one line per node.
///
/// Depth is measured from `root`. Only the first two classes are shown.
pub fn outline(root: &Node, config: &OutlineConfig) -> String {
    let mut out = String::new();
    write_outline(root, 0, config, &mut out);
    out
}

fn write_outline(node: &Node, level: usize, config: &OutlineConfig, out: &mut String) {
    out.push_str(&"  ".repeat(level));
    out.push('<');
    out.push_str(&node.tag_name);
    if !node.id_attribute.is_empty() {
        out.push('#');
        out.push_str(&node.id_attribute);
    }
    for class in node.class_attribute.split_whitespace().take(2) {
        out.push('.');
        out.push_str(class);
    }
    out.push_str(">\n");

    if level < config.max_depth {
        for child in node.children.iter().take(config.max_children) {
            write_outline(child, level + 1, config, out);
        }
    }
}

/// Regenerate the element's markup: class first, then the remaining
/// attributes by name (`style` omitted), then its direct text.
pub fn element_markup(node: &Node) -> String {
    let mut open = format!("<{}", node.tag_name);
    if !node.class_attribute.is_empty() {
        open.push_str(&format!(" class=\"{}\"", escape_attr(&node.class_attribute)));
    }
    for (name, value) in &node.attributes {
        if name == "class" || name == "style" {
            continue;
        }
        open.push_str(&format!(" {}=\"{}\"", name, escape_attr(value)));
    }
    open.push('>');

    if node.text_content.is_empty() {
        format!("{}</{}>", open, node.tag_name)
    } else {
        format!(
            "{}\n  {}\n</{}>",
            open,
            escape_text(&node.text_content),
            node.tag_name
        )
    }
}

/// Attribute-value escaping as an HTML serializer does it: `&`, `"` and
/// no-break space.
fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
    out
}

/// Text escaping as an HTML serializer does it: `&`, `<`, `>` and no-break
/// space.
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
    out
}

/// A CSS rule carrying the node's non-default computed properties.
///
/// Selector is `#id`, else the first class, else the tag.
pub fn css_rule(node: &Node) -> String {
    let s = &node.computed_style;
    let mut lines: Vec<String> = Vec::new();

    if !s.display.is_empty() && s.display != "block" {
        lines.push(format!("display: {};", s.display));
    }
    if !s.position.is_empty() && s.position != "static" {
        lines.push(format!("position: {};", s.position));
    }
    let declarations = [
        ("width", &s.width),
        ("height", &s.height),
        ("padding", &s.padding),
        ("margin", &s.margin),
        ("background-color", &s.background_color),
        ("color", &s.color),
        ("font-size", &s.font_size),
        ("font-weight", &s.font_weight),
        ("border-radius", &s.border_radius),
        ("box-shadow", &s.box_shadow),
        ("gap", &s.gap),
        ("flex-direction", &s.flex_direction),
        ("justify-content", &s.justify_content),
        ("align-items", &s.align_items),
    ];
    for (property, value) in declarations {
        if !value.is_empty() {
            lines.push(format!("{}: {};", property, value));
        }
    }

    let selector = if !node.id_attribute.is_empty() {
        format!("#{}", node.id_attribute)
    } else if let Some(first) = node.class_attribute.split_whitespace().next() {
        format!(".{}", first)
    } else {
        node.tag_name.clone()
    };

    format!("{} {{\n  {}\n}}", selector, lines.join("\n  "))
}

/// Short human-readable report: metadata, counts, pattern, then the outline.
pub fn to_report_string(structure: &PageStructure, config: &OutlineConfig) -> String {
    let mut lines = vec![
        format!("title: {}", structure.title),
        format!("lang: {}", structure.language),
        format!("elements: {}", structure.total_elements),
        format!("max depth: {}", structure.max_depth),
        format!("pattern: {}", structure.layout_summary.layout_pattern),
        format!(
            "containers: {} flex, {} grid",
            structure.layout_summary.flex_containers, structure.layout_summary.grid_containers
        ),
        "---".to_string(),
    ];
    lines.push(outline(&structure.root_node, config).trim_end().to_string());
    lines.join("\n")
}
