//! Tree builder: parsed document → annotated node tree with synthetic
//! geometry, plus the page-level summary.

pub mod query;

use crate::css::{self, ComputedStyleInfo};
use crate::dom::DomNode;
use crate::layout::geometry::{BoundingBox, BoxEstimator, DEFAULT_VIEWPORT_WIDTH, SIBLING_GAP};
use crate::layout::{self, DisplayType, LayoutInfo};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Tags that never become nodes; their subtrees are dropped too.
pub const EXCLUDED_TAGS: &[&str] = &[
    "script", "style", "link", "meta", "noscript", "template", "svg", "path",
];

/// Longest `text_content` kept per node, in characters.
pub const MAX_TEXT_CHARS: usize = 100;

/// Padding kept between a parent's bottom edge and its lowest child.
const ENCLOSE_PADDING: f32 = 20.0;

/// Build-wide settings.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Width of a box that has no parent.
    pub viewport_width: f32,
    /// Height of the synthetic root used when the document has no body.
    pub viewport_height: f32,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            viewport_height: 800.0,
        }
    }
}

/// Node identifier, unique within one build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node-{}", self.0)
    }
}

impl Serialize for NodeId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Hands out ids for a single build. Each `build` owns its own generator,
/// so concurrent builds never share or collide on ids.
#[derive(Debug, Default)]
struct IdGenerator {
    next: u32,
}

impl IdGenerator {
    fn next_id(&mut self) -> NodeId {
        self.next += 1;
        NodeId(self.next)
    }
}

/// One reconstructed element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: NodeId,
    pub tag_name: String,
    pub class_attribute: String,
    pub id_attribute: String,
    pub attributes: BTreeMap<String, String>,
    pub computed_style: ComputedStyleInfo,
    pub bounding_box: BoundingBox,
    pub children: Vec<Node>,
    pub text_content: String,
    pub depth: usize,
    pub path: String,
    pub is_visible: bool,
    pub display_type: DisplayType,
    pub layout_info: LayoutInfo,
}

impl Node {
    /// Structural equality ignoring ids, recursively.
    pub fn same_shape(&self, other: &Node) -> bool {
        self.tag_name == other.tag_name
            && self.class_attribute == other.class_attribute
            && self.id_attribute == other.id_attribute
            && self.attributes == other.attributes
            && self.computed_style == other.computed_style
            && self.bounding_box == other.bounding_box
            && self.text_content == other.text_content
            && self.depth == other.depth
            && self.path == other.path
            && self.is_visible == other.is_visible
            && self.display_type == other.display_type
            && self.layout_info == other.layout_info
            && self.children.len() == other.children.len()
            && self
                .children
                .iter()
                .zip(&other.children)
                .all(|(a, b)| a.same_shape(b))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetaTag {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
    pub content: String,
}

/// Whole-page layout classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutPattern {
    SingleColumn,
    SidebarRight,
    DualSidebar,
    GridLayout,
    Complex,
}

impl LayoutPattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutPattern::SingleColumn => "single-column",
            LayoutPattern::SidebarRight => "sidebar-right",
            LayoutPattern::DualSidebar => "dual-sidebar",
            LayoutPattern::GridLayout => "grid-layout",
            LayoutPattern::Complex => "complex",
        }
    }
}

impl fmt::Display for LayoutPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSummary {
    pub has_header: bool,
    pub has_nav: bool,
    pub has_main: bool,
    pub has_footer: bool,
    pub has_aside: bool,
    #[serde(rename = "hasSections")]
    pub section_count: usize,
    #[serde(rename = "hasArticles")]
    pub article_count: usize,
    pub layout_pattern: LayoutPattern,
    pub container_count: usize,
    pub flex_containers: usize,
    pub grid_containers: usize,
}

/// The builder's output envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageStructure {
    pub doctype: String,
    pub html_version: String,
    pub language: String,
    pub charset: String,
    pub viewport: String,
    pub title: String,
    pub meta_tags: Vec<MetaTag>,
    pub root_node: Node,
    pub total_elements: usize,
    pub max_depth: usize,
    pub element_counts: BTreeMap<String, usize>,
    pub layout_summary: LayoutSummary,
}

/// Build a page structure from a parsed document with default settings.
pub fn build(document: &DomNode) -> PageStructure {
    build_with_config(document, &BuildConfig::default())
}

pub fn build_with_config(document: &DomNode, config: &BuildConfig) -> PageStructure {
    let mut builder = TreeBuilder {
        ids: IdGenerator::default(),
        estimator: BoxEstimator::new(config.viewport_width),
    };

    let root_node = document
        .find_first("body")
        .and_then(|body| builder.build_tree(body))
        .unwrap_or_else(|| {
            tracing::debug!("document has no body, using synthetic root");
            builder.fallback_root(config)
        });

    let total_elements = query::count_nodes(&root_node);
    let max_depth = query::max_depth(&root_node);
    let element_counts = query::count_elements(&root_node);
    let layout_summary = summarize(&root_node);

    tracing::debug!(
        total_elements,
        max_depth,
        pattern = layout_summary.layout_pattern.as_str(),
        "built page structure"
    );

    let (doctype, html_version) = doctype_info(document);
    let html = document.find_first("html");

    PageStructure {
        doctype,
        html_version,
        language: html
            .and_then(|h| h.get_attr("lang"))
            .filter(|l| !l.is_empty())
            .unwrap_or("en")
            .to_string(),
        charset: document
            .find_all("meta")
            .into_iter()
            .find_map(|m| m.get_attr("charset"))
            .unwrap_or("UTF-8")
            .to_string(),
        viewport: document
            .find_all("meta")
            .into_iter()
            .find(|m| m.get_attr("name") == Some("viewport"))
            .and_then(|m| m.get_attr("content"))
            .unwrap_or("")
            .to_string(),
        title: document
            .find_first("title")
            .map(|t| t.text_content())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "Untitled".to_string()),
        meta_tags: meta_tags(document),
        root_node,
        total_elements,
        max_depth,
        element_counts,
        layout_summary,
    }
}

struct TreeBuilder {
    ids: IdGenerator,
    estimator: BoxEstimator,
}

/// A node whose element children are still being built.
struct BuildFrame<'a> {
    node: Node,
    source: &'a [DomNode],
    next: usize,
    /// Top of the next child's tentative box.
    offset_y: f32,
}

impl<'a> BuildFrame<'a> {
    fn new(node: Node, element: &'a DomNode) -> Self {
        let offset_y = node.bounding_box.y() + SIBLING_GAP;
        Self {
            node,
            source: &element.children,
            next: 0,
            offset_y,
        }
    }

    fn next_element(&mut self) -> Option<&'a DomNode> {
        while let Some(child) = self.source.get(self.next) {
            self.next += 1;
            if child.is_element() {
                return Some(child);
            }
        }
        None
    }
}

impl TreeBuilder {
    /// Pre-order descent on an explicit stack: a node is annotated when it
    /// is opened, then item flags and the enclosing height are fixed up once
    /// all of its children are closed.
    fn build_tree(&mut self, root: &DomNode) -> Option<Node> {
        let root_node = self.open_node(root, 0, "", 0, None)?;
        let mut stack = vec![BuildFrame::new(root_node, root)];

        while let Some(frame) = stack.last_mut() {
            if let Some(child) = frame.next_element() {
                let tentative = frame
                    .node
                    .bounding_box
                    .with_y_and_height(frame.offset_y, 100.0);
                let opened = self.open_node(
                    child,
                    frame.node.depth + 1,
                    &frame.node.path,
                    frame.node.children.len(),
                    Some(&tentative),
                );
                if let Some(node) = opened {
                    stack.push(BuildFrame::new(node, child));
                }
                continue;
            }

            let Some(finished) = stack.pop() else { break };
            let mut node = finished.node;
            close_node(&mut node);
            match stack.last_mut() {
                Some(parent) => {
                    parent.offset_y += node.bounding_box.height() + SIBLING_GAP;
                    parent.node.children.push(node);
                }
                None => return Some(node),
            }
        }
        None
    }

    /// Annotate one element, children not yet attached. Excluded tags yield
    /// `None` and take no id.
    fn open_node(
        &mut self,
        element: &DomNode,
        depth: usize,
        parent_path: &str,
        sibling_index: usize,
        parent_box: Option<&BoundingBox>,
    ) -> Option<Node> {
        let tag = element.tag.to_lowercase();
        if EXCLUDED_TAGS.contains(&tag.as_str()) {
            tracing::trace!(tag = tag.as_str(), depth, "skipping excluded element");
            return None;
        }

        let id = self.ids.next_id();
        let class_attribute = element.class_attr().to_string();
        let computed_style = css::infer_style(element);
        let layout_info = layout::classify_layout(&computed_style, &class_attribute);
        let display_type = DisplayType::from_display(&computed_style.display);
        let bounding_box = self
            .estimator
            .estimate(element, depth, sibling_index, parent_box);

        let path = if parent_path.is_empty() {
            tag.clone()
        } else {
            format!("{} > {}", parent_path, tag)
        };

        Some(Node {
            id,
            tag_name: tag,
            id_attribute: element.get_attr("id").unwrap_or("").to_string(),
            attributes: element
                .attributes
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            is_visible: display_type != DisplayType::None,
            text_content: element.direct_text().chars().take(MAX_TEXT_CHARS).collect(),
            class_attribute,
            computed_style,
            bounding_box,
            children: Vec::new(),
            depth,
            path,
            display_type,
            layout_info,
        })
    }

    fn fallback_root(&mut self, config: &BuildConfig) -> Node {
        let computed_style = ComputedStyleInfo::default();
        let display_type = DisplayType::from_display(&computed_style.display);
        Node {
            id: self.ids.next_id(),
            tag_name: String::new(),
            class_attribute: String::new(),
            id_attribute: String::new(),
            attributes: BTreeMap::new(),
            computed_style,
            bounding_box: BoundingBox::new(0.0, 0.0, config.viewport_width, config.viewport_height),
            children: Vec::new(),
            text_content: String::new(),
            depth: 0,
            path: String::new(),
            is_visible: true,
            display_type,
            layout_info: LayoutInfo::none(),
        }
    }
}

/// Children are complete: mark them as items of this container and grow
/// the box to enclose every child (not only the last one) plus padding.
fn close_node(node: &mut Node) {
    for child in &mut node.children {
        child.layout_info.is_flex_item = node.layout_info.is_flex_container;
        child.layout_info.is_grid_item = node.layout_info.is_grid_container;
    }
    if let Some(lowest) = node
        .children
        .iter()
        .map(|c| c.bounding_box.bottom())
        .reduce(f32::max)
    {
        node.bounding_box.grow_to_bottom(lowest + ENCLOSE_PADDING);
    }
}

/// Aggregate landmark and container facts over the whole tree.
pub fn summarize(root: &Node) -> LayoutSummary {
    LayoutSummary {
        has_header: !query::find_by_tag(root, "header").is_empty(),
        has_nav: !query::find_by_tag(root, "nav").is_empty(),
        has_main: !query::find_by_tag(root, "main").is_empty(),
        has_footer: !query::find_by_tag(root, "footer").is_empty(),
        has_aside: !query::find_by_tag(root, "aside").is_empty(),
        section_count: query::find_by_tag(root, "section").len(),
        article_count: query::find_by_tag(root, "article").len(),
        layout_pattern: classify_pattern(root),
        container_count: query::find_with_class(root, "container").len(),
        flex_containers: query::count_containers(root, query::ContainerKind::Flex),
        grid_containers: query::count_containers(root, query::ContainerKind::Grid),
    }
}

/// First matching rule wins: two asides, any `grid` class, one aside, a
/// `main` with more than three children, else single column.
pub fn classify_pattern(root: &Node) -> LayoutPattern {
    let asides = query::find_by_tag(root, "aside").len();
    if asides >= 2 {
        return LayoutPattern::DualSidebar;
    }
    if !query::find_with_class(root, "grid").is_empty() {
        return LayoutPattern::GridLayout;
    }
    if asides == 1 {
        return LayoutPattern::SidebarRight;
    }
    let busy_main = query::find_by_tag(root, "main")
        .first()
        .is_some_and(|main| main.children.len() > 3);
    if busy_main {
        return LayoutPattern::Complex;
    }
    LayoutPattern::SingleColumn
}

fn doctype_info(document: &DomNode) -> (String, String) {
    match document.doctype() {
        Some(dt) => {
            let name = if dt.tag.is_empty() { "html" } else { dt.tag.as_str() };
            let version = if dt.get_attr("public_id").is_some() {
                "HTML4/XHTML"
            } else {
                "HTML5"
            };
            (format!("<!DOCTYPE {}>", name), version.to_string())
        }
        None => ("<!DOCTYPE html>".to_string(), "HTML5".to_string()),
    }
}

fn meta_tags(document: &DomNode) -> Vec<MetaTag> {
    document
        .find_all("meta")
        .into_iter()
        .filter_map(|m| {
            let content = m.get_attr("content")?;
            let name = m.get_attr("name").map(str::to_string);
            let property = m.get_attr("property").map(str::to_string);
            if content.is_empty() || (name.is_none() && property.is_none()) {
                return None;
            }
            Some(MetaTag {
                name,
                property,
                content: content.to_string(),
            })
        })
        .collect()
}
