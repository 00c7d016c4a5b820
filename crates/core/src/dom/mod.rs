use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::ParseOpts;
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use std::collections::HashMap;

/// A node in the parsed document. The tree builder only reads tags,
/// attributes and direct text.
#[derive(Debug, Clone)]
pub struct DomNode {
    pub tag: String,
    pub attributes: HashMap<String, String>,
    pub text: String,
    pub children: Vec<DomNode>,
    pub node_type: NodeType,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeType {
    Element,
    Text,
    Document,
    /// `<!DOCTYPE name>`; `tag` holds the name, `public_id` lives in attributes.
    Doctype,
}

impl DomNode {
    pub fn new_element(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attributes: HashMap::new(),
            text: String::new(),
            children: Vec::new(),
            node_type: NodeType::Element,
        }
    }

    pub fn new_text(text: &str) -> Self {
        Self {
            tag: String::new(),
            attributes: HashMap::new(),
            text: text.to_string(),
            children: Vec::new(),
            node_type: NodeType::Text,
        }
    }

    pub fn new_document() -> Self {
        Self {
            tag: String::new(),
            attributes: HashMap::new(),
            text: String::new(),
            children: Vec::new(),
            node_type: NodeType::Document,
        }
    }

    pub fn is_element(&self) -> bool {
        self.node_type == NodeType::Element
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }

    /// The raw `class` attribute, or `""`.
    pub fn class_attr(&self) -> &str {
        self.get_attr("class").unwrap_or("")
    }

    /// Child elements in document order, text nodes skipped.
    pub fn element_children(&self) -> impl Iterator<Item = &DomNode> {
        self.children.iter().filter(|c| c.is_element())
    }

    /// First element with the given tag, searching this node and its
    /// descendants in document order.
    pub fn find_first(&self, tag: &str) -> Option<&DomNode> {
        if self.is_element() && self.tag == tag {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_first(tag))
    }

    /// Every element with the given tag, in document order.
    pub fn find_all<'a>(&'a self, tag: &str) -> Vec<&'a DomNode> {
        let mut out = Vec::new();
        self.collect_tag(tag, &mut out);
        out
    }

    fn collect_tag<'a>(&'a self, tag: &str, out: &mut Vec<&'a DomNode>) {
        if self.is_element() && self.tag == tag {
            out.push(self);
        }
        for child in &self.children {
            child.collect_tag(tag, out);
        }
    }

    /// The document's doctype node, if the source declared one.
    pub fn doctype(&self) -> Option<&DomNode> {
        self.children.iter().find(|c| c.node_type == NodeType::Doctype)
    }

    /// Text of the direct text children only, each trimmed and joined by a
    /// single space.
    pub fn direct_text(&self) -> String {
        let mut result = String::new();
        for child in &self.children {
            if child.node_type != NodeType::Text {
                continue;
            }
            let t = child.text.trim();
            if !t.is_empty() {
                if !result.is_empty() {
                    result.push(' ');
                }
                result.push_str(t);
            }
        }
        result
    }

    /// Get the visible text content of this node and all children.
    pub fn text_content(&self) -> String {
        let mut result = String::new();
        self.collect_text(&mut result);
        result.trim().to_string()
    }

    fn collect_text(&self, out: &mut String) {
        match self.node_type {
            NodeType::Text => {
                let trimmed = self.text.trim();
                if !trimmed.is_empty() {
                    if !out.is_empty() && !out.ends_with(' ') {
                        out.push(' ');
                    }
                    out.push_str(trimmed);
                }
            }
            _ => {
                for child in &self.children {
                    child.collect_text(out);
                }
            }
        }
    }
}

/// Deepest element nesting kept from the source, counted from the document.
/// Elements below this level are attached to the element at the limit, in
/// document order, the way browser parsers cap tree depth.
pub const MAX_NESTING_DEPTH: usize = 512;

/// Parse an HTML string into a DomNode tree.
///
/// Never fails: the HTML5 algorithm recovers from any input, so malformed
/// markup still yields a document (usually with synthesized html/head/body).
/// Nesting past [`MAX_NESTING_DEPTH`] is flattened.
pub fn parse_html(html: &str) -> DomNode {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            drop_doctype: false,
            ..Default::default()
        },
        ..Default::default()
    };

    let dom = parse_document(RcDom::default(), opts).one(html);

    convert_document(&dom.document)
}

/// An element being converted, with the source children still to visit.
struct Frame {
    node: DomNode,
    /// Last child first, so `pop` yields document order.
    pending: Vec<Handle>,
}

impl Frame {
    fn new(node: DomNode, handle: &Handle) -> Self {
        let pending = handle.children.borrow().iter().rev().cloned().collect();
        Self { node, pending }
    }
}

fn convert_document(document: &Handle) -> DomNode {
    let mut stack = vec![Frame::new(DomNode::new_document(), document)];
    let mut flattened = 0usize;

    loop {
        // Nesting level of the next child: the document's children are at 1.
        let level = stack.len();
        let next = match stack.last_mut() {
            Some(frame) => frame.pending.pop(),
            None => break,
        };

        let Some(handle) = next else {
            let Some(finished) = stack.pop() else { break };
            match stack.last_mut() {
                Some(parent) => parent.node.children.push(finished.node),
                None => {
                    if flattened > 0 {
                        tracing::debug!(
                            flattened,
                            limit = MAX_NESTING_DEPTH,
                            "flattened elements nested past the depth limit"
                        );
                    }
                    return finished.node;
                }
            }
            continue;
        };

        match &handle.data {
            NodeData::Element { name, attrs, .. } => {
                let mut node = DomNode::new_element(&name.local.to_lowercase());
                for attr in attrs.borrow().iter() {
                    node.attributes
                        .insert(attr.name.local.to_string(), attr.value.to_string());
                }
                if level <= MAX_NESTING_DEPTH {
                    stack.push(Frame::new(node, &handle));
                } else if let Some(frame) = stack.last_mut() {
                    // Keep the element with its own text and lift its other
                    // children up to follow it.
                    flattened += 1;
                    let children = handle.children.borrow();
                    for child in children.iter() {
                        if let NodeData::Text { contents } = &child.data {
                            let text = contents.borrow().to_string();
                            if !text.trim().is_empty() {
                                node.children.push(DomNode::new_text(&text));
                            }
                        }
                    }
                    frame.node.children.push(node);
                    frame.pending.extend(
                        children
                            .iter()
                            .rev()
                            .filter(|c| !matches!(c.data, NodeData::Text { .. }))
                            .cloned(),
                    );
                }
            }
            NodeData::Text { contents } => {
                let text = contents.borrow().to_string();
                // Whitespace-only text carries nothing
                if !text.trim().is_empty() {
                    if let Some(frame) = stack.last_mut() {
                        frame.node.children.push(DomNode::new_text(&text));
                    }
                }
            }
            NodeData::Doctype {
                name, public_id, ..
            } => {
                let mut node = DomNode::new_document();
                node.node_type = NodeType::Doctype;
                node.tag = name.to_string();
                if !public_id.is_empty() {
                    node.attributes
                        .insert("public_id".to_string(), public_id.to_string());
                }
                if let Some(frame) = stack.last_mut() {
                    frame.node.children.push(node);
                }
            }
            // Comments, PIs → ignored
            _ => {}
        }
    }

    DomNode::new_document()
}
