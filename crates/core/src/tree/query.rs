//! Read-only queries over a built tree. Nothing here mutates, so any of these
//! can run concurrently against the same tree.

use super::{Node, NodeId};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    Flex,
    Grid,
}

/// A selected node with its context, as shown by an inspector.
#[derive(Debug, Clone)]
pub struct ElementSelection<'a> {
    pub node: &'a Node,
    /// Root first, direct parent last.
    pub ancestors: Vec<&'a Node>,
    /// Other children of the same parent, in document order.
    pub siblings: Vec<&'a Node>,
}

/// The page's elements in pre-order: every node below `root`. The root is
/// the page container and is not listed, so `flatten(root).len()` equals
/// `PageStructure::total_elements`.
pub fn flatten(root: &Node) -> Vec<&Node> {
    let mut out = Vec::new();
    for child in &root.children {
        collect_preorder(child, &mut out);
    }
    out
}

/// `root` followed by everything below it.
fn walk(root: &Node) -> Vec<&Node> {
    let mut out = Vec::new();
    collect_preorder(root, &mut out);
    out
}

fn collect_preorder<'a>(node: &'a Node, out: &mut Vec<&'a Node>) {
    out.push(node);
    for child in &node.children {
        collect_preorder(child, out);
    }
}

pub fn find_by_id(root: &Node, id: NodeId) -> Option<&Node> {
    if root.id == id {
        return Some(root);
    }
    root.children.iter().find_map(|c| find_by_id(c, id))
}

/// Ancestors of `target`, root first. Empty when `target` is the root or is
/// not in the tree.
pub fn ancestors(root: &Node, target: NodeId) -> Vec<&Node> {
    let mut path = Vec::new();
    if ancestor_path(root, target, &mut path) {
        path
    } else {
        Vec::new()
    }
}

fn ancestor_path<'a>(node: &'a Node, target: NodeId, path: &mut Vec<&'a Node>) -> bool {
    if node.id == target {
        return true;
    }
    path.push(node);
    for child in &node.children {
        if ancestor_path(child, target, path) {
            return true;
        }
    }
    path.pop();
    false
}

pub fn select(root: &Node, target: NodeId) -> Option<ElementSelection<'_>> {
    let node = find_by_id(root, target)?;
    let ancestors = ancestors(root, target);
    let siblings = ancestors
        .last()
        .map(|parent| parent.children.iter().filter(|c| c.id != target).collect())
        .unwrap_or_default();
    Some(ElementSelection {
        node,
        ancestors,
        siblings,
    })
}

/// Nodes whose tag equals `tag`, pre-order, root included.
pub fn find_by_tag<'a>(root: &'a Node, tag: &str) -> Vec<&'a Node> {
    walk(root)
        .into_iter()
        .filter(|n| n.tag_name == tag)
        .collect()
}

/// Nodes whose raw class string contains `needle` as a substring, root
/// included.
pub fn find_with_class<'a>(root: &'a Node, needle: &str) -> Vec<&'a Node> {
    walk(root)
        .into_iter()
        .filter(|n| n.class_attribute.contains(needle))
        .collect()
}

/// Case-insensitive match of the page's elements against tag, class string
/// or id attribute. An empty query matches nothing.
pub fn search<'a>(root: &'a Node, query: &str) -> Vec<&'a Node> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }
    flatten(root)
        .into_iter()
        .filter(|n| {
            n.tag_name.contains(&query)
                || n.class_attribute.to_lowercase().contains(&query)
                || n.id_attribute.to_lowercase().contains(&query)
        })
        .collect()
}

pub fn count_containers(root: &Node, kind: ContainerKind) -> usize {
    let own = match kind {
        ContainerKind::Flex => root.layout_info.is_flex_container,
        ContainerKind::Grid => root.layout_info.is_grid_container,
    };
    usize::from(own)
        + root
            .children
            .iter()
            .map(|c| count_containers(c, kind))
            .sum::<usize>()
}

/// Number of nodes below `root`.
pub fn count_nodes(root: &Node) -> usize {
    root.children.iter().map(|c| 1 + count_nodes(c)).sum()
}

/// Deepest `depth` in the tree.
pub fn max_depth(root: &Node) -> usize {
    root.children
        .iter()
        .map(max_depth)
        .max()
        .unwrap_or(root.depth)
}

/// Tag → number of nodes below `root` with that tag.
pub fn count_elements(root: &Node) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for node in flatten(root) {
        *counts.entry(node.tag_name.clone()).or_insert(0) += 1;
    }
    counts
}
