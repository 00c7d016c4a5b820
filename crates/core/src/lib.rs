//! Heuristic page-structure reconstruction.
//!
//! No browser, no layout engine: HTML is parsed, each element gets a style
//! record inferred from its inline `style` and utility classes, a flex/grid
//! classification, and a synthetic bounding box. The result is a
//! [`PageStructure`] for inspectors to render, search and export.

pub mod css;
pub mod dom;
pub mod layout;
pub mod output;
pub mod tree;
#[cfg(feature = "fetch")]
pub mod fetch;

pub use tree::{BuildConfig, LayoutPattern, Node, NodeId, PageStructure};

/// Parse an HTML string and build its page structure.
/// This is the primary entry point for domscope-core.
pub fn parse(html: &str) -> PageStructure {
    parse_with_config(html, &BuildConfig::default())
}

pub fn parse_with_config(html: &str, config: &BuildConfig) -> PageStructure {
    let document = dom::parse_html(html);
    tree::build_with_config(&document, config)
}
