//! Tests for read-only tree queries.

use domscope_core::tree::query::{
    ancestors, count_containers, count_elements, count_nodes, find_by_id, find_by_tag,
    find_with_class, flatten, max_depth, search, select, ContainerKind,
};
use domscope_core::{parse, PageStructure};
use pretty_assertions::assert_eq;

const PAGE: &str = r#"<body>
  <header id="top" class="Site-Header flex"><nav></nav></header>
  <main class="container">
    <section class="grid grid-cols-2"><article>A</article><article>B</article></section>
    <section id="contact"><p>hi</p></section>
  </main>
  <footer></footer>
</body>"#;

fn page() -> PageStructure {
    parse(PAGE)
}

fn tags(nodes: &[&domscope_core::Node]) -> Vec<String> {
    nodes.iter().map(|n| n.tag_name.clone()).collect()
}

#[test]
fn test_flatten_is_preorder_without_root() {
    let page = page();
    let flat = flatten(&page.root_node);
    assert_eq!(
        tags(&flat),
        vec!["header", "nav", "main", "section", "article", "article", "section", "p", "footer"]
    );
    assert_eq!(flat.len(), page.total_elements);
    assert_eq!(count_nodes(&page.root_node), page.total_elements);
}

#[test]
fn test_flatten_is_stable() {
    let page = page();
    let first: Vec<_> = flatten(&page.root_node).iter().map(|n| n.id).collect();
    let second: Vec<_> = flatten(&page.root_node).iter().map(|n| n.id).collect();
    assert_eq!(first, second);
}

#[test]
fn test_find_by_id() {
    let page = page();
    let section_id = flatten(&page.root_node)[3].id;
    let found = find_by_id(&page.root_node, section_id).unwrap();
    assert_eq!(found.tag_name, "section");
    assert_eq!(found.class_attribute, "grid grid-cols-2");

    let root = find_by_id(&page.root_node, page.root_node.id).unwrap();
    assert_eq!(root.tag_name, "body");
}

#[test]
fn test_find_by_id_unknown() {
    let page = page();
    let other = parse("<body><div><div><div><div><div><div><div><div><div><div><div></div></div></div></div></div></div></div></div></div></div></div></body>");
    let foreign = flatten(&other.root_node).last().unwrap().id;
    assert!(find_by_id(&page.root_node, foreign).is_none());
    assert!(select(&page.root_node, foreign).is_none());
    assert!(ancestors(&page.root_node, foreign).is_empty());
}

#[test]
fn test_ancestors_root_first() {
    let page = page();
    let article = flatten(&page.root_node)[4];
    let chain = ancestors(&page.root_node, article.id);
    assert_eq!(tags(&chain), vec!["body", "main", "section"]);
    assert!(ancestors(&page.root_node, page.root_node.id).is_empty());
}

#[test]
fn test_select_returns_siblings() {
    let page = page();
    let flat = flatten(&page.root_node);
    let first_article = flat[4];
    let second_article = flat[5];

    let selection = select(&page.root_node, first_article.id).unwrap();
    assert_eq!(selection.node.id, first_article.id);
    assert_eq!(selection.node.text_content, "A");
    assert_eq!(selection.ancestors.len(), 3);
    assert_eq!(selection.siblings.len(), 1);
    assert_eq!(selection.siblings[0].id, second_article.id);
}

#[test]
fn test_select_root_has_no_context() {
    let page = page();
    let selection = select(&page.root_node, page.root_node.id).unwrap();
    assert!(selection.ancestors.is_empty());
    assert!(selection.siblings.is_empty());
}

#[test]
fn test_search_is_case_insensitive() {
    let page = page();
    let hits = search(&page.root_node, "HEADER");
    assert_eq!(tags(&hits), vec!["header"]);

    let hits = search(&page.root_node, "site-header");
    assert_eq!(hits.len(), 1);
}

#[test]
fn test_search_matches_tag_class_and_id() {
    let page = page();
    assert_eq!(tags(&search(&page.root_node, "sec")), vec!["section", "section"]);
    assert_eq!(tags(&search(&page.root_node, "contact")), vec!["section"]);
    assert_eq!(tags(&search(&page.root_node, "cols")), vec!["section"]);
    assert!(search(&page.root_node, "body").is_empty(), "root is not searched");
}

#[test]
fn test_empty_search_matches_nothing() {
    let page = page();
    assert!(search(&page.root_node, "").is_empty());
    assert!(search(&page.root_node, "   ").is_empty());
}

#[test]
fn test_find_by_tag_and_class_include_root() {
    let page = parse(r#"<body class="container"><div class="container wide"></div></body>"#);
    assert_eq!(find_by_tag(&page.root_node, "body").len(), 1);
    assert_eq!(find_with_class(&page.root_node, "container").len(), 2);
    assert_eq!(find_with_class(&page.root_node, "wide").len(), 1);
    assert!(find_with_class(&page.root_node, "narrow").is_empty());
}

#[test]
fn test_container_counts() {
    let page = page();
    assert_eq!(count_containers(&page.root_node, ContainerKind::Flex), 1);
    assert_eq!(count_containers(&page.root_node, ContainerKind::Grid), 1);
}

#[test]
fn test_depth_and_counts() {
    let page = page();
    assert_eq!(max_depth(&page.root_node), 3);
    assert_eq!(page.max_depth, 3);

    let counts = count_elements(&page.root_node);
    assert_eq!(counts.get("article"), Some(&2));
    assert_eq!(counts.get("section"), Some(&2));
    assert_eq!(counts.get("p"), Some(&1));
    assert_eq!(counts.values().sum::<usize>(), page.total_elements);
}
