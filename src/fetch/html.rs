// src/fetch/html.rs
// =============================================================================
// This module pulls raw link targets out of an HTML page.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Is built on html5ever, which lower-cases tag and attribute names
//   while parsing, so <A HREF="..."> and <a href="..."> look the same
//
// The values come back exactly as written in the page, apart from being
// lower-cased. Fragment stripping and resolution happen later, in
// crawl::scope and crawl::normalize.
// =============================================================================

use scraper::Html;

// Extracts the href value of every anchor tag in a page
//
// Parameters:
//   html: the HTML content to parse
//
// Returns: Vec<String> of lower-cased href values, in document order,
//          duplicates included
//
// Example:
//   html = "<a HREF='/Docs'>Docs</a><a>no target</a>"
//   result = ["/docs"]
pub fn extract_anchor_hrefs(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    // Walk every node in the tree and keep the <a> elements
    document
        .tree
        .nodes()
        .filter_map(|node| node.value().as_element())
        .filter(|element| element.name().eq_ignore_ascii_case("a"))
        .filter_map(|element| element.attr("href"))
        .map(|href| href.to_lowercase())
        .collect()
}
