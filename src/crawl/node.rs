// src/crawl/node.rs
// =============================================================================
// One visited page in the crawl tree.
//
// A node records:
// - location: the canonical URL of the page
// - outbound_links: every normalised link found on it, in scope or not
// - children: the pages first discovered (and successfully fetched) here
//
// A page task owns its node until it returns; the parent then takes the
// node as a child.
// =============================================================================

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrawlNode {
    location: String,
    pub(crate) outbound_links: Vec<String>,
    pub(crate) children: Vec<CrawlNode>,
}

impl CrawlNode {
    pub fn new(location: impl Into<String>) -> Self {
        CrawlNode {
            location: location.into(),
            outbound_links: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn outbound_links(&self) -> &[String] {
        &self.outbound_links
    }

    pub fn children(&self) -> &[CrawlNode] {
        &self.children
    }

    /// Number of nodes in this subtree, this one included.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Depth-first iterator over the subtree, starting with this node.
    pub fn iter(&self) -> impl Iterator<Item = &CrawlNode> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }
}

// Renders the subtree depth-first:
//
//   Visited: https://example.com/
//       https://example.com/about
//       https://other.com/
//   Visited: https://example.com/about
impl fmt::Display for CrawlNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Visited: {}", self.location)?;

        for link in &self.outbound_links {
            writeln!(f, "\t{}", link)?;
        }

        for child in &self.children {
            write!(f, "{}", child)?;
        }

        Ok(())
    }
}
