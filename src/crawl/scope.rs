// src/crawl/scope.rs
// =============================================================================
// Decides which links belong to the crawl.
//
// Two independent, stateless checks:
// - strip_fragments_and_dedupe: "/p", "/p#a" and "/p#b" are one link
// - in_scope: a URL is crawled only if its host equals the root's host
//   (no subdomain or TLD generalisation, the port is ignored)
// =============================================================================

use std::collections::HashSet;

use url::Url;

// Drops everything from the first '#' on, then removes exact duplicates.
// The first occurrence of each link keeps its position.
pub fn strip_fragments_and_dedupe(links: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();

    links
        .into_iter()
        .map(|mut link| {
            if let Some(idx) = link.find('#') {
                link.truncate(idx);
            }
            link
        })
        .filter(|link| seen.insert(link.clone()))
        .collect()
}

// True when `candidate` has the same hostname as `root`.
// Anything that fails to parse is out of scope.
pub fn in_scope(candidate: &str, root: &str) -> bool {
    let (Ok(candidate), Ok(root)) = (Url::parse(candidate), Url::parse(root)) else {
        return false;
    };

    match (candidate.host_str(), root.host_str()) {
        (Some(candidate_host), Some(root_host)) => candidate_host == root_host,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_fragments_collapse() {
        let links = strip_fragments_and_dedupe(strings(&["/p", "/p#section", "/p#other"]));
        assert_eq!(links, strings(&["/p"]));
    }

    #[test]
    fn test_bare_fragment_becomes_empty() {
        let links = strip_fragments_and_dedupe(strings(&["#frag", "#top"]));
        assert_eq!(links, strings(&[""]));
    }

    #[test]
    fn test_first_occurrence_order_kept() {
        let links = strip_fragments_and_dedupe(strings(&["/b", "/a", "/b#x", "/c", "/a"]));
        assert_eq!(links, strings(&["/b", "/a", "/c"]));
    }

    #[test]
    fn test_same_host_in_scope() {
        assert!(in_scope("https://example.com/docs", "https://example.com/"));
        assert!(in_scope("http://example.com/docs", "https://example.com/"));
        assert!(in_scope("http://127.0.0.1:9000/x", "http://127.0.0.1:8080/0"));
    }

    #[test]
    fn test_other_hosts_out_of_scope() {
        assert!(!in_scope("https://other.com/", "https://example.com/"));
        assert!(!in_scope("https://blog.example.com/", "https://example.com/"));
        assert!(!in_scope("https://example.org/", "https://example.com/"));
    }

    #[test]
    fn test_hostless_and_malformed_out_of_scope() {
        assert!(!in_scope("mailto:someone@example.com", "https://example.com/"));
        assert!(!in_scope("not a url", "https://example.com/"));
        assert!(!in_scope("https://example.com/", "not a url"));
    }
}
