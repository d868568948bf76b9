// src/crawl/normalize.rs
// =============================================================================
// Turns a link found on a page into an absolute URL string.
//
// Resolution follows the usual browser rules, via url::Url::join:
//   base = "https://example.com/docs/intro"
//   "/about"    -> "https://example.com/about"
//   "guide"     -> "https://example.com/docs/guide"
//   "../x"      -> "https://example.com/x"
//   ""          -> "https://example.com/docs/intro" (the page itself)
//
// Fragments must already be stripped (crawl::scope) before calling this,
// otherwise "#top" would resolve to a distinct URL for the same page.
// =============================================================================

use url::Url;

use crate::error::CrawlError;

// Resolves `link` against `base` and returns the canonical string form
pub fn normalize(link: &str, base: &str) -> Result<String, CrawlError> {
    let malformed = |source| CrawlError::MalformedUrl {
        link: link.to_string(),
        base: base.to_string(),
        source,
    };

    let base_url = Url::parse(base).map_err(malformed)?;
    let resolved = base_url.join(link).map_err(malformed)?;

    Ok(resolved.to_string())
}
