// src/fetch/mod.rs
// =============================================================================
// Everything that talks to the outside world on behalf of the crawler.
//
// Submodules:
// - http: GET a page, turn non-2xx answers into errors
// - html: pull anchor href values out of a page body
// - robots: load robots.txt and test URLs against it
// =============================================================================

mod html;
mod http;
mod robots;

pub use html::extract_anchor_hrefs;
pub use http::PageFetcher;
pub use robots::RobotsPolicy;
