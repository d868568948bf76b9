// src/lib.rs
// =============================================================================
// site-sprinter: crawl every page reachable from a root URL on the same
// host and build a tree of what was found.
//
//   let mut sprinter = Sprinter::new(CrawlConfig::new("https://example.com"))?;
//   let tree = sprinter.crawl().await?;
//   print!("{}", tree);
// =============================================================================

pub mod cli;
pub mod config;
pub mod crawl;
pub mod error;
pub mod fetch;

pub use config::CrawlConfig;
pub use crawl::{CrawlNode, CrawlState, Sprinter};
pub use error::CrawlError;
