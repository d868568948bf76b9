// src/error.rs
// =============================================================================
// Every error the crawler can produce, grouped by how far it reaches:
//
// - Fatal: the crawl cannot start (bad root, unusable robots.txt)
// - Page-level: one page could not be fetched; its subtree is empty
// - Link-level: one href could not be resolved; the page carries on
// - Policy notices: robots.txt disallows a URL (logged only)
//
// Only fatal errors are returned to the caller. Everything else travels
// through the crawl's error sink and ends up in the log.
// =============================================================================

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrawlError {
    /// The root URL was empty, unparseable, or had no host
    #[error("root url is invalid: got '{0}'")]
    InvalidRoot(String),

    /// robots.txt could not be requested at all
    #[error("unable to get robots.txt from {url}: {source}")]
    RobotsFetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// robots.txt was fetched but could not be parsed
    #[error("unable to parse robots.txt from {url}: {reason}")]
    RobotsParse { url: String, reason: String },

    /// Network failure while fetching a page
    #[error("unable to get {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status
    #[error("received {status} for {url}")]
    Status { url: String, status: StatusCode },

    /// An href that could not be resolved against its page
    #[error("issue cleaning '{link}' against {base}: {source}")]
    MalformedUrl {
        link: String,
        base: String,
        #[source]
        source: url::ParseError,
    },

    /// robots.txt disallows this URL for our user agent
    #[error("visiting {0} violates robots.txt")]
    RobotsDisallowed(String),

    /// A page task panicked or was cancelled before it returned
    #[error("page task failed: {0}")]
    TaskFailed(String),
}

impl CrawlError {
    /// Fatal errors abort the whole crawl; all others are reported and skipped.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            CrawlError::InvalidRoot(_) | CrawlError::RobotsFetch { .. } | CrawlError::RobotsParse { .. }
        )
    }
}
