// src/config.rs
// =============================================================================
// Settings for a single crawl.
//
// The CLI fills this in (see cli.rs), but tests build it directly with
// CrawlConfig::new() and the with_* helpers.
// =============================================================================

/// Default crawler identity, used for robots.txt group selection and
/// as the HTTP User-Agent header.
pub const DEFAULT_USER_AGENT: &str = "SiteSprinter";

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// The URL the crawl starts from (validated by Sprinter::new)
    pub root: String,
    /// Name matched against robots.txt `User-agent` lines
    pub user_agent: String,
    /// When false, a robots.txt denial is logged but the page is still
    /// fetched. When true, denied pages are skipped.
    pub obey_robots: bool,
}

impl CrawlConfig {
    pub fn new(root: impl Into<String>) -> Self {
        CrawlConfig {
            root: root.into(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            obey_robots: false,
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_obey_robots(mut self, obey: bool) -> Self {
        self.obey_robots = obey;
        self
    }
}
