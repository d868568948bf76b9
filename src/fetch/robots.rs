// src/fetch/robots.rs
// =============================================================================
// This module loads robots.txt for the crawl root and answers
// "may our user agent visit this URL?".
//
// Parsing and rule matching are done by the `texting_robots` crate.
// How the response status is read:
// - 2xx: parse the body; a parse failure is fatal
// - 4xx: there are no rules, everything is allowed
// - 5xx: the site is unavailable, everything is disallowed
// - transport failure: fatal
// =============================================================================

use texting_robots::Robot;
use url::Url;

use crate::error::CrawlError;
use crate::fetch::PageFetcher;

const DISALLOW_ALL: &[u8] = b"User-agent: *\nDisallow: /\n";

pub struct RobotsPolicy {
    robot: Robot,
}

impl RobotsPolicy {
    // Builds a policy from the raw contents of a robots.txt file
    pub fn from_body(user_agent: &str, body: &[u8]) -> Result<Self, anyhow::Error> {
        let robot = Robot::new(user_agent, body)?;
        Ok(RobotsPolicy { robot })
    }

    // Fetches and parses <origin>/robots.txt for the given root URL
    pub async fn load(fetcher: &PageFetcher, root: &Url, user_agent: &str) -> Result<Self, CrawlError> {
        // Always the origin's robots.txt, even when the root has a path:
        // "https://example.com/docs/" reads "https://example.com/robots.txt"
        let robots_url = root
            .join("/robots.txt")
            .map_err(|e| CrawlError::InvalidRoot(format!("{root}: {e}")))?
            .to_string();

        let response = fetcher.get(&robots_url).await.map_err(|e| match e {
            CrawlError::Transport { url, source } => CrawlError::RobotsFetch { url, source },
            other => other,
        })?;

        let status = response.status();
        let parse_error = |reason: String| CrawlError::RobotsParse {
            url: robots_url.clone(),
            reason,
        };

        if status.is_client_error() {
            log::debug!("{robots_url} answered {status}, allowing everything");
            return Self::from_body(user_agent, b"").map_err(|e| parse_error(e.to_string()));
        }
        if status.is_server_error() {
            log::warn!("{robots_url} answered {status}, disallowing everything");
            return Self::from_body(user_agent, DISALLOW_ALL).map_err(|e| parse_error(e.to_string()));
        }

        let body = response.bytes().await.map_err(|source| CrawlError::RobotsFetch {
            url: robots_url.clone(),
            source,
        })?;

        Self::from_body(user_agent, &body).map_err(|e| parse_error(e.to_string()))
    }

    pub fn allows(&self, url: &str) -> bool {
        self.robot.allowed(url)
    }
}
