// src/cli.rs
// =============================================================================
// Command-line interface, built with clap's derive API.
//
//   site-sprinter --root https://example.com
//   site-sprinter --root https://example.com --json --obey-robots
// =============================================================================

use clap::Parser;

use crate::config::{CrawlConfig, DEFAULT_USER_AGENT};

#[derive(Parser, Debug)]
#[command(
    name = "site-sprinter",
    version = "0.1.0",
    about = "Crawl every page reachable from a root URL on the same host",
    long_about = "site-sprinter follows links from a root URL, stays on the root's host, \
                  and prints a tree of every page it visited with the links found on each."
)]
pub struct Cli {
    /// The root URL to crawl (e.g., https://example.com)
    #[arg(long)]
    pub root: String,

    /// Name used to pick the robots.txt group and sent as User-Agent
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Skip pages that robots.txt disallows instead of only logging them
    #[arg(long)]
    pub obey_robots: bool,

    /// Print the tree as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    pub fn crawl_config(&self) -> CrawlConfig {
        CrawlConfig::new(self.root.clone())
            .with_user_agent(self.user_agent.clone())
            .with_obey_robots(self.obey_robots)
    }
}
