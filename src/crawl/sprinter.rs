// src/crawl/sprinter.rs
// =============================================================================
// The crawl orchestrator.
//
// A Sprinter owns one crawl from start to finish:
//
//   Uninitialized -> PolicyLoading -> Crawling -> Drained
//                         |
//                         +-> Failed (robots.txt unusable, no tree)
//
// - PolicyLoading: fetch and parse <origin>/robots.txt
// - Crawling: spawn the root page task, which fans out recursively;
//   wait on the completion barrier for every task to finish
// - Drained: close the error sink, wait for the drain task, return the tree
//
// Non-fatal errors from all tasks go through one unbounded channel and are
// logged by a single background task that lives as long as the crawl.
// =============================================================================

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::{JoinHandle, JoinSet};
use url::Url;

use crate::config::CrawlConfig;
use crate::crawl::barrier::CompletionBarrier;
use crate::crawl::node::CrawlNode;
use crate::crawl::normalize::normalize;
use crate::crawl::registry::VisitedRegistry;
use crate::crawl::visitor::{dispatch, CrawlContext, Visit};
use crate::error::CrawlError;
use crate::fetch::{PageFetcher, RobotsPolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlState {
    Uninitialized,
    PolicyLoading,
    Crawling,
    Drained,
    Failed,
}

#[derive(Debug)]
pub struct Sprinter {
    root: String,
    config: CrawlConfig,
    state: CrawlState,
}

impl Sprinter {
    // Validates and canonicalises the root URL
    //
    // The root must be non-empty, parse as a URL, and have a host.
    // "https://example.com" becomes "https://example.com/", and any
    // fragment is dropped so the root matches its own stripped self-links.
    pub fn new(config: CrawlConfig) -> Result<Self, CrawlError> {
        let invalid = || CrawlError::InvalidRoot(config.root.clone());

        if config.root.trim().is_empty() {
            return Err(invalid());
        }

        let parsed = Url::parse(&config.root).map_err(|_| invalid())?;
        if parsed.host_str().is_none() {
            return Err(invalid());
        }

        let root = normalize(&config.root, &config.root).map_err(|_| invalid())?;
        let mut root = Url::parse(&root).map_err(|_| invalid())?;
        root.set_fragment(None);
        let root = root.to_string();

        Ok(Sprinter {
            root,
            config,
            state: CrawlState::Uninitialized,
        })
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn state(&self) -> CrawlState {
        self.state
    }

    fn transition(&mut self, next: CrawlState) {
        log::debug!("crawl state {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    // Runs the crawl to completion.
    //
    // Returns: the root node of the discovery tree (present even when the
    //          root page itself failed to fetch), or a fatal error.
    pub async fn crawl(&mut self) -> Result<CrawlNode, CrawlError> {
        self.transition(CrawlState::PolicyLoading);

        let (errors, error_rx) = mpsc::unbounded_channel();
        let drain = spawn_error_drain(error_rx);

        let fetcher = PageFetcher::new(&self.config.user_agent);
        let root_url = Url::parse(&self.root).map_err(|_| CrawlError::InvalidRoot(self.root.clone()))?;

        let robots = match RobotsPolicy::load(&fetcher, &root_url, &self.config.user_agent).await {
            Ok(robots) => robots,
            Err(e) => {
                self.transition(CrawlState::Failed);
                drop(errors);
                let _ = drain.await;
                return Err(e);
            }
        };

        self.transition(CrawlState::Crawling);

        let ctx = Arc::new(CrawlContext {
            root: self.root.clone(),
            registry: VisitedRegistry::new(),
            robots,
            fetcher,
            barrier: CompletionBarrier::new(),
            errors,
            obey_robots: self.config.obey_robots,
        });

        let mut root_task = JoinSet::new();
        dispatch(&ctx, &mut root_task, self.root.clone());

        // The barrier is the crawl's join: it reaches zero only after the
        // root task and every task it fanned out have finished, so the
        // root's JoinSet is ready by the time we collect from it.
        ctx.barrier.wait().await;

        let root_visit = match root_task.join_next().await {
            Some(Ok(visit)) => visit,
            Some(Err(e)) => {
                ctx.report(CrawlError::TaskFailed(e.to_string()));
                None
            }
            None => None,
        };

        let visited = ctx.registry.len();

        // Last sender goes away here, which ends the drain task
        drop(ctx);
        let reported = drain.await.unwrap_or_default();

        self.transition(CrawlState::Drained);
        log::info!("crawl of {} finished: {visited} page(s) visited, {reported} error(s) reported", self.root);

        // The root task only returns None if it never claimed the root
        // (robots.txt denial while obeying it, or a panic).
        Ok(root_visit
            .map(Visit::into_node)
            .unwrap_or_else(|| CrawlNode::new(self.root.clone())))
    }
}

// Logs every non-fatal error until all senders are dropped.
// Returns the number of errors seen.
fn spawn_error_drain(mut rx: mpsc::UnboundedReceiver<CrawlError>) -> JoinHandle<usize> {
    tokio::spawn(async move {
        let mut count = 0;
        while let Some(error) = rx.recv().await {
            if error.is_fatal() {
                log::error!("received error: {error}");
            } else {
                log::warn!("received error: {error}");
            }
            count += 1;
        }
        count
    })
}
