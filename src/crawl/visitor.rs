// src/crawl/visitor.rs
// =============================================================================
// The unit of work: visit one URL.
//
// How a visit runs:
// 1. Claim the URL in the visited registry; if someone else has it, stop
// 2. Check robots.txt; a denial is reported (and, with obey_robots,
//    ends the visit)
// 3. Fetch the page; a failed fetch still yields a node, marked Failed
// 4. Extract hrefs, strip fragments, dedupe, normalise, drop self-links
// 5. Record every link on the node, then spawn one task per link that is
//    in scope and not yet visited
// 6. Attach children as their tasks finish, and return once all have
//
// Every task holds a barrier guard for its whole lifetime, so the crawl
// knows when the last page task has finished.
// =============================================================================

use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinSet;

use crate::crawl::barrier::CompletionBarrier;
use crate::crawl::node::CrawlNode;
use crate::crawl::normalize::normalize;
use crate::crawl::registry::VisitedRegistry;
use crate::crawl::scope::{in_scope, strip_fragments_and_dedupe};
use crate::error::CrawlError;
use crate::fetch::{extract_anchor_hrefs, PageFetcher, RobotsPolicy};

// State shared by every page task of one crawl
pub(crate) struct CrawlContext {
    pub root: String,
    pub registry: VisitedRegistry,
    pub robots: RobotsPolicy,
    pub fetcher: PageFetcher,
    pub barrier: Arc<CompletionBarrier>,
    pub errors: UnboundedSender<CrawlError>,
    pub obey_robots: bool,
}

impl CrawlContext {
    // Pushes a non-fatal error onto the sink. Never blocks; if the drain
    // task is gone the error is dropped.
    pub fn report(&self, error: CrawlError) {
        let _ = self.errors.send(error);
    }
}

/// Outcome of visiting a URL that this task managed to claim.
#[derive(Debug)]
pub enum Visit {
    /// The page was fetched; links and children are filled in
    Fetched(CrawlNode),
    /// The fetch failed; the node has no links and no children
    Failed(CrawlNode),
}

impl Visit {
    pub fn into_node(self) -> CrawlNode {
        match self {
            Visit::Fetched(node) | Visit::Failed(node) => node,
        }
    }
}

// Spawns a page task for `url` onto `tasks`.
// The barrier is entered here, before the spawn, and released when the
// task finishes.
pub(crate) fn dispatch(ctx: &Arc<CrawlContext>, tasks: &mut JoinSet<Option<Visit>>, url: String) {
    let guard = ctx.barrier.enter();
    let ctx = Arc::clone(ctx);

    tasks.spawn(async move {
        let _guard = guard;
        visit(ctx, url).await
    });
}

// Visits `url` and its whole newly discovered subtree.
//
// Returns: None if the URL was already claimed (or skipped by robots.txt
//          when obeying it), otherwise the node for this page.
pub(crate) fn visit(ctx: Arc<CrawlContext>, url: String) -> BoxFuture<'static, Option<Visit>> {
    async move {
        if !ctx.registry.reserve(&url) {
            log::trace!("already visited {url}");
            return None;
        }

        if !ctx.robots.allows(&url) {
            ctx.report(CrawlError::RobotsDisallowed(url.clone()));
            if ctx.obey_robots {
                return None;
            }
        }

        log::debug!("visiting {url}");
        let mut node = CrawlNode::new(url);

        let body = match ctx.fetcher.fetch_page(node.location()).await {
            Ok(body) => body,
            Err(e) => {
                ctx.report(e);
                return Some(Visit::Failed(node));
            }
        };

        let new_work = record_links(&ctx, &mut node, &body);

        let mut tasks = JoinSet::new();
        for link in new_work {
            dispatch(&ctx, &mut tasks, link);
        }

        // Children arrive in completion order, not discovery order
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Some(Visit::Fetched(child))) => node.children.push(child),
                Ok(Some(Visit::Failed(_))) | Ok(None) => {}
                Err(e) => ctx.report(CrawlError::TaskFailed(e.to_string())),
            }
        }

        Some(Visit::Fetched(node))
    }
    .boxed()
}

// Fills in `node.outbound_links` from a page body and returns the links
// that should become new page tasks.
fn record_links(ctx: &CrawlContext, node: &mut CrawlNode, body: &str) -> Vec<String> {
    let links = strip_fragments_and_dedupe(extract_anchor_hrefs(body));
    let mut new_work = Vec::new();

    for link in links {
        let link = match normalize(&link, node.location()) {
            Ok(link) => link,
            Err(e) => {
                ctx.report(e);
                continue;
            }
        };

        // Cyclical link back to this page
        if link == node.location() {
            continue;
        }

        // "/p" and "p" can resolve to the same URL
        if node.outbound_links.contains(&link) {
            continue;
        }

        // The registry check is only a hint; the child task's own
        // reserve() is what prevents a duplicate fetch.
        if in_scope(&link, &ctx.root) && !ctx.registry.is_visited(&link) {
            new_work.push(link.clone());
        }

        node.outbound_links.push(link);
    }

    new_work
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use tokio::sync::mpsc;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn context(root: &str) -> (CrawlContext, mpsc::UnboundedReceiver<CrawlError>) {
        let (errors, rx) = mpsc::unbounded_channel();
        let ctx = CrawlContext {
            root: root.to_string(),
            registry: VisitedRegistry::new(),
            robots: RobotsPolicy::from_body("TestBot", b"").unwrap(),
            fetcher: PageFetcher::new("TestBot"),
            barrier: CompletionBarrier::new(),
            errors,
            obey_robots: false,
        };
        (ctx, rx)
    }

    #[test]
    fn test_record_links_filters_and_partitions() {
        let (ctx, _rx) = context("https://example.com/");
        ctx.registry.reserve("https://example.com/seen");

        let mut node = CrawlNode::new("https://example.com/");
        let body = r##"
            <a href="/about">About</a>
            <a href="/about#team">Team</a>
            <a href="about">Same page again</a>
            <a href="#top">Top</a>
            <a href="/seen">Seen</a>
            <a href="https://other.com/">Elsewhere</a>
        "##;

        let new_work = record_links(&ctx, &mut node, body);

        assert_eq!(
            node.outbound_links(),
            &[
                "https://example.com/about".to_string(),
                "https://example.com/seen".to_string(),
                "https://other.com/".to_string(),
            ]
        );
        assert_eq!(new_work, vec!["https://example.com/about".to_string()]);
    }

    #[tokio::test]
    async fn test_malformed_link_reported_and_skipped() {
        let (ctx, mut rx) = context("https://example.com/");
        let mut node = CrawlNode::new("https://example.com/");
        let body = r#"<a href="http://[::1">Broken</a><a href="/ok">Ok</a>"#;

        let new_work = record_links(&ctx, &mut node, body);

        assert_eq!(new_work, vec!["https://example.com/ok".to_string()]);
        assert_eq!(node.outbound_links(), &["https://example.com/ok".to_string()]);
        assert!(matches!(rx.try_recv(), Ok(CrawlError::MalformedUrl { .. })));
    }

    #[tokio::test]
    async fn test_status_failure_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/broken"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let url = format!("{}/broken", server.uri());
        let (ctx, mut rx) = context(&server.uri());

        let result = visit(Arc::new(ctx), url.clone()).await;
        match result {
            Some(Visit::Failed(node)) => assert_eq!(node, CrawlNode::new(url)),
            other => panic!("expected a failed visit, got {other:?}"),
        }
        assert!(matches!(
            rx.try_recv(),
            Ok(CrawlError::Status { status, .. }) if status == StatusCode::INTERNAL_SERVER_ERROR
        ));
    }

    #[tokio::test]
    async fn test_transport_failure_reported() {
        let url = "http://127.0.0.1:1/gone".to_string();
        let (ctx, mut rx) = context("http://127.0.0.1:1/");

        let result = visit(Arc::new(ctx), url.clone()).await;
        assert!(matches!(result, Some(Visit::Failed(ref node)) if node.location() == url));
        assert!(matches!(rx.try_recv(), Ok(CrawlError::Transport { .. })));
    }

    #[tokio::test]
    async fn test_robots_denial_reported_and_page_still_fetched() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/private"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let url = format!("{}/private", server.uri());
        let (mut ctx, mut rx) = context(&server.uri());
        ctx.robots = RobotsPolicy::from_body("TestBot", b"User-agent: *\nDisallow: /private\n").unwrap();

        let result = visit(Arc::new(ctx), url.clone()).await;
        assert!(matches!(result, Some(Visit::Fetched(_))));
        match rx.try_recv() {
            Ok(CrawlError::RobotsDisallowed(denied)) => assert_eq!(denied, url),
            other => panic!("expected a robots.txt notice, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_visit_skips_claimed_url() {
        let (ctx, _rx) = context("https://example.com/");
        ctx.registry.reserve("https://example.com/");

        let result = visit(Arc::new(ctx), "https://example.com/".to_string()).await;
        assert!(result.is_none());
    }

    #[test]
    fn test_into_node() {
        let node = CrawlNode::new("https://example.com/");
        assert_eq!(Visit::Failed(node.clone()).into_node(), node);
    }
}
