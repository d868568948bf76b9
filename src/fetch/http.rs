// src/fetch/http.rs
// =============================================================================
// This module fetches pages over HTTP.
//
// Key functionality:
// - One shared reqwest Client for the whole crawl (connection pooling)
// - Sends our crawler identity as the User-Agent header
// - Treats any non-2xx status as a failed fetch
//
// There is no request timeout: a fetch runs until the server answers
// or the connection fails.
// =============================================================================

use reqwest::header::USER_AGENT;
use reqwest::{Client, Response};

use crate::error::CrawlError;

#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
    user_agent: String,
}

impl PageFetcher {
    pub fn new(user_agent: &str) -> Self {
        PageFetcher {
            client: Client::new(),
            user_agent: user_agent.to_string(),
        }
    }

    // Sends a GET request and hands back the raw response, whatever
    // its status. Only transport failures are errors here.
    pub async fn get(&self, url: &str) -> Result<Response, CrawlError> {
        self.client
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(|source| CrawlError::Transport {
                url: url.to_string(),
                source,
            })
    }

    // Fetches a page and returns its body as text
    //
    // Returns:
    //   Ok(body) for any 2xx response
    //   Err(CrawlError::Status) for any other status
    //   Err(CrawlError::Transport) if the request or body read failed
    pub async fn fetch_page(&self, url: &str) -> Result<String, CrawlError> {
        let response = self.get(url).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CrawlError::Status {
                url: url.to_string(),
                status,
            });
        }

        response.text().await.map_err(|source| CrawlError::Transport {
            url: url.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_ok_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .and(header("user-agent", "TestBot"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<p>hi</p>"))
            .expect(1)
            .mount(&server)
            .await;

        let fetcher = PageFetcher::new("TestBot");
        let body = fetcher.fetch_page(&format!("{}/page", server.uri())).await.unwrap();
        assert_eq!(body, "<p>hi</p>");
    }

    #[tokio::test]
    async fn test_fetch_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/broken"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let fetcher = PageFetcher::new("TestBot");
        let err = fetcher
            .fetch_page(&format!("{}/broken", server.uri()))
            .await
            .unwrap_err();

        match err {
            CrawlError::Status { status, .. } => assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR),
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_transport_error() {
        // Nothing listens on port 1 on a test machine
        let fetcher = PageFetcher::new("TestBot");
        let err = fetcher.fetch_page("http://127.0.0.1:1/").await.unwrap_err();
        assert!(matches!(err, CrawlError::Transport { .. }));
    }
}
