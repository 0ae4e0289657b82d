use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use reqwest::{redirect, Client, ClientBuilder};
use url::Url;

use super::{FetchResponse, Fetcher};
use crate::core::CrawlResult;

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const MAX_REDIRECTS: usize = 10;

#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> CrawlResult<Self> {
        let client = ClientBuilder::new()
            .user_agent(DEFAULT_USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .redirect(redirect::Policy::limited(MAX_REDIRECTS))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: Url) -> CrawlResult<FetchResponse> {
        let timestamp = Utc::now();
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(
            "Received response: url={}, status={}, body_length={}",
            url,
            status,
            body.len()
        );

        Ok(FetchResponse {
            url,
            status,
            body,
            timestamp,
        })
    }

    fn box_clone(&self) -> Box<dyn Fetcher> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn setup() -> (HttpFetcher, MockServer) {
        let server = MockServer::start().await;
        let fetcher = HttpFetcher::new().unwrap();
        (fetcher, server)
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let (fetcher, mock_server) = setup().await;

        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<html><body>Hello</body></html>")
                    .insert_header("content-type", "text/html"),
            )
            .mount(&mock_server)
            .await;

        let url = Url::parse(&mock_server.uri())
            .unwrap()
            .join("/page")
            .unwrap();
        let response = fetcher.fetch(url.clone()).await.unwrap();

        assert_eq!(response.status, 200);
        assert!(response.is_success());
        assert_eq!(response.body, "<html><body>Hello</body></html>");
        assert_eq!(response.url, url);
    }

    #[tokio::test]
    async fn test_non_success_status_is_not_an_error() {
        let (fetcher, mock_server) = setup().await;

        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
            .mount(&mock_server)
            .await;

        let url = Url::parse(&mock_server.uri())
            .unwrap()
            .join("/missing")
            .unwrap();
        let response = fetcher.fetch(url).await.unwrap();

        assert_eq!(response.status, 404);
        assert!(!response.is_success());
        assert_eq!(response.body, "Not Found");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_a_transport_error() {
        let fetcher = HttpFetcher::new().unwrap();
        // Discard port on loopback, the connection is refused immediately.
        let url = Url::parse("http://127.0.0.1:9/").unwrap();

        let result = fetcher.fetch(url).await;
        assert!(result.is_err());
    }
}
