mod http_fetcher;
mod mock_fetcher;

pub use http_fetcher::HttpFetcher;
pub use mock_fetcher::{MockFetcher, MockResponse};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use url::Url;

use crate::core::CrawlResult;

/// One fetched document. A non-2xx status is not an error at this layer;
/// the worker decides whether to extract links from it.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub url: Url,
    pub status: u16,
    pub body: String,
    pub timestamp: DateTime<Utc>,
}

impl FetchResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The HTTP transport collaborator. Implementations must not block
/// indefinitely (a request timeout is expected) and must follow redirects
/// or report them via the final status.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: Url) -> CrawlResult<FetchResponse>;
    fn box_clone(&self) -> Box<dyn Fetcher>;
}
