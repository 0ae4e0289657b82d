use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::{Mutex, RwLock};
use tokio::time::sleep;
use url::Url;

use super::{FetchResponse, Fetcher};
use crate::core::{CrawlError, CrawlResult};

#[derive(Clone)]
pub struct MockResponse {
    pub status: u16,
    pub body: String,
    pub delay: Option<Duration>,
}

enum Scripted {
    Respond(MockResponse),
    Fail,
}

/// Scripted stand-in for the HTTP transport: maps exact URLs to canned
/// responses or transport failures, and records every fetch attempt.
/// Unknown URLs get a bodyless 404.
#[derive(Clone)]
pub struct MockFetcher {
    script: Arc<RwLock<HashMap<String, Scripted>>>,
    fetched: Arc<Mutex<Vec<String>>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self {
            script: Arc::new(RwLock::new(HashMap::new())),
            fetched: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Scripts a 200 response with the given body.
    pub fn with_page(self, url: &str, body: &str) -> Self {
        self.with_response(
            url,
            MockResponse {
                status: 200,
                body: body.to_string(),
                delay: None,
            },
        )
    }

    pub fn with_response(self, url: &str, response: MockResponse) -> Self {
        self.script
            .write()
            .insert(url.to_string(), Scripted::Respond(response));
        self
    }

    /// Scripts a transport error for the given URL.
    pub fn with_failure(self, url: &str) -> Self {
        self.script.write().insert(url.to_string(), Scripted::Fail);
        self
    }

    /// Every URL passed to `fetch`, in call order, failures included.
    pub fn fetched_urls(&self) -> Vec<String> {
        self.fetched.lock().clone()
    }
}

impl Default for MockFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, url: Url) -> CrawlResult<FetchResponse> {
        self.fetched.lock().push(url.to_string());

        let scripted = {
            let script = self.script.read();
            match script.get(url.as_str()) {
                Some(Scripted::Fail) => None,
                Some(Scripted::Respond(response)) => Some(response.clone()),
                None => Some(MockResponse {
                    status: 404,
                    body: String::new(),
                    delay: None,
                }),
            }
        };

        let Some(response) = scripted else {
            return Err(CrawlError::TransportError(format!(
                "scripted failure for {url}"
            )));
        };

        if let Some(delay) = response.delay {
            sleep(delay).await;
        }

        Ok(FetchResponse {
            url,
            status: response.status,
            body: response.body,
            timestamp: Utc::now(),
        })
    }

    fn box_clone(&self) -> Box<dyn Fetcher> {
        Box::new(self.clone())
    }
}
