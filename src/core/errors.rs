use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("no seed URLs supplied")]
    NoSeeds,

    #[error("worker count must be at least 1")]
    NoWorkers,

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("transport error: {0}")]
    TransportError(String),

    #[error("URL parsing error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("worker task failed: {0}")]
    JoinError(#[from] tokio::task::JoinError),
}

pub type CrawlResult<T> = Result<T, CrawlError>;
