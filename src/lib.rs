pub mod core;
pub mod extractor;
pub mod fetcher;
pub mod stats;

pub use crate::core::{CrawlConfig, CrawlError, CrawlResult, Crawler};
pub use crate::extractor::{HtmlLinkExtractor, LinkExtractor};
pub use crate::fetcher::{FetchResponse, Fetcher, HttpFetcher};
pub use crate::stats::{CrawlStats, StatsTracker};
