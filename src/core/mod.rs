mod config;
mod crawler;
mod errors;
mod frontier;
mod visited;
mod worker;


pub use config::CrawlConfig;
pub use crawler::Crawler;
pub use errors::{CrawlError, CrawlResult};
pub use frontier::{Claim, Frontier, PopOutcome, WorkItem};
pub use visited::VisitedSet;
