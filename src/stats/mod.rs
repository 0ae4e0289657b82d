use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;

/// Counters for one crawl run.
#[derive(Debug, Clone, Serialize)]
pub struct CrawlStats {
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    /// Fetch attempts that produced a 2xx response.
    pub pages_fetched: usize,
    /// Transport errors plus non-2xx responses.
    pub failed_fetches: usize,
    /// Candidate links seen by the extractor, duplicates included.
    pub links_discovered: usize,
    /// URLs that won their visited-set claim and were enqueued.
    pub urls_claimed: usize,
    pub bytes_downloaded: usize,
    pub status_codes: HashMap<u16, usize>,
}

#[derive(Debug, Clone)]
pub struct StatsTracker {
    stats: Arc<RwLock<CrawlStats>>,
}

impl StatsTracker {
    pub fn new() -> Self {
        Self {
            stats: Arc::new(RwLock::new(CrawlStats {
                start_time: Utc::now(),
                end_time: None,
                pages_fetched: 0,
                failed_fetches: 0,
                links_discovered: 0,
                urls_claimed: 0,
                bytes_downloaded: 0,
                status_codes: HashMap::new(),
            })),
        }
    }

    pub fn record_fetch(&self, status: u16, size: usize) {
        let mut stats = self.stats.write();
        if (200..300).contains(&status) {
            stats.pages_fetched += 1;
        } else {
            stats.failed_fetches += 1;
        }
        *stats.status_codes.entry(status).or_insert(0) += 1;
        stats.bytes_downloaded += size;
    }

    pub fn record_transport_error(&self) {
        self.stats.write().failed_fetches += 1;
    }

    pub fn record_links(&self, count: usize) {
        self.stats.write().links_discovered += count;
    }

    pub fn record_claimed(&self) {
        self.stats.write().urls_claimed += 1;
    }

    pub fn finish(&self) {
        self.stats.write().end_time = Some(Utc::now());
    }

    pub fn snapshot(&self) -> CrawlStats {
        self.stats.read().clone()
    }

    pub fn print_summary(&self) {
        let stats = self.stats.read();
        let duration = stats
            .end_time
            .unwrap_or_else(Utc::now)
            .signed_duration_since(stats.start_time);

        println!("\nCrawl Statistics:");
        println!("=================");
        println!("Duration: {} seconds", duration.num_seconds());
        println!("Pages Fetched: {}", stats.pages_fetched);
        println!("Failed Fetches: {}", stats.failed_fetches);
        println!("Links Discovered: {}", stats.links_discovered);
        println!("Unique URLs Claimed: {}", stats.urls_claimed);
        println!(
            "Data Downloaded: {:.2} MB",
            stats.bytes_downloaded as f64 / 1_000_000.0
        );

        println!("\nStatus Codes:");
        for (code, count) in &stats.status_codes {
            println!("  {}: {}", code, count);
        }
    }
}

impl Default for StatsTracker {
    fn default() -> Self {
        Self::new()
    }
}
