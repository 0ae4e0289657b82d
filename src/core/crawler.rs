use std::sync::Arc;

use futures::future::join_all;
use log::{debug, info};
use tokio::spawn;

use crate::core::config::CrawlConfig;
use crate::core::errors::{CrawlError, CrawlResult};
use crate::core::frontier::{Frontier, WorkItem};
use crate::core::visited::VisitedSet;
use crate::core::worker::Worker;
use crate::extractor::LinkExtractor;
use crate::fetcher::Fetcher;
use crate::stats::{CrawlStats, StatsTracker};

/// Pool coordinator: owns the fetcher and extractor collaborators, spawns
/// a fixed pool of workers against one shared frontier/visited-set pair,
/// and returns once every worker has observed completion.
pub struct Crawler {
    fetcher: Box<dyn Fetcher>,
    extractor: Arc<dyn LinkExtractor>,
    stats: StatsTracker,
}

impl Crawler {
    pub fn new(fetcher: Box<dyn Fetcher>, extractor: Arc<dyn LinkExtractor>) -> Self {
        info!("Initializing crawler");
        Self {
            fetcher,
            extractor,
            stats: StatsTracker::new(),
        }
    }

    pub fn stats(&self) -> &StatsTracker {
        &self.stats
    }

    pub async fn run(&self, config: &CrawlConfig) -> CrawlResult<CrawlStats> {
        if config.seeds.is_empty() {
            return Err(CrawlError::NoSeeds);
        }
        if config.worker_count == 0 {
            return Err(CrawlError::NoWorkers);
        }

        let frontier = Arc::new(Frontier::new());
        let visited = Arc::new(VisitedSet::new());

        for seed in &config.seeds {
            if visited.try_claim(seed) {
                self.stats.record_claimed();
                frontier.push(WorkItem::new(seed.clone(), 0));
            } else {
                debug!("duplicate seed {} ignored", seed);
            }
        }

        info!(
            "Starting crawl: {} seeds, max depth {}, {} workers",
            config.seeds.len(),
            config.max_depth,
            config.worker_count
        );

        let mut handles = Vec::with_capacity(config.worker_count);
        for id in 0..config.worker_count {
            let worker = Worker::new(
                id,
                self.fetcher.box_clone(),
                Arc::clone(&self.extractor),
                Arc::clone(&frontier),
                Arc::clone(&visited),
                self.stats.clone(),
                config.max_depth,
            );
            handles.push(spawn(worker.run()));
        }

        for result in join_all(handles).await {
            result?;
        }

        debug_assert!(frontier.is_complete());
        self.stats.finish();
        info!(
            "Crawl complete: {} unique URLs claimed, {} still queued",
            visited.len(),
            frontier.queued()
        );

        Ok(self.stats.snapshot())
    }
}
