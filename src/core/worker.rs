use std::pin::pin;
use std::sync::Arc;

use log::{debug, info, warn};

use crate::core::frontier::{Claim, Frontier, PopOutcome, WorkItem};
use crate::core::visited::VisitedSet;
use crate::extractor::LinkExtractor;
use crate::fetcher::Fetcher;
use crate::stats::StatsTracker;

/// One member of the crawl pool: pops an item, fetches it, extracts links,
/// publishes unseen children one level deeper, and repeats until the
/// frontier reports completion.
pub(crate) struct Worker {
    id: usize,
    fetcher: Box<dyn Fetcher>,
    extractor: Arc<dyn LinkExtractor>,
    frontier: Arc<Frontier>,
    visited: Arc<VisitedSet>,
    stats: StatsTracker,
    max_depth: usize,
}

impl Worker {
    pub(crate) fn new(
        id: usize,
        fetcher: Box<dyn Fetcher>,
        extractor: Arc<dyn LinkExtractor>,
        frontier: Arc<Frontier>,
        visited: Arc<VisitedSet>,
        stats: StatsTracker,
        max_depth: usize,
    ) -> Self {
        Self {
            id,
            fetcher,
            extractor,
            frontier,
            visited,
            stats,
            max_depth,
        }
    }

    pub(crate) async fn run(self) {
        debug!("worker {} started", self.id);
        loop {
            // Register the wakeup before inspecting the frontier, so a push
            // landing between the pop and the park cannot be missed.
            let mut parked = pin!(self.frontier.notified());
            parked.as_mut().enable();

            match self.frontier.try_pop() {
                PopOutcome::Item(claim) => self.process(&claim).await,
                PopOutcome::Idle => parked.await,
                PopOutcome::Complete => break,
            }
        }
        debug!("worker {} terminated", self.id);
    }

    /// Handles one claimed item. The claim is released by the caller when
    /// it drops, after every child has been published.
    async fn process(&self, claim: &Claim) {
        let item = claim.item();
        if item.depth > self.max_depth {
            debug!(
                "worker {}: skipping {} at depth {} (past depth limit)",
                self.id, item.url, item.depth
            );
            return;
        }

        info!(
            "worker {}: fetching {} (depth {})",
            self.id, item.url, item.depth
        );
        let response = match self.fetcher.fetch(item.url.clone()).await {
            Ok(response) => response,
            Err(e) => {
                warn!("worker {}: fetch failed for {}: {}", self.id, item.url, e);
                self.stats.record_transport_error();
                return;
            }
        };

        self.stats.record_fetch(response.status, response.body.len());
        if !response.is_success() {
            warn!(
                "worker {}: {} returned status {}, skipping extraction",
                self.id, item.url, response.status
            );
            return;
        }

        let links = self.extractor.extract_links(&item.url, &response.body);
        debug!(
            "worker {}: found {} candidate links on {}",
            self.id,
            links.len(),
            item.url
        );
        self.stats.record_links(links.len());

        for link in links {
            if self.visited.try_claim(&link) {
                self.stats.record_claimed();
                self.frontier.push(WorkItem::new(link, item.depth + 1));
            }
        }
    }
}
