use url::Url;

/// Parameters for a single crawl run. Immutable once the run starts.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub seeds: Vec<Url>,
    /// Deepest link-depth that is still fetched, counted from the seeds.
    pub max_depth: usize,
    pub worker_count: usize,
}

impl CrawlConfig {
    pub fn new(seeds: Vec<Url>) -> Self {
        Self {
            seeds,
            max_depth: 2,
            worker_count: 4,
        }
    }

    pub fn with_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_workers(mut self, worker_count: usize) -> Self {
        self.worker_count = worker_count;
        self
    }
}
