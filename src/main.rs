use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use url::Url;

use linkhopper::core::{CrawlConfig, CrawlResult, Crawler};
use linkhopper::extractor::HtmlLinkExtractor;
use linkhopper::fetcher::HttpFetcher;

/// Bounded-depth concurrent web crawler.
#[derive(Parser, Debug)]
#[command(name = "linkhopper", version, about)]
struct Cli {
    /// Seed URLs to start crawling from
    #[arg(required = true)]
    seeds: Vec<String>,

    /// Deepest link-depth to fetch, counted from the seeds
    #[arg(long, default_value_t = 2)]
    max_depth: usize,

    /// Number of concurrent workers
    #[arg(long, default_value_t = 4)]
    workers: usize,

    /// Write log records to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the run statistics as JSON instead of the plain summary
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> CrawlResult<()> {
    let cli = Cli::parse();

    let mut builder = env_logger::builder();
    builder
        .filter_level(log::LevelFilter::Info)
        .filter_module("selectors", log::LevelFilter::Warn)
        .filter_module("html5ever", log::LevelFilter::Error);
    if let Some(path) = &cli.log_file {
        let file = std::fs::File::create(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();

    let mut seeds = Vec::with_capacity(cli.seeds.len());
    for seed in &cli.seeds {
        seeds.push(Url::parse(seed)?);
    }

    let config = CrawlConfig::new(seeds)
        .with_depth(cli.max_depth)
        .with_workers(cli.workers);

    let crawler = Crawler::new(
        Box::new(HttpFetcher::new()?),
        Arc::new(HtmlLinkExtractor::new()),
    );
    let stats = crawler.run(&config).await?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        crawler.stats().print_summary();
    }

    Ok(())
}
