use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use hestia_client::{CssExtractor, ReqwestFetcher};
use hestia_core::config::CrawlConfig;
use hestia_core::crawl::CrawlService;
use hestia_core::report;

#[derive(Parser)]
#[command(name = "hestia", version, about = "Real-estate listing crawler")]
struct Cli {
    /// Site origin; detail links are resolved against it
    #[arg(long, env = "HESTIA_BASE_URL", default_value = "https://www.willhaben.at")]
    base_url: String,

    /// Opaque search/session identifier (sfId query parameter)
    #[arg(
        long,
        env = "HESTIA_SEARCH_ID",
        default_value = "b31ce01d-432e-46ea-9b79-45f94596adc1"
    )]
    search_id: String,

    /// Page index of the search page to crawl
    #[arg(long, default_value_t = 1)]
    page: u32,

    /// Number of result rows requested
    #[arg(long, default_value_t = 30)]
    rows: u32,

    /// Hostname fetches are restricted to (repeatable); pass none via
    /// an empty value to disable the restriction
    #[arg(long = "allow-domain", default_values_t = [
        String::from("willhaben.at"),
        String::from("www.willhaben.at"),
    ])]
    allow_domains: Vec<String>,

    /// Per-fetch timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Overall run deadline in seconds; detail pages left when it
    /// expires are skipped
    #[arg(long)]
    deadline_secs: Option<u64>,

    /// Emit the listings as JSON instead of the text report
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Setup tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("hestia=info".parse()?))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = CrawlConfig {
        base_url: cli.base_url,
        search_id: cli.search_id,
        page: cli.page,
        rows: cli.rows,
        allowed_domains: cli.allow_domains.into_iter().filter(|d| !d.is_empty()).collect(),
        fetch_timeout: Duration::from_secs(cli.timeout_secs),
        run_deadline: cli.deadline_secs.map(Duration::from_secs),
        ..CrawlConfig::default()
    };

    tracing::info!("Starting crawl");

    let fetcher =
        ReqwestFetcher::with_timeout(config.allowed_domains.clone(), config.fetch_timeout)
            .context("Failed to create HTTP client")?;
    let extractor = CssExtractor::new(&config).map_err(|e| anyhow::anyhow!(e))?;

    let store = CrawlService::new(fetcher, extractor, config)
        .run()
        .await
        .map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!("Crawl complete: {} listings", store.len());

    if cli.json {
        println!("{}", report::to_json(&store).map_err(|e| anyhow::anyhow!(e))?);
    } else {
        let stdout = std::io::stdout();
        report::write_text(&store, &mut stdout.lock()).context("Failed to write report")?;
    }

    Ok(())
}
