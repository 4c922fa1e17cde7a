// pairscrape binary: one extraction run per invocation.
//
// Reads configuration from the environment, runs the pipeline once, and
// exits after exactly one result envelope has been appended and the browser
// session is gone.

use anyhow::Result;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use pairscrape::{ChromeDriver, JsonlSink, ScrapeConfig, pipeline};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Top-level supervisory boundary: panics from background tasks must be
    // logged, never silently terminate the process.
    std::panic::set_hook(Box::new(|info| {
        error!("Uncaught panic: {info}");
    }));

    let config = ScrapeConfig::from_env();
    info!(
        "Starting extraction run against {} (output: {})",
        config.target_url(),
        config.output_file().display()
    );

    let driver = ChromeDriver::new();
    let sink = JsonlSink::new(config.output_file().clone());

    let summary = pipeline::run(&config, &driver, &sink).await;

    if summary.succeeded {
        info!("Run completed: {} pair records reported", summary.pair_count);
    } else {
        error!("Run failed; failure envelope reported");
    }

    Ok(())
}
