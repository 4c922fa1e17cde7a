pub mod browser_setup;
pub mod config;
pub mod extractor;
pub mod navigation;
pub mod pipeline;
pub mod record;
pub mod session;
pub mod sink;
pub mod stealth;
pub mod utils;

pub use browser_setup::{download_managed_browser, find_browser_executable, launch_browser};
pub use config::{ScrapeConfig, ScrapeConfigBuilder};
pub use extractor::normalize_pairs;
pub use pipeline::{RunSummary, ScrapeError, SessionDriver, run};
pub use record::{PairRecord, ResultEnvelope};
pub use session::{ChromeDriver, ChromeSession};
pub use sink::{JsonlSink, ResultSink};
pub use stealth::StealthConfig;

/// Run one extraction against the default Chrome driver and a JSONL sink at
/// the configured output path.
pub async fn scrape(config: ScrapeConfig) -> RunSummary {
    let driver = ChromeDriver::new();
    let sink = JsonlSink::new(config.output_file().clone());
    pipeline::run(&config, &driver, &sink).await
}
