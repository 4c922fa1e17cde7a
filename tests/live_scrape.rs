//! End-to-end run against the live target.

use pairscrape::pipeline;
use pairscrape::sink::JsonlSink;
use pairscrape::{ChromeDriver, ScrapeConfig};
use tempfile::TempDir;

#[tokio::test]
#[ignore] // Requires browser installation and network access
async fn live_run_appends_exactly_one_envelope() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("dataset.jsonl");

    let config = ScrapeConfig::builder()
        .output_file(output.clone())
        .readiness_timeout_secs(45)
        .build()
        .unwrap();

    let driver = ChromeDriver::new();
    let sink = JsonlSink::new(output.clone());

    let summary = pipeline::run(&config, &driver, &sink).await;

    let contents = std::fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 1);

    let envelope: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    if summary.succeeded {
        assert_eq!(
            envelope["count"].as_u64().unwrap() as usize,
            envelope["pairs"].as_array().unwrap().len()
        );
        assert_eq!(envelope["source"], "dexscreener");
    } else {
        assert_eq!(envelope["status"], "failed");
        assert!(!envelope["error"].as_str().unwrap().is_empty());
    }
}
