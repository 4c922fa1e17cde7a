//! Orchestrator invariants: exactly one envelope per run, release exactly
//! once per acquired session, failure envelopes carry the triggering error.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use pairscrape::config::ScrapeConfig;
use pairscrape::pipeline::{self, ScrapeError, SessionDriver};
use pairscrape::record::PairRecord;
use pairscrape::sink::ResultSink;

enum Behavior {
    AcquireFails(String),
    CollectFails(ScrapeError),
    Yields(Vec<PairRecord>),
}

struct FakeDriver {
    behavior: Behavior,
    acquires: AtomicUsize,
    releases: AtomicUsize,
}

impl FakeDriver {
    fn new(behavior: Behavior) -> Self {
        Self {
            behavior,
            acquires: AtomicUsize::new(0),
            releases: AtomicUsize::new(0),
        }
    }
}

impl SessionDriver for FakeDriver {
    type Session = ();

    async fn acquire(&self, _config: &ScrapeConfig) -> Result<(), ScrapeError> {
        self.acquires.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            Behavior::AcquireFails(msg) => Err(ScrapeError::Launch(msg.clone())),
            _ => Ok(()),
        }
    }

    async fn collect_pairs(
        &self,
        _session: &mut (),
        _config: &ScrapeConfig,
    ) -> Result<Vec<PairRecord>, ScrapeError> {
        match &self.behavior {
            Behavior::AcquireFails(_) => unreachable!("collect after failed acquire"),
            Behavior::CollectFails(e) => Err(e.clone()),
            Behavior::Yields(pairs) => Ok(pairs.clone()),
        }
    }

    async fn release(&self, _session: ()) {
        self.releases.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
struct RecordingSink {
    records: Mutex<Vec<serde_json::Value>>,
    fail_appends: bool,
}

impl ResultSink for RecordingSink {
    async fn append(&self, record: serde_json::Value) -> anyhow::Result<()> {
        if self.fail_appends {
            return Err(anyhow::anyhow!("sink unavailable"));
        }
        self.records.lock().unwrap().push(record);
        Ok(())
    }
}

fn config() -> ScrapeConfig {
    ScrapeConfig::default()
}

fn pair(address: &str, chain_id: &str) -> PairRecord {
    PairRecord {
        address: address.to_string(),
        chain_id: chain_id.to_string(),
    }
}

#[tokio::test]
async fn successful_run_appends_one_success_envelope_and_releases_once() {
    let driver = FakeDriver::new(Behavior::Yields(vec![
        pair("0xA", "solana"),
        pair("0xB", "ethereum"),
    ]));
    let sink = RecordingSink::default();

    let summary = pipeline::run(&config(), &driver, &sink).await;

    assert!(summary.succeeded);
    assert_eq!(summary.pair_count, 2);
    assert_eq!(driver.releases.load(Ordering::SeqCst), 1);

    let records = sink.records.lock().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["count"], 2);
    assert_eq!(records[0]["source"], "dexscreener");
    assert_eq!(records[0]["pairs"][0]["address"], "0xA");
    assert_eq!(records[0]["pairs"][0]["chainId"], "solana");
}

#[tokio::test]
async fn empty_extraction_still_reports_success_with_zero_count() {
    // A lost readiness race surfaces here as an empty pair list.
    let driver = FakeDriver::new(Behavior::Yields(Vec::new()));
    let sink = RecordingSink::default();

    let summary = pipeline::run(&config(), &driver, &sink).await;

    assert!(summary.succeeded);
    assert_eq!(summary.pair_count, 0);

    let records = sink.records.lock().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["count"], 0);
    assert!(records[0].get("status").is_none());
}

#[tokio::test]
async fn navigation_failure_appends_failure_envelope_and_still_releases() {
    let driver = FakeDriver::new(Behavior::CollectFails(ScrapeError::Navigation(
        "Navigation to https://dexscreener.com/ timed out after 60 seconds".to_string(),
    )));
    let sink = RecordingSink::default();

    let summary = pipeline::run(&config(), &driver, &sink).await;

    assert!(!summary.succeeded);
    assert_eq!(driver.releases.load(Ordering::SeqCst), 1);

    let records = sink.records.lock().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["status"], "failed");
    let error = records[0]["error"].as_str().unwrap();
    assert!(!error.is_empty());
    assert!(error.contains("timed out"));
}

#[tokio::test]
async fn acquire_failure_appends_failure_envelope_without_release() {
    let driver = FakeDriver::new(Behavior::AcquireFails(
        "Browser did not start within 120 seconds".to_string(),
    ));
    let sink = RecordingSink::default();

    let summary = pipeline::run(&config(), &driver, &sink).await;

    assert!(!summary.succeeded);
    assert_eq!(driver.acquires.load(Ordering::SeqCst), 1);
    // No session ever existed, so no release.
    assert_eq!(driver.releases.load(Ordering::SeqCst), 0);

    let records = sink.records.lock().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["status"], "failed");
    assert!(!records[0]["error"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn sink_failure_is_swallowed_and_session_still_released() {
    let driver = FakeDriver::new(Behavior::Yields(vec![pair("0xA", "solana")]));
    let sink = RecordingSink {
        fail_appends: true,
        ..Default::default()
    };

    let summary = pipeline::run(&config(), &driver, &sink).await;

    // The run outcome reflects extraction, not the sink write.
    assert!(summary.succeeded);
    assert_eq!(driver.releases.load(Ordering::SeqCst), 1);
    assert!(sink.records.lock().unwrap().is_empty());
}
