//! Pipeline orchestration.
//!
//! The orchestrator is the only component that talks to the result sink and
//! the session driver. Per run it appends exactly one envelope (success or
//! failure) and releases the session exactly once; release is skipped only
//! when acquisition itself failed and no session exists.

use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::ScrapeConfig;
use crate::record::{PairRecord, ResultEnvelope};
use crate::sink::ResultSink;

/// Error taxonomy for the fatal stages of a run.
///
/// Readiness timeouts and shape drift are handled below this boundary and
/// never surface here.
#[derive(Debug, Clone, Error)]
pub enum ScrapeError {
    /// Browser process would not start within the launch timeout.
    #[error("Browser launch failed: {0}")]
    Launch(String),
    /// Target unreachable or navigation did not complete within the timeout.
    #[error("Navigation failed: {0}")]
    Navigation(String),
    /// Unexpected failure reading the data slot out of the page.
    #[error("Extraction failed: {0}")]
    Extraction(String),
}

/// Session construction strategy.
///
/// The session is exclusively owned for the duration of the run: `acquire`
/// produces it, `release` consumes it, so double-release is unrepresentable.
pub trait SessionDriver {
    type Session: Send;

    /// Launch the browser and prepare the single page, stealth applied,
    /// within the configured launch timeout.
    fn acquire(
        &self,
        config: &ScrapeConfig,
    ) -> impl Future<Output = Result<Self::Session, ScrapeError>> + Send;

    /// Navigate, wait for readiness (best effort), and extract pair records.
    fn collect_pairs(
        &self,
        session: &mut Self::Session,
        config: &ScrapeConfig,
    ) -> impl Future<Output = Result<Vec<PairRecord>, ScrapeError>> + Send;

    /// Tear the session down. Best-effort, never raises.
    fn release(&self, session: Self::Session) -> impl Future<Output = ()> + Send;
}

/// Outcome of a completed run, for the caller's final log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub succeeded: bool,
    pub pair_count: usize,
}

/// Execute one extraction run end to end.
///
/// Failure at any stage short-circuits to a failure envelope; the envelope
/// append and the session release happen on every path. Sink failures are
/// logged, not escalated into a second report.
pub async fn run<D, S>(config: &ScrapeConfig, driver: &D, sink: &S) -> RunSummary
where
    D: SessionDriver,
    S: ResultSink,
{
    let (envelope, session) = match driver.acquire(config).await {
        Ok(mut session) => {
            let envelope = match driver.collect_pairs(&mut session, config).await {
                Ok(pairs) => {
                    info!("Extracted {} pair records", pairs.len());
                    ResultEnvelope::success(pairs)
                }
                Err(e) => {
                    error!("Run failed: {e}");
                    ResultEnvelope::failure(e.to_string())
                }
            };
            (envelope, Some(session))
        }
        Err(e) => {
            error!("Run failed before a session existed: {e}");
            (ResultEnvelope::failure(e.to_string()), None)
        }
    };

    let summary = RunSummary {
        succeeded: envelope.is_success(),
        pair_count: envelope.pair_count(),
    };

    match serde_json::to_value(&envelope) {
        Ok(record) => {
            if let Err(e) = sink.append(record).await {
                warn!("Failed to append result envelope: {e:#}");
            }
        }
        Err(e) => {
            warn!("Failed to serialize result envelope: {e}");
        }
    }

    if let Some(session) = session {
        driver.release(session).await;
    }

    summary
}
