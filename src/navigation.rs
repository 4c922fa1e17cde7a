//! Navigation and the bounded readiness wait.
//!
//! Navigation failure is fatal for the run. The readiness poll is not: the
//! target renders progressively, and a run that loses the data race still
//! reports honestly with zero records instead of failing outright.

use anyhow::{Context, Result};
use chromiumoxide::Page;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::extractor::js_scripts::{PAGE_SETTLED_SCRIPT, READINESS_SCRIPT};

/// Upper bound on the post-navigation settle poll. Expiry here is logged and
/// tolerated; the readiness poll is the real gate for the data of interest.
const SETTLE_WAIT_MAX: Duration = Duration::from_secs(10);

const SETTLE_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Drive the page to `url` and wait for the load to complete.
///
/// The whole operation runs under `nav_timeout`; exceeding it is a fatal
/// error for the run.
pub async fn navigate(page: &Page, url: &str, nav_timeout: Duration) -> Result<()> {
    debug!("Navigating to {url}");

    let navigation = async {
        page.goto(url)
            .await
            .with_context(|| format!("Failed to navigate to {url}"))?;
        page.wait_for_navigation()
            .await
            .with_context(|| format!("Navigation to {url} did not complete"))?;
        Ok::<(), anyhow::Error>(())
    };

    match tokio::time::timeout(nav_timeout, navigation).await {
        Ok(result) => result?,
        Err(_) => {
            return Err(anyhow::anyhow!(
                "Navigation to {url} timed out after {} seconds",
                nav_timeout.as_secs()
            ));
        }
    }

    wait_for_settle(page).await;
    Ok(())
}

/// Poll until the document has settled or `SETTLE_WAIT_MAX` elapses.
///
/// `wait_for_navigation` only covers the load event; JS-heavy pages keep
/// rendering after it. Expiry proceeds rather than failing.
async fn wait_for_settle(page: &Page) {
    let start = Instant::now();

    loop {
        if start.elapsed() >= SETTLE_WAIT_MAX {
            warn!(
                "Page did not settle within {}s, proceeding anyway",
                SETTLE_WAIT_MAX.as_secs()
            );
            return;
        }

        match page.evaluate(PAGE_SETTLED_SCRIPT).await {
            Ok(result) => {
                if let Ok(value) = result.into_value::<serde_json::Value>() {
                    let ready_state = value.get("readyState").and_then(|v| v.as_str());
                    let body_exists = value
                        .get("bodyExists")
                        .and_then(|v| v.as_bool())
                        .unwrap_or(false);

                    if ready_state == Some("complete") && body_exists {
                        debug!("Page settled after {:.2}s", start.elapsed().as_secs_f64());
                        return;
                    }
                }
            }
            Err(e) => {
                debug!("Failed to check readyState: {e}, retrying");
            }
        }

        tokio::time::sleep(SETTLE_POLL_INTERVAL).await;
    }
}

/// Spin-poll the page's execution context until the app's injected data slot
/// is defined and non-null, or the deadline elapses.
///
/// Returns `true` if the readiness signal appeared. Timeout is non-fatal by
/// contract: the caller proceeds to extraction with an explicit "not ready"
/// signal, and the extractor tolerates the missing data.
pub async fn await_readiness(page: &Page, ready_timeout: Duration, poll_interval: Duration) -> bool {
    let start = Instant::now();
    debug!(
        "Waiting up to {}s for readiness signal",
        ready_timeout.as_secs()
    );

    loop {
        match page.evaluate(READINESS_SCRIPT).await {
            Ok(result) => {
                let ready = result
                    .into_value::<bool>()
                    .unwrap_or(false);
                if ready {
                    debug!(
                        "Readiness signal appeared after {:.2}s",
                        start.elapsed().as_secs_f64()
                    );
                    return true;
                }
            }
            Err(e) => {
                debug!("Readiness probe failed: {e}, retrying");
            }
        }

        if start.elapsed() >= ready_timeout {
            warn!(
                "Readiness signal never appeared within {}s, proceeding without it",
                ready_timeout.as_secs()
            );
            return false;
        }

        tokio::time::sleep(poll_interval).await;
    }
}
