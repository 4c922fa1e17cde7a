//! Browser session lifecycle.
//!
//! One browser process and one page per run, exclusively owned by the
//! orchestrator. `ChromeSession::release` consumes the session, so teardown
//! happens at most once by construction; a `Drop` fallback covers sessions
//! abandoned on panic paths.

use anyhow::Result;
use chromiumoxide::browser::Browser;
use chromiumoxide::page::Page;
use std::path::PathBuf;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::browser_setup::launch_browser;
use crate::config::ScrapeConfig;
use crate::extractor;
use crate::navigation;
use crate::pipeline::{ScrapeError, SessionDriver};
use crate::record::PairRecord;
use crate::stealth::{self, StealthConfig};

/// Handle to one automation-controlled browser process plus its single page.
pub struct ChromeSession {
    browser: Option<Browser>,
    handler: Option<JoinHandle<()>>,
    page: Page,
    user_data_dir: Option<PathBuf>,
}

impl ChromeSession {
    /// The session's one page.
    #[must_use]
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Close the browser, wait for the process to exit, stop the handler
    /// task, and remove the profile directory.
    ///
    /// Every step is best-effort: a process that already exited or a
    /// directory that is already gone must not mask the envelope the run
    /// has reported.
    pub async fn release(mut self) {
        let browser = self.browser.take();
        let handler = self.handler.take();
        let user_data_dir = self.user_data_dir.take();
        teardown(browser, handler, user_data_dir).await;
        info!("Browser session released");
    }
}

impl Drop for ChromeSession {
    fn drop(&mut self) {
        // Browser::drop kills the Chrome process; the handler task must be
        // stopped here or it outlives the connection.
        if let Some(handler) = self.handler.take() {
            warn!("ChromeSession dropped without release, aborting handler task");
            handler.abort();
        }
    }
}

async fn teardown(
    browser: Option<Browser>,
    handler: Option<JoinHandle<()>>,
    user_data_dir: Option<PathBuf>,
) {
    if let Some(mut browser) = browser {
        debug!("Closing browser");
        if let Err(e) = browser.close().await {
            warn!("Failed to close browser: {e}");
        }

        // Wait for the process to exit so the profile dir is unlocked
        // before removal.
        if let Err(e) = browser.wait().await {
            warn!("Failed to wait for browser exit: {e}");
        }
    }

    if let Some(handler) = handler {
        handler.abort();
        if let Err(e) = handler.await
            && !e.is_cancelled()
        {
            warn!("Handler task failed during abort: {e}");
        }
    }

    if let Some(dir) = user_data_dir {
        debug!("Removing profile directory {}", dir.display());
        if let Err(e) = std::fs::remove_dir_all(&dir) {
            warn!(
                "Failed to remove profile directory {}: {}",
                dir.display(),
                e
            );
        }
    }
}

/// The one chosen session construction strategy: direct launch of a local
/// (or managed-download) Chrome.
#[derive(Debug, Default)]
pub struct ChromeDriver {
    stealth: StealthConfig,
}

impl ChromeDriver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    async fn acquire_inner(&self, config: &ScrapeConfig) -> Result<ChromeSession> {
        let launch = launch_browser(config);
        let (browser, handler, user_data_dir) =
            match tokio::time::timeout(config.launch_timeout(), launch).await {
                Ok(result) => result?,
                Err(_) => {
                    return Err(anyhow::anyhow!(
                        "Browser did not start within {} seconds",
                        config.launch_timeout().as_secs()
                    ));
                }
            };

        // The page must exist blank so the stealth patch is installed before
        // any navigation.
        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                teardown(Some(browser), Some(handler), Some(user_data_dir)).await;
                return Err(anyhow::anyhow!("Failed to create blank page: {e}"));
            }
        };

        if let Err(e) = stealth::inject(&page, &self.stealth).await {
            teardown(Some(browser), Some(handler), Some(user_data_dir)).await;
            return Err(e.context("Failed to apply stealth patch"));
        }

        debug!("Session acquired with stealth patch applied");
        Ok(ChromeSession {
            browser: Some(browser),
            handler: Some(handler),
            page,
            user_data_dir: Some(user_data_dir),
        })
    }
}

impl SessionDriver for ChromeDriver {
    type Session = ChromeSession;

    async fn acquire(&self, config: &ScrapeConfig) -> Result<ChromeSession, ScrapeError> {
        self.acquire_inner(config)
            .await
            .map_err(|e| ScrapeError::Launch(format!("{e:#}")))
    }

    async fn collect_pairs(
        &self,
        session: &mut ChromeSession,
        config: &ScrapeConfig,
    ) -> Result<Vec<PairRecord>, ScrapeError> {
        navigation::navigate(
            session.page(),
            config.target_url(),
            config.navigation_timeout(),
        )
        .await
        .map_err(|e| ScrapeError::Navigation(format!("{e:#}")))?;

        let ready = navigation::await_readiness(
            session.page(),
            config.readiness_timeout(),
            config.readiness_poll_interval(),
        )
        .await;
        if !ready {
            // Non-fatal by contract: extraction tolerates the missing slot
            // and the run reports whatever it finds, possibly nothing.
            info!("Proceeding to extraction without readiness signal");
        }

        let raw = extractor::read_server_data(session.page())
            .await
            .map_err(|e| ScrapeError::Extraction(format!("{e:#}")))?;

        Ok(extractor::normalize_pairs(&raw))
    }

    async fn release(&self, session: ChromeSession) {
        session.release().await;
    }
}
