//! Core configuration type for a single extraction run.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::utils::constants::{
    DEFAULT_LAUNCH_TIMEOUT_SECS, DEFAULT_NAVIGATION_TIMEOUT_SECS, DEFAULT_OUTPUT_FILE,
    DEFAULT_READINESS_POLL_MILLIS, DEFAULT_READINESS_TIMEOUT_SECS, DEFAULT_TARGET_URL,
};

/// Configuration for one extraction run.
///
/// Every timeout is an explicit, tunable bound; nothing in the pipeline is
/// allowed to block indefinitely. Absent or malformed external inputs fall
/// back to these defaults rather than failing the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    pub(crate) target_url: String,
    pub(crate) launch_timeout_secs: u64,
    pub(crate) navigation_timeout_secs: u64,
    pub(crate) readiness_timeout_secs: u64,
    pub(crate) readiness_poll_millis: u64,
    pub(crate) headless: bool,
    pub(crate) proxy_server: Option<String>,
    pub(crate) chrome_executable: Option<PathBuf>,
    pub(crate) output_file: PathBuf,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            target_url: DEFAULT_TARGET_URL.to_string(),
            launch_timeout_secs: DEFAULT_LAUNCH_TIMEOUT_SECS,
            navigation_timeout_secs: DEFAULT_NAVIGATION_TIMEOUT_SECS,
            readiness_timeout_secs: DEFAULT_READINESS_TIMEOUT_SECS,
            readiness_poll_millis: DEFAULT_READINESS_POLL_MILLIS,
            headless: true,
            proxy_server: None,
            chrome_executable: None,
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
        }
    }
}

impl ScrapeConfig {
    /// Start building a configuration.
    #[must_use]
    pub fn builder() -> super::ScrapeConfigBuilder {
        super::ScrapeConfigBuilder::default()
    }

    #[must_use]
    pub fn target_url(&self) -> &str {
        &self.target_url
    }

    #[must_use]
    pub fn launch_timeout(&self) -> Duration {
        Duration::from_secs(self.launch_timeout_secs)
    }

    #[must_use]
    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_secs(self.navigation_timeout_secs)
    }

    #[must_use]
    pub fn readiness_timeout(&self) -> Duration {
        Duration::from_secs(self.readiness_timeout_secs)
    }

    #[must_use]
    pub fn readiness_poll_interval(&self) -> Duration {
        Duration::from_millis(self.readiness_poll_millis)
    }

    #[must_use]
    pub fn headless(&self) -> bool {
        self.headless
    }

    #[must_use]
    pub fn proxy_server(&self) -> Option<&str> {
        self.proxy_server.as_deref()
    }

    #[must_use]
    pub fn chrome_executable(&self) -> Option<&PathBuf> {
        self.chrome_executable.as_ref()
    }

    #[must_use]
    pub fn output_file(&self) -> &PathBuf {
        &self.output_file
    }
}
