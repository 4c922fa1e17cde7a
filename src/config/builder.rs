//! Fluent builder for `ScrapeConfig`, including environment-variable loading.

use anyhow::{Result, anyhow};
use std::path::PathBuf;
use tracing::warn;
use url::Url;

use super::types::ScrapeConfig;

/// Builder for [`ScrapeConfig`].
///
/// All fields are optional; unset fields keep their defaults. `build()`
/// validates the target URL so a malformed override fails at configuration
/// time rather than mid-run.
#[derive(Debug, Default)]
pub struct ScrapeConfigBuilder {
    config: ScrapeConfig,
}

impl ScrapeConfigBuilder {
    #[must_use]
    pub fn target_url(mut self, url: impl Into<String>) -> Self {
        self.config.target_url = url.into();
        self
    }

    #[must_use]
    pub fn launch_timeout_secs(mut self, secs: u64) -> Self {
        self.config.launch_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn navigation_timeout_secs(mut self, secs: u64) -> Self {
        self.config.navigation_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn readiness_timeout_secs(mut self, secs: u64) -> Self {
        self.config.readiness_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn readiness_poll_millis(mut self, millis: u64) -> Self {
        self.config.readiness_poll_millis = millis;
        self
    }

    #[must_use]
    pub fn headless(mut self, headless: bool) -> Self {
        self.config.headless = headless;
        self
    }

    #[must_use]
    pub fn proxy_server(mut self, proxy: impl Into<String>) -> Self {
        self.config.proxy_server = Some(proxy.into());
        self
    }

    #[must_use]
    pub fn chrome_executable(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.chrome_executable = Some(path.into());
        self
    }

    #[must_use]
    pub fn output_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output_file = path.into();
        self
    }

    /// Validate and produce the final configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the target URL does not parse as an absolute URL.
    pub fn build(self) -> Result<ScrapeConfig> {
        Url::parse(&self.config.target_url)
            .map_err(|e| anyhow!("Invalid target URL '{}': {e}", self.config.target_url))?;
        Ok(self.config)
    }
}

impl ScrapeConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything absent or malformed.
    ///
    /// Recognized variables: `TARGET_URL`, `LAUNCH_TIMEOUT_SECS`,
    /// `NAVIGATION_TIMEOUT_SECS`, `READINESS_TIMEOUT_SECS`, `PROXY_SERVER`,
    /// `CHROME_EXECUTABLE`, `OUTPUT_FILE`, `HEADLESS`.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("TARGET_URL") {
            match Url::parse(&url) {
                Ok(_) => config.target_url = url,
                Err(e) => warn!("Ignoring malformed TARGET_URL '{url}': {e}"),
            }
        }

        config.launch_timeout_secs = env_u64("LAUNCH_TIMEOUT_SECS", config.launch_timeout_secs);
        config.navigation_timeout_secs =
            env_u64("NAVIGATION_TIMEOUT_SECS", config.navigation_timeout_secs);
        config.readiness_timeout_secs =
            env_u64("READINESS_TIMEOUT_SECS", config.readiness_timeout_secs);

        if let Ok(proxy) = std::env::var("PROXY_SERVER")
            && !proxy.is_empty()
        {
            config.proxy_server = Some(proxy);
        }

        if let Ok(path) = std::env::var("CHROME_EXECUTABLE")
            && !path.is_empty()
        {
            config.chrome_executable = Some(PathBuf::from(path));
        }

        if let Ok(path) = std::env::var("OUTPUT_FILE")
            && !path.is_empty()
        {
            config.output_file = PathBuf::from(path);
        }

        if let Ok(raw) = std::env::var("HEADLESS") {
            match raw.parse::<bool>() {
                Ok(headless) => config.headless = headless,
                Err(_) => warn!("Ignoring malformed HEADLESS '{raw}' (expected true/false)"),
            }
        }

        config
    }
}

fn env_u64(name: &str, default: u64) -> u64 {
    match std::env::var(name) {
        Ok(raw) => match raw.parse::<u64>() {
            Ok(value) if value > 0 => value,
            _ => {
                warn!("Ignoring malformed {name} '{raw}' (expected positive integer)");
                default
            }
        },
        Err(_) => default,
    }
}
