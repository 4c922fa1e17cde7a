//! Shared constants for the extraction pipeline.

/// Realistic desktop user agent presented to the target site.
///
/// Kept in sync with the Chrome major version the stealth layer reports.
pub const CHROME_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.6834.160 Safari/537.36";

/// Landing page the run navigates to when no override is configured.
pub const DEFAULT_TARGET_URL: &str = "https://dexscreener.com/";

/// Tag recorded in every success envelope.
pub const SOURCE_TAG: &str = "dexscreener";

/// Fixed viewport presented to the target site.
pub const VIEWPORT_WIDTH: u32 = 1280;
pub const VIEWPORT_HEIGHT: u32 = 800;

/// Default bound on browser process startup.
pub const DEFAULT_LAUNCH_TIMEOUT_SECS: u64 = 120;

/// Default bound on navigation to the target URL.
pub const DEFAULT_NAVIGATION_TIMEOUT_SECS: u64 = 60;

/// Default bound on the in-page readiness poll.
pub const DEFAULT_READINESS_TIMEOUT_SECS: u64 = 30;

/// Interval between readiness probes.
pub const DEFAULT_READINESS_POLL_MILLIS: u64 = 250;

/// Default sink location for result envelopes.
pub const DEFAULT_OUTPUT_FILE: &str = "./output/dataset.jsonl";
