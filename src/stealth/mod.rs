//! Anti-fingerprinting behavioral patch.
//!
//! Injects evasion scripts via `Page.addScriptToEvaluateOnNewDocument` so
//! they run before any document in the session loads. Must be applied to the
//! blank page before navigation; applying after the target has loaded is too
//! late to beat the site's detection probes.

mod config;
mod scripts;

use anyhow::Result;
use chromiumoxide::{Page, cdp};
use tracing::{debug, warn};

pub use config::StealthConfig;

// Order matters: the config preamble goes first, then navigator-level
// evasions, then API-level overrides.
const EVASION_SCRIPTS: &[(&str, &str)] = &[
    ("navigator_webdriver", scripts::NAVIGATOR_WEBDRIVER_JS),
    ("navigator_language", scripts::NAVIGATOR_LANGUAGE_JS),
    ("navigator_plugins", scripts::NAVIGATOR_PLUGINS_JS),
    ("navigator_permissions", scripts::NAVIGATOR_PERMISSIONS_JS),
    ("hardware_concurrency", scripts::HARDWARE_CONCURRENCY_JS),
    ("chrome_runtime", scripts::CHROME_RUNTIME_JS),
    ("webgl_vendor", scripts::WEBGL_VENDOR_JS),
    ("canvas_noise", scripts::CANVAS_NOISE_JS),
];

/// Apply the full evasion suite to a page.
///
/// Individual script failures are tolerated; the injection only fails if no
/// script could be installed at all.
pub async fn inject(page: &Page, config: &StealthConfig) -> Result<()> {
    // Per-session seed keeps canvas noise stable within a run but distinct
    // across runs.
    let session_seed: Vec<u8> = (0..16).map(|_| rand::random::<u8>()).collect();
    let session_seed_hex = hex::encode(&session_seed);

    debug!("Injecting stealth scripts");

    let preamble = format!(
        r#"
        window.__fpConfig = {{
            acceptLanguage: "{}",
            platform: "{}",
            languages: {},
            screenWidth: {},
            screenHeight: {},
            webglVendor: "{}",
            webglRenderer: "{}",
            hardwareConcurrency: {},
            sessionSeed: "{}"
        }};
        "#,
        config.accept_language,
        config.platform,
        serde_json::to_string(&config.languages).unwrap_or_else(|_| "[]".to_string()),
        config.screen_width,
        config.screen_height,
        config.webgl_vendor,
        config.webgl_renderer,
        config.hardware_concurrency,
        session_seed_hex,
    );

    install_script(page, "fp_config", preamble).await?;

    let mut success_count = 0usize;
    let mut failed: Vec<&str> = Vec::new();

    for (name, source) in EVASION_SCRIPTS {
        match install_script(page, name, (*source).to_string()).await {
            Ok(()) => {
                debug!("Injected evasion script: {name}");
                success_count += 1;
            }
            Err(e) => {
                warn!("Failed to inject evasion script {name}: {e:#}");
                failed.push(name);
            }
        }
    }

    if success_count == 0 {
        return Err(anyhow::anyhow!(
            "Failed to inject any stealth scripts ({} failures)",
            failed.len()
        ));
    }

    // Strip the Headless marker from the UA the browser actually reports.
    let version = page
        .execute(cdp::browser_protocol::browser::GetVersionParams {})
        .await?;
    let modified_ua = version.user_agent.replace("Headless", "");

    page.execute(cdp::browser_protocol::network::SetUserAgentOverrideParams {
        user_agent: modified_ua,
        accept_language: Some(config.accept_language.clone()),
        platform: Some(config.platform.clone()),
        user_agent_metadata: None,
    })
    .await?;

    debug!(
        "Stealth injection complete: {success_count}/{} scripts active",
        EVASION_SCRIPTS.len()
    );
    Ok(())
}

async fn install_script(page: &Page, name: &str, source: String) -> Result<()> {
    page.execute(
        cdp::browser_protocol::page::AddScriptToEvaluateOnNewDocumentParams {
            source,
            include_command_line_api: None,
            world_name: None,
            run_immediately: None,
        },
    )
    .await
    .map_err(|e| anyhow::anyhow!("addScriptToEvaluateOnNewDocument failed for {name}: {e}"))?;
    Ok(())
}
