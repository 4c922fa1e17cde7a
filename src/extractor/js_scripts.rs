//! JavaScript evaluated inside the page's execution context.

/// Predicate for the readiness poll: the app has populated its injected
/// data slot once `window.__SERVER_DATA` is both defined and non-null.
pub const READINESS_SCRIPT: &str = r"
    (() => typeof window.__SERVER_DATA !== 'undefined' && window.__SERVER_DATA !== null)()
";

/// Single in-context read of the injected data slot.
///
/// Returns a plain JSON-compatible snapshot; no live object references
/// escape the page boundary.
pub const SERVER_DATA_SCRIPT: &str = r"
    (() => {
        try {
            return window.__SERVER_DATA || null;
        } catch (e) {
            return null;
        }
    })()
";

/// Load-settle probe used after navigation completes.
pub const PAGE_SETTLED_SCRIPT: &str = r"
    (() => ({
        readyState: document.readyState,
        bodyExists: document.body !== null
    }))()
";
