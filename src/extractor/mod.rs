//! Extraction and normalization of the in-page data slot.
//!
//! The raw structure is untrusted external input: every field access is
//! guarded, shape drift degrades to fewer (or zero) records, never to a
//! failed run.

pub mod js_scripts;

use anyhow::{Context, Result};
use chromiumoxide::Page;
use serde_json::Value;

use crate::record::PairRecord;

/// Read the injected data slot out of the page's execution context.
///
/// One in-context evaluation returning a plain JSON value; a page that has
/// not populated the slot yields `Value::Null`.
pub async fn read_server_data(page: &Page) -> Result<Value> {
    let js_result = page
        .evaluate(js_scripts::SERVER_DATA_SCRIPT)
        .await
        .context("Failed to read server data slot from page")?;

    let value = js_result
        .into_value::<Value>()
        .unwrap_or(Value::Null);

    Ok(value)
}

/// Normalize the raw snapshot into pair records.
///
/// Walks `route → data → dexScreenerData → pairs`; any absent segment yields
/// an empty sequence. Entries missing a string `pairAddress` or `chainId`
/// are dropped, not defaulted. Pure: identical input always yields an
/// identical sequence in the same order.
#[must_use]
pub fn normalize_pairs(raw: &Value) -> Vec<PairRecord> {
    let Some(entries) = raw
        .pointer("/route/data/dexScreenerData/pairs")
        .and_then(Value::as_array)
    else {
        log::debug!("Server data missing route.data.dexScreenerData.pairs, yielding no records");
        return Vec::new();
    };

    let records: Vec<PairRecord> = entries
        .iter()
        .filter_map(|entry| {
            let address = entry.get("pairAddress")?.as_str()?;
            let chain_id = entry.get("chainId")?.as_str()?;
            Some(PairRecord {
                address: address.to_string(),
                chain_id: chain_id.to_string(),
            })
        })
        .collect();

    let dropped = entries.len().saturating_sub(records.len());
    if dropped > 0 {
        log::debug!("Dropped {dropped} malformed pair entries");
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn wrap(pairs: Value) -> Value {
        json!({ "route": { "data": { "dexScreenerData": { "pairs": pairs } } } })
    }

    #[test]
    fn entries_missing_either_field_are_dropped() {
        let raw = wrap(json!([
            { "pairAddress": "0xA", "chainId": "solana" },
            { "pairAddress": "0xB" },
            { "chainId": "ethereum" },
            { "pairAddress": 42, "chainId": "bsc" },
        ]));

        let records = normalize_pairs(&raw);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].address, "0xA");
        assert_eq!(records[0].chain_id, "solana");
    }

    #[test]
    fn missing_path_yields_empty_sequence() {
        assert!(normalize_pairs(&Value::Null).is_empty());
        assert!(normalize_pairs(&json!({})).is_empty());
        assert!(normalize_pairs(&json!({ "route": {} })).is_empty());
        assert!(normalize_pairs(&json!({ "route": { "data": {} } })).is_empty());
        assert!(normalize_pairs(&json!({ "route": { "data": { "dexScreenerData": {} } } })).is_empty());
    }

    #[test]
    fn pairs_not_an_array_yields_empty_sequence() {
        assert!(normalize_pairs(&wrap(json!("oops"))).is_empty());
        assert!(normalize_pairs(&wrap(json!({ "0": {} }))).is_empty());
    }

    #[test]
    fn normalization_is_idempotent_and_order_preserving() {
        let raw = wrap(json!([
            { "pairAddress": "0xB", "chainId": "ethereum", "extra": true },
            { "pairAddress": "0xA", "chainId": "solana" },
        ]));

        let first = normalize_pairs(&raw);
        let second = normalize_pairs(&raw);
        assert_eq!(first, second);
        assert_eq!(first[0].address, "0xB");
        assert_eq!(first[1].address, "0xA");
    }
}
