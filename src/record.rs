//! Output record types persisted to the result sink.
//!
//! One `ResultEnvelope` is produced per run: either a success carrying the
//! normalized pair records, or a failure carrying the triggering error message.
//! Envelopes are immutable once constructed.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::utils::constants::SOURCE_TAG;

/// Normalized trading-pair record extracted from the target page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairRecord {
    pub address: String,
    #[serde(rename = "chainId")]
    pub chain_id: String,
}

/// The single success-or-failure record persisted per run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResultEnvelope {
    Success {
        timestamp: String,
        source: &'static str,
        pairs: Vec<PairRecord>,
        count: usize,
    },
    Failure {
        status: &'static str,
        error: String,
        timestamp: String,
    },
}

impl ResultEnvelope {
    /// Build a success envelope. `count` always equals `pairs.len()`.
    #[must_use]
    pub fn success(pairs: Vec<PairRecord>) -> Self {
        let count = pairs.len();
        Self::Success {
            timestamp: now_rfc3339(),
            source: SOURCE_TAG,
            pairs,
            count,
        }
    }

    /// Build a failure envelope from the triggering error's message.
    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure {
            status: "failed",
            error: error.into(),
            timestamp: now_rfc3339(),
        }
    }

    /// Whether this envelope records a successful run.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Number of pair records carried, zero for failures.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        match self {
            Self::Success { count, .. } => *count,
            Self::Failure { .. } => 0,
        }
    }
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(address: &str, chain_id: &str) -> PairRecord {
        PairRecord {
            address: address.to_string(),
            chain_id: chain_id.to_string(),
        }
    }

    #[test]
    fn success_count_matches_pairs_len() {
        let envelope = ResultEnvelope::success(vec![pair("0xA", "solana"), pair("0xB", "ethereum")]);
        assert!(envelope.is_success());
        assert_eq!(envelope.pair_count(), 2);

        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["count"], 2);
        assert_eq!(value["pairs"].as_array().unwrap().len(), 2);
        assert_eq!(value["source"], "dexscreener");
        assert!(value["timestamp"].as_str().unwrap().ends_with('Z'));
    }

    #[test]
    fn empty_success_is_still_success() {
        let envelope = ResultEnvelope::success(Vec::new());
        assert!(envelope.is_success());
        assert_eq!(envelope.pair_count(), 0);

        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["count"], 0);
        assert!(value.get("status").is_none());
    }

    #[test]
    fn failure_wire_shape() {
        let envelope = ResultEnvelope::failure("navigation timeout after 60 seconds");
        assert!(!envelope.is_success());

        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["status"], "failed");
        assert_eq!(value["error"], "navigation timeout after 60 seconds");
        assert!(value.get("pairs").is_none());
        assert!(value.get("count").is_none());
    }

    #[test]
    fn pair_record_serializes_camel_case_chain_id() {
        let value = serde_json::to_value(pair("0xA", "solana")).unwrap();
        assert_eq!(value["address"], "0xA");
        assert_eq!(value["chainId"], "solana");
    }
}
