//! Query classifier: free-text question to churn attributes.
//!
//! Pure and deterministic. Categories come from first-match lookups over the
//! normalized tokens; the concept name comes from an MD5 content hash of the
//! raw text, so identical questions always share a name.

use std::sync::LazyLock;

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::attributes::{AttributeSet, ChurnDriver, RiskLevel, UsageBand};
use crate::tables::{CHURN_DRIVERS, RISK_TRIGGERS, STOP_WORDS, USAGE_BANDS};
use crate::text::{compile_regex, split_tokens};

// Information separators U+001C..=U+001F are whitespace for tokenizing.
static PUNCTUATION: LazyLock<Regex> = LazyLock::new(|| compile_regex(r"[^\w\s\x1C-\x1F]"));
static NON_ALPHA: LazyLock<Regex> = LazyLock::new(|| compile_regex(r"[^a-z]"));

/// Classified query, ready for similarity search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct QueryResult {
    /// Stable concept name, `query_{digits}`
    pub name: String,
    /// Inferred attributes with neutral metric defaults
    pub attributes: AttributeSet,
}

/// Lowercase, drop punctuation, split on whitespace.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let stripped = PUNCTUATION.replace_all(&lowered, "");
    split_tokens(&stripped).map(str::to_string).collect()
}

/// First risk level whose triggers occur in the joined tokens.
#[must_use]
pub fn infer_risk(tokens: &[String]) -> RiskLevel {
    let text = tokens.join(" ");
    RISK_TRIGGERS
        .iter()
        .find(|(_, triggers)| triggers.iter().any(|t| text.contains(t)))
        .map_or(RiskLevel::Medium, |(level, _)| *level)
}

/// Driver of the first token found in the driver table.
#[must_use]
pub fn infer_driver(tokens: &[String]) -> ChurnDriver {
    first_match(tokens, |word| CHURN_DRIVERS.get(word).copied()).unwrap_or(ChurnDriver::LowUsage)
}

/// Usage band of the first token found in the usage table.
#[must_use]
pub fn infer_usage_band(tokens: &[String]) -> UsageBand {
    first_match(tokens, |word| USAGE_BANDS.get(word).copied()).unwrap_or(UsageBand::Stable)
}

/// Tokens outside the stop-word set, in input order.
#[must_use]
pub fn extract_keywords(tokens: &[String]) -> String {
    tokens
        .iter()
        .filter(|w| !STOP_WORDS.contains(w.as_str()))
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Stable concept name derived from the raw query text.
///
/// The first 32 bits of the MD5 digest, printed in decimal and zero-padded
/// to at least 8 digits.
#[must_use]
pub fn query_name(raw: &str) -> String {
    let digest = md5::compute(raw.as_bytes());
    let id = u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]);
    format!("query_{id:08}")
}

/// Classify a free-text question into encoder attributes.
///
/// Total over all input: unrecognized text falls back to the default
/// categories and an empty string yields empty keywords.
#[must_use]
pub fn encode_query(query: &str) -> QueryResult {
    let tokens = tokenize(query);

    let risk = infer_risk(&tokens);
    let driver = infer_driver(&tokens);
    let usage_band = infer_usage_band(&tokens);
    let keywords = extract_keywords(&tokens);
    let name = query_name(query);

    tracing::debug!(
        name = %name,
        risk = %risk,
        driver = %driver,
        usage_band = %usage_band,
        tokens = tokens.len(),
        "classified query"
    );

    QueryResult {
        name,
        attributes: AttributeSet {
            customer_id: String::new(),
            risk_level: risk.to_string(),
            churn_driver: driver.to_string(),
            usage_band: usage_band.to_string(),
            keywords,
            ..AttributeSet::default()
        },
    }
}

fn first_match<T>(tokens: &[String], lookup: impl Fn(&str) -> Option<T>) -> Option<T> {
    tokens.iter().find_map(|token| {
        let clean = NON_ALPHA.replace_all(token, "");
        lookup(&clean)
    })
}
