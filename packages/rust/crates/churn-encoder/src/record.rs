//! Record normalizer: JSONL pattern entry to encodable record.
//!
//! Every field is optional and accepts any JSON type. Non-string categoricals
//! are stringified (`null` as `None`); metric values are carried verbatim,
//! and range clamping is the engine's job.

use std::sync::LazyLock;

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::attributes::{
    AttributeSet, ChurnDriver, DEFAULT_DEFECTS, DEFAULT_FEATURE_ADOPTION, DEFAULT_LOGINS,
    DEFAULT_SUPPORT_CASES, RiskLevel, UsageBand,
};
use crate::text::{compile_regex, value_to_text};

const SLUG_MAX_CHARS: usize = 40;

static SLUG_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| compile_regex(r"[^a-z0-9]+"));

/// Keyword field as it appears in the input: a list or a single value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Keywords {
    /// List of keywords, joined with single spaces
    List(Vec<Value>),
    /// Any other value, stringified (`null` becomes `None`)
    Scalar(Value),
}

impl Keywords {
    /// Flatten to the space-joined keyword text.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::List(items) => items
                .iter()
                .map(value_to_text)
                .collect::<Vec<_>>()
                .join(" "),
            Self::Scalar(value) => value_to_text(value),
        }
    }
}

// A present `null` is kept as `Some(Value::Null)`; only an absent key is `None`.
fn de_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

fn de_present_keywords<'de, D>(deserializer: D) -> Result<Option<Keywords>, D::Error>
where
    D: Deserializer<'de>,
{
    Keywords::deserialize(deserializer).map(Some)
}

/// One line of a pattern JSONL file.
///
/// Fields accept any JSON value. An absent key takes its default; a present
/// value, `null` included, is carried through.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LogEntry {
    /// Natural-language question the pattern answers
    #[serde(default, deserialize_with = "de_present")]
    pub question: Option<Value>,
    /// Customer identity
    #[serde(default, deserialize_with = "de_present")]
    pub customer_id: Option<Value>,
    /// Risk level name
    #[serde(default, deserialize_with = "de_present")]
    pub risk_level: Option<Value>,
    /// Churn driver name
    #[serde(default, deserialize_with = "de_present")]
    pub churn_driver: Option<Value>,
    /// Usage band name
    #[serde(default, deserialize_with = "de_present")]
    pub usage_band: Option<Value>,
    /// Keyword list or scalar
    #[serde(default, deserialize_with = "de_present_keywords")]
    pub keywords: Option<Keywords>,
    /// Login count
    #[serde(default, deserialize_with = "de_present")]
    pub logins: Option<Value>,
    /// Support case count
    #[serde(default, deserialize_with = "de_present")]
    pub support_cases: Option<Value>,
    /// Defect count
    #[serde(default, deserialize_with = "de_present")]
    pub defects: Option<Value>,
    /// Feature adoption percentage
    #[serde(default, deserialize_with = "de_present")]
    pub feature_adoption: Option<Value>,
    /// Answer shown after a match
    #[serde(default, deserialize_with = "de_present")]
    pub response: Option<Value>,
    /// Suggested next step
    #[serde(default, deserialize_with = "de_present")]
    pub recommended_action: Option<Value>,
}

/// Data carried alongside a record for lookup after a similarity match.
///
/// Never passed to the encoder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RecordMetadata {
    /// Answer text
    pub response: String,
    /// Risk level of the pattern
    pub risk_level: String,
    /// Churn driver of the pattern
    pub churn_driver: String,
    /// Suggested next step
    pub recommended_action: String,
    /// Lowercased source question
    pub original_question: String,
}

/// Encodable record plus its metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Record {
    /// Lowercased question, used as the concept name
    pub concept_text: String,
    /// Display slug for logs
    pub slug: String,
    /// Attributes handed to the encoder
    pub attributes: AttributeSet,
    /// Side data for post-match lookup
    pub metadata: RecordMetadata,
}

/// Collapse non-alphanumeric runs to `_`, trim, and cap at 40 characters.
///
/// Expects lowercased input; uppercase letters count as separators.
#[must_use]
pub fn slugify(text: &str) -> String {
    SLUG_SEPARATOR
        .replace_all(text, "_")
        .trim_matches('_')
        .chars()
        .take(SLUG_MAX_CHARS)
        .collect()
}

/// Normalize a pattern entry into an encodable record.
#[must_use]
pub fn entry_to_record(entry: &LogEntry) -> Record {
    let question = free_text(entry.question.as_ref()).to_lowercase();
    let risk = category_or(entry.risk_level.as_ref(), RiskLevel::default().as_str());
    let driver = category_or(entry.churn_driver.as_ref(), ChurnDriver::default().as_str());
    let usage_band = category_or(entry.usage_band.as_ref(), UsageBand::default().as_str());
    let keywords = entry
        .keywords
        .as_ref()
        .map(Keywords::to_text)
        .unwrap_or_default();

    let slug = slugify(&question);
    tracing::trace!(slug = %slug, risk = %risk, driver = %driver, "normalized entry");

    Record {
        concept_text: question.clone(),
        slug,
        attributes: AttributeSet {
            customer_id: category_or(entry.customer_id.as_ref(), ""),
            risk_level: risk.clone(),
            churn_driver: driver.clone(),
            usage_band,
            keywords,
            logins: metric_or(entry.logins.as_ref(), DEFAULT_LOGINS),
            support_cases: metric_or(entry.support_cases.as_ref(), DEFAULT_SUPPORT_CASES),
            defects: metric_or(entry.defects.as_ref(), DEFAULT_DEFECTS),
            feature_adoption: metric_or(entry.feature_adoption.as_ref(), DEFAULT_FEATURE_ADOPTION),
        },
        metadata: RecordMetadata {
            response: free_text(entry.response.as_ref()),
            risk_level: risk,
            churn_driver: driver,
            recommended_action: free_text(entry.recommended_action.as_ref()),
            original_question: question,
        },
    }
}

fn category_or(value: Option<&Value>, default: &str) -> String {
    value.map_or_else(|| default.to_string(), value_to_text)
}

// Absent or null prose is empty.
fn free_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(other) => value_to_text(other),
    }
}

fn metric_or(value: Option<&Value>, default: u64) -> Value {
    value.cloned().unwrap_or_else(|| Value::from(default))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_collapses_and_truncates() {
        assert_eq!(slugify("why is acme-corp at risk?"), "why_is_acme_corp_at_risk");
        assert_eq!(slugify("--hello--"), "hello");
        assert_eq!(slugify(""), "");
        let long = "a ".repeat(60);
        assert_eq!(slugify(&long).chars().count(), 40);
    }

    #[test]
    fn test_keywords_scalar_and_mixed_list() {
        let scalar: Keywords = serde_json::from_str("\"churn risk\"").unwrap();
        assert_eq!(scalar.to_text(), "churn risk");

        let number: Keywords = serde_json::from_str("7").unwrap();
        assert_eq!(number.to_text(), "7");

        let mixed: Keywords = serde_json::from_str(r#"["bugs", 3, null]"#).unwrap();
        assert_eq!(mixed.to_text(), "bugs 3 None");
    }

    #[test]
    fn test_present_null_differs_from_absent() {
        let entry: LogEntry =
            serde_json::from_str(r#"{"keywords": null, "logins": null}"#).unwrap();
        assert_eq!(entry.keywords, Some(Keywords::Scalar(Value::Null)));
        assert_eq!(entry.logins, Some(Value::Null));
        assert_eq!(entry.defects, None);

        let record = entry_to_record(&entry);
        assert_eq!(record.attributes.keywords, "None");
        assert!(record.attributes.logins.is_null());
        assert_eq!(record.attributes.defects, 1);
    }
}
