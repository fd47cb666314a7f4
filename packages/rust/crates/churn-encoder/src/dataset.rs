//! Pattern and customer fixture loading.
//!
//! Patterns are JSONL log entries normalized into [`Record`]s. Customers are
//! raw metric snapshots with no risk labels, compared against patterns by the
//! engine.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::attributes::{AttributeSet, RiskLevel};
use crate::error::{ChurnError, ChurnResult};
use crate::record::{LogEntry, Record, entry_to_record};

/// Parse JSONL pattern entries, skipping blank lines.
///
/// # Errors
///
/// Returns [`ChurnError::Io`] on read failure, or [`ChurnError::Jsonl`] with
/// the 1-indexed line number of the first malformed entry.
pub fn parse_patterns<R: BufRead>(reader: R) -> ChurnResult<Vec<Record>> {
    let mut records = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let entry: LogEntry = serde_json::from_str(trimmed).map_err(|source| ChurnError::Jsonl {
            line: index + 1,
            source,
        })?;
        records.push(entry_to_record(&entry));
    }
    Ok(records)
}

/// Load and normalize a pattern JSONL file.
///
/// # Errors
///
/// See [`parse_patterns`]; also fails if the file cannot be opened.
pub fn load_patterns(path: &Path) -> ChurnResult<Vec<Record>> {
    let file = File::open(path)?;
    let records = parse_patterns(BufReader::new(file))?;
    tracing::info!(
        path = %path.display(),
        count = records.len(),
        "loaded churn patterns"
    );
    Ok(records)
}

/// Raw customer metrics, as captured by a daily snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CustomerSnapshot {
    /// Customer identity
    pub customer_id: String,
    /// Login count
    #[schemars(with = "f64")]
    pub logins: Number,
    /// Support case count
    #[schemars(with = "f64")]
    pub support_cases: Number,
    /// Defect count
    #[schemars(with = "f64")]
    pub defects: Number,
    /// Feature adoption percentage
    #[schemars(with = "f64")]
    pub feature_adoption: Number,
    /// Label used by fixtures to check match outcomes; never encoded
    #[serde(
        rename = "_expected_risk",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub expected_risk: Option<RiskLevel>,
}

impl CustomerSnapshot {
    /// Attributes for a metrics-only comparison.
    ///
    /// Categorical and keyword roles are left empty so only the metrics
    /// layer and the identity key carry signal.
    #[must_use]
    pub fn to_attributes(&self) -> AttributeSet {
        AttributeSet {
            customer_id: self.customer_id.clone(),
            risk_level: String::new(),
            churn_driver: String::new(),
            usage_band: String::new(),
            keywords: String::new(),
            logins: Value::Number(self.logins.clone()),
            support_cases: Value::Number(self.support_cases.clone()),
            defects: Value::Number(self.defects.clone()),
            feature_adoption: Value::Number(self.feature_adoption.clone()),
        }
    }

    /// Same customer on another day, with different metrics.
    #[must_use]
    pub fn with_metrics(
        &self,
        logins: impl Into<Number>,
        support_cases: impl Into<Number>,
        defects: impl Into<Number>,
        feature_adoption: impl Into<Number>,
    ) -> Self {
        Self {
            customer_id: self.customer_id.clone(),
            logins: logins.into(),
            support_cases: support_cases.into(),
            defects: defects.into(),
            feature_adoption: feature_adoption.into(),
            expected_risk: self.expected_risk,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CustomerDocument {
    customers: Vec<CustomerSnapshot>,
}

/// Parse a `{"customers": [...]}` fixture document.
///
/// # Errors
///
/// Returns [`ChurnError::Json`] if the document is malformed.
pub fn parse_customers(raw: &str) -> ChurnResult<Vec<CustomerSnapshot>> {
    let document: CustomerDocument = serde_json::from_str(raw)?;
    Ok(document.customers)
}

/// Load a customer fixture file.
///
/// # Errors
///
/// Returns [`ChurnError::Io`] or [`ChurnError::Json`].
pub fn load_customers(path: &Path) -> ChurnResult<Vec<CustomerSnapshot>> {
    let raw = std::fs::read_to_string(path)?;
    let customers = parse_customers(&raw)?;
    tracing::info!(
        path = %path.display(),
        count = customers.len(),
        "loaded customer snapshots"
    );
    Ok(customers)
}

/// Customers whose fixture label equals `level`.
#[must_use]
pub fn filter_by_expected_risk(
    customers: &[CustomerSnapshot],
    level: RiskLevel,
) -> Vec<&CustomerSnapshot> {
    customers
        .iter()
        .filter(|c| c.expected_risk == Some(level))
        .collect()
}
