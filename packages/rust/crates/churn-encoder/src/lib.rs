//! churn-encoder - HDC encoder schema and keyword classifiers for customer churn.
//!
//! Features:
//! - Declarative encoder schema (layers, segments, roles) for the external HDC engine
//! - Query classifier: free-text question to risk level, churn driver, usage band
//! - Record normalizer: JSONL pattern entry to attributes plus lookup metadata
//! - Fixture loaders for patterns and raw customer snapshots
//!
//! Vector encoding and similarity scoring belong to the engine; this crate
//! only produces attribute maps whose keys match the declared role names.
//!
//! # Architecture (ODF-REP Compliant)
//!
//! ```text
//! churn-encoder/src/
//! ├── lib.rs        # Re-exports (this file)
//! ├── error.rs      # ChurnError
//! ├── attributes.rs # RiskLevel, ChurnDriver, UsageBand, AttributeSet
//! ├── schema.rs     # EncoderConfig, Layer, Segment, Role, NumericConfig
//! ├── config.rs     # The churn model's EncoderConfig
//! ├── tables.rs     # Keyword classification tables
//! ├── query.rs      # encode_query
//! ├── record.rs     # entry_to_record
//! ├── dataset.rs    # Pattern/customer loaders
//! ├── settings.rs   # YAML runtime settings
//! └── text.rs       # Regex and tokenizing helpers
//! ```
//!
//! # Example
//!
//! ```rust
//! use churn_encoder::encode_query;
//!
//! let query = encode_query("customer is completely inactive with zero logins");
//! assert_eq!(query.attributes.risk_level, "high");
//! assert_eq!(query.attributes.usage_band, "inactive");
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

mod attributes;
mod config;
mod dataset;
mod error;
mod query;
mod record;
mod schema;
mod settings;
mod tables;
mod text;

// ============================================================================
// Public Re-exports
// ============================================================================

pub use attributes::{
    ATTRIBUTE_KEYS, AttributeSet, ChurnDriver, DEFAULT_DEFECTS, DEFAULT_FEATURE_ADOPTION,
    DEFAULT_LOGINS, DEFAULT_SUPPORT_CASES, RiskLevel, UsageBand,
};
pub use config::{DEFAULT_DIMENSION, DEFAULT_SEED, churn_encoder_config, encoder_config_with};
pub use dataset::{
    CustomerSnapshot, filter_by_expected_risk, load_customers, load_patterns, parse_customers,
    parse_patterns,
};
pub use error::{ChurnError, ChurnResult};
pub use query::{
    QueryResult, encode_query, extract_keywords, infer_driver, infer_risk, infer_usage_band,
    query_name, tokenize,
};
pub use record::{Keywords, LogEntry, Record, RecordMetadata, entry_to_record, slugify};
pub use schema::{EncoderConfig, EncodingStrategy, Layer, NumericConfig, Role, Segment, TemporalConfig};
pub use settings::{
    DataSettings, EncoderSettings, RuntimeSettings, load_runtime_settings,
    load_runtime_settings_from_paths, set_config_home_override,
};
pub use tables::{CHURN_DRIVERS, RISK_TRIGGERS, STOP_WORDS, USAGE_BANDS};
