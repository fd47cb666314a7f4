//! The churn model's encoder configuration.
//!
//! Built once on first use and shared by reference. Two layers: `semantic`
//! carries the categorical and keyword roles, `metrics` carries the four
//! thermometer-binned usage counters.

use std::sync::LazyLock;

use crate::schema::{EncoderConfig, Layer, NumericConfig, Role, Segment, TemporalConfig};
use crate::settings::EncoderSettings;

/// Vector dimension used by the churn model.
pub const DEFAULT_DIMENSION: usize = 10_000;
/// Basis seed used by the churn model.
pub const DEFAULT_SEED: u64 = 42;

static CHURN_ENCODER_CONFIG: LazyLock<EncoderConfig> = LazyLock::new(build_config);

/// Shared churn encoder configuration.
#[must_use]
pub fn churn_encoder_config() -> &'static EncoderConfig {
    &CHURN_ENCODER_CONFIG
}

/// Copy of the churn config with dimension/seed overrides applied.
#[must_use]
pub fn encoder_config_with(settings: &EncoderSettings) -> EncoderConfig {
    let mut config = churn_encoder_config().clone();
    if let Some(dimension) = settings.dimension {
        config.dimension = dimension;
    }
    if let Some(seed) = settings.seed {
        config.seed = seed;
    }
    config
}

fn build_config() -> EncoderConfig {
    EncoderConfig {
        dimension: DEFAULT_DIMENSION,
        seed: DEFAULT_SEED,
        temporal_source: "auto".to_string(),
        temporal_config: Some(TemporalConfig {
            signal_type: "auto".to_string(),
        }),
        layers: vec![semantic_layer(), metrics_layer()],
    }
}

fn semantic_layer() -> Layer {
    Layer {
        name: "semantic".to_string(),
        similarity_weight: 0.6,
        segments: vec![
            Segment {
                name: "identity".to_string(),
                roles: vec![
                    Role::text(
                        "customer_id",
                        0.1,
                        &["customer", "account", "client", "customer id"],
                    )
                    .key_part(),
                    Role::text(
                        "risk_level",
                        0.9,
                        &["risk", "churn risk", "risk level", "health"],
                    ),
                    Role::text(
                        "churn_driver",
                        0.8,
                        &["driver", "reason", "cause", "churn driver"],
                    ),
                    Role::text(
                        "usage_band",
                        0.7,
                        &["usage", "activity", "engagement", "trend"],
                    ),
                ],
            },
            Segment {
                name: "context".to_string(),
                roles: vec![Role::text("keywords", 0.5, &["keywords", "tags", "terms"])],
            },
        ],
    }
}

fn metrics_layer() -> Layer {
    Layer {
        name: "metrics".to_string(),
        similarity_weight: 0.4,
        segments: vec![Segment {
            name: "usage".to_string(),
            roles: vec![
                Role::numeric(
                    "logins",
                    1.0,
                    NumericConfig::thermometer(10.0, 0.0, 200.0),
                    &["logins", "login count", "sessions", "activity"],
                ),
                Role::numeric(
                    "support_cases",
                    0.9,
                    NumericConfig::thermometer(1.0, 0.0, 20.0),
                    &["support", "tickets", "cases", "support cases"],
                ),
                Role::numeric(
                    "defects",
                    0.9,
                    NumericConfig::thermometer(1.0, 0.0, 15.0),
                    &["defects", "bugs", "errors", "crashes"],
                ),
                Role::numeric(
                    "feature_adoption",
                    0.8,
                    NumericConfig::thermometer(5.0, 0.0, 100.0),
                    &["adoption", "features", "feature usage", "utilization"],
                ),
            ],
        }],
    }
}
