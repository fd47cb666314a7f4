//! Attribute vocabulary shared by the query classifier and record normalizer.
//!
//! Every attribute key matches a role name declared in the encoder schema.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Role names carried by every [`AttributeSet`], in schema order.
pub const ATTRIBUTE_KEYS: [&str; 9] = [
    "customer_id",
    "risk_level",
    "churn_driver",
    "usage_band",
    "keywords",
    "logins",
    "support_cases",
    "defects",
    "feature_adoption",
];

/// Neutral login count used when none is known.
pub const DEFAULT_LOGINS: u64 = 50;
/// Neutral support case count used when none is known.
pub const DEFAULT_SUPPORT_CASES: u64 = 2;
/// Neutral defect count used when none is known.
pub const DEFAULT_DEFECTS: u64 = 1;
/// Neutral feature adoption percentage used when none is known.
pub const DEFAULT_FEATURE_ADOPTION: u64 = 50;

/// Churn risk level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// Likely to churn
    High,
    /// Early warning signals
    #[default]
    Medium,
    /// Healthy account
    Low,
}

/// Primary reason a customer is at risk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ChurnDriver {
    /// Few logins or sessions
    #[default]
    LowUsage,
    /// Heavy support load
    SupportBurden,
    /// Product defects and crashes
    DefectFrustration,
    /// Features left unused
    LowAdoption,
    /// Never finished onboarding
    OnboardingStall,
    /// Billing or pricing friction
    BillingFriction,
}

/// Usage trend band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum UsageBand {
    /// No activity
    Inactive,
    /// Activity going down
    Declining,
    /// Activity flat
    #[default]
    Stable,
    /// Activity going up
    Growing,
}

impl RiskLevel {
    /// All levels in classification priority order.
    pub const ALL: [Self; 3] = [Self::High, Self::Medium, Self::Low];

    /// Wire name of the level.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl ChurnDriver {
    /// Wire name of the driver.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LowUsage => "low_usage",
            Self::SupportBurden => "support_burden",
            Self::DefectFrustration => "defect_frustration",
            Self::LowAdoption => "low_adoption",
            Self::OnboardingStall => "onboarding_stall",
            Self::BillingFriction => "billing_friction",
        }
    }
}

impl UsageBand {
    /// Wire name of the band.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inactive => "inactive",
            Self::Declining => "declining",
            Self::Stable => "stable",
            Self::Growing => "growing",
        }
    }
}

macro_rules! impl_display_from_str {
    ($ty:ty, [$($variant:ident),+ $(,)?]) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim().to_lowercase();
                [$(<$ty>::$variant),+]
                    .into_iter()
                    .find(|v| v.as_str() == wanted)
                    .ok_or_else(|| format!("unknown {}: {s}", stringify!($ty)))
            }
        }
    };
}

impl_display_from_str!(RiskLevel, [High, Medium, Low]);
impl_display_from_str!(
    ChurnDriver,
    [
        LowUsage,
        SupportBurden,
        DefectFrustration,
        LowAdoption,
        OnboardingStall,
        BillingFriction,
    ]
);
impl_display_from_str!(UsageBand, [Inactive, Declining, Stable, Growing]);

/// Normalized attribute mapping handed to the HDC encoder.
///
/// Categorical fields are plain strings: record entries carry them without
/// validation, and raw customer snapshots leave them empty. Metric fields are
/// raw JSON values so record entries pass through untouched; the engine
/// clamps and coerces them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AttributeSet {
    /// Customer identity (key part); empty for free-text queries
    pub customer_id: String,
    /// Risk level name
    pub risk_level: String,
    /// Churn driver name
    pub churn_driver: String,
    /// Usage band name
    pub usage_band: String,
    /// Space-joined keyword text
    pub keywords: String,
    /// Login count, role bounds [0, 200]
    pub logins: Value,
    /// Support case count, role bounds [0, 20]
    pub support_cases: Value,
    /// Defect count, role bounds [0, 15]
    pub defects: Value,
    /// Feature adoption percentage, role bounds [0, 100]
    pub feature_adoption: Value,
}

impl AttributeSet {
    /// Role names this set provides values for.
    #[must_use]
    pub fn keys(&self) -> &'static [&'static str] {
        &ATTRIBUTE_KEYS
    }

    /// Metric fields as `(role, value)` pairs.
    #[must_use]
    pub fn metrics(&self) -> [(&'static str, &Value); 4] {
        [
            ("logins", &self.logins),
            ("support_cases", &self.support_cases),
            ("defects", &self.defects),
            ("feature_adoption", &self.feature_adoption),
        ]
    }
}

impl Default for AttributeSet {
    fn default() -> Self {
        Self {
            customer_id: String::new(),
            risk_level: RiskLevel::default().to_string(),
            churn_driver: ChurnDriver::default().to_string(),
            usage_band: UsageBand::default().to_string(),
            keywords: String::new(),
            logins: Value::from(DEFAULT_LOGINS),
            support_cases: Value::from(DEFAULT_SUPPORT_CASES),
            defects: Value::from(DEFAULT_DEFECTS),
            feature_adoption: Value::from(DEFAULT_FEATURE_ADOPTION),
        }
    }
}
