//! Keyword classification tables.
//!
//! Centralized word lists for the query classifier. Read-only after first use.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use crate::attributes::{ChurnDriver, RiskLevel, UsageBand};

const USAGE_BAND_WORDS: &[(&str, UsageBand)] = &[
    ("none", UsageBand::Inactive),
    ("zero", UsageBand::Inactive),
    ("no", UsageBand::Inactive),
    ("inactive", UsageBand::Inactive),
    ("dropping", UsageBand::Declining),
    ("declining", UsageBand::Declining),
    ("decreasing", UsageBand::Declining),
    ("fewer", UsageBand::Declining),
    ("less", UsageBand::Declining),
    ("reduced", UsageBand::Declining),
    ("low", UsageBand::Declining),
    ("steady", UsageBand::Stable),
    ("stable", UsageBand::Stable),
    ("normal", UsageBand::Stable),
    ("average", UsageBand::Stable),
    ("increasing", UsageBand::Growing),
    ("growing", UsageBand::Growing),
    ("more", UsageBand::Growing),
    ("high", UsageBand::Growing),
    ("active", UsageBand::Growing),
    ("frequent", UsageBand::Growing),
];

const CHURN_DRIVER_WORDS: &[(&str, ChurnDriver)] = &[
    ("login", ChurnDriver::LowUsage),
    ("usage", ChurnDriver::LowUsage),
    ("logins", ChurnDriver::LowUsage),
    ("session", ChurnDriver::LowUsage),
    ("activity", ChurnDriver::LowUsage),
    ("support", ChurnDriver::SupportBurden),
    ("ticket", ChurnDriver::SupportBurden),
    ("case", ChurnDriver::SupportBurden),
    ("cases", ChurnDriver::SupportBurden),
    ("escalation", ChurnDriver::SupportBurden),
    ("defect", ChurnDriver::DefectFrustration),
    ("bug", ChurnDriver::DefectFrustration),
    ("crash", ChurnDriver::DefectFrustration),
    ("error", ChurnDriver::DefectFrustration),
    ("broken", ChurnDriver::DefectFrustration),
    ("defects", ChurnDriver::DefectFrustration),
    ("feature", ChurnDriver::LowAdoption),
    ("adoption", ChurnDriver::LowAdoption),
    ("onboard", ChurnDriver::OnboardingStall),
    ("billing", ChurnDriver::BillingFriction),
    ("payment", ChurnDriver::BillingFriction),
    ("invoice", ChurnDriver::BillingFriction),
    ("price", ChurnDriver::BillingFriction),
    ("cost", ChurnDriver::BillingFriction),
];

/// Substring triggers per risk level, in priority order.
pub const RISK_TRIGGERS: &[(RiskLevel, &[&str])] = &[
    (
        RiskLevel::High,
        &[
            "churn",
            "cancel",
            "leaving",
            "at risk",
            "critical",
            "red",
            "danger",
            "inactive",
            "zero logins",
            "no activity",
            "escalat",
        ],
    ),
    (
        RiskLevel::Medium,
        &[
            "declining",
            "dropping",
            "fewer",
            "reduced",
            "warning",
            "yellow",
            "slowing",
            "less active",
            "some risk",
        ],
    ),
    (
        RiskLevel::Low,
        &[
            "stable", "growing", "healthy", "green", "active", "engaged", "retained", "happy",
            "renew",
        ],
    ),
];

const STOP_WORD_LIST: &[&str] = &[
    "how", "do", "i", "a", "the", "to", "is", "what", "my", "an", "can", "does", "it", "in", "on",
    "for", "with", "me", "about", "are", "which", "who", "will", "their", "this", "that", "of",
];

/// Word to usage band.
pub static USAGE_BANDS: LazyLock<HashMap<&'static str, UsageBand>> =
    LazyLock::new(|| USAGE_BAND_WORDS.iter().copied().collect());

/// Word to churn driver.
pub static CHURN_DRIVERS: LazyLock<HashMap<&'static str, ChurnDriver>> =
    LazyLock::new(|| CHURN_DRIVER_WORDS.iter().copied().collect());

/// Words dropped from query keyword text.
pub static STOP_WORDS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOP_WORD_LIST.iter().copied().collect());
