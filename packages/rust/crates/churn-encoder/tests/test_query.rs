//! Query classifier tests.

use churn_encoder::{ChurnDriver, RiskLevel, UsageBand, encode_query};

#[test]
fn test_high_risk_query_infers_high() {
    let result = encode_query("customer is completely inactive with zero logins");
    assert_eq!(result.attributes.risk_level, "high");
    assert_eq!(result.attributes.usage_band, "inactive");
    assert_eq!(result.attributes.churn_driver, "low_usage");
}

#[test]
fn test_low_risk_query_infers_low() {
    let result = encode_query("customer is active and engaged with growing usage");
    assert_eq!(result.attributes.risk_level, RiskLevel::Low.as_str());
}

#[test]
fn test_medium_risk_query_infers_medium() {
    let result = encode_query("customer usage is declining slightly");
    assert_eq!(result.attributes.risk_level, RiskLevel::Medium.as_str());
}

#[test]
fn test_high_triggers_win_over_low() {
    let result = encode_query("stable account but talking about churn");
    assert_eq!(result.attributes.risk_level, "high");
}

#[test]
fn test_driver_inference() {
    let cases = [
        ("customer has many support tickets", ChurnDriver::SupportBurden),
        ("customer keeps hitting the same bug", ChurnDriver::DefectFrustration),
        ("customer disputed their invoice", ChurnDriver::BillingFriction),
        ("nobody finished onboard steps", ChurnDriver::OnboardingStall),
        ("feature rollout ignored", ChurnDriver::LowAdoption),
    ];
    for (text, expected) in cases {
        assert_eq!(
            encode_query(text).attributes.churn_driver,
            expected.as_str(),
            "{text}"
        );
    }
}

#[test]
fn test_usage_band_inference() {
    assert_eq!(
        encode_query("customer has no activity at all").attributes.usage_band,
        UsageBand::Inactive.as_str()
    );
    assert_eq!(
        encode_query("customer logins are increasing rapidly").attributes.usage_band,
        UsageBand::Growing.as_str()
    );
    assert_eq!(
        encode_query("sessions are dropping").attributes.usage_band,
        UsageBand::Declining.as_str()
    );
}

#[test]
fn test_unrecognized_text_uses_defaults() {
    let result = encode_query("xyz qqq");
    assert_eq!(result.attributes.risk_level, "medium");
    assert_eq!(result.attributes.churn_driver, "low_usage");
    assert_eq!(result.attributes.usage_band, "stable");
    assert_eq!(result.attributes.keywords, "xyz qqq");
}

#[test]
fn test_empty_query() {
    let result = encode_query("");
    assert_eq!(result.attributes.risk_level, "medium");
    assert_eq!(result.attributes.churn_driver, "low_usage");
    assert_eq!(result.attributes.usage_band, "stable");
    assert_eq!(result.attributes.keywords, "");
    assert!(result.name.starts_with("query_"));
}

#[test]
fn test_query_has_customer_id_empty() {
    let result = encode_query("which customers are likely to churn");
    assert_eq!(result.attributes.customer_id, "");
}

#[test]
fn test_query_metrics_are_neutral() {
    let attrs = encode_query("anything at all").attributes;
    assert_eq!(attrs.logins, 50);
    assert_eq!(attrs.support_cases, 2);
    assert_eq!(attrs.defects, 1);
    assert_eq!(attrs.feature_adoption, 50);
}

#[test]
fn test_query_is_deterministic() {
    let q = "find at-risk customers";
    let r1 = encode_query(q);
    let r2 = encode_query(q);
    assert_eq!(r1.name, r2.name);
    assert_eq!(r1, r2);
}

#[test]
fn test_different_queries_get_different_names() {
    assert_ne!(
        encode_query("find at-risk customers").name,
        encode_query("find healthy customers").name
    );
}

#[test]
fn test_keywords_exclude_stop_words() {
    let result = encode_query("how do I find the customers at risk");
    let kw: Vec<&str> = result.attributes.keywords.split_whitespace().collect();
    assert!(!kw.contains(&"how"));
    assert!(!kw.contains(&"do"));
    assert!(!kw.contains(&"the"));
    assert_eq!(kw, vec!["find", "customers", "at", "risk"]);
}

#[test]
fn test_query_name_known_answers() {
    assert_eq!(encode_query("").name, "query_3558706393");
    assert_eq!(encode_query("find at-risk customers").name, "query_2915870468");
}

#[test]
fn test_information_separators_split_tokens() {
    let result = encode_query("billing\u{1c}dispute\u{1f}zero");
    assert_eq!(result.attributes.keywords, "billing dispute zero");
    assert_eq!(result.attributes.churn_driver, "billing_friction");
    assert_eq!(result.attributes.usage_band, "inactive");
}

#[test]
fn test_query_result_json_shape() {
    let value = serde_json::to_value(encode_query("bug reports piling up")).unwrap();
    assert!(value["name"].as_str().unwrap().starts_with("query_"));
    assert_eq!(value["attributes"]["churn_driver"], "defect_frustration");
    assert_eq!(value["attributes"]["logins"], 50);
}
