//! Pattern and customer fixture loading tests.

use std::io::{Cursor, Write};
use std::path::PathBuf;

use tempfile::NamedTempFile;

use churn_encoder::{
    ChurnError, RiskLevel, filter_by_expected_risk, load_customers, load_patterns, parse_customers,
    parse_patterns,
};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_load_pattern_fixture() {
    let records = load_patterns(&fixture("patterns.jsonl")).unwrap();
    assert_eq!(records.len(), 7);
    assert!(records.iter().any(|r| r.metadata.risk_level == "high"));
    assert!(records.iter().any(|r| r.metadata.risk_level == "low"));

    for record in &records {
        assert!(!record.metadata.response.is_empty());
    }
}

#[test]
fn test_scalar_keywords_in_fixture() {
    let records = load_patterns(&fixture("patterns.jsonl")).unwrap();
    let adoption = records
        .iter()
        .find(|r| r.attributes.churn_driver == "low_adoption")
        .unwrap();
    assert_eq!(adoption.attributes.keywords, "adoption");
}

#[test]
fn test_parse_patterns_skips_blank_lines() {
    let input = "\n{\"question\":\"a\"}\n   \n{\"question\":\"b\"}\n";
    let records = parse_patterns(Cursor::new(input)).unwrap();
    let texts: Vec<&str> = records.iter().map(|r| r.concept_text.as_str()).collect();
    assert_eq!(texts, vec!["a", "b"]);
}

#[test]
fn test_parse_patterns_reports_line_number() {
    let input = "{\"question\":\"a\"}\n\n{not json\n";
    let err = parse_patterns(Cursor::new(input)).unwrap_err();
    assert!(matches!(err, ChurnError::Jsonl { line: 3, .. }), "{err}");
}

#[test]
fn test_parse_patterns_accepts_loose_field_types() {
    let input = concat!(
        "{\"question\":\"a\",\"customer_id\":1042}\n",
        "{\"question\":\"b\",\"logins\":\"many\"}\n",
        "{\"question\":\"c\",\"keywords\":null,\"logins\":null}\n",
    );
    let records = parse_patterns(Cursor::new(input)).unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].attributes.customer_id, "1042");
    assert_eq!(records[1].attributes.logins, "many");
    assert_eq!(records[2].attributes.keywords, "None");
    assert!(records[2].attributes.logins.is_null());
}

#[test]
fn test_load_patterns_missing_file() {
    let err = load_patterns(&fixture("does-not-exist.jsonl")).unwrap_err();
    assert!(matches!(err, ChurnError::Io(_)));
}

#[test]
fn test_load_patterns_from_temp_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, r#"{{"question":"Zero logins?","logins":0,"keywords":["x","y"]}}"#).unwrap();
    let records = load_patterns(file.path()).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].attributes.logins, 0);
    assert_eq!(records[0].attributes.keywords, "x y");
}

#[test]
fn test_customers_have_raw_metrics_only() {
    let raw = std::fs::read_to_string(fixture("test-concepts.json")).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
    for c in doc["customers"].as_array().unwrap() {
        let id = c["customer_id"].as_str().unwrap();
        assert!(c.get("risk_level").is_none(), "{id} has risk_level");
        assert!(c.get("churn_driver").is_none(), "{id} has churn_driver");
        for key in ["logins", "support_cases", "defects", "feature_adoption"] {
            assert!(c.get(key).is_some(), "{id} missing {key}");
        }
    }
}

#[test]
fn test_load_customers_and_filter() {
    let customers = load_customers(&fixture("test-concepts.json")).unwrap();
    let high_risk = filter_by_expected_risk(&customers, RiskLevel::High);
    let high: Vec<&str> = high_risk
        .iter()
        .map(|c| c.customer_id.as_str())
        .collect();
    assert_eq!(high, vec!["acme-corp", "beta-inc", "gamma-llc"]);

    let low = filter_by_expected_risk(&customers, RiskLevel::Low);
    assert!(low.iter().any(|c| c.customer_id == "omega-ai"));
    assert!(low.iter().any(|c| c.customer_id == "sigma-dev"));
}

#[test]
fn test_customer_attributes_leave_categoricals_empty() {
    let customers = load_customers(&fixture("test-concepts.json")).unwrap();
    let acme = customers.iter().find(|c| c.customer_id == "acme-corp").unwrap();
    let attrs = acme.to_attributes();
    assert_eq!(attrs.customer_id, "acme-corp");
    assert_eq!(attrs.risk_level, "");
    assert_eq!(attrs.churn_driver, "");
    assert_eq!(attrs.usage_band, "");
    assert_eq!(attrs.keywords, "");
    assert_eq!(attrs.logins, 0);

    let attrs_json = serde_json::to_value(&attrs).unwrap();
    assert!(attrs_json.get("_expected_risk").is_none());
}

#[test]
fn test_same_customer_new_day_changes_metrics_only() {
    let customers = load_customers(&fixture("test-concepts.json")).unwrap();
    let acme = customers.iter().find(|c| c.customer_id == "acme-corp").unwrap();
    let day2 = acme.with_metrics(40, 0, 0, 0);
    assert_eq!(day2.customer_id, acme.customer_id);
    assert_ne!(day2.to_attributes(), acme.to_attributes());
    assert_eq!(day2.to_attributes().logins, 40);
}

#[test]
fn test_parse_customers_rejects_missing_list() {
    assert!(matches!(
        parse_customers(r#"{"people": []}"#),
        Err(ChurnError::Json(_))
    ));
}
