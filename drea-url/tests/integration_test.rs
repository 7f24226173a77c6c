//! Integration tests for drea-url

use drea_url::*;
use drea_validation::FaultKind;
use proptest::prelude::*;
use serde_json::json;

const SCENARIO_URL: &str = "http://support.find.com:443///?draz=1#soccer";

#[test]
fn test_seven_constraint_scenario() {
    let validator = UrlValidator::new(SCENARIO_URL);
    let ok = validator
        .verify_pattern_json(&json!({
            "allowed_protocols": ["http", "https"],
            "allowed_ports": ["443", "80"],
            "allowed_domains": ["support.find.com"],
            "contain_fragment": true,
            "contain_path": false,
            "contain_query": true,
            "between": [10, 60]
        }))
        .unwrap();
    assert!(ok);
}

#[test]
fn test_scenario_with_single_length_bound() {
    let validator = UrlValidator::new(SCENARIO_URL);
    let constraints = json!({
        "allowed_protocols": ["http", "https", "ftp"],
        "contain_fragment": true,
        "contain_query": true,
        "allowed_ports": ["443", "80"],
        "between": [40],
        "allowed_domains": ["support.find.com", "find.com"],
        "contain_path": false
    });
    assert!(validator.verify_pattern_json(&constraints).unwrap());

    let typed = UrlConstraints::new()
        .allowed_protocols(["http", "https", "ftp"])
        .contain_fragment(true)
        .contain_query(true)
        .allowed_ports(["443", "80"])
        .longer_than(40.0)
        .allowed_domains(["support.find.com", "find.com"])
        .contain_path(false);
    assert!(validator.verify_pattern(&typed));

    // The URL is 44 characters long
    assert!(!validator.verify_pattern(&typed.clone().longer_than(44.0)));

    let mut too_short = constraints;
    too_short["between"] = json!([44]);
    assert!(!validator.verify_pattern_json(&too_short).unwrap());
}

#[test]
fn test_typed_constraints_match_json() {
    let validator = UrlValidator::new(SCENARIO_URL);
    let constraints = UrlConstraints::new()
        .allowed_protocols(["http", "https"])
        .allowed_ports(["443", "80"])
        .allowed_domains(["support.find.com"])
        .contain_fragment(true)
        .contain_path(false)
        .contain_query(true)
        .between(10.0, 60.0);

    assert!(validator.verify_pattern(&constraints));
    assert!(!validator.verify_pattern(&constraints.clone().contain_fragment(false)));
    assert!(!validator.verify_pattern(&constraints.between(10.0, 44.0)));
}

#[test]
fn test_not_a_url() {
    assert!(!UrlValidator::new("not a url").verify_pattern(&UrlConstraints::new()));
    assert!(
        !UrlValidator::new("not a url")
            .verify_pattern_json(&json!({ "contain_query": true }))
            .unwrap()
    );
}

#[test]
fn test_single_constraint_threshold() {
    let constraints = json!({ "allowed_protocols": ["https"] });
    let validator = UrlValidator::new("https://example.com");

    assert!(!validator.verify_pattern_json(&constraints).unwrap());

    let relaxed = validator.with_policy(UrlPolicy::new().min_passing_checks(1));
    assert!(relaxed.verify_pattern_json(&constraints).unwrap());
}

#[test]
fn test_constraint_faults() {
    let validator = UrlValidator::new(SCENARIO_URL);

    let fault = validator
        .verify_pattern_json(&json!({ "Allowed_Subnets": ["10.0.0.0/8"] }))
        .unwrap_err();
    assert_eq!(fault.kind(), FaultKind::UnknownKey);
    assert_eq!(fault.code(), "ERR_UNKNOWN_KEY");

    let fault = validator
        .verify_pattern_json(&json!({ "between": "10" }))
        .unwrap_err();
    assert_eq!(fault.kind(), FaultKind::ArgumentType);
    assert_eq!(fault.code(), "ERR_INVALID_ARGTYPE");
}

#[test]
fn test_keys_are_case_insensitive() {
    let validator = UrlValidator::new("HTTPS://Example.com/");
    let ok = validator
        .verify_pattern_json(&json!({
            "ALLOWED_PROTOCOLS": ["HTTPS"],
            "Contain_Query": false
        }))
        .unwrap();
    assert!(ok);
}

proptest! {
    #[test]
    fn prop_url_is_case_insensitive(host in "[a-z]{3,10}", tld in "[a-z]{2,5}") {
        let url = format!("https://{}.{}/", host, tld);
        let constraints = UrlConstraints::new()
            .allowed_domains([format!("{}.{}", host, tld)])
            .contain_path(false);

        prop_assert_eq!(
            UrlValidator::new(&url).verify_pattern(&constraints),
            UrlValidator::new(url.to_uppercase()).verify_pattern(&constraints)
        );
    }

    #[test]
    fn prop_length_bounds(pad in 0usize..40) {
        let url = format!("http://example.com/{}", "a".repeat(pad));
        let len = url.chars().count() as f64;
        let constraints = UrlConstraints::new()
            .contain_path(true)
            .between(len - 1.0, len + 1.0);
        prop_assert!(UrlValidator::new(&url).verify_pattern(&constraints));

        let too_short = UrlConstraints::new().contain_path(true).longer_than(len);
        prop_assert!(!UrlValidator::new(&url).verify_pattern(&too_short));
    }
}
