// URL validator

use crate::checks::BASE_URL_REGEX;
use crate::constraints::{Constraint, UrlConstraints};
use crate::policy::UrlPolicy;
use drea_validation::Fault;
use drea_validation::errors::Result;
use serde_json::Value;
use tracing::{debug, trace, warn};

/// Checks one URL against the base pattern and optional constraints.
///
/// # Examples
///
/// ```
/// use drea_url::{UrlConstraints, UrlValidator};
///
/// let validator = UrlValidator::new("https://docs.example.com/?page=2");
/// assert!(validator.matches_base());
///
/// let constraints = UrlConstraints::new()
///     .allowed_protocols(["https"])
///     .contain_query(false);
/// assert!(!validator.verify_pattern(&constraints));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct UrlValidator {
    url: String,
    policy: UrlPolicy,
}

impl UrlValidator {
    /// The URL is stored lower-cased
    pub fn new(url: impl AsRef<str>) -> Self {
        Self {
            url: url.as_ref().to_lowercase(),
            policy: UrlPolicy::default(),
        }
    }

    /// Build from an untyped value, which must be a string
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Err(Fault::null_value("URL cannot be null or undefined")),
            Value::String(url) => Ok(Self::new(url)),
            _ => Err(Fault::argument_type("URL must be a string")),
        }
    }

    pub fn with_policy(mut self, policy: UrlPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn policy(&self) -> &UrlPolicy {
        &self.policy
    }

    /// Whether the URL matches the base scheme/authority pattern
    pub fn matches_base(&self) -> bool {
        BASE_URL_REGEX.is_match(&self.url)
    }

    /// Verify against typed constraints
    pub fn verify_pattern(&self, constraints: &UrlConstraints) -> bool {
        let outcome: Result<bool> = self.tally(constraints.iter().cloned().map(Ok));
        outcome.unwrap_or(false)
    }

    /// Verify against a JSON constraint object.
    ///
    /// Entries are parsed in order as they are checked, so an unknown key
    /// or badly shaped value is reported only if every earlier constraint
    /// passed. Null means no constraints.
    pub fn verify_pattern_json(&self, constraints: &Value) -> Result<bool> {
        match constraints {
            Value::Null => self.tally(std::iter::empty()),
            Value::Object(map) => self.tally(
                map.iter()
                    .map(|(key, value)| Constraint::from_entry(key, value)),
            ),
            _ => Err(Fault::argument_type("constraints must be an object")),
        }
    }

    fn tally<I>(&self, constraints: I) -> Result<bool>
    where
        I: IntoIterator<Item = Result<Constraint>>,
    {
        if !self.matches_base() {
            debug!(url = %self.url, "URL does not match base pattern");
            return Ok(false);
        }

        let mut seen = 0usize;
        let mut passed = 0usize;
        for constraint in constraints {
            let constraint = constraint.inspect_err(|fault| {
                warn!(url = %self.url, code = fault.code(), "URL constraint rejected: {}", fault);
            })?;
            seen += 1;

            if !constraint.check(&self.url) {
                debug!(url = %self.url, constraint = constraint.key(), "URL constraint failed");
                return Ok(false);
            }
            trace!(url = %self.url, constraint = constraint.key(), "URL constraint passed");
            passed += 1;
        }

        if seen == 0 {
            return Ok(true);
        }

        let accepted = passed >= self.policy.min_passing_checks;
        if !accepted {
            debug!(
                url = %self.url,
                passed,
                required = self.policy.min_passing_checks,
                "Too few URL constraints passed"
            );
        }
        Ok(accepted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drea_validation::FaultKind;
    use serde_json::json;

    #[test]
    fn test_from_value() {
        assert_eq!(
            UrlValidator::from_value(&json!("HTTP://Example.COM")).unwrap().url(),
            "http://example.com"
        );
        assert_eq!(
            UrlValidator::from_value(&Value::Null).unwrap_err().kind(),
            FaultKind::NullValue
        );
        assert_eq!(
            UrlValidator::from_value(&json!(42)).unwrap_err().kind(),
            FaultKind::ArgumentType
        );
    }

    #[test]
    fn test_no_constraints_uses_base_pattern() {
        assert!(UrlValidator::new("http://example.com").verify_pattern(&UrlConstraints::new()));
        assert!(!UrlValidator::new("not a url").verify_pattern(&UrlConstraints::new()));
        assert!(
            UrlValidator::new("http://example.com")
                .verify_pattern_json(&Value::Null)
                .unwrap()
        );
        assert!(
            UrlValidator::new("http://example.com")
                .verify_pattern_json(&json!({}))
                .unwrap()
        );
    }

    #[test]
    fn test_base_failure_short_circuits_constraints() {
        let validator = UrlValidator::new("not a url");
        assert!(
            !validator
                .verify_pattern_json(&json!({ "bogus": true }))
                .unwrap()
        );
    }

    #[test]
    fn test_failing_constraint_rejects() {
        let validator = UrlValidator::new("ftp://files.example.com:21/");
        let constraints = UrlConstraints::new()
            .allowed_protocols(["http", "https"])
            .allowed_ports(["21"]);
        assert!(!validator.verify_pattern(&constraints));
    }

    #[test]
    fn test_threshold() {
        let validator = UrlValidator::new("http://example.com/");
        let single = UrlConstraints::new().allowed_protocols(["http"]);
        assert!(!validator.verify_pattern(&single));

        let relaxed = validator
            .clone()
            .with_policy(UrlPolicy::new().min_passing_checks(1));
        assert!(relaxed.verify_pattern(&single));

        let pair = single.contain_query(false);
        assert!(validator.verify_pattern(&pair));
    }

    #[test]
    fn test_json_faults() {
        let validator = UrlValidator::new("http://example.com/");

        let fault = validator
            .verify_pattern_json(&json!({ "allowed_ipclass": ["a"] }))
            .unwrap_err();
        assert_eq!(fault.kind(), FaultKind::UnknownKey);
        assert_eq!(fault.description(), "allowed_ipclass is not defined as a restriction");

        let fault = validator
            .verify_pattern_json(&json!({ "contain_query": "no" }))
            .unwrap_err();
        assert_eq!(fault.kind(), FaultKind::ArgumentType);

        let fault = validator.verify_pattern_json(&json!("x")).unwrap_err();
        assert_eq!(fault.kind(), FaultKind::ArgumentType);
    }

    #[test]
    fn test_json_fault_after_failure_is_not_reached() {
        let validator = UrlValidator::new("http://example.com/");
        let outcome = validator
            .verify_pattern_json(&json!({
                "allowed_protocols": ["https"],
                "allowed_ipclass": ["a"]
            }))
            .unwrap();
        assert!(!outcome);
    }
}
