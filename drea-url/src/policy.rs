// URL pass policy

use serde::{Deserialize, Serialize};

/// Default number of passing constraint checks; the base pattern is not
/// counted
pub const DEFAULT_MIN_PASSING_CHECKS: usize = 2;

/// How many passing checks a URL needs to be accepted.
///
/// A constraint that fails always rejects the URL; the threshold only
/// matters when few constraints are given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UrlPolicy {
    pub min_passing_checks: usize,
}

impl Default for UrlPolicy {
    fn default() -> Self {
        Self {
            min_passing_checks: DEFAULT_MIN_PASSING_CHECKS,
        }
    }
}

impl UrlPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_passing_checks(mut self, checks: usize) -> Self {
        self.min_passing_checks = checks;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        assert_eq!(UrlPolicy::default().min_passing_checks, 2);
        assert_eq!(UrlPolicy::new().min_passing_checks(1).min_passing_checks, 1);
    }

    #[test]
    fn test_deserialize_missing_field() {
        let policy: UrlPolicy = serde_json::from_str("{}").unwrap();
        assert_eq!(policy, UrlPolicy::default());

        let policy: UrlPolicy = serde_json::from_str(r#"{"min_passing_checks": 3}"#).unwrap();
        assert_eq!(policy.min_passing_checks, 3);
    }
}
