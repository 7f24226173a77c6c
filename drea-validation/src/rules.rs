// Rule engine

use crate::errors::{Fault, Result};
use crate::normalizer::text_form;
use regex::Regex;
use serde::Serialize;
use serde_json::{Value, json};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

type PredicateFn = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

/// Marker that disables validation for one value.
///
/// A field bound to a skip rule stays part of a schema but always passes.
/// The marker's value form (`{"__type":"None"}`) is reserved: any object
/// tagged `"__type": "None"` is rejected as an entry, and the marker's text
/// form is rejected as an error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Skip;

impl Skip {
    /// Type tag carried by the marker's value form
    pub const TAG: &'static str = "None";

    /// Canonical text form of the marker
    pub const TEXT: &'static str = r#"{"__type":"None"}"#;

    /// Value form of the marker
    pub fn to_value(&self) -> Value {
        json!({ "__type": Self::TAG })
    }

    /// Check whether a value is the reserved marker
    pub fn is_marker(value: &Value) -> bool {
        match value {
            Value::Object(map) => map.get("__type").and_then(Value::as_str) == Some(Self::TAG),
            _ => false,
        }
    }
}

/// The test applied by a [`Rule`]
#[derive(Clone)]
pub enum RuleKind {
    /// Regex matched against the value's text form
    Pattern(Regex),
    /// Function of the value; must produce a boolean
    Predicate(PredicateFn),
    /// Always passes
    Skip,
}

impl fmt::Debug for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleKind::Pattern(regex) => f.debug_tuple("Pattern").field(&regex.as_str()).finish(),
            RuleKind::Predicate(_) => f.write_str("Predicate(..)"),
            RuleKind::Skip => f.write_str("Skip"),
        }
    }
}

impl From<Skip> for RuleKind {
    fn from(_: Skip) -> Self {
        RuleKind::Skip
    }
}

/// A test paired with the message reported when it fails
#[derive(Debug, Clone)]
pub struct Rule {
    kind: RuleKind,
    message: String,
}

impl Rule {
    /// Create a rule from a compiled regex
    pub fn pattern(regex: Regex, message: impl Into<String>) -> Self {
        Self {
            kind: RuleKind::Pattern(regex),
            message: message.into(),
        }
    }

    /// Compile `pattern` and create a regex rule
    pub fn regex(pattern: &str, message: impl Into<String>) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| Fault::argument_type(format!("invalid rule pattern: {}", e)))?;
        Ok(Self::pattern(regex, message))
    }

    /// Create a rule from a boolean predicate
    pub fn predicate<F>(predicate: F, message: impl Into<String>) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self {
            kind: RuleKind::Predicate(Arc::new(move |value| Value::Bool(predicate(value)))),
            message: message.into(),
        }
    }

    /// Create a rule from a predicate whose result type is only known at runtime.
    ///
    /// Evaluating the rule faults with an argument type error when the
    /// predicate returns anything but a boolean.
    pub fn untyped<F>(predicate: F, message: impl Into<String>) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        Self {
            kind: RuleKind::Predicate(Arc::new(predicate)),
            message: message.into(),
        }
    }

    /// Create a rule that always passes
    pub fn skip(message: impl Into<String>) -> Self {
        Self {
            kind: Skip.into(),
            message: message.into(),
        }
    }

    /// The rule's test
    pub fn kind(&self) -> &RuleKind {
        &self.kind
    }

    /// Message reported on failure
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Run the rule's test against a value
    pub fn test(&self, value: &Value) -> Result<bool> {
        match &self.kind {
            RuleKind::Pattern(regex) => Ok(regex.is_match(&text_form(value))),
            RuleKind::Predicate(predicate) => match predicate(value) {
                Value::Bool(passed) => Ok(passed),
                _ => Err(Fault::argument_type(
                    "Rule function must return a boolean value.",
                )),
            },
            RuleKind::Skip => Ok(true),
        }
    }

    fn check_message(&self) -> Result<()> {
        if self.message == Skip::TEXT {
            return Err(Fault::argument_type("errorMsg cannot be of None type."));
        }
        if self.message.is_empty() {
            return Err(Fault::argument_type("errorMsg cannot be empty."));
        }
        Ok(())
    }
}

/// Ordered rules evaluated until the first failure
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Create an empty rule set
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule
    #[allow(clippy::should_implement_trait)]
    pub fn add(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Iterate the rules in evaluation order
    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl From<Vec<Rule>> for RuleSet {
    fn from(rules: Vec<Rule>) -> Self {
        Self { rules }
    }
}

impl From<Rule> for RuleSet {
    fn from(rule: Rule) -> Self {
        Self { rules: vec![rule] }
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

/// Outcome of validating one value.
///
/// `status` is true exactly when `error` is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    status: bool,
    error: Option<String>,
}

impl ValidationResult {
    /// A passing result
    pub fn valid() -> Self {
        Self {
            status: true,
            error: None,
        }
    }

    /// A failing result carrying the rule's message
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            status: false,
            error: Some(message.into()),
        }
    }

    pub fn status(&self) -> bool {
        self.status
    }

    pub fn is_valid(&self) -> bool {
        self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Convert to JSON representation
    pub fn to_json(&self) -> Value {
        json!({ "status": self.status, "error": self.error })
    }
}

/// Validate a value against a rule set.
///
/// String values are trimmed before the rules run. Evaluation stops at the
/// first failing rule, whose message is returned.
pub fn validate_entry(entry: &Value, rules: &RuleSet) -> Result<ValidationResult> {
    evaluate(entry, rules.iter())
}

/// Validate a value against a single rule
pub(crate) fn validate_rule(entry: &Value, rule: &Rule) -> Result<ValidationResult> {
    evaluate(entry, std::iter::once(rule))
}

fn evaluate<'a, I>(entry: &Value, rules: I) -> Result<ValidationResult>
where
    I: IntoIterator<Item = &'a Rule>,
{
    if entry.is_null() {
        return Err(Fault::null_value("entry cannot be null or undefined"));
    }
    if Skip::is_marker(entry) {
        return Err(Fault::argument_type("entry cannot be of None type."));
    }

    let value: Cow<'_, Value> = match entry {
        Value::String(s) if s.trim().len() != s.len() => {
            Cow::Owned(Value::String(s.trim().to_string()))
        }
        other => Cow::Borrowed(other),
    };

    for (index, rule) in rules.into_iter().enumerate() {
        rule.check_message()?;
        trace!(index, kind = ?rule.kind(), "evaluating rule");

        if !rule.test(&value)? {
            debug!(index, error = rule.message(), "rule failed");
            return Ok(ValidationResult::invalid(rule.message()));
        }
    }

    Ok(ValidationResult::valid())
}

/// One value and the rules it is validated against
#[derive(Debug, Clone)]
pub struct ManyEntry {
    pub entry: Value,
    pub rules: RuleSet,
}

impl ManyEntry {
    pub fn new(entry: impl Into<Value>, rules: impl Into<RuleSet>) -> Self {
        Self {
            entry: entry.into(),
            rules: rules.into(),
        }
    }
}

/// A value rejected by [`validate_many`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvalidEntry {
    /// The value as supplied, before trimming
    pub value: Value,
    pub status: bool,
    pub error: String,
}

/// Validate several values, returning only the ones that fail.
///
/// A fault raised by any entry aborts the batch and is reported as a
/// validation fault.
pub fn validate_many(entries: &[ManyEntry]) -> Result<Vec<InvalidEntry>> {
    let mut invalid = Vec::new();

    for item in entries {
        let result = validate_entry(&item.entry, &item.rules).map_err(Fault::into_validation)?;
        if let Some(error) = result.error() {
            invalid.push(InvalidEntry {
                value: item.entry.clone(),
                status: false,
                error: error.to_string(),
            });
        }
    }

    debug!(total = entries.len(), invalid = invalid.len(), "batch validated");
    Ok(invalid)
}
