// URL constraint sets

use crate::checks;
use drea_validation::Fault;
use drea_validation::errors::Result;
use serde_json::Value;

/// Keys accepted in a constraint object
pub const CONSTRAINT_KEYS: [&str; 7] = [
    "allowed_protocols",
    "allowed_ports",
    "allowed_domains",
    "contain_fragment",
    "contain_path",
    "contain_query",
    "between",
];

/// Length bounds, both exclusive
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    /// Longer than the bound
    Above(f64),
    /// Strictly between the bounds
    Between(f64, f64),
}

/// One structural requirement on a URL
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    AllowedProtocols(Vec<String>),
    AllowedPorts(Vec<String>),
    AllowedDomains(Vec<String>),
    ContainFragment(bool),
    ContainPath(bool),
    ContainQuery(bool),
    Between(Length),
}

impl Constraint {
    /// Key naming this constraint in a constraint object
    pub fn key(&self) -> &'static str {
        match self {
            Constraint::AllowedProtocols(_) => "allowed_protocols",
            Constraint::AllowedPorts(_) => "allowed_ports",
            Constraint::AllowedDomains(_) => "allowed_domains",
            Constraint::ContainFragment(_) => "contain_fragment",
            Constraint::ContainPath(_) => "contain_path",
            Constraint::ContainQuery(_) => "contain_query",
            Constraint::Between(_) => "between",
        }
    }

    /// Run the constraint's check against a lower-cased URL
    pub fn check(&self, url: &str) -> bool {
        match self {
            Constraint::AllowedProtocols(protocols) => checks::check_protocol(url, protocols),
            Constraint::AllowedPorts(ports) => checks::check_port(url, ports),
            Constraint::AllowedDomains(domains) => checks::check_domain(url, domains),
            Constraint::ContainFragment(allowed) => checks::check_fragment(url, *allowed),
            Constraint::ContainPath(allowed) => checks::check_path(url, *allowed),
            Constraint::ContainQuery(allowed) => checks::check_query(url, *allowed),
            Constraint::Between(length) => checks::check_length(url, length),
        }
    }

    /// Parse one `key: value` entry of a constraint object.
    ///
    /// Keys are matched case-insensitively. An unrecognized key is an
    /// unknown key fault; a value of the wrong shape is an argument type
    /// fault.
    pub fn from_entry(key: &str, value: &Value) -> Result<Self> {
        match key.to_lowercase().as_str() {
            "allowed_protocols" => string_list(key, value).map(Constraint::AllowedProtocols),
            "allowed_ports" => string_list(key, value).map(Constraint::AllowedPorts),
            "allowed_domains" => string_list(key, value).map(Constraint::AllowedDomains),
            "contain_fragment" => boolean(key, value).map(Constraint::ContainFragment),
            "contain_path" => boolean(key, value).map(Constraint::ContainPath),
            "contain_query" => boolean(key, value).map(Constraint::ContainQuery),
            "between" => length(key, value).map(Constraint::Between),
            _ => Err(Fault::unknown_key(format!(
                "{} is not defined as a restriction",
                key
            ))),
        }
    }
}

fn string_list(key: &str, value: &Value) -> Result<Vec<String>> {
    value
        .as_array()
        .and_then(|items| {
            items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
        })
        .ok_or_else(|| Fault::argument_type(format!("'{}' must be an array of strings", key)))
}

fn boolean(key: &str, value: &Value) -> Result<bool> {
    value
        .as_bool()
        .ok_or_else(|| Fault::argument_type(format!("'{}' must be a boolean", key)))
}

fn length(key: &str, value: &Value) -> Result<Length> {
    let bounds = value
        .as_array()
        .and_then(|items| items.iter().map(Value::as_f64).collect::<Option<Vec<_>>>());

    match bounds.as_deref() {
        Some([min]) => Ok(Length::Above(*min)),
        Some([min, max]) => Ok(Length::Between(*min, *max)),
        _ => Err(Fault::argument_type(format!(
            "'{}' must be an array of numbers",
            key
        ))),
    }
}

/// Ordered set of constraints, at most one per key.
///
/// # Examples
///
/// ```
/// use drea_url::UrlConstraints;
///
/// let constraints = UrlConstraints::new()
///     .allowed_protocols(["http", "https"])
///     .contain_query(false);
/// assert_eq!(constraints.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UrlConstraints {
    constraints: Vec<Constraint>,
}

impl UrlConstraints {
    pub fn new() -> Self {
        Self {
            constraints: Vec::new(),
        }
    }

    /// Add a constraint, replacing any existing one with the same key
    pub fn with(mut self, constraint: Constraint) -> Self {
        match self
            .constraints
            .iter_mut()
            .find(|existing| existing.key() == constraint.key())
        {
            Some(existing) => *existing = constraint,
            None => self.constraints.push(constraint),
        }
        self
    }

    pub fn allowed_protocols<I, S>(self, protocols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with(Constraint::AllowedProtocols(collect(protocols)))
    }

    pub fn allowed_ports<I, S>(self, ports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with(Constraint::AllowedPorts(collect(ports)))
    }

    pub fn allowed_domains<I, S>(self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with(Constraint::AllowedDomains(collect(domains)))
    }

    pub fn contain_fragment(self, allowed: bool) -> Self {
        self.with(Constraint::ContainFragment(allowed))
    }

    pub fn contain_path(self, allowed: bool) -> Self {
        self.with(Constraint::ContainPath(allowed))
    }

    pub fn contain_query(self, allowed: bool) -> Self {
        self.with(Constraint::ContainQuery(allowed))
    }

    /// Require a length above `min`
    pub fn longer_than(self, min: f64) -> Self {
        self.with(Constraint::Between(Length::Above(min)))
    }

    /// Require a length strictly between `min` and `max`
    pub fn between(self, min: f64, max: f64) -> Self {
        self.with(Constraint::Between(Length::Between(min, max)))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Constraint> {
        self.constraints.iter()
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Parse a JSON constraint object; null is an empty set
    pub fn from_json(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Self::new()),
            Value::Object(map) => {
                let mut set = Self::new();
                for (key, value) in map {
                    set = set.with(Constraint::from_entry(key, value)?);
                }
                Ok(set)
            }
            _ => Err(Fault::argument_type("constraints must be an object")),
        }
    }
}

fn collect<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Into::into).collect()
}

impl<'a> IntoIterator for &'a UrlConstraints {
    type Item = &'a Constraint;
    type IntoIter = std::slice::Iter<'a, Constraint>;

    fn into_iter(self) -> Self::IntoIter {
        self.constraints.iter()
    }
}

impl TryFrom<&Value> for UrlConstraints {
    type Error = Fault;

    fn try_from(value: &Value) -> Result<Self> {
        Self::from_json(value)
    }
}
