// Field schemas

use crate::errors::{Fault, Result};
use crate::rules::Rule;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

/// Ordered mapping of field name to the rule that validates it.
///
/// Iteration follows insertion order.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: IndexMap<String, Rule>,
}

/// Serialized form of a rule inside a JSON schema document
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RuleDef {
    #[serde(default)]
    pattern: Option<String>,
    #[serde(default)]
    skip: bool,
    #[serde(alias = "errorMsg")]
    message: String,
}

impl RuleDef {
    fn into_rule(self, field: &str) -> Result<Rule> {
        match (self.pattern, self.skip) {
            (Some(pattern), false) => Rule::regex(&pattern, self.message),
            (None, true) => Ok(Rule::skip(self.message)),
            _ => Err(Fault::argument_type(format!(
                "rule for '{}' must be either a pattern or a skip marker",
                field
            ))),
        }
    }
}

impl Schema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self {
            fields: IndexMap::new(),
        }
    }

    /// Builder-style insert; replaces an existing rule of the same name
    pub fn field(mut self, name: impl Into<String>, rule: Rule) -> Self {
        self.fields.insert(name.into(), rule);
        self
    }

    /// Insert a field, faulting if the name is already present
    pub fn insert(&mut self, name: impl Into<String>, rule: Rule) -> Result<()> {
        let name = name.into();
        if self.fields.contains_key(&name) {
            return Err(Fault::duplicate_key(format!(
                "Duplicate key '{}' already exists in schema",
                name
            )));
        }
        self.fields.insert(name, rule);
        Ok(())
    }

    /// Remove a field, faulting if the name is absent
    pub fn remove(&mut self, name: &str) -> Result<Rule> {
        self.fields
            .shift_remove(name)
            .ok_or_else(|| Fault::missing_key(format!("key name '{}' not found", name)))
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.fields.get(name)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Rule)> {
        self.fields.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Build a schema from a JSON object of rule definitions.
    ///
    /// Each field maps to `{"pattern": "...", "message": "..."}` or
    /// `{"skip": true, "message": "..."}`. Predicates cannot be expressed in
    /// JSON and must be added in code.
    pub fn from_json(value: &Value) -> Result<Self> {
        let map = match value {
            Value::Null => {
                return Err(Fault::null_value(
                    "schema restriction model cannot be null or undefined",
                ));
            }
            Value::Object(map) => map,
            _ => return Err(Fault::argument_type("constructor must take an object")),
        };

        let mut schema = Schema::new();
        for (name, def) in map {
            let def: RuleDef = serde_json::from_value(def.clone()).map_err(|e| {
                Fault::argument_type(format!("invalid rule for '{}': {}", name, e))
            })?;
            schema.insert(name.clone(), def.into_rule(name)?)?;
        }

        Ok(schema)
    }
}

impl IntoIterator for Schema {
    type Item = (String, Rule);
    type IntoIter = indexmap::map::IntoIter<String, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl FromIterator<(String, Rule)> for Schema {
    fn from_iter<I: IntoIterator<Item = (String, Rule)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
