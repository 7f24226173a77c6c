// Schema-driven models

use crate::errors::{Fault, Result};
use crate::normalizer::text_form;
use crate::options::{ExtendMode, ModelOptions};
use crate::rules::{Rule, validate_rule};
use crate::schema::Schema;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value, json};
use tracing::{debug, warn};

/// A field rejected by a model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldFailure {
    pub status: bool,
    pub error: String,
    /// The value as supplied
    pub value: Value,
}

/// Failed fields keyed by name, in validation order
pub type FieldFailures = IndexMap<String, FieldFailure>;

/// Result of validating a model
#[derive(Debug, Clone, PartialEq)]
pub enum ModelOutcome {
    /// Every field passed; carries the validated data and the key it is
    /// reported under
    Valid {
        data: Map<String, Value>,
        key: &'static str,
    },
    /// At least one field failed
    Invalid(FieldFailures),
}

impl ModelOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ModelOutcome::Valid { .. })
    }

    /// Validated data, if every field passed
    pub fn data(&self) -> Option<&Map<String, Value>> {
        match self {
            ModelOutcome::Valid { data, .. } => Some(data),
            ModelOutcome::Invalid(_) => None,
        }
    }

    /// Failed fields, if any field failed
    pub fn failures(&self) -> Option<&FieldFailures> {
        match self {
            ModelOutcome::Valid { .. } => None,
            ModelOutcome::Invalid(failures) => Some(failures),
        }
    }

    /// Convert to JSON representation.
    ///
    /// A valid outcome becomes `{"status": true, "error": null, <key>: {..}}`
    /// where the key is `data` for [`ClassicModel`] and `value` for
    /// [`CustomModel`]. An invalid one is a map of field name to
    /// `{status, error, value}`.
    pub fn to_json(&self) -> Value {
        match self {
            ModelOutcome::Valid { data, key } => {
                let mut envelope = Map::new();
                envelope.insert("status".to_string(), Value::Bool(true));
                envelope.insert("error".to_string(), Value::Null);
                envelope.insert(key.to_string(), Value::Object(data.clone()));
                Value::Object(envelope)
            }
            ModelOutcome::Invalid(failures) => Value::Object(
                failures
                    .iter()
                    .map(|(field, failure)| {
                        (
                            field.clone(),
                            json!({
                                "status": failure.status,
                                "error": failure.error,
                                "value": failure.value,
                            }),
                        )
                    })
                    .collect(),
            ),
        }
    }
}

fn collect_failures<'a, I>(fields: I) -> Result<FieldFailures>
where
    I: IntoIterator<Item = (&'a str, &'a Value, &'a Rule)>,
{
    let mut failures = FieldFailures::new();

    for (field, value, rule) in fields {
        let result = validate_rule(value, rule)?;
        if let Some(error) = result.error() {
            debug!(field, error, "field failed validation");
            failures.insert(
                field.to_string(),
                FieldFailure {
                    status: false,
                    error: error.to_string(),
                    value: value.clone(),
                },
            );
        }
    }

    Ok(failures)
}

// ============================================================================
// Classic Model
// ============================================================================

/// Fields recognized by [`ClassicModel`], in validation order
pub const CLASSIC_FIELDS: [&str; 4] = ["username", "email", "password", "phonenumber"];

/// Symbols the classic password policy accepts
pub const CLASSIC_PASSWORD_SYMBOLS: &str = "!@?#$%&*";

static CLASSIC_EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._%+-]{1,64}@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap());

fn email_policy(value: &Value) -> bool {
    let text = text_form(value);
    let local = text.split('@').next().unwrap_or_default();

    CLASSIC_EMAIL_REGEX.is_match(&text) && !local.starts_with('.') && !local.ends_with('.')
}

fn password_policy(value: &Value) -> bool {
    let text = text_form(value);
    let is_symbol = |c: char| CLASSIC_PASSWORD_SYMBOLS.contains(c);

    text.chars().count() >= 8
        && text.chars().all(|c| c.is_ascii_alphanumeric() || is_symbol(c))
        && text.chars().any(|c| c.is_ascii_lowercase())
        && text.chars().any(|c| c.is_ascii_uppercase())
        && text.chars().any(|c| c.is_ascii_digit())
        && text.chars().any(is_symbol)
}

static CLASSIC_SCHEMA: Lazy<Schema> = Lazy::new(|| {
    Schema::new()
        .field(
            "username",
            Rule::pattern(
                Regex::new(r"^[A-Za-z\s'-]{5,40}$").unwrap(),
                "Username must contain between 5 to 40 letters only",
            ),
        )
        .field(
            "email",
            Rule::predicate(
                email_policy,
                "Invalid Email address. Email must be of the form xyz@domain.tld",
            ),
        )
        .field(
            "password",
            Rule::predicate(
                password_policy,
                "Password should be 8 characters and above containing atleast an uppercase (A-Z), \
                 a lowercase (a-z), a number (0-9), and a special character symbol (!@#$%&*)",
            ),
        )
        .field(
            "phonenumber",
            Rule::pattern(
                Regex::new(r"^[0-9]{4,15}$").unwrap(),
                "Phonenumber must be between 4 to 15 digits",
            ),
        )
});

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Model over a fixed set of user fields.
///
/// Any subset of `username`, `email`, `password` and `phonenumber` may be
/// supplied. Absent or falsy fields are dropped at construction and never
/// validated.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassicModel {
    fields: Map<String, Value>,
}

impl ClassicModel {
    /// Create a model from a JSON object; unrecognized keys are ignored
    pub fn new(input: &Value) -> Result<Self> {
        let map = match input {
            Value::Null => {
                return Err(Fault::null_value(
                    "Data object cannot be null or undefined",
                ));
            }
            Value::Object(map) => map,
            _ => return Err(Fault::argument_type("Data object must be an object")),
        };

        let fields = CLASSIC_FIELDS
            .iter()
            .filter_map(|&name| {
                map.get(name)
                    .filter(|value| is_truthy(value))
                    .map(|value| (name.to_string(), value.clone()))
            })
            .collect();

        Ok(Self { fields })
    }

    /// The present fields
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Validate every present field against its fixed rule
    pub fn validate(&self) -> Result<ModelOutcome> {
        let fields = self.fields.iter().filter_map(|(name, value)| {
            CLASSIC_SCHEMA
                .get(name)
                .map(|rule| (name.as_str(), value, rule))
        });

        let failures = collect_failures(fields).map_err(|fault| {
            warn!(code = fault.code(), error = %fault, "classic model validation aborted");
            fault.into_validation()
        })?;

        debug!(
            fields = self.fields.len(),
            failures = failures.len(),
            "classic model validated"
        );

        if failures.is_empty() {
            Ok(ModelOutcome::Valid {
                data: self.fields.clone(),
                key: "data",
            })
        } else {
            Ok(ModelOutcome::Invalid(failures))
        }
    }
}

// ============================================================================
// Custom Model
// ============================================================================

/// Model over a caller-defined schema.
///
/// Data passed to [`validate`](CustomModel::validate) may only use keys the
/// schema defines. The schema is owned by the model and changes only through
/// [`extend`](CustomModel::extend), [`remove`](CustomModel::remove) and
/// [`swap`](CustomModel::swap).
#[derive(Debug, Clone)]
pub struct CustomModel {
    schema: Schema,
    options: ModelOptions,
}

impl CustomModel {
    /// Create a model from a non-empty schema
    pub fn new(schema: Schema) -> Result<Self> {
        Self::with_options(schema, ModelOptions::default())
    }

    /// Create a model with explicit options
    pub fn with_options(schema: Schema, options: ModelOptions) -> Result<Self> {
        if schema.is_empty() {
            return Err(Fault::argument_type(
                "schema restriction model must define at least one field",
            ));
        }
        Ok(Self { schema, options })
    }

    /// Create a model from a JSON schema document, see [`Schema::from_json`]
    pub fn from_json(value: &Value) -> Result<Self> {
        Self::new(Schema::from_json(value)?)
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn options(&self) -> &ModelOptions {
        &self.options
    }

    /// Validate a data object against the schema.
    ///
    /// Every fault raised while validating, including an unknown key, is
    /// reported as a validation fault wrapping the original one.
    pub fn validate(&self, data: &Value) -> Result<ModelOutcome> {
        self.check(data).map_err(|fault| {
            warn!(code = fault.code(), error = %fault, "custom model validation aborted");
            fault.into_validation()
        })
    }

    fn check(&self, data: &Value) -> Result<ModelOutcome> {
        let map = match data {
            Value::Null => {
                return Err(Fault::null_value(
                    "Data object cannot be null or undefined",
                ));
            }
            Value::Object(map) => map,
            _ => return Err(Fault::argument_type("Data object must be an object")),
        };

        if self.schema.is_empty() {
            return Err(Fault::validation(
                "cannot find your schema restriction model",
            ));
        }
        if map.is_empty() {
            return Err(Fault::validation(
                "Data object to be validated cannot be empty",
            ));
        }

        let fields = map
            .iter()
            .map(|(key, value)| {
                self.schema
                    .get(key)
                    .map(|rule| (key.as_str(), value, rule))
                    .ok_or_else(|| {
                        Fault::unknown_key(format!(
                            "Unknown key '{}' not found in schema restriction",
                            key
                        ))
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        let failures = collect_failures(fields)?;
        debug!(
            fields = map.len(),
            failures = failures.len(),
            "custom model validated"
        );

        if failures.is_empty() {
            Ok(ModelOutcome::Valid {
                data: map.clone(),
                key: "value",
            })
        } else {
            Ok(ModelOutcome::Invalid(failures))
        }
    }

    /// Add new fields to the schema, faulting on a key that already exists.
    ///
    /// In [`ExtendMode::Atomic`] the schema is unchanged when the call
    /// faults. In [`ExtendMode::Sequential`] fields inserted before the
    /// duplicate remain.
    pub fn extend(&mut self, fields: Schema) -> Result<()> {
        if self.options.extend_mode == ExtendMode::Atomic {
            if let Some(duplicate) = fields.keys().find(|key| self.schema.contains_key(key)) {
                return Err(Fault::duplicate_key(format!(
                    "Duplicate key '{}' already exists in schema",
                    duplicate
                )));
            }
        }

        let added = fields.len();
        for (name, rule) in fields {
            self.schema.insert(name, rule)?;
        }

        debug!(added, total = self.schema.len(), "schema extended");
        Ok(())
    }

    /// Remove a field from the schema, returning its rule
    pub fn remove(&mut self, key: &str) -> Result<Rule> {
        let rule = self.schema.remove(key)?;
        debug!(key, total = self.schema.len(), "schema field removed");
        Ok(rule)
    }

    /// Replace the whole schema, returning the previous one
    pub fn swap(&mut self, schema: Schema) -> Schema {
        std::mem::replace(&mut self.schema, schema)
    }
}
