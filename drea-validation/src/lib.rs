//! Validation toolkit for drea
//!
//! Provides rule-based value validation, built-in validators, value
//! normalization and schema-driven models.
//!
//! # Examples
//!
//! ## Rules
//!
//! ```
//! use drea_validation::{Rule, RuleSet, validate_entry};
//! use serde_json::json;
//!
//! let rules = RuleSet::new()
//!     .add(Rule::regex("^[A-Za-z ]+$", "must contain only letters").unwrap())
//!     .add(Rule::predicate(|v| v.as_str().is_some_and(|s| s.len() >= 5), "too small"));
//!
//! let result = validate_entry(&json!("Fon Bless"), &rules).unwrap();
//! assert!(result.is_valid());
//!
//! let result = validate_entry(&json!("Fon"), &rules).unwrap();
//! assert_eq!(result.error(), Some("too small"));
//! ```
//!
//! ## Built-in Validators
//!
//! ```
//! use drea_validation::{is_email_valid, is_password_valid};
//!
//! assert!(is_email_valid("jane@example.com").unwrap().is_valid());
//! assert_eq!(
//!     is_password_valid("abcdefg1!").unwrap().error(),
//!     Some("Password must contain atleast an uppercase letter")
//! );
//! ```
//!
//! ## Custom Model
//!
//! ```
//! use drea_validation::{CustomModel, FaultKind, Rule, Schema};
//! use serde_json::{Value, json};
//!
//! let schema = Schema::new()
//!     .field("name", Rule::predicate(Value::is_string, "Name must be a string"))
//!     .field("age", Rule::predicate(Value::is_number, "Age must be a number"));
//!
//! let model = CustomModel::new(schema).unwrap();
//! assert!(model.validate(&json!({ "name": "Bless", "age": 20 })).unwrap().is_valid());
//!
//! let fault = model.validate(&json!({ "email": "x" })).unwrap_err();
//! assert_eq!(fault.root_kind(), FaultKind::UnknownKey);
//! ```

pub mod errors;
mod model;
mod normalizer;
mod options;
mod rules;
mod schema;
mod validators;

pub use errors::{Fault, FaultKind};
pub use model::*;
pub use normalizer::*;
pub use options::*;
pub use rules::*;
pub use schema::*;
pub use validators::*;
