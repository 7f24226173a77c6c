// drea - rule-based validation for untyped values
//
// This library validates JSON-like values against ordered rule lists,
// ships built-in validators and normalizers, and offers schema-driven
// models plus a URL validator with structural constraints.

// Re-export member crates
#[cfg(feature = "validation")]
pub use drea_validation as validation;

#[cfg(feature = "url")]
pub use drea_url as url;

#[cfg(feature = "config")]
pub use drea_config as config;

pub use serde_json::{Value, json};

// Prelude for common imports
pub mod prelude {
    #[cfg(feature = "validation")]
    pub use crate::validation::{
        ClassicModel,
        CustomModel,
        ExtendMode,
        Fault,
        FaultKind,
        ManyEntry,
        ModelOptions,
        ModelOutcome,
        Normalizer,
        Rule,
        RuleSet,
        Schema,
        ValidationResult,
        is_email_valid,
        is_password_valid,
        is_phone_number_valid,
        is_required,
        is_username_valid,
        validate_entry,
        validate_many,
    };

    #[cfg(feature = "url")]
    pub use crate::url::{UrlConstraints, UrlPolicy, UrlValidator};

    #[cfg(feature = "config")]
    pub use crate::config::{FileFormat, Settings};

    pub use crate::{Value, json};
}
