//! Settings for drea validation policies
//!
//! Loads the tunable parts of drea, the custom model extend mode and the
//! URL pass threshold, from JSON or TOML files. Every section and field is
//! optional and falls back to its default.
//!
//! ```
//! use drea_config::{FileFormat, Settings};
//! use drea_validation::ExtendMode;
//!
//! let settings = Settings::parse(
//!     r#"
//!         [validation]
//!         extend_mode = "sequential"
//!
//!         [url]
//!         min_passing_checks = 1
//!     "#,
//!     FileFormat::Toml,
//! )
//! .unwrap();
//!
//! assert_eq!(settings.validation.extend_mode, ExtendMode::Sequential);
//! assert_eq!(settings.url.min_passing_checks, 1);
//! ```

pub mod error;
pub mod loader;
pub mod validation;

pub use error::{ConfigError, Result};
pub use loader::{ConfigLoader, FileFormat};
pub use validation::{ConfigValidator, Validate};

use drea_url::{CONSTRAINT_KEYS, UrlPolicy};
use drea_validation::ModelOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Custom model options
    pub validation: ModelOptions,
    /// URL validator policy
    pub url: UrlPolicy,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and validate settings, detecting the format from the extension
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let value = ConfigLoader::auto(path)?.load_file(path)?;
        Self::from_value(value)
    }

    /// Parse and validate settings text
    pub fn parse(content: &str, format: FileFormat) -> Result<Self> {
        let value = ConfigLoader::new(format).parse(content)?;
        Self::from_value(value)
    }

    /// Deserialize and validate an already parsed document
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let settings: Settings = serde_json::from_value(value)
            .map_err(|e| ConfigError::ParseError(format!("Invalid settings: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        ConfigValidator::in_range(
            self.url.min_passing_checks,
            1,
            CONSTRAINT_KEYS.len(),
            "url.min_passing_checks",
        )
    }
}
