// Settings validation

use crate::{ConfigError, Result};

/// Trait for validating settings after load
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Reusable settings checks
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate that a number is within range, bounds inclusive
    pub fn in_range<T>(value: T, min: T, max: T, field: &str) -> Result<()>
    where
        T: PartialOrd + std::fmt::Display,
    {
        if value < min || value > max {
            return Err(ConfigError::ValidationError(format!(
                "{} must be between {} and {}, got {}",
                field, min, max, value
            )));
        }
        Ok(())
    }
}
