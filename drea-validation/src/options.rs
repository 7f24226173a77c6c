// Model configuration

use serde::{Deserialize, Serialize};

/// How [`CustomModel::extend`](crate::CustomModel::extend) handles a
/// duplicate key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtendMode {
    /// Check every key before inserting any; a duplicate leaves the schema
    /// untouched
    #[default]
    Atomic,
    /// Insert keys one by one; fields added before the duplicate are kept
    Sequential,
}

/// Options for schema models
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelOptions {
    pub extend_mode: ExtendMode,
}

impl ModelOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the extend mode
    pub fn extend_mode(mut self, mode: ExtendMode) -> Self {
        self.extend_mode = mode;
        self
    }
}
