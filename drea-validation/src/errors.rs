// Fault taxonomy

use thiserror::Error;

/// Result type for operations that can fault
pub type Result<T> = std::result::Result<T, Fault>;

/// A contract violation raised by a validation call.
///
/// Faults are distinct from validation failures: a failing value is reported
/// through [`ValidationResult`](crate::ValidationResult) or a model outcome,
/// while a fault aborts the current call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Fault {
    /// A value was null where a value is required
    #[error("Null value: {0}")]
    NullValue(String),

    /// An argument had the wrong type or shape
    #[error("Invalid argument type: {0}")]
    ArgumentType(String),

    /// A key is not part of the schema or constraint set
    #[error("Unknown key: {0}")]
    UnknownKey(String),

    /// A key already exists in the schema
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    /// A key to remove does not exist in the schema
    #[error("Missing key: {0}")]
    MissingKey(String),

    /// Outer fault raised by model and batch validation
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        #[source]
        source: Option<Box<Fault>>,
    },
}

/// Discriminant of a [`Fault`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultKind {
    NullValue,
    ArgumentType,
    UnknownKey,
    DuplicateKey,
    MissingKey,
    Validation,
}

impl FaultKind {
    /// Stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            FaultKind::NullValue => "ERR_NULL_VALUE",
            FaultKind::ArgumentType => "ERR_INVALID_ARGTYPE",
            FaultKind::UnknownKey => "ERR_UNKNOWN_KEY",
            FaultKind::DuplicateKey => "ERR_DUPLICATE_KEY",
            FaultKind::MissingKey => "ERR_MISSING_KEY",
            FaultKind::Validation => "ERR_VALIDATION",
        }
    }
}

impl Fault {
    /// Create a null value fault
    pub fn null_value<S: Into<String>>(msg: S) -> Self {
        Self::NullValue(msg.into())
    }

    /// Create an argument type fault
    pub fn argument_type<S: Into<String>>(msg: S) -> Self {
        Self::ArgumentType(msg.into())
    }

    /// Create an unknown key fault
    pub fn unknown_key<S: Into<String>>(msg: S) -> Self {
        Self::UnknownKey(msg.into())
    }

    /// Create a duplicate key fault
    pub fn duplicate_key<S: Into<String>>(msg: S) -> Self {
        Self::DuplicateKey(msg.into())
    }

    /// Create a missing key fault
    pub fn missing_key<S: Into<String>>(msg: S) -> Self {
        Self::MissingKey(msg.into())
    }

    /// Create a standalone validation fault
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Self::Validation {
            message: msg.into(),
            source: None,
        }
    }

    /// Wrap this fault into an outer validation fault.
    ///
    /// An already wrapped fault is returned unchanged.
    pub fn into_validation(self) -> Self {
        match self {
            Self::Validation { .. } => self,
            inner => Self::Validation {
                message: inner.description().to_string(),
                source: Some(Box::new(inner)),
            },
        }
    }

    /// Kind of this fault
    pub fn kind(&self) -> FaultKind {
        match self {
            Self::NullValue(_) => FaultKind::NullValue,
            Self::ArgumentType(_) => FaultKind::ArgumentType,
            Self::UnknownKey(_) => FaultKind::UnknownKey,
            Self::DuplicateKey(_) => FaultKind::DuplicateKey,
            Self::MissingKey(_) => FaultKind::MissingKey,
            Self::Validation { .. } => FaultKind::Validation,
        }
    }

    /// Kind of the innermost wrapped fault
    pub fn root_kind(&self) -> FaultKind {
        match self {
            Self::Validation {
                source: Some(inner),
                ..
            } => inner.root_kind(),
            other => other.kind(),
        }
    }

    /// Stable error code of this fault
    pub fn code(&self) -> &'static str {
        self.kind().code()
    }

    /// Message without the kind prefix
    pub fn description(&self) -> &str {
        match self {
            Self::NullValue(msg)
            | Self::ArgumentType(msg)
            | Self::UnknownKey(msg)
            | Self::DuplicateKey(msg)
            | Self::MissingKey(msg) => msg,
            Self::Validation { message, .. } => message,
        }
    }
}
