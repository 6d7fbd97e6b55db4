use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required identifier was empty. Programmer error, never retried.
    #[error("Precondition violated: {kind} must not be empty")]
    EmptyIdentifier { kind: &'static str },

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Not found: {entity} {value}")]
    NotFound { entity: &'static str, value: String },
}

impl DomainError {
    /// Whether this error is a violated construction precondition.
    pub fn is_precondition(&self) -> bool {
        matches!(self, DomainError::EmptyIdentifier { .. })
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
