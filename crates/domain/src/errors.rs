use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Unknown resource '{resource}'. Supported resources: {supported}")]
    UnknownResource { resource: String, supported: String },

    #[error("{0}")]
    Conflict(String),

    #[error("Method {method} not allowed on {resource}")]
    MethodNotAllowed { method: String, resource: String },

    #[error("Database connection failed: {0}")]
    StorageUnavailable(String),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Password hashing failed: {0}")]
    Hashing(String),
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// HTTP status code this error terminates the request with.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::NotFound(_) | Self::UnknownResource { .. } => 404,
            Self::MethodNotAllowed { .. } => 405,
            Self::Conflict(_) => 409,
            Self::StorageUnavailable(_) | Self::Repository(_) | Self::Hashing(_) => 500,
        }
    }
}
