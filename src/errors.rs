use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone)]
pub enum SnipError {
    InvalidInput(String),
    IdentifierCollision(String),
    NotFound(String),
    StoreUnavailable(String),
}

impl SnipError {
    pub fn code(&self) -> &'static str {
        match self {
            SnipError::InvalidInput(_) => "E001",
            SnipError::IdentifierCollision(_) => "E002",
            SnipError::NotFound(_) => "E003",
            SnipError::StoreUnavailable(_) => "E004",
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            SnipError::InvalidInput(_) => "Invalid Input",
            SnipError::IdentifierCollision(_) => "Identifier Collision",
            SnipError::NotFound(_) => "Resource Not Found",
            SnipError::StoreUnavailable(_) => "Record Store Unavailable",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            SnipError::InvalidInput(msg) => msg,
            SnipError::IdentifierCollision(msg) => msg,
            SnipError::NotFound(msg) => msg,
            SnipError::StoreUnavailable(msg) => msg,
        }
    }

    /// HTTP status the API layer answers with for this error kind.
    ///
    /// `IdentifierCollision` and `StoreUnavailable` are both 5xx; the latter
    /// gets 503 so infrastructure-level retries can tell the transient case
    /// apart from an unlucky collision.
    pub fn status_code(&self) -> StatusCode {
        match self {
            SnipError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            SnipError::IdentifierCollision(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SnipError::NotFound(_) => StatusCode::NOT_FOUND,
            SnipError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl fmt::Display for SnipError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error_type(), self.message())
    }
}

impl std::error::Error for SnipError {}

// Convenience constructors
impl SnipError {
    pub fn invalid_input<T: Into<String>>(msg: T) -> Self {
        SnipError::InvalidInput(msg.into())
    }

    pub fn identifier_collision<T: Into<String>>(msg: T) -> Self {
        SnipError::IdentifierCollision(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        SnipError::NotFound(msg.into())
    }

    pub fn store_unavailable<T: Into<String>>(msg: T) -> Self {
        SnipError::StoreUnavailable(msg.into())
    }
}

impl From<redis::RedisError> for SnipError {
    fn from(err: redis::RedisError) -> Self {
        SnipError::StoreUnavailable(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SnipError>;
