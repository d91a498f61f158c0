//! Error types for the trip booking service.

/// Domain-level errors (business rule violations).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Invalid trip record: {0}")]
    InvalidTrip(String),
}

/// Catalog-level errors (trip store failures).
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error(transparent)]
    InvalidRecord(#[from] DomainError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Store request failed: {0}")]
    Transport(String),

    #[error("Unexpected store response ({status}): {message}")]
    UnexpectedResponse { status: u16, message: String },
}

/// Payment gateway errors.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The provider answered with an error; the message is the provider's own.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("{0}")]
    Transport(String),

    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes. The display text is the exact
/// message returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    LookupFailed(String),

    #[error("{0}")]
    ProviderError(String),

    #[error("Method not allowed")]
    MethodNotAllowed,
}

impl AppError {
    pub fn status_code(&self) -> u16 {
        match self {
            AppError::BadRequest(_) => 400,
            AppError::NotFound(_) => 404,
            AppError::MethodNotAllowed => 405,
            AppError::LookupFailed(_) | AppError::ProviderError(_) => 500,
        }
    }
}

impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        AppError::ProviderError(err.to_string())
    }
}
