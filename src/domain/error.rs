use thiserror::Error;

/// A request that broke one of the validation rules. Only the first
/// failing rule is reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: &'static str,
}

impl ValidationError {
    pub fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

#[derive(Debug, Error)]
pub enum AuthorizationError {
    /// The bank refused the request itself (malformed card, etc.).
    #[error("authorization rejected: {0}")]
    Rejected(String),

    #[error("authorization service unavailable")]
    Unavailable,

    #[error("authorization internal error: {0}")]
    Internal(String),

    #[error("unexpected authorization response: status {0}")]
    Unexpected(u16),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("identifier generation: {0}")]
    IdGeneration(String),

    #[error("storage backend: {0}")]
    Backend(String),
}

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("payment validation: {0}")]
    Validation(#[from] ValidationError),

    #[error("authorize payment: {0}")]
    Authorization(#[from] AuthorizationError),

    #[error("persist payment: {0}")]
    Storage(#[from] StoreError),

    #[error("payment not found")]
    NotFound,
}

impl PaymentError {
    /// Whether the caller may safely resubmit the whole create.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Authorization(AuthorizationError::Unavailable))
    }
}
