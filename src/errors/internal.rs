use thiserror::Error;

/// Internal error type for store, service and provider operations.
///
/// Not exposed via API - endpoints must convert to ApiError through
/// `ApiError::from_internal_error`, which logs details and hides them
/// from clients.
#[derive(Error, Debug)]
pub enum InternalError {
    #[error("database error during {operation}: {source}")]
    Database {
        operation: String,
        #[source]
        source: sea_orm::DbErr,
    },

    #[error("auth broker rejected session exchange: {0}")]
    BrokerRejected(String),

    #[error("auth broker request failed: {0}")]
    Broker(String),

    #[error("payment gateway request failed: {0}")]
    Gateway(String),

    #[error("webhook signature verification failed")]
    WebhookSignature,

    #[error("blob store error for {key}: {source}")]
    Blob {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("session invalid or expired")]
    InvalidSession,

    #[error("user not found: {0}")]
    UserNotFound(String),

    #[error("pack not found: {0}")]
    PackNotFound(String),

    #[error("checkout session not found: {0}")]
    CheckoutNotFound(String),

    #[error("invitation already exists for {0}")]
    DuplicateInvitation(String),

    #[error("user already has an active subscription")]
    AlreadySubscribed,

    #[error("validation failed: {0}")]
    Validation(String),
}

impl InternalError {
    pub fn database(operation: &str, source: sea_orm::DbErr) -> Self {
        InternalError::Database {
            operation: operation.to_string(),
            source,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        InternalError::Validation(message.into())
    }
}
