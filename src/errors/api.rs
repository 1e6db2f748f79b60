use poem_openapi::{payload::Json, ApiResponse};
use std::fmt;

use crate::errors::internal::InternalError;
use crate::types::dto::common::ErrorResponse;

/// Error taxonomy exposed on the wire. Every endpoint returns one of these;
/// the access resolver and revenue splitter are total functions and never
/// produce an error themselves.
#[derive(ApiResponse, Debug)]
pub enum ApiError {
    /// No session or the session is invalid/expired
    #[oai(status = 401)]
    Unauthorized(Json<ErrorResponse>),

    /// Authenticated but the role is insufficient
    #[oai(status = 403)]
    Forbidden(Json<ErrorResponse>),

    /// Pack, user or checkout session missing
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),

    /// Duplicate invitation or duplicate purchase attempt
    #[oai(status = 409)]
    Conflict(Json<ErrorResponse>),

    /// Malformed upload fields or request parameters
    #[oai(status = 400)]
    ValidationError(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    Internal(Json<ErrorResponse>),
}

impl ApiError {
    pub fn unauthorized() -> Self {
        ApiError::Unauthorized(Json(ErrorResponse {
            error: "unauthorized".to_string(),
            message: "Not authenticated".to_string(),
            status_code: 401,
        }))
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(Json(ErrorResponse {
            error: "forbidden".to_string(),
            message: message.into(),
            status_code: 403,
        }))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(Json(ErrorResponse {
            error: "not_found".to_string(),
            message: message.into(),
            status_code: 404,
        }))
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(Json(ErrorResponse {
            error: "conflict".to_string(),
            message: message.into(),
            status_code: 409,
        }))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::ValidationError(Json(ErrorResponse {
            error: "validation_error".to_string(),
            message: message.into(),
            status_code: 400,
        }))
    }

    /// Generic internal server error. Never carries internal details.
    fn internal_server_error() -> Self {
        ApiError::Internal(Json(ErrorResponse {
            error: "internal_error".to_string(),
            message: "An internal error occurred".to_string(),
            status_code: 500,
        }))
    }

    /// Convert InternalError to ApiError.
    ///
    /// This is the explicit conversion point from internal errors to API
    /// errors. Internal error details are logged but not exposed to clients.
    pub fn from_internal_error(err: InternalError) -> Self {
        match &err {
            InternalError::Database { operation, .. } => {
                tracing::error!("Database error in {}: {}", operation, err);
                Self::internal_server_error()
            }
            InternalError::Broker(_) | InternalError::Gateway(_) => {
                tracing::error!("Upstream provider error: {}", err);
                Self::internal_server_error()
            }
            InternalError::Blob { key, .. } => {
                tracing::error!("Blob store error for {}: {}", key, err);
                Self::internal_server_error()
            }
            InternalError::BrokerRejected(reason) => {
                tracing::debug!("Session exchange rejected: {}", reason);
                Self::unauthorized()
            }
            InternalError::WebhookSignature => {
                tracing::warn!("Webhook signature verification failed");
                Self::validation("Invalid webhook signature")
            }
            InternalError::InvalidSession => {
                tracing::debug!("Invalid or expired session");
                Self::unauthorized()
            }
            InternalError::UserNotFound(id) => {
                tracing::debug!("User not found: {}", id);
                Self::not_found("User not found")
            }
            InternalError::PackNotFound(id) => {
                tracing::debug!("Pack not found: {}", id);
                Self::not_found("Sample pack not found")
            }
            InternalError::CheckoutNotFound(id) => {
                tracing::debug!("Checkout session not found: {}", id);
                Self::not_found("Transaction not found")
            }
            InternalError::DuplicateInvitation(email) => {
                tracing::debug!("Duplicate invitation for {}", email);
                Self::conflict("Creator already invited")
            }
            InternalError::AlreadySubscribed => {
                tracing::debug!("Duplicate subscription attempt");
                Self::conflict("Already subscribed")
            }
            InternalError::Validation(message) => {
                tracing::debug!("Validation failed: {}", message);
                Self::validation(message.clone())
            }
        }
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        match self {
            ApiError::Unauthorized(json) => json.0.message.clone(),
            ApiError::Forbidden(json) => json.0.message.clone(),
            ApiError::NotFound(json) => json.0.message.clone(),
            ApiError::Conflict(json) => json.0.message.clone(),
            ApiError::ValidationError(json) => json.0.message.clone(),
            ApiError::Internal(json) => json.0.message.clone(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl From<InternalError> for ApiError {
    fn from(err: InternalError) -> Self {
        ApiError::from_internal_error(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_their_status() {
        let err = ApiError::from_internal_error(InternalError::PackNotFound("p1".into()));
        assert!(matches!(err, ApiError::NotFound(_)));

        let err = ApiError::from_internal_error(InternalError::DuplicateInvitation(
            "a@b.c".into(),
        ));
        assert!(matches!(err, ApiError::Conflict(_)));

        let err = ApiError::from_internal_error(InternalError::InvalidSession);
        assert!(matches!(err, ApiError::Unauthorized(_)));

        let err = ApiError::from_internal_error(InternalError::validation("price"));
        assert!(matches!(err, ApiError::ValidationError(_)));
    }

    #[test]
    fn infrastructure_errors_never_leak_details() {
        let err = ApiError::from_internal_error(InternalError::Broker("secret url".into()));
        assert!(matches!(err, ApiError::Internal(_)));
        assert!(!err.message().contains("secret url"));
    }
}
