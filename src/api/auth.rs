use std::sync::Arc;

use poem_openapi::param::Header;
use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::api::{authenticate, SessionAuth};
use crate::app_data::AppData;
use crate::errors::ApiError;
use crate::types::dto::auth::{SessionResponse, UserResponse};
use crate::types::dto::common::MessageResponse;

/// Authentication API endpoints
pub struct AuthApi {
    app: Arc<AppData>,
}

impl AuthApi {
    pub fn new(app: Arc<AppData>) -> Self {
        Self { app }
    }
}

/// API tags for authentication endpoints
#[derive(Tags)]
enum AuthTags {
    /// Authentication endpoints
    Authentication,
}

#[OpenApi(prefix_path = "/auth")]
impl AuthApi {
    /// Exchange a broker session id for a local session token
    ///
    /// The session id comes from the external auth provider's callback.
    /// First registration decides the role: the configured admin email
    /// becomes admin, a pending invitation promotes the registrant straight
    /// to approved creator.
    #[oai(path = "/session", method = "post", tag = "AuthTags::Authentication")]
    async fn create_session(
        &self,
        #[oai(name = "X-Session-ID")] session_id: Header<String>,
    ) -> Result<Json<SessionResponse>, ApiError> {
        let profile = self
            .app
            .auth_broker
            .session_data(&session_id.0)
            .await
            .map_err(ApiError::from_internal_error)?;

        let user = self
            .app
            .account_service
            .register_or_update(profile)
            .await
            .map_err(ApiError::from_internal_error)?;

        let (session_token, expires_in) = self
            .app
            .session_service
            .create_session(&user.id)
            .await
            .map_err(ApiError::from_internal_error)?;

        Ok(Json(SessionResponse {
            session_token,
            expires_in,
            user: user.into(),
        }))
    }

    /// Get the current user
    #[oai(path = "/me", method = "get", tag = "AuthTags::Authentication")]
    async fn me(&self, auth: SessionAuth) -> Result<Json<UserResponse>, ApiError> {
        let current = authenticate(&self.app, &auth).await?;
        Ok(Json(current.user.into()))
    }

    /// Logout and invalidate the session token
    #[oai(path = "/logout", method = "post", tag = "AuthTags::Authentication")]
    async fn logout(&self, auth: SessionAuth) -> Result<Json<MessageResponse>, ApiError> {
        self.app
            .session_service
            .logout(&auth.0.token)
            .await
            .map_err(ApiError::from_internal_error)?;
        Ok(Json(MessageResponse::new("Logged out successfully")))
    }
}
