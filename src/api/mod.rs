// API layer - HTTP endpoints
pub mod admin;
pub mod auth;
pub mod billing;
pub mod creator;
pub mod health;
pub mod library;
pub mod samples;

pub use admin::AdminApi;
pub use auth::AuthApi;
pub use billing::BillingApi;
pub use creator::CreatorApi;
pub use health::HealthApi;
pub use library::LibraryApi;
pub use samples::SamplesApi;

use poem_openapi::auth::Bearer;
use poem_openapi::SecurityScheme;

use crate::app_data::AppData;
use crate::errors::ApiError;
use crate::types::internal::{Capability, CurrentUser};

/// Opaque session token issued by POST /auth/session
#[derive(SecurityScheme)]
#[oai(ty = "bearer")]
pub struct SessionAuth(pub Bearer);

/// Resolve the bearer token to the authenticated user.
pub async fn authenticate(app: &AppData, auth: &SessionAuth) -> Result<CurrentUser, ApiError> {
    app.session_service
        .authenticate(&auth.0.token)
        .await
        .map_err(ApiError::from_internal_error)
}

/// Resolve a raw Authorization header on endpoints where a session is
/// optional. A missing header is anonymous; a present but invalid token is
/// still a 401.
pub async fn authenticate_optional(
    app: &AppData,
    authorization: Option<&str>,
) -> Result<Option<CurrentUser>, ApiError> {
    let Some(raw) = authorization else {
        return Ok(None);
    };
    let token = raw
        .strip_prefix("Bearer ")
        .or_else(|| raw.strip_prefix("bearer "))
        .unwrap_or(raw)
        .trim();

    let current = app
        .session_service
        .authenticate(token)
        .await
        .map_err(ApiError::from_internal_error)?;
    Ok(Some(current))
}

/// Single role gate used by every protected endpoint.
pub fn require(user: &CurrentUser, capability: Capability) -> Result<(), ApiError> {
    if user.role.allows(capability) {
        return Ok(());
    }
    let message = match capability {
        Capability::UploadPacks => {
            if user.user.role == "creator" {
                "Creator account not approved yet"
            } else {
                "Requires creator role"
            }
        }
        Capability::ManagePlatform => "Requires admin role",
        Capability::BypassPaywall => "You don't have access to this pack",
    };
    Err(ApiError::forbidden(message))
}
