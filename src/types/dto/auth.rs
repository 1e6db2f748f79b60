use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::user;

/// Public view of a user account
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID
    pub user_id: String,

    /// Email address
    pub email: String,

    /// Display name
    pub name: String,

    /// Avatar URL, if the auth provider supplied one
    pub picture: Option<String>,

    /// Role: "user", "creator" or "admin"
    pub role: String,

    /// Whether a creator account has been approved by an admin
    pub creator_approved: bool,

    /// Payout frequency: "weekly" or "monthly"
    pub payout_frequency: String,

    /// Account creation time (Unix timestamp)
    pub created_at: i64,
}

impl From<user::Model> for UserResponse {
    fn from(u: user::Model) -> Self {
        Self {
            user_id: u.id,
            email: u.email,
            name: u.name,
            picture: u.picture,
            role: u.role,
            creator_approved: u.creator_approved,
            payout_frequency: u.payout_frequency,
            created_at: u.created_at,
        }
    }
}

/// Response model for session creation
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    /// Opaque bearer token for subsequent requests
    pub session_token: String,

    /// Number of seconds until the session expires
    pub expires_in: i64,

    /// The authenticated user
    pub user: UserResponse,
}
