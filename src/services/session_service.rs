use std::sync::Arc;

use base64::{engine::general_purpose, Engine as _};
use chrono::Utc;
use rand::RngCore;

use crate::errors::InternalError;
use crate::services::crypto;
use crate::stores::{SessionStore, UserStore};
use crate::types::internal::CurrentUser;

/// Issues and validates opaque bearer session tokens. Tokens are minted
/// locally rather than reusing the broker's token, and only their SHA-256
/// digests are persisted.
pub struct SessionService {
    session_store: Arc<SessionStore>,
    user_store: Arc<UserStore>,
    ttl_seconds: i64,
}

impl SessionService {
    pub fn new(
        session_store: Arc<SessionStore>,
        user_store: Arc<UserStore>,
        ttl_days: i64,
    ) -> Self {
        Self {
            session_store,
            user_store,
            ttl_seconds: ttl_days * 24 * 60 * 60,
        }
    }

    /// Create a session for the user and return (token, expires_in).
    pub async fn create_session(&self, user_id: &str) -> Result<(String, i64), InternalError> {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        let token = general_purpose::STANDARD.encode(bytes);

        let expires_at = Utc::now().timestamp() + self.ttl_seconds;
        self.session_store
            .insert(crypto::sha256_hex(&token), user_id.to_string(), expires_at)
            .await?;

        Ok((token, self.ttl_seconds))
    }

    /// Resolve a bearer token to the authenticated user.
    pub async fn authenticate(&self, token: &str) -> Result<CurrentUser, InternalError> {
        let session = self
            .session_store
            .find_valid(&crypto::sha256_hex(token))
            .await?
            .ok_or(InternalError::InvalidSession)?;

        let user = self
            .user_store
            .find_by_id(&session.user_id)
            .await?
            .ok_or(InternalError::InvalidSession)?;

        Ok(CurrentUser::new(user))
    }

    /// Drop the session for this token. Unknown tokens are a no-op.
    pub async fn logout(&self, token: &str) -> Result<(), InternalError> {
        self.session_store
            .delete(&crypto::sha256_hex(token))
            .await
    }
}
