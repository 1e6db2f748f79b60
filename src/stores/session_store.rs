use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

use crate::errors::InternalError;
use crate::types::db::session::{self, Entity as Session};

pub struct SessionStore {
    db: DatabaseConnection,
}

impl SessionStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn insert(
        &self,
        token_hash: String,
        user_id: String,
        expires_at: i64,
    ) -> Result<(), InternalError> {
        let model = session::ActiveModel {
            token_hash: Set(token_hash),
            user_id: Set(user_id),
            expires_at: Set(expires_at),
            created_at: Set(Utc::now().timestamp()),
        };
        model
            .insert(&self.db)
            .await
            .map_err(|e| InternalError::database("insert_session", e))?;
        Ok(())
    }

    /// Look up an unexpired session by token hash.
    pub async fn find_valid(
        &self,
        token_hash: &str,
    ) -> Result<Option<session::Model>, InternalError> {
        let session = Session::find_by_id(token_hash)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_session", e))?;

        let now = Utc::now().timestamp();
        Ok(session.filter(|s| s.expires_at > now))
    }

    pub async fn delete(&self, token_hash: &str) -> Result<(), InternalError> {
        Session::delete_by_id(token_hash)
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_session", e))?;
        Ok(())
    }
}
