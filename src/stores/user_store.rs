use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::types::db::user::{self, Entity as User};
use crate::types::internal::Role;

/// Profile fields supplied by the auth broker at registration.
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub picture: Option<String>,
    pub role: Role,
}

pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, user_id: &str) -> Result<Option<user::Model>, InternalError> {
        User::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_user_by_id", e))
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>, InternalError> {
        User::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_user_by_email", e))
    }

    pub async fn insert(&self, new_user: NewUser) -> Result<user::Model, InternalError> {
        let (role, creator_approved) = new_user.role.to_db();
        let model = user::ActiveModel {
            id: Set(format!("user_{}", Uuid::new_v4().simple())),
            email: Set(new_user.email),
            name: Set(new_user.name),
            picture: Set(new_user.picture),
            role: Set(role.to_string()),
            creator_approved: Set(creator_approved),
            payout_frequency: Set("monthly".to_string()),
            created_at: Set(Utc::now().timestamp()),
        };

        model
            .insert(&self.db)
            .await
            .map_err(|e| InternalError::database("insert_user", e))
    }

    /// Refresh broker-provided profile fields on repeat login.
    pub async fn update_profile(
        &self,
        existing: user::Model,
        name: String,
        picture: Option<String>,
    ) -> Result<user::Model, InternalError> {
        let mut model: user::ActiveModel = existing.into();
        model.name = Set(name);
        model.picture = Set(picture);
        model
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("update_user_profile", e))
    }

    pub async fn set_role(&self, user_id: &str, role: Role) -> Result<(), InternalError> {
        let user = self
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| InternalError::UserNotFound(user_id.to_string()))?;

        let (role_name, creator_approved) = role.to_db();
        let mut model: user::ActiveModel = user.into();
        model.role = Set(role_name.to_string());
        model.creator_approved = Set(creator_approved);
        model
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("set_user_role", e))?;

        Ok(())
    }

    pub async fn set_payout_frequency(
        &self,
        user_id: &str,
        frequency: &str,
    ) -> Result<(), InternalError> {
        let user = self
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| InternalError::UserNotFound(user_id.to_string()))?;

        let mut model: user::ActiveModel = user.into();
        model.payout_frequency = Set(frequency.to_string());
        model
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("set_payout_frequency", e))?;

        Ok(())
    }

    pub async fn list_all(&self) -> Result<Vec<user::Model>, InternalError> {
        User::find()
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_users", e))
    }

    /// Creators who applied and are awaiting admin approval.
    pub async fn list_pending_creators(&self) -> Result<Vec<user::Model>, InternalError> {
        User::find()
            .filter(user::Column::Role.eq("creator"))
            .filter(user::Column::CreatorApproved.eq(false))
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_pending_creators", e))
    }

    pub async fn count_users(&self) -> Result<u64, InternalError> {
        User::find()
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_users", e))
    }

    pub async fn count_approved_creators(&self) -> Result<u64, InternalError> {
        User::find()
            .filter(user::Column::Role.eq("creator"))
            .filter(user::Column::CreatorApproved.eq(true))
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_approved_creators", e))
    }
}
