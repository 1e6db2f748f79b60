use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::types::db::favorite::{self, Entity as Favorite};

pub struct FavoriteStore {
    db: DatabaseConnection,
}

impl FavoriteStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Favorite a pack. Idempotent on the unique (user, pack) pair;
    /// returns whether a new row was inserted.
    pub async fn add(&self, user_id: &str, pack_id: &str) -> Result<bool, InternalError> {
        let model = favorite::ActiveModel {
            id: Set(format!("fav_{}", Uuid::new_v4().simple())),
            user_id: Set(user_id.to_string()),
            pack_id: Set(pack_id.to_string()),
            created_at: Set(Utc::now().timestamp()),
        };

        let result = Favorite::insert(model)
            .on_conflict(
                OnConflict::columns([favorite::Column::UserId, favorite::Column::PackId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec(&self.db)
            .await;

        match result {
            Ok(_) => Ok(true),
            Err(DbErr::RecordNotInserted) => Ok(false),
            Err(e) => Err(InternalError::database("add_favorite", e)),
        }
    }

    /// Unfavorite a pack. Unknown pairs are a no-op.
    pub async fn remove(&self, user_id: &str, pack_id: &str) -> Result<(), InternalError> {
        Favorite::delete_many()
            .filter(favorite::Column::UserId.eq(user_id))
            .filter(favorite::Column::PackId.eq(pack_id))
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("remove_favorite", e))?;
        Ok(())
    }

    pub async fn list_pack_ids(&self, user_id: &str) -> Result<Vec<String>, InternalError> {
        let favorites = Favorite::find()
            .filter(favorite::Column::UserId.eq(user_id))
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_favorites", e))?;
        Ok(favorites.into_iter().map(|f| f.pack_id).collect())
    }
}
