use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::types::db::collection::{self, Entity as Collection};
use crate::types::db::collection_pack::{self, Entity as CollectionPack};

pub struct CollectionStore {
    db: DatabaseConnection,
}

impl CollectionStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        user_id: &str,
        name: &str,
        description: &str,
    ) -> Result<collection::Model, InternalError> {
        let model = collection::ActiveModel {
            id: Set(format!("col_{}", Uuid::new_v4().simple())),
            user_id: Set(user_id.to_string()),
            name: Set(name.to_string()),
            description: Set(description.to_string()),
            created_at: Set(Utc::now().timestamp()),
        };
        model
            .insert(&self.db)
            .await
            .map_err(|e| InternalError::database("insert_collection", e))
    }

    pub async fn list_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<collection::Model>, InternalError> {
        Collection::find()
            .filter(collection::Column::UserId.eq(user_id))
            .order_by_desc(collection::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_collections", e))
    }

    /// Look up a collection only if it belongs to this user. Membership
    /// changes always go through this check first.
    pub async fn find_owned(
        &self,
        collection_id: &str,
        user_id: &str,
    ) -> Result<Option<collection::Model>, InternalError> {
        Collection::find_by_id(collection_id)
            .filter(collection::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_collection", e))
    }

    /// Add a pack to a collection. Idempotent on the unique
    /// (collection, pack) pair.
    pub async fn add_pack(&self, collection_id: &str, pack_id: &str) -> Result<(), InternalError> {
        let model = collection_pack::ActiveModel {
            id: Set(format!("colp_{}", Uuid::new_v4().simple())),
            collection_id: Set(collection_id.to_string()),
            pack_id: Set(pack_id.to_string()),
            added_at: Set(Utc::now().timestamp()),
        };

        let result = CollectionPack::insert(model)
            .on_conflict(
                OnConflict::columns([
                    collection_pack::Column::CollectionId,
                    collection_pack::Column::PackId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec(&self.db)
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(DbErr::RecordNotInserted) => Ok(()),
            Err(e) => Err(InternalError::database("add_collection_pack", e)),
        }
    }

    /// Remove a pack from a collection. Unknown pairs are a no-op.
    pub async fn remove_pack(
        &self,
        collection_id: &str,
        pack_id: &str,
    ) -> Result<(), InternalError> {
        CollectionPack::delete_many()
            .filter(collection_pack::Column::CollectionId.eq(collection_id))
            .filter(collection_pack::Column::PackId.eq(pack_id))
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("remove_collection_pack", e))?;
        Ok(())
    }

    pub async fn list_pack_ids(&self, collection_id: &str) -> Result<Vec<String>, InternalError> {
        let members = CollectionPack::find()
            .filter(collection_pack::Column::CollectionId.eq(collection_id))
            .order_by_asc(collection_pack::Column::AddedAt)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_collection_packs", e))?;
        Ok(members.into_iter().map(|m| m.pack_id).collect())
    }
}
