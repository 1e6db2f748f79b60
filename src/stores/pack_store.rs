use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::types::db::pack::{self, Entity as Pack};

/// Catalog listing filters. All optional; unset filters match everything.
#[derive(Debug, Default, Clone)]
pub struct PackFilter {
    pub category: Option<String>,
    pub creator_id: Option<String>,
    pub free_only: bool,
    pub featured_only: bool,
    pub sync_ready_only: bool,
    pub sync_type: Option<String>,
    pub search: Option<String>,
    pub skip: u64,
    pub limit: u64,
}

/// Fields for a new pack row; id, counters and timestamps are assigned here.
pub struct NewPack {
    pub title: String,
    pub description: String,
    pub category: String,
    pub tags: Vec<String>,
    pub price_cents: i64,
    pub is_free: bool,
    pub is_featured: bool,
    pub is_sync_ready: bool,
    pub sync_type: Option<String>,
    pub bpm: Option<i32>,
    pub musical_key: Option<String>,
    pub creator_id: String,
    pub creator_name: String,
    pub file_ref: String,
    pub file_kind: String,
    pub file_size: i64,
}

pub struct PackStore {
    db: DatabaseConnection,
}

impl PackStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self, filter: PackFilter) -> Result<Vec<pack::Model>, InternalError> {
        let mut query = Pack::find();

        if let Some(category) = &filter.category {
            query = query.filter(pack::Column::Category.eq(category));
        }
        if let Some(creator_id) = &filter.creator_id {
            query = query.filter(pack::Column::CreatorId.eq(creator_id));
        }
        if filter.free_only {
            query = query.filter(pack::Column::IsFree.eq(true));
        }
        if filter.featured_only {
            query = query.filter(pack::Column::IsFeatured.eq(true));
        }
        if filter.sync_ready_only {
            query = query.filter(pack::Column::IsSyncReady.eq(true));
        }
        if let Some(sync_type) = &filter.sync_type {
            query = query.filter(pack::Column::SyncType.eq(sync_type));
        }
        if let Some(search) = &filter.search {
            query = query.filter(
                Condition::any()
                    .add(pack::Column::Title.contains(search))
                    .add(pack::Column::Description.contains(search))
                    .add(pack::Column::Tags.contains(search)),
            );
        }

        let limit = if filter.limit == 0 { 50 } else { filter.limit };

        query
            .order_by_desc(pack::Column::CreatedAt)
            .offset(filter.skip)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_packs", e))
    }

    pub async fn find_by_id(&self, pack_id: &str) -> Result<Option<pack::Model>, InternalError> {
        Pack::find_by_id(pack_id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_pack_by_id", e))
    }

    pub async fn find_by_ids(&self, pack_ids: &[String]) -> Result<Vec<pack::Model>, InternalError> {
        if pack_ids.is_empty() {
            return Ok(Vec::new());
        }
        Pack::find()
            .filter(pack::Column::Id.is_in(pack_ids.iter().cloned()))
            .order_by_desc(pack::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("find_packs_by_ids", e))
    }

    /// Like `find_by_id` but resolves the missing case to a domain error.
    pub async fn get(&self, pack_id: &str) -> Result<pack::Model, InternalError> {
        self.find_by_id(pack_id)
            .await?
            .ok_or_else(|| InternalError::PackNotFound(pack_id.to_string()))
    }

    pub async fn insert(&self, new_pack: NewPack) -> Result<pack::Model, InternalError> {
        let tags = serde_json::to_string(&new_pack.tags)
            .map_err(|e| InternalError::validation(format!("unserializable tags: {}", e)))?;

        let model = pack::ActiveModel {
            id: Set(format!("pack_{}", Uuid::new_v4().simple())),
            title: Set(new_pack.title),
            description: Set(new_pack.description),
            category: Set(new_pack.category),
            tags: Set(tags),
            price_cents: Set(if new_pack.is_free { 0 } else { new_pack.price_cents }),
            is_free: Set(new_pack.is_free),
            is_featured: Set(new_pack.is_featured),
            is_sync_ready: Set(new_pack.is_sync_ready),
            sync_type: Set(if new_pack.is_sync_ready {
                new_pack.sync_type
            } else {
                None
            }),
            bpm: Set(new_pack.bpm),
            musical_key: Set(new_pack.musical_key),
            creator_id: Set(new_pack.creator_id),
            creator_name: Set(new_pack.creator_name),
            file_ref: Set(new_pack.file_ref),
            file_kind: Set(new_pack.file_kind),
            file_size: Set(new_pack.file_size),
            download_count: Set(0),
            created_at: Set(Utc::now().timestamp()),
        };

        model
            .insert(&self.db)
            .await
            .map_err(|e| InternalError::database("insert_pack", e))
    }

    /// Single atomic UPDATE; concurrent downloads never lose increments.
    pub async fn increment_download_count(&self, pack_id: &str) -> Result<(), InternalError> {
        Pack::update_many()
            .col_expr(
                pack::Column::DownloadCount,
                Expr::col(pack::Column::DownloadCount).add(1),
            )
            .filter(pack::Column::Id.eq(pack_id))
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("increment_download_count", e))?;
        Ok(())
    }

    pub async fn set_free(&self, pack_id: &str, is_free: bool) -> Result<(), InternalError> {
        let pack = self.get(pack_id).await?;
        let mut model: pack::ActiveModel = pack.into();
        model.is_free = Set(is_free);
        if is_free {
            model.price_cents = Set(0);
        }
        model
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("set_pack_free", e))?;
        Ok(())
    }

    pub async fn set_featured(
        &self,
        pack_id: &str,
        is_featured: bool,
    ) -> Result<(), InternalError> {
        let pack = self.get(pack_id).await?;
        let mut model: pack::ActiveModel = pack.into();
        model.is_featured = Set(is_featured);
        model
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("set_pack_featured", e))?;
        Ok(())
    }

    pub async fn set_sync_ready(
        &self,
        pack_id: &str,
        is_sync_ready: bool,
        sync_type: Option<String>,
    ) -> Result<(), InternalError> {
        let pack = self.get(pack_id).await?;
        let mut model: pack::ActiveModel = pack.into();
        model.is_sync_ready = Set(is_sync_ready);
        model.sync_type = Set(if is_sync_ready { sync_type } else { None });
        model
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("set_pack_sync_ready", e))?;
        Ok(())
    }

    pub async fn update_metadata(
        &self,
        pack_id: &str,
        bpm: Option<i32>,
        musical_key: Option<String>,
    ) -> Result<(), InternalError> {
        let pack = self.get(pack_id).await?;
        let mut model: pack::ActiveModel = pack.into();
        if bpm.is_some() {
            model.bpm = Set(bpm);
        }
        if musical_key.is_some() {
            model.musical_key = Set(musical_key);
        }
        model
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("update_pack_metadata", e))?;
        Ok(())
    }

    pub async fn list_by_creator(
        &self,
        creator_id: &str,
    ) -> Result<Vec<pack::Model>, InternalError> {
        Pack::find()
            .filter(pack::Column::CreatorId.eq(creator_id))
            .order_by_desc(pack::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_packs_by_creator", e))
    }

    pub async fn count(&self) -> Result<u64, InternalError> {
        Pack::find()
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_packs", e))
    }
}
