use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::types::db::download::{self, Entity as Download};

/// Download audit trail; one row per successful download.
pub struct DownloadStore {
    db: DatabaseConnection,
}

impl DownloadStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn record(&self, user_id: &str, pack_id: &str) -> Result<(), InternalError> {
        let model = download::ActiveModel {
            id: Set(format!("dl_{}", Uuid::new_v4().simple())),
            user_id: Set(user_id.to_string()),
            pack_id: Set(pack_id.to_string()),
            downloaded_at: Set(Utc::now().timestamp()),
        };
        model
            .insert(&self.db)
            .await
            .map_err(|e| InternalError::database("record_download", e))?;
        Ok(())
    }

    pub async fn count_for_packs(&self, pack_ids: &[String]) -> Result<u64, InternalError> {
        if pack_ids.is_empty() {
            return Ok(0);
        }
        Download::find()
            .filter(download::Column::PackId.is_in(pack_ids.iter().cloned()))
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_downloads_for_packs", e))
    }
}
