use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, Set,
};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::types::db::purchase::{self, Entity as Purchase};

pub struct PurchaseStore {
    db: DatabaseConnection,
}

impl PurchaseStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Record a completed purchase. Keyed on the unique checkout session id:
    /// duplicate webhook delivery or concurrent status polls insert at most
    /// one row, so the operation is safe to repeat.
    pub async fn record(
        &self,
        user_id: &str,
        pack_id: &str,
        amount_cents: i64,
        checkout_session_id: &str,
    ) -> Result<(), InternalError> {
        let model = purchase::ActiveModel {
            id: Set(format!("pur_{}", Uuid::new_v4().simple())),
            user_id: Set(user_id.to_string()),
            pack_id: Set(pack_id.to_string()),
            amount_cents: Set(amount_cents),
            checkout_session_id: Set(checkout_session_id.to_string()),
            created_at: Set(Utc::now().timestamp()),
        };

        let result = Purchase::insert(model)
            .on_conflict(
                OnConflict::column(purchase::Column::CheckoutSessionId)
                    .do_nothing()
                    .to_owned(),
            )
            .exec(&self.db)
            .await;

        match result {
            Ok(_) => Ok(()),
            // Nothing inserted: the grant was already applied
            Err(DbErr::RecordNotInserted) => Ok(()),
            Err(e) => Err(InternalError::database("record_purchase", e)),
        }
    }

    /// Whether the user has ever successfully purchased this pack.
    pub async fn exists_for(&self, user_id: &str, pack_id: &str) -> Result<bool, InternalError> {
        let found = Purchase::find()
            .filter(purchase::Column::UserId.eq(user_id))
            .filter(purchase::Column::PackId.eq(pack_id))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_purchase", e))?;
        Ok(found.is_some())
    }

    pub async fn list_for_packs(
        &self,
        pack_ids: &[String],
    ) -> Result<Vec<purchase::Model>, InternalError> {
        if pack_ids.is_empty() {
            return Ok(Vec::new());
        }
        Purchase::find()
            .filter(purchase::Column::PackId.is_in(pack_ids.iter().cloned()))
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_purchases_for_packs", e))
    }

    pub async fn list_all(&self) -> Result<Vec<purchase::Model>, InternalError> {
        Purchase::find()
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_purchases", e))
    }

    pub async fn count(&self) -> Result<u64, InternalError> {
        Purchase::find()
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_purchases", e))
    }
}
