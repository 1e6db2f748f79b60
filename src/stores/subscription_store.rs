use chrono::Utc;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, Set,
};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::types::db::subscription::{self, Entity as Subscription};

pub struct SubscriptionStore {
    db: DatabaseConnection,
}

impl SubscriptionStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// The user's active, unexpired subscription, if any. A row whose
    /// expiry has passed is flipped to "expired" on the way through.
    pub async fn active_for(
        &self,
        user_id: &str,
    ) -> Result<Option<subscription::Model>, InternalError> {
        let subscription = Subscription::find()
            .filter(subscription::Column::UserId.eq(user_id))
            .filter(subscription::Column::Status.eq("active"))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_active_subscription", e))?;

        let Some(subscription) = subscription else {
            return Ok(None);
        };

        if let Some(expires_at) = subscription.expires_at {
            if expires_at < Utc::now().timestamp() {
                Subscription::update_many()
                    .col_expr(subscription::Column::Status, Expr::value("expired"))
                    .filter(subscription::Column::Id.eq(&subscription.id))
                    .exec(&self.db)
                    .await
                    .map_err(|e| InternalError::database("expire_subscription", e))?;
                return Ok(None);
            }
        }

        Ok(Some(subscription))
    }

    pub async fn is_active(&self, user_id: &str) -> Result<bool, InternalError> {
        Ok(self.active_for(user_id).await?.is_some())
    }

    /// Activate a subscription won through a paid checkout. Idempotent on
    /// the unique checkout session id, like purchase recording.
    pub async fn activate(
        &self,
        user_id: &str,
        checkout_session_id: &str,
        expires_at: i64,
    ) -> Result<(), InternalError> {
        let model = subscription::ActiveModel {
            id: Set(format!("sub_{}", Uuid::new_v4().simple())),
            user_id: Set(user_id.to_string()),
            checkout_session_id: Set(checkout_session_id.to_string()),
            status: Set("active".to_string()),
            expires_at: Set(Some(expires_at)),
            created_at: Set(Utc::now().timestamp()),
        };

        let result = Subscription::insert(model)
            .on_conflict(
                OnConflict::column(subscription::Column::CheckoutSessionId)
                    .do_nothing()
                    .to_owned(),
            )
            .exec(&self.db)
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(DbErr::RecordNotInserted) => Ok(()),
            Err(e) => Err(InternalError::database("activate_subscription", e)),
        }
    }

    pub async fn count_active(&self) -> Result<u64, InternalError> {
        Subscription::find()
            .filter(subscription::Column::Status.eq("active"))
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_active_subscriptions", e))
    }

    pub async fn list_active(&self) -> Result<Vec<subscription::Model>, InternalError> {
        Subscription::find()
            .filter(subscription::Column::Status.eq("active"))
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_active_subscriptions", e))
    }
}
