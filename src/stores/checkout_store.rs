use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::types::db::checkout_session::{self, Entity as CheckoutSession};

/// What a checkout session pays for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CheckoutKind {
    PackPurchase,
    Subscription,
}

impl CheckoutKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CheckoutKind::PackPurchase => "pack_purchase",
            CheckoutKind::Subscription => "subscription",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pack_purchase" => Some(CheckoutKind::PackPurchase),
            "subscription" => Some(CheckoutKind::Subscription),
            _ => None,
        }
    }
}

pub struct CheckoutStore {
    db: DatabaseConnection,
}

impl CheckoutStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn insert_pending(
        &self,
        session_id: &str,
        user_id: &str,
        amount_cents: i64,
        kind: CheckoutKind,
        pack_id: Option<String>,
    ) -> Result<(), InternalError> {
        let model = checkout_session::ActiveModel {
            id: Set(format!("tx_{}", Uuid::new_v4().simple())),
            session_id: Set(session_id.to_string()),
            user_id: Set(user_id.to_string()),
            amount_cents: Set(amount_cents),
            currency: Set("usd".to_string()),
            payment_status: Set("pending".to_string()),
            kind: Set(kind.as_str().to_string()),
            pack_id: Set(pack_id),
            created_at: Set(Utc::now().timestamp()),
        };
        model
            .insert(&self.db)
            .await
            .map_err(|e| InternalError::database("insert_checkout_session", e))?;
        Ok(())
    }

    pub async fn find_by_session_id(
        &self,
        session_id: &str,
    ) -> Result<Option<checkout_session::Model>, InternalError> {
        CheckoutSession::find()
            .filter(checkout_session::Column::SessionId.eq(session_id))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_checkout_session", e))
    }

    pub async fn list_paid_by_kind(
        &self,
        kind: CheckoutKind,
    ) -> Result<Vec<checkout_session::Model>, InternalError> {
        CheckoutSession::find()
            .filter(checkout_session::Column::Kind.eq(kind.as_str()))
            .filter(checkout_session::Column::PaymentStatus.eq("paid"))
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_paid_checkout_sessions", e))
    }

    /// Flip a pending session to paid. Conditional on the current status,
    /// so concurrent settlements perform the transition at most once;
    /// returns whether this caller did.
    pub async fn mark_paid(&self, session_id: &str) -> Result<bool, InternalError> {
        let result = CheckoutSession::update_many()
            .col_expr(checkout_session::Column::PaymentStatus, Expr::value("paid"))
            .filter(checkout_session::Column::SessionId.eq(session_id))
            .filter(checkout_session::Column::PaymentStatus.eq("pending"))
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("mark_checkout_paid", e))?;

        Ok(result.rows_affected == 1)
    }
}
