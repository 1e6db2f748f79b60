use sea_orm::entity::prelude::*;

/// Pending and settled gateway checkout sessions. The unique session_id
/// is the idempotency key for webhook and poll reconciliation.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "checkout_sessions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub session_id: String,
    pub user_id: String,
    pub amount_cents: i64,
    pub currency: String,

    // "pending", "paid", "failed" or "expired"
    pub payment_status: String,

    // "pack_purchase" or "subscription"
    pub kind: String,

    pub pack_id: Option<String>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
