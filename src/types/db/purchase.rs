use sea_orm::entity::prelude::*;

/// Completed one-time purchases. Rows are immutable once recorded; the
/// unique checkout_session_id makes grant processing idempotent.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "purchases")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub pack_id: String,
    pub amount_cents: i64,
    #[sea_orm(unique)]
    pub checkout_session_id: String,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
