use sea_orm::entity::prelude::*;

/// Creator invitations. Email is stored lowercased; a pending invitation
/// is consumed exactly once when a matching email registers.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "invitations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub email: String,
    pub invited_by: String,

    // "pending" or "consumed"
    pub status: String,

    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
