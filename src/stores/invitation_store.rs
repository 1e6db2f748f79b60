use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::types::db::invitation::{self, Entity as Invitation};

pub struct InvitationStore {
    db: DatabaseConnection,
}

impl InvitationStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn invite(
        &self,
        email: &str,
        invited_by: &str,
    ) -> Result<invitation::Model, InternalError> {
        let email = email.to_lowercase();

        let existing = Invitation::find()
            .filter(invitation::Column::Email.eq(&email))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_invitation", e))?;
        if existing.is_some() {
            return Err(InternalError::DuplicateInvitation(email));
        }

        let model = invitation::ActiveModel {
            id: Set(format!("inv_{}", Uuid::new_v4().simple())),
            email: Set(email.clone()),
            invited_by: Set(invited_by.to_string()),
            status: Set("pending".to_string()),
            created_at: Set(Utc::now().timestamp()),
        };

        model.insert(&self.db).await.map_err(|e| {
            // Lost a race with a concurrent invite for the same email
            if e.to_string().contains("UNIQUE") {
                InternalError::DuplicateInvitation(email.clone())
            } else {
                InternalError::database("insert_invitation", e)
            }
        })
    }

    pub async fn find_pending(
        &self,
        email: &str,
    ) -> Result<Option<invitation::Model>, InternalError> {
        Invitation::find()
            .filter(invitation::Column::Email.eq(email.to_lowercase()))
            .filter(invitation::Column::Status.eq("pending"))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_pending_invitation", e))
    }

    /// Consume a pending invitation for this email. The conditional UPDATE
    /// makes consumption exactly-once: the first caller sees one affected
    /// row and wins the creator promotion, any duplicate sees zero.
    pub async fn consume(&self, email: &str) -> Result<bool, InternalError> {
        let result = Invitation::update_many()
            .col_expr(invitation::Column::Status, Expr::value("consumed"))
            .filter(invitation::Column::Email.eq(email.to_lowercase()))
            .filter(invitation::Column::Status.eq("pending"))
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("consume_invitation", e))?;

        Ok(result.rows_affected == 1)
    }

    pub async fn list_all(&self) -> Result<Vec<invitation::Model>, InternalError> {
        Invitation::find()
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_invitations", e))
    }
}
