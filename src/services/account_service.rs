use std::sync::Arc;

use crate::errors::InternalError;
use crate::providers::BrokerSession;
use crate::stores::{InvitationStore, NewUser, UserStore};
use crate::types::db::user;
use crate::types::internal::Role;

/// Registration and role transitions. Users are created on first auth
/// callback and never deleted in-band; role changes only through the
/// transitions implemented here or admin approval.
pub struct AccountService {
    user_store: Arc<UserStore>,
    invitation_store: Arc<InvitationStore>,
    admin_email: String,
}

impl AccountService {
    pub fn new(
        user_store: Arc<UserStore>,
        invitation_store: Arc<InvitationStore>,
        admin_email: String,
    ) -> Self {
        Self {
            user_store,
            invitation_store,
            admin_email: admin_email.to_lowercase(),
        }
    }

    /// Create or refresh a user from a verified broker profile.
    ///
    /// First registration decides the role: the configured admin email
    /// lands on admin, an email with a pending invitation lands directly on
    /// creator_approved (skipping creator_pending), everyone else on user.
    /// The invitation is consumed exactly once even when two registrations
    /// race: the unique email column lets only one insert win, and only the
    /// winner attempts the conditional invitation update.
    pub async fn register_or_update(
        &self,
        profile: BrokerSession,
    ) -> Result<user::Model, InternalError> {
        let email = profile.email.to_lowercase();

        if let Some(existing) = self.user_store.find_by_email(&email).await? {
            let user = self
                .user_store
                .update_profile(existing, profile.name, profile.picture)
                .await?;

            // Admin email always maps to the admin role, even for accounts
            // that registered before the setting changed
            if email == self.admin_email && user.role != "admin" {
                self.user_store.set_role(&user.id, Role::Admin).await?;
                return self
                    .user_store
                    .find_by_id(&user.id)
                    .await?
                    .ok_or_else(|| InternalError::UserNotFound(user.id.clone()));
            }
            return Ok(user);
        }

        let invited = self.invitation_store.find_pending(&email).await?.is_some();

        let role = if email == self.admin_email {
            Role::Admin
        } else if invited {
            Role::CreatorApproved
        } else {
            Role::User
        };

        let user = self
            .user_store
            .insert(NewUser {
                email: email.clone(),
                name: profile.name,
                picture: profile.picture,
                role,
            })
            .await?;

        if role == Role::CreatorApproved {
            // Conditional update; a duplicate registration attempt that lost
            // the insert race never reaches this point
            let consumed = self.invitation_store.consume(&email).await?;
            if !consumed {
                tracing::warn!(%email, "invitation already consumed at registration");
            }
        }

        tracing::info!(user_id = %user.id, role = %role, "registered new user");
        Ok(user)
    }

    /// A user applies to become a creator. Idempotent: already-pending and
    /// already-approved creators (and admins) are left untouched.
    pub async fn apply_for_creator(&self, user: &user::Model) -> Result<Role, InternalError> {
        let role = Role::from_db(&user.role, user.creator_approved);
        let next = role.apply();
        if next != role {
            self.user_store.set_role(&user.id, next).await?;
            tracing::info!(user_id = %user.id, "creator application submitted");
        }
        Ok(next)
    }

    /// Admin approval of a pending creator. Approving any other state is a
    /// no-op; there is no demotion path.
    pub async fn approve_creator(&self, creator_id: &str) -> Result<Role, InternalError> {
        let user = self
            .user_store
            .find_by_id(creator_id)
            .await?
            .ok_or_else(|| InternalError::UserNotFound(creator_id.to_string()))?;

        let role = Role::from_db(&user.role, user.creator_approved);
        let next = role.approve();
        if next != role {
            self.user_store.set_role(creator_id, next).await?;
            tracing::info!(user_id = %creator_id, "creator approved");
        }
        Ok(next)
    }
}
