use crate::types::db::user;
use crate::types::internal::role::Role;

/// Request-scoped view of the authenticated user. Built once per request
/// from the session token; handlers never touch process-wide state.
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub user: user::Model,
    pub role: Role,
}

impl CurrentUser {
    pub fn new(user: user::Model) -> Self {
        let role = Role::from_db(&user.role, user.creator_approved);
        Self { user, role }
    }

    pub fn id(&self) -> &str {
        &self.user.id
    }
}
