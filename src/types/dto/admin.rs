use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::invitation;

/// Platform statistics for the admin dashboard
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    pub total_users: u64,
    pub total_creators: u64,
    pub total_packs: u64,
    pub total_purchases: u64,
    pub total_subscriptions: u64,

    /// Gross purchase revenue in integer cents
    pub total_revenue_cents: i64,

    /// Aggregate subscription revenue in integer cents. Reported in total
    /// only; per-creator attribution of subscription revenue is an open
    /// product question and deliberately not computed here.
    pub subscription_revenue_cents: i64,

    /// Platform share of purchase revenue in integer cents
    pub platform_earnings_cents: i64,

    /// Creator share of purchase revenue in integer cents
    pub creator_earnings_cents: i64,
}

/// Request model for creator invitations
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct InviteCreatorRequest {
    /// Email address to allow-list
    pub email: String,
}

/// Public view of a creator invitation
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct InvitationResponse {
    pub invitation_id: String,
    pub email: String,
    pub invited_by: String,

    /// "pending" or "consumed"
    pub status: String,

    pub created_at: i64,
}

impl From<invitation::Model> for InvitationResponse {
    fn from(i: invitation::Model) -> Self {
        Self {
            invitation_id: i.id,
            email: i.email,
            invited_by: i.invited_by,
            status: i.status,
            created_at: i.created_at,
        }
    }
}
