use poem_openapi::Object;
use serde::{Deserialize, Serialize};

/// Creator earnings summary
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct EarningsResponse {
    /// Number of packs the creator has uploaded
    pub total_packs: u64,

    /// Number of completed purchases across those packs
    pub total_purchases: u64,

    /// Number of recorded downloads across those packs
    pub total_downloads: u64,

    /// Gross purchase revenue in integer cents
    pub total_revenue_cents: i64,

    /// Creator share (90%) in integer cents
    pub creator_earnings_cents: i64,

    /// Platform share (10%) in integer cents
    pub platform_fee_cents: i64,
}

/// Request model for payout settings
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct PayoutSettingsRequest {
    /// "weekly" or "monthly"
    pub frequency: String,
}
