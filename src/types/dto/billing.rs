use poem_openapi::Object;
use serde::{Deserialize, Serialize};

/// Request model for pack checkout creation
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CreateCheckoutRequest {
    /// Pack to purchase
    pub pack_id: String,

    /// Origin URL the success/cancel pages are built from
    pub origin_url: String,
}

/// Request model for subscription checkout creation
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CreateSubscriptionCheckoutRequest {
    /// Origin URL the success/cancel pages are built from
    pub origin_url: String,
}

/// Response model for checkout creation
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CheckoutResponse {
    /// Hosted checkout page URL
    pub url: String,

    /// Gateway checkout session ID
    pub session_id: String,
}

/// Response model for checkout status polls
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CheckoutStatusResponse {
    /// Session status reported by the gateway
    pub status: String,

    /// Payment status: pending, paid, failed or expired
    pub payment_status: String,

    /// Total amount in integer cents
    pub amount_total_cents: i64,
}

/// Response model for the current user's subscription state
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct SubscriptionStatusResponse {
    /// Whether an unexpired active subscription exists
    pub active: bool,

    /// Expiry of the active subscription (Unix timestamp)
    pub expires_at: Option<i64>,
}
