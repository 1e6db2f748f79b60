use std::sync::Arc;

use poem_openapi::param::{Header, Path};
use poem_openapi::payload::{Binary, Json};
use poem_openapi::{OpenApi, Tags};

use crate::api::{authenticate, SessionAuth};
use crate::app_data::AppData;
use crate::errors::ApiError;
use crate::types::dto::billing::{
    CheckoutResponse, CheckoutStatusResponse, CreateCheckoutRequest,
    CreateSubscriptionCheckoutRequest, SubscriptionStatusResponse,
};
use crate::types::dto::common::MessageResponse;

/// Billing API endpoints
pub struct BillingApi {
    app: Arc<AppData>,
}

impl BillingApi {
    pub fn new(app: Arc<AppData>) -> Self {
        Self { app }
    }
}

/// API tags for billing endpoints
#[derive(Tags)]
enum BillingTags {
    /// Pack purchases
    Purchases,
    /// All-access subscriptions
    Subscriptions,
    /// Payment gateway webhooks
    Webhooks,
}

#[OpenApi]
impl BillingApi {
    /// Start a checkout for a single pack
    #[oai(
        path = "/purchase/checkout",
        method = "post",
        tag = "BillingTags::Purchases"
    )]
    async fn create_purchase_checkout(
        &self,
        auth: SessionAuth,
        body: Json<CreateCheckoutRequest>,
    ) -> Result<Json<CheckoutResponse>, ApiError> {
        let current = authenticate(&self.app, &auth).await?;

        let session = self
            .app
            .checkout_service
            .create_pack_checkout(current.id(), &body.0.pack_id, &body.0.origin_url)
            .await
            .map_err(ApiError::from_internal_error)?;

        Ok(Json(CheckoutResponse {
            url: session.url,
            session_id: session.session_id,
        }))
    }

    /// Poll a purchase checkout and settle it if paid
    #[oai(
        path = "/purchase/status/:session_id",
        method = "get",
        tag = "BillingTags::Purchases"
    )]
    async fn purchase_status(
        &self,
        auth: SessionAuth,
        session_id: Path<String>,
    ) -> Result<Json<CheckoutStatusResponse>, ApiError> {
        authenticate(&self.app, &auth).await?;

        let status = self
            .app
            .checkout_service
            .reconcile(&session_id.0)
            .await
            .map_err(ApiError::from_internal_error)?;

        Ok(Json(CheckoutStatusResponse {
            status: status.status,
            payment_status: status.payment_status,
            amount_total_cents: status.amount_total_cents,
        }))
    }

    /// Start a subscription checkout
    #[oai(
        path = "/subscribe/checkout",
        method = "post",
        tag = "BillingTags::Subscriptions"
    )]
    async fn create_subscription_checkout(
        &self,
        auth: SessionAuth,
        body: Json<CreateSubscriptionCheckoutRequest>,
    ) -> Result<Json<CheckoutResponse>, ApiError> {
        let current = authenticate(&self.app, &auth).await?;

        let session = self
            .app
            .checkout_service
            .create_subscription_checkout(current.id(), &body.0.origin_url)
            .await
            .map_err(ApiError::from_internal_error)?;

        Ok(Json(CheckoutResponse {
            url: session.url,
            session_id: session.session_id,
        }))
    }

    /// Poll a subscription checkout and settle it if paid
    #[oai(
        path = "/subscribe/status/:session_id",
        method = "get",
        tag = "BillingTags::Subscriptions"
    )]
    async fn subscription_checkout_status(
        &self,
        auth: SessionAuth,
        session_id: Path<String>,
    ) -> Result<Json<CheckoutStatusResponse>, ApiError> {
        authenticate(&self.app, &auth).await?;

        let status = self
            .app
            .checkout_service
            .reconcile(&session_id.0)
            .await
            .map_err(ApiError::from_internal_error)?;

        Ok(Json(CheckoutStatusResponse {
            status: status.status,
            payment_status: status.payment_status,
            amount_total_cents: status.amount_total_cents,
        }))
    }

    /// Current user's subscription state
    #[oai(
        path = "/subscribe/status",
        method = "get",
        tag = "BillingTags::Subscriptions"
    )]
    async fn subscription_status(
        &self,
        auth: SessionAuth,
    ) -> Result<Json<SubscriptionStatusResponse>, ApiError> {
        let current = authenticate(&self.app, &auth).await?;

        let active = self
            .app
            .subscription_store
            .active_for(current.id())
            .await
            .map_err(ApiError::from_internal_error)?;

        Ok(Json(SubscriptionStatusResponse {
            active: active.is_some(),
            expires_at: active.and_then(|s| s.expires_at),
        }))
    }

    /// Payment gateway webhook receiver
    ///
    /// Events are delivered at least once; settlement is idempotent, so
    /// duplicates are acknowledged without granting twice.
    #[oai(
        path = "/webhook/payment",
        method = "post",
        tag = "BillingTags::Webhooks"
    )]
    async fn payment_webhook(
        &self,
        body: Binary<Vec<u8>>,
        #[oai(name = "X-Payment-Signature")] signature: Header<String>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        self.app
            .checkout_service
            .handle_webhook(&body.0, &signature.0)
            .await
            .map_err(ApiError::from_internal_error)?;

        Ok(Json(MessageResponse::new("ok")))
    }
}
