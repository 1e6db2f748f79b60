use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;

use crate::errors::InternalError;
use crate::providers::{CheckoutRequest, CheckoutSession, CheckoutStatus, PaymentGateway};
use crate::stores::{CheckoutKind, CheckoutStore, PackStore, PurchaseStore, SubscriptionStore};

/// Orchestrates gateway checkouts and the grants they pay for.
///
/// Payment events arrive at least once (webhook) and can also be observed
/// through status polls; every path funnels into `apply_paid`, which is
/// idempotent end to end. Grants are committed before any status response
/// returns, so a client that saw "paid" can immediately download.
pub struct CheckoutService {
    gateway: Arc<dyn PaymentGateway>,
    checkout_store: Arc<CheckoutStore>,
    purchase_store: Arc<PurchaseStore>,
    subscription_store: Arc<SubscriptionStore>,
    pack_store: Arc<PackStore>,
    subscription_price_cents: i64,
    subscription_days: i64,
}

impl CheckoutService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        gateway: Arc<dyn PaymentGateway>,
        checkout_store: Arc<CheckoutStore>,
        purchase_store: Arc<PurchaseStore>,
        subscription_store: Arc<SubscriptionStore>,
        pack_store: Arc<PackStore>,
        subscription_price_cents: i64,
        subscription_days: i64,
    ) -> Self {
        Self {
            gateway,
            checkout_store,
            purchase_store,
            subscription_store,
            pack_store,
            subscription_price_cents,
            subscription_days,
        }
    }

    pub async fn create_pack_checkout(
        &self,
        user_id: &str,
        pack_id: &str,
        origin_url: &str,
    ) -> Result<CheckoutSession, InternalError> {
        let pack = self.pack_store.get(pack_id).await?;
        if pack.is_free {
            return Err(InternalError::validation("This pack is free"));
        }

        let amount_cents = pack.effective_price_cents();
        let mut metadata = HashMap::new();
        metadata.insert("type".to_string(), "pack_purchase".to_string());
        metadata.insert("user_id".to_string(), user_id.to_string());
        metadata.insert("pack_id".to_string(), pack_id.to_string());

        let session = self
            .gateway
            .create_checkout(CheckoutRequest {
                amount_cents,
                currency: "usd".to_string(),
                success_url: format!(
                    "{}/purchase-success?session_id={{CHECKOUT_SESSION_ID}}",
                    origin_url
                ),
                cancel_url: format!("{}/browse", origin_url),
                metadata,
            })
            .await?;

        self.checkout_store
            .insert_pending(
                &session.session_id,
                user_id,
                amount_cents,
                CheckoutKind::PackPurchase,
                Some(pack_id.to_string()),
            )
            .await?;

        Ok(session)
    }

    pub async fn create_subscription_checkout(
        &self,
        user_id: &str,
        origin_url: &str,
    ) -> Result<CheckoutSession, InternalError> {
        if self.subscription_store.is_active(user_id).await? {
            return Err(InternalError::AlreadySubscribed);
        }

        let mut metadata = HashMap::new();
        metadata.insert("type".to_string(), "subscription".to_string());
        metadata.insert("user_id".to_string(), user_id.to_string());

        let session = self
            .gateway
            .create_checkout(CheckoutRequest {
                amount_cents: self.subscription_price_cents,
                currency: "usd".to_string(),
                success_url: format!(
                    "{}/subscription-success?session_id={{CHECKOUT_SESSION_ID}}",
                    origin_url
                ),
                cancel_url: format!("{}/browse", origin_url),
                metadata,
            })
            .await?;

        self.checkout_store
            .insert_pending(
                &session.session_id,
                user_id,
                self.subscription_price_cents,
                CheckoutKind::Subscription,
                None,
            )
            .await?;

        Ok(session)
    }

    /// Poll the gateway and apply the grant if the payment just settled.
    pub async fn reconcile(&self, session_id: &str) -> Result<CheckoutStatus, InternalError> {
        let status = self.gateway.checkout_status(session_id).await?;

        self.checkout_store
            .find_by_session_id(session_id)
            .await?
            .ok_or_else(|| InternalError::CheckoutNotFound(session_id.to_string()))?;

        if status.payment_status == "paid" {
            self.apply_paid(session_id).await?;
        }

        Ok(status)
    }

    /// Handle an at-least-once completed-charge event from the gateway.
    pub async fn handle_webhook(&self, body: &[u8], signature: &str) -> Result<(), InternalError> {
        let event = self.gateway.webhook_event(body, signature)?;

        if event.payment_status != "paid" {
            tracing::debug!(
                session_id = %event.session_id,
                payment_status = %event.payment_status,
                "ignoring non-paid webhook event"
            );
            return Ok(());
        }

        match self.checkout_store.find_by_session_id(&event.session_id).await? {
            Some(_) => self.apply_paid(&event.session_id).await,
            None => {
                tracing::warn!(session_id = %event.session_id, "webhook for unknown checkout session");
                Ok(())
            }
        }
    }

    /// Apply what the checkout bought, then flip it to paid. Grant before
    /// flip: the grant insert is keyed on the unique session id, so a crash
    /// between the two leaves the row pending and the next delivery repeats
    /// the grant as a no-op before completing the flip.
    async fn apply_paid(&self, session_id: &str) -> Result<(), InternalError> {
        let row = self
            .checkout_store
            .find_by_session_id(session_id)
            .await?
            .ok_or_else(|| InternalError::CheckoutNotFound(session_id.to_string()))?;

        if row.payment_status == "paid" {
            return Ok(());
        }

        match CheckoutKind::parse(&row.kind) {
            Some(CheckoutKind::PackPurchase) => {
                let Some(pack_id) = &row.pack_id else {
                    return Err(InternalError::validation(
                        "pack_purchase checkout without a pack id",
                    ));
                };
                self.purchase_store
                    .record(&row.user_id, pack_id, row.amount_cents, session_id)
                    .await?;
                tracing::info!(user_id = %row.user_id, pack_id = %pack_id, "purchase recorded");
            }
            Some(CheckoutKind::Subscription) => {
                let expires_at =
                    Utc::now().timestamp() + self.subscription_days * 24 * 60 * 60;
                self.subscription_store
                    .activate(&row.user_id, session_id, expires_at)
                    .await?;
                tracing::info!(user_id = %row.user_id, "subscription activated");
            }
            None => {
                return Err(InternalError::validation(format!(
                    "unknown checkout kind: {}",
                    row.kind
                )));
            }
        }

        self.checkout_store.mark_paid(session_id).await?;
        Ok(())
    }
}
