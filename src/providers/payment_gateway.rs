use std::collections::HashMap;

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::errors::InternalError;

/// Newly created hosted checkout session.
#[derive(Clone, Debug, Deserialize)]
pub struct CheckoutSession {
    pub session_id: String,
    pub url: String,
}

/// Current state of a checkout session as reported by the gateway.
#[derive(Clone, Debug, Deserialize)]
pub struct CheckoutStatus {
    pub status: String,
    pub payment_status: String,
    pub amount_total_cents: i64,
}

/// Completed-charge event delivered to the webhook endpoint. Delivery is
/// at-least-once; consumers must be idempotent.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct WebhookEvent {
    pub session_id: String,
    pub payment_status: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct CheckoutRequest {
    pub amount_cents: i64,
    pub currency: String,
    pub success_url: String,
    pub cancel_url: String,
    pub metadata: HashMap<String, String>,
}

/// Stripe-style checkout provider, treated as a black box.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_checkout(
        &self,
        request: CheckoutRequest,
    ) -> Result<CheckoutSession, InternalError>;

    async fn checkout_status(&self, session_id: &str) -> Result<CheckoutStatus, InternalError>;

    /// Verify the webhook signature and decode the event.
    fn webhook_event(&self, body: &[u8], signature: &str) -> Result<WebhookEvent, InternalError>;
}

/// HTTP client for the hosted checkout API.
pub struct HttpPaymentGateway {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    webhook_secret: String,
}

impl HttpPaymentGateway {
    pub fn new(base_url: String, api_key: String, webhook_secret: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
            webhook_secret,
        }
    }
}

#[async_trait]
impl PaymentGateway for HttpPaymentGateway {
    async fn create_checkout(
        &self,
        request: CheckoutRequest,
    ) -> Result<CheckoutSession, InternalError> {
        let url = format!("{}/v1/checkout/sessions", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| InternalError::Gateway(e.to_string()))?;

        if !response.status().is_success() {
            return Err(InternalError::Gateway(format!(
                "checkout creation failed with status {}",
                response.status()
            )));
        }

        response
            .json::<CheckoutSession>()
            .await
            .map_err(|e| InternalError::Gateway(format!("malformed checkout session: {}", e)))
    }

    async fn checkout_status(&self, session_id: &str) -> Result<CheckoutStatus, InternalError> {
        let url = format!("{}/v1/checkout/sessions/{}", self.base_url, session_id);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| InternalError::Gateway(e.to_string()))?;

        if !response.status().is_success() {
            return Err(InternalError::Gateway(format!(
                "status poll failed with status {}",
                response.status()
            )));
        }

        response
            .json::<CheckoutStatus>()
            .await
            .map_err(|e| InternalError::Gateway(format!("malformed checkout status: {}", e)))
    }

    fn webhook_event(&self, body: &[u8], signature: &str) -> Result<WebhookEvent, InternalError> {
        let mut mac = Hmac::<Sha256>::new_from_slice(self.webhook_secret.as_bytes())
            .map_err(|_| InternalError::WebhookSignature)?;
        mac.update(body);
        let expected = hex::encode(mac.finalize().into_bytes());

        // Constant-length hex comparison; signatures are not secret-length
        if expected != signature.trim() {
            return Err(InternalError::WebhookSignature);
        }

        serde_json::from_slice::<WebhookEvent>(body)
            .map_err(|e| InternalError::Gateway(format!("malformed webhook event: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn webhook_event_rejects_bad_signature() {
        let gateway = HttpPaymentGateway::new(
            "http://localhost".to_string(),
            "key".to_string(),
            "secret".to_string(),
        );
        let body = br#"{"session_id":"cs_1","payment_status":"paid"}"#;
        let err = gateway.webhook_event(body, "deadbeef").unwrap_err();
        assert!(matches!(err, InternalError::WebhookSignature));
    }

    #[test]
    fn webhook_event_accepts_valid_signature() {
        let gateway = HttpPaymentGateway::new(
            "http://localhost".to_string(),
            "key".to_string(),
            "secret".to_string(),
        );
        let body = br#"{"session_id":"cs_1","payment_status":"paid"}"#;

        let mut mac = Hmac::<Sha256>::new_from_slice(b"secret").unwrap();
        mac.update(body);
        let signature = hex::encode(mac.finalize().into_bytes());

        let event = gateway.webhook_event(body, &signature).unwrap();
        assert_eq!(event.session_id, "cs_1");
        assert_eq!(event.payment_status, "paid");
    }
}
