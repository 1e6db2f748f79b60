use async_trait::async_trait;
use serde::Deserialize;

use crate::errors::InternalError;

/// Profile returned by the external session broker for a valid session id.
#[derive(Clone, Debug, Deserialize)]
pub struct BrokerSession {
    pub email: String,
    pub name: String,
    pub picture: Option<String>,
}

/// External auth provider. The backend never sees credentials; it exchanges
/// an opaque session id for a verified profile.
#[async_trait]
pub trait AuthBroker: Send + Sync {
    async fn session_data(&self, session_id: &str) -> Result<BrokerSession, InternalError>;
}

/// HTTP client for the hosted session broker.
pub struct HttpAuthBroker {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAuthBroker {
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }
}

#[async_trait]
impl AuthBroker for HttpAuthBroker {
    async fn session_data(&self, session_id: &str) -> Result<BrokerSession, InternalError> {
        let url = format!("{}/auth/v1/session-data", self.base_url);
        let response = self
            .client
            .get(&url)
            .header("X-Session-ID", session_id)
            .send()
            .await
            .map_err(|e| InternalError::Broker(e.to_string()))?;

        if !response.status().is_success() {
            return Err(InternalError::BrokerRejected(format!(
                "status {}",
                response.status()
            )));
        }

        response
            .json::<BrokerSession>()
            .await
            .map_err(|e| InternalError::Broker(format!("malformed session data: {}", e)))
    }
}
