use std::env;
use std::path::PathBuf;

use crate::errors::InternalError;

/// Application settings loaded from the environment (and .env in dev).
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub bind_addr: String,

    /// Email that is auto-promoted to admin at first registration
    pub admin_email: String,

    /// External session broker base URL
    pub auth_broker_url: String,

    /// Payment gateway base URL and API key
    pub payment_gateway_url: String,
    pub payment_api_key: String,
    pub webhook_secret: String,

    /// Root directory for uploaded pack files
    pub storage_root: PathBuf,

    /// Platform cut of each sale, in percent
    pub platform_fee_percent: u32,

    pub session_ttl_days: i64,
    pub subscription_days: i64,
    pub subscription_price_cents: i64,

    /// Whether free pack downloads still require a login. This is platform
    /// policy applied at the HTTP layer, not an access-resolver rule.
    pub require_login_for_free_downloads: bool,
}

impl Settings {
    pub fn from_env() -> Result<Self, InternalError> {
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://sounddrops.db?mode=rwc".to_string());
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());

        let admin_email = env::var("ADMIN_EMAIL")
            .unwrap_or_else(|_| "admin@sounddrops.com".to_string())
            .to_lowercase();

        let auth_broker_url = env::var("AUTH_BROKER_URL")
            .map_err(|_| InternalError::validation("AUTH_BROKER_URL must be set"))?;
        let payment_gateway_url = env::var("PAYMENT_GATEWAY_URL")
            .map_err(|_| InternalError::validation("PAYMENT_GATEWAY_URL must be set"))?;
        let payment_api_key = env::var("PAYMENT_API_KEY")
            .map_err(|_| InternalError::validation("PAYMENT_API_KEY must be set"))?;
        let webhook_secret = env::var("PAYMENT_WEBHOOK_SECRET")
            .map_err(|_| InternalError::validation("PAYMENT_WEBHOOK_SECRET must be set"))?;

        let storage_root = env::var("STORAGE_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("pack_files"));

        let platform_fee_percent = env::var("PLATFORM_FEE_PERCENT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);
        if platform_fee_percent > 100 {
            return Err(InternalError::validation(
                "PLATFORM_FEE_PERCENT must be between 0 and 100",
            ));
        }

        let require_login_for_free_downloads = env::var("REQUIRE_LOGIN_FOR_FREE_DOWNLOADS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(true);

        Ok(Self {
            database_url,
            bind_addr,
            admin_email,
            auth_broker_url,
            payment_gateway_url,
            payment_api_key,
            webhook_secret,
            storage_root,
            platform_fee_percent,
            session_ttl_days: 7,
            subscription_days: 30,
            subscription_price_cents: 500,
            require_login_for_free_downloads,
        })
    }
}
