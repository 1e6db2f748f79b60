// Common test utilities for integration tests
#![allow(dead_code)]

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

use sounddrops::app_data::AppData;
use sounddrops::config::Settings;
use sounddrops::errors::InternalError;
use sounddrops::providers::{
    AuthBroker, BlobStore, BrokerSession, CheckoutRequest, CheckoutSession, CheckoutStatus,
    PaymentGateway, WebhookEvent,
};
use sounddrops::stores::NewPack;
use sounddrops::types::db::{pack, user};

/// Creates a test database with migrations applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

pub fn test_settings() -> Settings {
    Settings {
        database_url: "sqlite::memory:".to_string(),
        bind_addr: "127.0.0.1:0".to_string(),
        admin_email: "admin@sounddrops.com".to_string(),
        auth_broker_url: "http://broker.invalid".to_string(),
        payment_gateway_url: "http://gateway.invalid".to_string(),
        payment_api_key: "test_key".to_string(),
        webhook_secret: "test_secret".to_string(),
        storage_root: PathBuf::from("/tmp/sounddrops-test"),
        platform_fee_percent: 10,
        session_ttl_days: 7,
        subscription_days: 30,
        subscription_price_cents: 500,
        require_login_for_free_downloads: true,
    }
}

/// Auth broker stub backed by a session-id map
#[derive(Default)]
pub struct StubAuthBroker {
    sessions: Mutex<HashMap<String, BrokerSession>>,
}

impl StubAuthBroker {
    pub fn add_session(&self, session_id: &str, email: &str, name: &str) {
        self.sessions.lock().unwrap().insert(
            session_id.to_string(),
            BrokerSession {
                email: email.to_string(),
                name: name.to_string(),
                picture: None,
            },
        );
    }
}

#[async_trait]
impl AuthBroker for StubAuthBroker {
    async fn session_data(&self, session_id: &str) -> Result<BrokerSession, InternalError> {
        self.sessions
            .lock()
            .unwrap()
            .get(session_id)
            .cloned()
            .ok_or_else(|| InternalError::BrokerRejected("unknown session".to_string()))
    }
}

/// Payment gateway stub; sessions are created pending and settled explicitly
#[derive(Default)]
pub struct StubPaymentGateway {
    counter: AtomicU64,
    statuses: Mutex<HashMap<String, CheckoutStatus>>,
}

impl StubPaymentGateway {
    pub fn set_paid(&self, session_id: &str) {
        if let Some(status) = self.statuses.lock().unwrap().get_mut(session_id) {
            status.status = "complete".to_string();
            status.payment_status = "paid".to_string();
        }
    }

    /// Webhook body and signature as the gateway would deliver them
    pub fn webhook_payload(&self, session_id: &str, payment_status: &str) -> (Vec<u8>, String) {
        let body = serde_json::to_vec(&WebhookEvent {
            session_id: session_id.to_string(),
            payment_status: payment_status.to_string(),
        })
        .unwrap();
        (body, "stub-signature".to_string())
    }
}

#[async_trait]
impl PaymentGateway for StubPaymentGateway {
    async fn create_checkout(
        &self,
        request: CheckoutRequest,
    ) -> Result<CheckoutSession, InternalError> {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        let session_id = format!("cs_test_{}", n);
        self.statuses.lock().unwrap().insert(
            session_id.clone(),
            CheckoutStatus {
                status: "open".to_string(),
                payment_status: "pending".to_string(),
                amount_total_cents: request.amount_cents,
            },
        );
        Ok(CheckoutSession {
            url: format!("http://gateway.invalid/pay/{}", session_id),
            session_id,
        })
    }

    async fn checkout_status(&self, session_id: &str) -> Result<CheckoutStatus, InternalError> {
        self.statuses
            .lock()
            .unwrap()
            .get(session_id)
            .cloned()
            .ok_or_else(|| InternalError::Gateway("unknown session".to_string()))
    }

    fn webhook_event(&self, body: &[u8], signature: &str) -> Result<WebhookEvent, InternalError> {
        if signature == "bad" {
            return Err(InternalError::WebhookSignature);
        }
        serde_json::from_slice(body)
            .map_err(|e| InternalError::Gateway(format!("malformed webhook event: {}", e)))
    }
}

/// In-memory blob store so tests touch no filesystem
#[derive(Default)]
pub struct MemoryBlobStore {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), InternalError> {
        self.blobs.lock().unwrap().insert(key.to_string(), bytes);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>, InternalError> {
        self.blobs
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .ok_or_else(|| InternalError::Blob {
                key: key.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing blob"),
            })
    }
}

pub struct TestApp {
    pub app: Arc<AppData>,
    pub broker: Arc<StubAuthBroker>,
    pub gateway: Arc<StubPaymentGateway>,
}

/// Builds AppData wired to stub providers over a fresh in-memory database
pub async fn build_test_app() -> TestApp {
    build_test_app_with_settings(test_settings()).await
}

pub async fn build_test_app_with_settings(settings: Settings) -> TestApp {
    let db = setup_test_db().await;
    let broker = Arc::new(StubAuthBroker::default());
    let gateway = Arc::new(StubPaymentGateway::default());
    let blob_store = Arc::new(MemoryBlobStore::default());

    let app = Arc::new(AppData::init_with_providers(
        settings,
        db,
        broker.clone(),
        gateway.clone(),
        blob_store,
    ));

    TestApp {
        app,
        broker,
        gateway,
    }
}

/// Registers a user through the normal broker registration path
pub async fn register_user(test: &TestApp, email: &str, name: &str) -> user::Model {
    let session_id = format!("broker_{}", email);
    test.broker.add_session(&session_id, email, name);
    let profile = test
        .broker
        .session_data(&session_id)
        .await
        .expect("stub session");
    test.app
        .account_service
        .register_or_update(profile)
        .await
        .expect("registration")
}

/// Inserts a pack owned by the given creator, with its file in blob storage
pub async fn seed_pack(test: &TestApp, creator: &user::Model, price_cents: i64) -> pack::Model {
    let pack = test
        .app
        .pack_store
        .insert(NewPack {
            title: format!("Pack {}", price_cents),
            description: "Test pack".to_string(),
            category: "Drums".to_string(),
            tags: vec!["test".to_string()],
            price_cents,
            is_free: price_cents == 0,
            is_featured: false,
            is_sync_ready: false,
            sync_type: None,
            bpm: Some(120),
            musical_key: Some("C min".to_string()),
            creator_id: creator.id.clone(),
            creator_name: creator.name.clone(),
            file_ref: format!("packs/{}.mp3", price_cents),
            file_kind: "audio".to_string(),
            file_size: 4,
        })
        .await
        .expect("pack insert");

    test.app
        .blob_store
        .put(&pack.file_ref, b"beat".to_vec())
        .await
        .expect("blob put");

    pack
}
