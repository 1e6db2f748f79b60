use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::Settings;
use crate::providers::{
    AuthBroker, BlobStore, FsBlobStore, HttpAuthBroker, HttpPaymentGateway, PaymentGateway,
};
use crate::services::{AccountService, CheckoutService, SessionService};
use crate::stores::{
    CheckoutStore, CollectionStore, DownloadStore, FavoriteStore, InvitationStore, PackStore,
    PurchaseStore, SessionStore, SubscriptionStore, UserStore,
};

/// Centralized application data following the main-owned stores pattern.
///
/// All stores, providers and services are created once at startup and
/// shared across API endpoints; handlers receive no process-wide mutable
/// state beyond this graph.
pub struct AppData {
    pub settings: Settings,

    pub user_store: Arc<UserStore>,
    pub session_store: Arc<SessionStore>,
    pub pack_store: Arc<PackStore>,
    pub purchase_store: Arc<PurchaseStore>,
    pub subscription_store: Arc<SubscriptionStore>,
    pub invitation_store: Arc<InvitationStore>,
    pub checkout_store: Arc<CheckoutStore>,
    pub download_store: Arc<DownloadStore>,
    pub favorite_store: Arc<FavoriteStore>,
    pub collection_store: Arc<CollectionStore>,

    pub auth_broker: Arc<dyn AuthBroker>,
    pub blob_store: Arc<dyn BlobStore>,

    pub session_service: SessionService,
    pub account_service: AccountService,
    pub checkout_service: CheckoutService,
}

impl AppData {
    /// Wire up against the real external providers.
    pub fn init(settings: Settings, db: DatabaseConnection) -> Self {
        let auth_broker: Arc<dyn AuthBroker> =
            Arc::new(HttpAuthBroker::new(settings.auth_broker_url.clone()));
        let gateway: Arc<dyn PaymentGateway> = Arc::new(HttpPaymentGateway::new(
            settings.payment_gateway_url.clone(),
            settings.payment_api_key.clone(),
            settings.webhook_secret.clone(),
        ));
        let blob_store: Arc<dyn BlobStore> =
            Arc::new(FsBlobStore::new(settings.storage_root.clone()));

        Self::init_with_providers(settings, db, auth_broker, gateway, blob_store)
    }

    /// Wire up with injected providers; tests pass stubs here.
    pub fn init_with_providers(
        settings: Settings,
        db: DatabaseConnection,
        auth_broker: Arc<dyn AuthBroker>,
        gateway: Arc<dyn PaymentGateway>,
        blob_store: Arc<dyn BlobStore>,
    ) -> Self {
        tracing::info!("Initializing AppData...");

        let user_store = Arc::new(UserStore::new(db.clone()));
        let session_store = Arc::new(SessionStore::new(db.clone()));
        let pack_store = Arc::new(PackStore::new(db.clone()));
        let purchase_store = Arc::new(PurchaseStore::new(db.clone()));
        let subscription_store = Arc::new(SubscriptionStore::new(db.clone()));
        let invitation_store = Arc::new(InvitationStore::new(db.clone()));
        let checkout_store = Arc::new(CheckoutStore::new(db.clone()));
        let download_store = Arc::new(DownloadStore::new(db.clone()));
        let favorite_store = Arc::new(FavoriteStore::new(db.clone()));
        let collection_store = Arc::new(CollectionStore::new(db));

        let session_service = SessionService::new(
            session_store.clone(),
            user_store.clone(),
            settings.session_ttl_days,
        );
        let account_service = AccountService::new(
            user_store.clone(),
            invitation_store.clone(),
            settings.admin_email.clone(),
        );
        let checkout_service = CheckoutService::new(
            gateway,
            checkout_store.clone(),
            purchase_store.clone(),
            subscription_store.clone(),
            pack_store.clone(),
            settings.subscription_price_cents,
            settings.subscription_days,
        );

        Self {
            settings,
            user_store,
            session_store,
            pack_store,
            purchase_store,
            subscription_store,
            invitation_store,
            checkout_store,
            download_store,
            favorite_store,
            collection_store,
            auth_broker,
            blob_store,
            session_service,
            account_service,
            checkout_service,
        }
    }
}
