// External collaborators behind trait seams so tests can stub them
pub mod auth_broker;
pub mod blob_store;
pub mod payment_gateway;

pub use auth_broker::{AuthBroker, BrokerSession, HttpAuthBroker};
pub use blob_store::{BlobStore, FsBlobStore};
pub use payment_gateway::{
    CheckoutRequest, CheckoutSession, CheckoutStatus, HttpPaymentGateway, PaymentGateway,
    WebhookEvent,
};
