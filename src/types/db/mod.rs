// Database entities - SeaORM models
pub mod checkout_session;
pub mod collection;
pub mod collection_pack;
pub mod download;
pub mod favorite;
pub mod invitation;
pub mod pack;
pub mod purchase;
pub mod session;
pub mod subscription;
pub mod user;
