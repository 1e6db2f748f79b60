// Stores layer - Data access and repository pattern
pub mod checkout_store;
pub mod collection_store;
pub mod download_store;
pub mod favorite_store;
pub mod invitation_store;
pub mod pack_store;
pub mod purchase_store;
pub mod session_store;
pub mod subscription_store;
pub mod user_store;

pub use checkout_store::{CheckoutKind, CheckoutStore};
pub use collection_store::CollectionStore;
pub use download_store::DownloadStore;
pub use favorite_store::FavoriteStore;
pub use invitation_store::InvitationStore;
pub use pack_store::{NewPack, PackFilter, PackStore};
pub use purchase_store::PurchaseStore;
pub use session_store::SessionStore;
pub use subscription_store::SubscriptionStore;
pub use user_store::{NewUser, UserStore};
