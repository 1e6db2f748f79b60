// Services layer - Business logic and orchestration
pub mod access;
pub mod account_service;
pub mod checkout_service;
pub mod crypto;
pub mod revenue;
pub mod session_service;

pub use access::can_download;
pub use account_service::AccountService;
pub use checkout_service::CheckoutService;
pub use revenue::{split, RevenueSplit, DEFAULT_PLATFORM_FEE_PERCENT};
pub use session_service::SessionService;
