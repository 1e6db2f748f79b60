pub mod auth;
pub mod role;

pub use auth::CurrentUser;
pub use role::{Capability, Role};
