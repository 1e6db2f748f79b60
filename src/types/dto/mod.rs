pub mod admin;
pub mod auth;
pub mod billing;
pub mod common;
pub mod creator;
pub mod library;
pub mod packs;
