//! Client-side session and notification stores.
//!
//! SYSTEM CONTEXT
//! ==============
//! Stores are cheap `Arc` handles created once at the composition root
//! ([`crate::session::Session`]) and handed to the guard and the HTTP
//! unauthorized hook. Nothing here reaches for a global.

pub mod auth;
pub mod customer;
pub mod toast;

pub use auth::{AuthState, AuthStore};
pub use customer::CustomerStore;
pub use toast::{Toast, ToastStore};
