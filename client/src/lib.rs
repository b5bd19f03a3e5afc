//! # turnos-client
//!
//! Client library for the multi-tenant appointment-booking backend.
//!
//! This crate holds the session stores, the navigation guard that reconciles
//! staff and per-tenant customer sessions on every route change, the HTTP
//! pipeline (CSRF injection and unauthorized handling), and typed wrappers
//! around the REST resources.
//!
//! Native builds talk to the backend through `reqwest`; the `hydrate` feature
//! swaps in a `gloo-net` transport for the browser.

pub mod config;
pub mod net;
pub mod router;
pub mod session;
pub mod state;
pub mod util;

pub use config::ClientConfig;
pub use net::error::ApiError;
pub use net::http::HttpClient;
pub use net::transport::{ApiRequest, Method, RawResponse, Transport};
pub use net::types::{CustomerSession, Role, StaffUser};
pub use router::{GuardDecision, NavigationGuard, NavigationOutcome};
pub use session::Session;
pub use state::{AuthStore, CustomerStore, ToastStore};

/// Browser entry point: console logging and the panic hook.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    util::browser::init_logging(log::Level::Info);
}
