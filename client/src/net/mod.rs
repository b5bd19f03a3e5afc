//! Networking modules for the booking REST backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `transport` is the seam to the wire (`reqwest` natively, `gloo-net` in the
//! browser), `http` layers the CSRF and unauthorized interceptors on top,
//! and the remaining modules are typed wrappers around backend resources.

pub mod auth;
pub mod blocks;
pub mod booking;
pub mod cancellation_policies;
pub mod customer;
pub mod error;
pub mod http;
pub mod schedules;
pub mod services;
pub mod specialties;
pub mod tenants;
pub mod transport;
pub mod types;

#[cfg(feature = "native")]
pub mod reqwest_transport;

#[cfg(feature = "hydrate")]
pub mod browser_transport;

#[cfg(test)]
pub(crate) mod test_helpers;
