//! Helpers shared across client modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `query` is pure and used by both the router and the transports;
//! `browser` holds hydrate-only glue.

pub mod query;

#[cfg(feature = "hydrate")]
pub mod browser;
