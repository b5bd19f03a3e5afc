//! Client-side routing: the route table and the navigation guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! `routes` is pure matching and rewriting. `guard` decides, per transition,
//! whether the resolved route may render, reconciling sessions with the
//! backend on the way.

pub mod guard;
pub mod routes;

pub use guard::{GuardDecision, NavigationError, NavigationGuard, NavigationOutcome};
pub use routes::{Resolution, ResolvedRoute, RouteMeta, RouteTable};
