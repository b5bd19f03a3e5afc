//! Navigation guard: runs before every route transition.
//!
//! ARCHITECTURE
//! ============
//! Each invocation walks four steps in order:
//!
//! 1. Staff bootstrap. With no staff identity in memory, probe the profile
//!    endpoint once; a staff payload is installed, anything else is ignored.
//! 2. Customer routes. A session already bound to the route's tenant is
//!    allowed. Otherwise the profile is re-probed and cross-checked against
//!    the tenant's public record before it is trusted. Every failure ends in
//!    the tenant's customer login with a `redirect` back to the original
//!    location; this step never falls through to the staff rules.
//! 3. Staff rules: authentication, exact role match, and the `/login`
//!    bounce for users who are already signed in.
//! 4. Allow.
//!
//! Every invocation takes a generation number. After each network await the
//! guard checks that no newer navigation has started; a superseded run
//! returns [`GuardDecision::Superseded`] without touching any store.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use super::routes::{LOGIN_PATH, Resolution, ResolvedRoute, RouteTable, TENANT_PARAM};
use crate::net::http::HttpClient;
use crate::net::transport::Transport;
use crate::net::types::CustomerSession;
use crate::net::{auth, booking};
use crate::state::{AuthStore, CustomerStore};
use crate::util::query::encode_query_value;

/// Redirects followed by [`NavigationGuard::navigate`] before giving up.
pub const MAX_REDIRECTS: usize = 8;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(String),
    /// A newer navigation started while this one was waiting on the network.
    Superseded,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavigationOutcome {
    Arrived(ResolvedRoute),
    Superseded,
}

#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    #[error("too many redirects navigating to {target} (last: {last})")]
    TooManyRedirects { target: String, last: String },
}

/// Customer login page for `slug`, returning to `return_to` afterwards.
#[must_use]
pub fn customer_login_path(slug: &str, return_to: &str) -> String {
    format!("/empresa/{slug}/login-cliente?redirect={}", encode_query_value(return_to))
}

pub struct NavigationGuard<T> {
    http: Arc<HttpClient<T>>,
    auth: AuthStore,
    customers: CustomerStore,
    routes: RouteTable,
    generation: AtomicU64,
}

impl<T: Transport> NavigationGuard<T> {
    #[must_use]
    pub fn new(http: Arc<HttpClient<T>>, auth: AuthStore, customers: CustomerStore, routes: RouteTable) -> Self {
        Self { http, auth, customers, routes, generation: AtomicU64::new(0) }
    }

    #[must_use]
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Resolve `target` and follow rewrites and guard redirects until a
    /// route is allowed.
    pub async fn navigate(&self, target: &str) -> Result<NavigationOutcome, NavigationError> {
        let mut current = target.to_owned();
        for _ in 0..=MAX_REDIRECTS {
            let route = match self.routes.resolve(&current) {
                Resolution::Redirect(to) => {
                    current = to;
                    continue;
                }
                Resolution::Route(route) => route,
            };
            match self.before_each(&route).await {
                GuardDecision::Allow => return Ok(NavigationOutcome::Arrived(route)),
                GuardDecision::Superseded => return Ok(NavigationOutcome::Superseded),
                GuardDecision::Redirect(to) => {
                    tracing::debug!(from = %route.full_path, to = %to, "guard redirect");
                    current = to;
                }
            }
        }
        tracing::warn!(requested = %target, last = %current, "redirect limit reached");
        Err(NavigationError::TooManyRedirects { target: target.to_owned(), last: current })
    }

    /// Decide whether navigation to `route` may proceed.
    pub async fn before_each(&self, route: &ResolvedRoute) -> GuardDecision {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        if !self.auth.is_authenticated() {
            let user = auth::fetch_staff_profile(&self.http).await;
            if !self.is_current(generation) {
                return GuardDecision::Superseded;
            }
            if let Some(user) = user {
                self.auth.set_user(user);
            }
        }

        if route.meta.requires_customer_auth {
            return self.check_customer(route, generation).await;
        }

        self.check_staff(route)
    }

    async fn check_customer(&self, route: &ResolvedRoute, generation: u64) -> GuardDecision {
        let Some(slug) = route.param(TENANT_PARAM) else {
            tracing::warn!(path = %route.path, "customer route without tenant slug");
            return GuardDecision::Redirect(LOGIN_PATH.to_owned());
        };
        if self.customers.is_authenticated_for(slug) {
            return GuardDecision::Allow;
        }

        let verified = self.verify_customer(slug).await;
        if !self.is_current(generation) {
            return GuardDecision::Superseded;
        }
        match verified {
            Some(customer) => {
                self.customers.set_customer(customer);
                GuardDecision::Allow
            }
            None => GuardDecision::Redirect(customer_login_path(slug, &route.full_path)),
        }
    }

    /// Probe the customer profile and confirm it belongs to `slug`.
    async fn verify_customer(&self, slug: &str) -> Option<CustomerSession> {
        let mut customer = auth::fetch_customer_profile(&self.http).await?;
        let tenant = match booking::tenant(&self.http, slug).await {
            Ok(tenant) => tenant,
            Err(e) => {
                tracing::info!(slug, error = %e, "tenant lookup failed; customer session not trusted");
                return None;
            }
        };
        if !customer.belongs_to(&tenant) {
            tracing::info!(
                slug,
                tenant_id = tenant.id,
                customer_tenant = ?customer.tenant_id,
                "customer session belongs to another tenant"
            );
            return None;
        }
        if customer.tenant_id.is_none() {
            customer.tenant_id = Some(tenant.id);
        }
        customer.tenant_slug = Some(tenant.slug);
        if customer.tenant_name.is_none() && !tenant.name.is_empty() {
            customer.tenant_name = Some(tenant.name);
        }
        Some(customer)
    }

    fn check_staff(&self, route: &ResolvedRoute) -> GuardDecision {
        let state = self.auth.snapshot();
        let role = state.user.as_ref().map(|u| u.role);

        if route.meta.requires_auth && !state.authenticated {
            return GuardDecision::Redirect(LOGIN_PATH.to_owned());
        }
        if let Some(required) = route.meta.role {
            if role != Some(required) {
                tracing::debug!(path = %route.path, required = %required, actual = ?role, "role mismatch");
                return GuardDecision::Redirect(LOGIN_PATH.to_owned());
            }
        }
        if route.path == LOGIN_PATH && state.authenticated {
            match role.and_then(|r| r.landing_path()) {
                Some(landing) => return GuardDecision::Redirect(landing.to_owned()),
                None => {
                    tracing::warn!(role = ?role, "signed-in user has no landing page; forcing logout");
                    self.auth.logout();
                }
            }
        }
        GuardDecision::Allow
    }
}
