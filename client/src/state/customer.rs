//! End-customer session store.
//!
//! Holds at most one customer session, bound to the tenant that issued it.
//! The store never fetches on its own; the navigation guard re-verifies a
//! session before trusting it for another tenant.

#[cfg(test)]
#[path = "customer_test.rs"]
mod customer_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::net::types::CustomerSession;

#[derive(Clone, Debug, Default)]
pub struct CustomerStore {
    inner: Arc<Mutex<Option<CustomerSession>>>,
}

impl CustomerStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Option<CustomerSession>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_customer(&self, customer: CustomerSession) {
        tracing::debug!(customer_id = ?customer.id, tenant = ?customer.tenant_slug, "customer session installed");
        *self.lock() = Some(customer);
    }

    /// Clear the customer identity. Idempotent.
    pub fn logout(&self) {
        *self.lock() = None;
    }

    #[must_use]
    pub fn customer(&self) -> Option<CustomerSession> {
        self.lock().clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.lock().is_some()
    }

    /// Whether the stored session was issued by the tenant with `slug`.
    #[must_use]
    pub fn is_authenticated_for(&self, slug: &str) -> bool {
        self.lock().as_ref().is_some_and(|c| c.is_bound_to(slug))
    }
}
