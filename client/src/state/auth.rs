//! Staff session store.
//!
//! SYSTEM CONTEXT
//! ==============
//! Read by the navigation guard and by views that render per-role. Identity
//! lives in memory only; after a reload it is rebuilt from the backend's
//! session cookie through [`AuthStore::reconcile_from_backend`].

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::net::http::HttpClient;
use crate::net::transport::Transport;
use crate::net::types::{Role, StaffUser};

/// Snapshot of the staff session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<StaffUser>,
    pub authenticated: bool,
}

/// Shared handle; clones observe the same state.
#[derive(Clone, Debug, Default)]
pub struct AuthStore {
    inner: Arc<Mutex<AuthState>>,
}

impl AuthStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, AuthState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_user(&self, user: StaffUser) {
        tracing::debug!(user_id = user.id, role = %user.role, "staff session installed");
        let mut state = self.lock();
        state.user = Some(user);
        state.authenticated = true;
    }

    /// Clear the staff identity. Idempotent.
    pub fn logout(&self) {
        let mut state = self.lock();
        state.user = None;
        state.authenticated = false;
    }

    #[must_use]
    pub fn snapshot(&self) -> AuthState {
        self.lock().clone()
    }

    #[must_use]
    pub fn user(&self) -> Option<StaffUser> {
        self.lock().user.clone()
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.lock().user.as_ref().map(|u| u.role)
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.lock().authenticated
    }

    /// Rebuild the staff session from the backend cookie.
    ///
    /// Returns `false` (leaving the store untouched) when there is no staff
    /// session: no cookie, a customer profile, or any failure on the way.
    pub async fn reconcile_from_backend<T: Transport>(&self, http: &HttpClient<T>) -> bool {
        match crate::net::auth::fetch_staff_profile(http).await {
            Some(user) => {
                self.set_user(user);
                true
            }
            None => false,
        }
    }
}
