//! Composition root: one HTTP client, the stores, and the guard, wired once.
//!
//! ARCHITECTURE
//! ============
//! The HTTP layer knows nothing about stores. Cleanup on an unauthorized
//! response is a hook registered here, so the dependency points one way:
//! session -> stores, session -> http.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::Arc;

use crate::config::ClientConfig;
use crate::net::error::ApiError;
use crate::net::http::HttpClient;
use crate::net::transport::Transport;
use crate::net::types::{CustomerSession, StaffUser};
use crate::net::{auth, booking};
use crate::router::{NavigationError, NavigationGuard, NavigationOutcome, RouteTable};
use crate::state::{AuthStore, CustomerStore, ToastStore};

pub struct Session<T> {
    http: Arc<HttpClient<T>>,
    auth: AuthStore,
    customers: CustomerStore,
    toasts: ToastStore,
    guard: NavigationGuard<T>,
}

impl<T: Transport> Session<T> {
    /// Wire `transport` into a fresh client and stores.
    #[must_use]
    pub fn new(transport: T, config: &ClientConfig) -> Self {
        let http = Arc::new(HttpClient::new(transport, config.csrf.clone()));
        let auth = AuthStore::new();
        let customers = CustomerStore::new();
        let toasts = ToastStore::new(config.toast_timeout);

        let (hook_auth, hook_customers) = (auth.clone(), customers.clone());
        http.on_unauthorized(move |status| {
            tracing::info!(status, "session expired; clearing staff and customer identity");
            hook_auth.logout();
            hook_customers.logout();
        });

        let guard = NavigationGuard::new(Arc::clone(&http), auth.clone(), customers.clone(), RouteTable::standard());
        Self { http, auth, customers, toasts, guard }
    }

    #[must_use]
    pub fn http(&self) -> &HttpClient<T> {
        &self.http
    }

    #[must_use]
    pub fn auth(&self) -> &AuthStore {
        &self.auth
    }

    #[must_use]
    pub fn customers(&self) -> &CustomerStore {
        &self.customers
    }

    #[must_use]
    pub fn toasts(&self) -> &ToastStore {
        &self.toasts
    }

    #[must_use]
    pub fn guard(&self) -> &NavigationGuard<T> {
        &self.guard
    }

    /// Staff login. Installs the profile from the login response, or probes
    /// the profile endpoint when the response carried none.
    pub async fn login(&self, username: &str, password: &str) -> Result<StaffUser, ApiError> {
        let user = match auth::login(&self.http, username, password).await? {
            Some(user) => user,
            None => auth::fetch_staff_profile(&self.http)
                .await
                .ok_or_else(|| ApiError::Decode("login succeeded but no staff profile is available".to_owned()))?,
        };
        tracing::info!(user_id = user.id, role = %user.role, "staff login");
        self.auth.set_user(user.clone());
        Ok(user)
    }

    /// Staff logout. Local identity is cleared even if the backend call fails.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let result = auth::logout(&self.http).await;
        if let Err(e) = &result {
            tracing::warn!(error = %e, "logout request failed; clearing local session anyway");
        }
        self.auth.logout();
        self.customers.logout();
        result
    }

    /// Customer login for tenant `slug`; the session is bound to that tenant.
    pub async fn login_customer(&self, slug: &str, phone: &str, password: &str) -> Result<CustomerSession, ApiError> {
        let mut customer = booking::login_customer(&self.http, slug, phone, password).await?;
        customer.tenant_slug = Some(slug.to_owned());
        tracing::info!(customer_id = ?customer.id, slug, "customer login");
        self.customers.set_customer(customer.clone());
        Ok(customer)
    }

    /// Rebuild the staff session from the backend cookie.
    pub async fn restore(&self) -> bool {
        self.auth.reconcile_from_backend(&self.http).await
    }

    /// Run the guard for `target`, following redirects.
    pub async fn navigate(&self, target: &str) -> Result<NavigationOutcome, NavigationError> {
        self.guard.navigate(target).await
    }
}

#[cfg(feature = "native")]
impl Session<crate::net::reqwest_transport::ReqwestTransport> {
    /// Session over the native `reqwest` transport.
    pub fn connect(config: &ClientConfig) -> Result<Self, ApiError> {
        let transport = crate::net::reqwest_transport::ReqwestTransport::new(config)?;
        Ok(Self::new(transport, config))
    }
}

#[cfg(feature = "hydrate")]
impl Session<crate::net::browser_transport::BrowserTransport> {
    /// Session over the browser `fetch` transport.
    #[must_use]
    pub fn browser(config: &ClientConfig) -> Self {
        let transport = crate::net::browser_transport::BrowserTransport::new(config.base_url.clone());
        Self::new(transport, config)
    }
}
