//! HTTP pipeline: every backend call goes through [`HttpClient::execute`].
//!
//! ARCHITECTURE
//! ============
//! Request side: attach the CSRF token (read from its cookie) to every
//! non-exempt call in scope. A missing token is logged and the request goes
//! out anyway; the backend is the enforcement point.
//!
//! Response side: 401/403 on a request carrying the opt-out sentinel resolves
//! with the error response. Otherwise the registered unauthorized hooks run
//! (the composition root wires them to store cleanup) and the error
//! propagates. A one-shot latch keeps the hooks to a single run per client
//! lifetime, so concurrent failing requests clean up once. The pipeline never
//! navigates; redirects are the guard's job.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::transport::{ApiRequest, RawResponse, Transport};
use crate::config::CsrfPolicy;

type UnauthorizedHook = Box<dyn Fn(u16) + Send + Sync>;

pub struct HttpClient<T> {
    transport: T,
    csrf: CsrfPolicy,
    hooks: Mutex<Vec<UnauthorizedHook>>,
    unauthorized_latched: AtomicBool,
}

impl<T: Transport> HttpClient<T> {
    #[must_use]
    pub fn new(transport: T, csrf: CsrfPolicy) -> Self {
        Self { transport, csrf, hooks: Mutex::new(Vec::new()), unauthorized_latched: AtomicBool::new(false) }
    }

    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Register a callback run on the first unauthorized response.
    pub fn on_unauthorized<F>(&self, hook: F)
    where
        F: Fn(u16) + Send + Sync + 'static,
    {
        self.hooks
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(Box::new(hook));
    }

    /// Whether the unauthorized hooks have already fired.
    #[must_use]
    pub fn unauthorized_cleanup_done(&self) -> bool {
        self.unauthorized_latched.load(Ordering::SeqCst)
    }

    /// Run a request through the interceptors.
    ///
    /// Non-2xx responses become errors, except 401/403 on requests marked
    /// with [`ApiRequest::suppress_auth_redirect`], which resolve with the
    /// response so callers can inspect it.
    pub async fn execute(&self, request: ApiRequest) -> Result<RawResponse, ApiError> {
        let request = self.attach_csrf(request);
        let response = self.transport.send(&request).await?;
        self.intercept(&request, response)
    }

    /// Execute and decode the payload (envelope unwrapped when present).
    pub async fn fetch<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R, ApiError> {
        self.execute(request).await?.data()
    }

    /// Execute and discard the body, still honoring a failed envelope.
    pub async fn send_unit(&self, request: ApiRequest) -> Result<(), ApiError> {
        let response = self.execute(request).await?;
        super::transport::unwrap_envelope(response.value()).map(|_| ())
    }

    fn attach_csrf(&self, mut request: ApiRequest) -> ApiRequest {
        if !self.csrf.applies_to(request.method, &request.path) {
            return request;
        }
        match self.transport.cookie(&self.csrf.cookie_name) {
            Some(token) => request.set_header(&self.csrf.header_name, token),
            None if request.method.is_mutating() => {
                tracing::warn!(method = %request.method, path = %request.path, "CSRF token cookie missing; sending without it");
            }
            None => {
                tracing::debug!(path = %request.path, "no CSRF token for read request");
            }
        }
        request
    }

    fn intercept(&self, request: &ApiRequest, response: RawResponse) -> Result<RawResponse, ApiError> {
        if response.is_success() {
            return Ok(response);
        }
        let status = response.status;
        if matches!(status, 401 | 403) {
            if request.is_auth_redirect_suppressed() {
                tracing::debug!(status, path = %request.path, "unauthorized response suppressed by caller");
                return Ok(response);
            }
            self.fire_unauthorized(status, &request.path);
            return Err(ApiError::Unauthorized { status, message: response.message() });
        }
        Err(ApiError::Status { status, message: response.message() })
    }

    fn fire_unauthorized(&self, status: u16, path: &str) {
        if self.unauthorized_latched.swap(true, Ordering::SeqCst) {
            tracing::debug!(status, path, "unauthorized cleanup already performed");
            return;
        }
        tracing::info!(status, path, "unauthorized response; clearing session state");
        let hooks = self
            .hooks
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        for hook in hooks.iter() {
            hook(status);
        }
    }
}
