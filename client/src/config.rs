//! Client configuration parsed from environment variables.
//!
//! The CSRF contract (cookie name, header name, exempt paths) and the
//! redirect opt-out header are fixed by the backend and live here as
//! constants so the transport and the pipeline agree on them.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

use crate::net::transport::Method;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_TOAST_TIMEOUT_MS: u64 = 4000;

/// Cookie the backend uses to deliver the CSRF token.
pub const CSRF_COOKIE: &str = "XSRF-TOKEN";
/// Header the backend expects the CSRF token echoed in.
pub const CSRF_HEADER: &str = "X-XSRF-TOKEN";
/// Session cookie issued after a successful login.
pub const SESSION_COOKIE: &str = "JSESSIONID";
/// Sentinel header marking a request whose 401/403 must not trigger cleanup.
pub const SKIP_AUTH_REDIRECT_HEADER: &str = "X-Skip-Auth-Redirect";

/// Paths the backend never checks CSRF on.
pub const CSRF_EXEMPT_PATHS: &[&str] = &["/auth/login", "/auth/logout"];
/// Path prefixes the backend never checks CSRF on.
pub const CSRF_EXEMPT_PREFIXES: &[&str] = &["/publico"];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },
    #[error("invalid API base URL: {0}")]
    InvalidBaseUrl(String),
}

/// Which request methods receive the CSRF header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CsrfScope {
    /// Every method, reads included.
    #[default]
    AllMethods,
    /// Only `POST`, `PUT`, `PATCH` and `DELETE`.
    MutatingOnly,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrfPolicy {
    pub scope: CsrfScope,
    pub cookie_name: String,
    pub header_name: String,
}

impl Default for CsrfPolicy {
    fn default() -> Self {
        Self { scope: CsrfScope::default(), cookie_name: CSRF_COOKIE.to_owned(), header_name: CSRF_HEADER.to_owned() }
    }
}

impl CsrfPolicy {
    /// Whether `path` (relative to the API base, query allowed) skips CSRF.
    #[must_use]
    pub fn is_exempt(&self, path: &str) -> bool {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        if CSRF_EXEMPT_PATHS.contains(&path) {
            return true;
        }
        CSRF_EXEMPT_PREFIXES
            .iter()
            .any(|prefix| path == *prefix || path.strip_prefix(prefix).is_some_and(|rest| rest.starts_with('/')))
    }

    /// Whether a request with this method and path should carry the token.
    #[must_use]
    pub fn applies_to(&self, method: Method, path: &str) -> bool {
        let method_in_scope = match self.scope {
            CsrfScope::AllMethods => true,
            CsrfScope::MutatingOnly => method.is_mutating(),
        };
        method_in_scope && !self.is_exempt(path)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeouts: Timeouts,
    pub csrf: CsrfPolicy,
    pub toast_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_owned(),
            timeouts: Timeouts::default(),
            csrf: CsrfPolicy::default(),
            toast_timeout: Duration::from_millis(DEFAULT_TOAST_TIMEOUT_MS),
        }
    }
}

impl ClientConfig {
    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `TURNOS_API_BASE_URL`: default `http://localhost:8080/api`
    /// - `TURNOS_REQUEST_TIMEOUT_SECS`: default 30
    /// - `TURNOS_CONNECT_TIMEOUT_SECS`: default 10
    /// - `TURNOS_CSRF_SCOPE`: `all` (default) or `mutating`
    /// - `TURNOS_TOAST_TIMEOUT_MS`: default 4000, `0` disables auto-dismiss
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = std::env::var("TURNOS_API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_owned());
        let timeouts = Timeouts {
            request_secs: env_parse("TURNOS_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?,
            connect_secs: env_parse("TURNOS_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS)?,
        };
        let scope = parse_csrf_scope(std::env::var("TURNOS_CSRF_SCOPE").ok().as_deref())?;
        let toast_ms = env_parse("TURNOS_TOAST_TIMEOUT_MS", DEFAULT_TOAST_TIMEOUT_MS)?;

        Self {
            base_url,
            timeouts,
            csrf: CsrfPolicy { scope, ..CsrfPolicy::default() },
            toast_timeout: Duration::from_millis(toast_ms),
        }
        .with_base_url_checked()
    }

    /// Replace the base URL, keeping everything else.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = normalize_base_url(&base_url.into());
        self
    }

    fn with_base_url_checked(mut self) -> Result<Self, ConfigError> {
        let normalized = normalize_base_url(&self.base_url);
        if !(normalized.starts_with("http://") || normalized.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(self.base_url));
        }
        self.base_url = normalized;
        Ok(self)
    }
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_owned()
}

fn env_parse(var: &'static str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(var) {
        Ok(value) => value
            .trim()
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidValue { var, value }),
        Err(_) => Ok(default),
    }
}

fn parse_csrf_scope(raw: Option<&str>) -> Result<CsrfScope, ConfigError> {
    match raw.map(str::trim).unwrap_or("all") {
        "all" => Ok(CsrfScope::AllMethods),
        "mutating" => Ok(CsrfScope::MutatingOnly),
        other => Err(ConfigError::InvalidValue { var: "TURNOS_CSRF_SCOPE", value: other.to_owned() }),
    }
}
