//! Request/response model and the transport seam.
//!
//! DESIGN
//! ======
//! `ApiRequest` is a plain description of a call (method, path relative to
//! the API base, query, headers, body). Interceptors in `http` rewrite it
//! before a `Transport` puts it on the wire. Responses come back as status +
//! body text so the pipeline can inspect failures before any decoding.
//!
//! The trait is `?Send` because the browser transport's futures are not.

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use crate::config::SKIP_AUTH_REDIRECT_HEADER;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// Methods that change server state.
    #[must_use]
    pub fn is_mutating(self) -> bool {
        !matches!(self, Self::Get)
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(serde_json::Value),
    Form(Vec<(String, String)>),
}

/// An outbound call relative to the API base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<RequestBody>,
}

impl ApiRequest {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), query: Vec::new(), headers: Vec::new(), body: None }
    }

    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    #[must_use]
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::Patch, path)
    }

    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Attach a JSON body.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body).map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        self.body = Some(RequestBody::Json(value));
        Ok(self)
    }

    /// Attach a form-encoded body.
    #[must_use]
    pub fn form(mut self, fields: &[(&str, &str)]) -> Self {
        let fields = fields
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        self.body = Some(RequestBody::Form(fields));
        self
    }

    #[must_use]
    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_owned(), value.to_string()));
        self
    }

    /// Set a header, replacing any existing value with the same name.
    #[must_use]
    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_header(name, value);
        self
    }

    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((name.to_owned(), value.into()));
    }

    /// Case-insensitive header lookup.
    #[must_use]
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Mark the request so a 401/403 resolves with the response instead of
    /// clearing the session.
    #[must_use]
    pub fn suppress_auth_redirect(self) -> Self {
        self.header(SKIP_AUTH_REDIRECT_HEADER, "true")
    }

    #[must_use]
    pub fn is_auth_redirect_suppressed(&self) -> bool {
        self.header_value(SKIP_AUTH_REDIRECT_HEADER)
            .is_some_and(|v| v.eq_ignore_ascii_case("true") || v == "1")
    }
}

/// Status and raw body of a backend response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the whole body as `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_str(&self.body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Body as JSON, or `Null` when empty or not JSON.
    #[must_use]
    pub fn value(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap_or(serde_json::Value::Null)
    }

    /// Decode the payload, unwrapping the `{exito, mensaje, datos}` envelope
    /// when the backend used one.
    ///
    /// An envelope with `exito: false` becomes [`ApiError::Rejected`].
    pub fn data<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        let value: serde_json::Value = if self.body.trim().is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_str(&self.body).map_err(|e| ApiError::Decode(e.to_string()))?
        };
        let payload = unwrap_envelope(value)?;
        serde_json::from_value(payload).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// The envelope's `mensaje`, if the body has one.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        self.value()
            .get("mensaje")
            .and_then(serde_json::Value::as_str)
            .map(str::to_owned)
    }
}

pub(crate) fn unwrap_envelope(value: serde_json::Value) -> Result<serde_json::Value, ApiError> {
    let serde_json::Value::Object(mut map) = value else {
        return Ok(value);
    };
    if map.get("exito").and_then(serde_json::Value::as_bool) == Some(false) {
        let message = map
            .get("mensaje")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("operation failed")
            .to_owned();
        return Err(ApiError::Rejected(message));
    }
    if map.contains_key("exito") || map.contains_key("datos") {
        return Ok(map.remove("datos").unwrap_or(serde_json::Value::Null));
    }
    Ok(serde_json::Value::Object(map))
}

/// Puts an [`ApiRequest`] on the wire.
#[async_trait::async_trait(?Send)]
pub trait Transport {
    /// Send the request and return the response, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] when no response was received.
    async fn send(&self, request: &ApiRequest) -> Result<RawResponse, ApiError>;

    /// Current value of a cookie visible to the API origin.
    fn cookie(&self, name: &str) -> Option<String>;
}

/// Find `name` in a `Cookie`-style header (`a=1; b=2`).
#[must_use]
pub fn find_cookie(header: &str, name: &str) -> Option<String> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then(|| value.to_owned())
    })
}
