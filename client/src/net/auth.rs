//! Session endpoints under `/auth`.
//!
//! The profile endpoint is shared by staff and customers, so the two
//! interpreters here decide which kind of identity a probe returned. Both
//! collapse every failure into `None`; callers treat that as "no session".

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::ApiError;
use super::http::HttpClient;
use super::transport::{ApiRequest, RawResponse, Transport};
use super::types::{CUSTOMER_ROLE, CustomerSession, StaffUser};

pub const LOGIN_PATH: &str = "/auth/login";
pub const LOGOUT_PATH: &str = "/auth/logout";
pub const CSRF_PATH: &str = "/auth/csrf";
pub const PROFILE_PATH: &str = "/auth/perfil";
pub const REGISTER_SUPER_ADMIN_PATH: &str = "/auth/registrar-super-admin";

/// Payload for creating a platform administrator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuperAdminRequest {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "apellido")]
    pub surname: String,
    pub email: String,
    #[serde(rename = "contrasena")]
    pub password: String,
    #[serde(rename = "telefono", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// `POST /auth/login` with form credentials.
///
/// Sent with the redirect opt-out so a wrong password does not spend the
/// client's one-shot unauthorized cleanup. Returns the staff profile when
/// the success envelope carries one.
pub async fn login<T: Transport>(
    http: &HttpClient<T>,
    username: &str,
    password: &str,
) -> Result<Option<StaffUser>, ApiError> {
    let req = ApiRequest::post(LOGIN_PATH)
        .form(&[("username", username), ("password", password)])
        .suppress_auth_redirect();
    let resp = http.execute(req).await?;
    if !resp.is_success() {
        return Err(ApiError::Status { status: resp.status, message: resp.message() });
    }
    let payload = super::transport::unwrap_envelope(resp.value())?;
    Ok(serde_json::from_value(payload).ok())
}

/// `POST /auth/registrar-super-admin`. Not CSRF exempt; the created
/// administrator comes back in the envelope.
pub async fn register_super_admin<T: Transport>(
    http: &HttpClient<T>,
    req: &SuperAdminRequest,
) -> Result<StaffUser, ApiError> {
    http.fetch(ApiRequest::post(REGISTER_SUPER_ADMIN_PATH).json(req)?).await
}

/// `POST /auth/logout`. The backend invalidates the session cookie.
pub async fn logout<T: Transport>(http: &HttpClient<T>) -> Result<(), ApiError> {
    let resp = http
        .execute(ApiRequest::post(LOGOUT_PATH).suppress_auth_redirect())
        .await?;
    if resp.is_success() {
        Ok(())
    } else {
        Err(ApiError::Status { status: resp.status, message: resp.message() })
    }
}

/// `GET /auth/csrf`, which (re)issues the CSRF cookie.
pub async fn fetch_csrf<T: Transport>(http: &HttpClient<T>) -> Result<(), ApiError> {
    http.execute(ApiRequest::get(CSRF_PATH)).await.map(|_| ())
}

/// `GET /auth/perfil` with the redirect opt-out; a 401 comes back as a response.
pub async fn probe_profile<T: Transport>(http: &HttpClient<T>) -> Result<RawResponse, ApiError> {
    http.execute(ApiRequest::get(PROFILE_PATH).suppress_auth_redirect())
        .await
}

/// Probe the profile endpoint for a staff identity.
///
/// `None` on network failure, non-2xx, `exito: false`, a payload that looks
/// like a customer (tenant id present or `CLIENTE` role), or a payload that
/// does not decode.
pub async fn fetch_staff_profile<T: Transport>(http: &HttpClient<T>) -> Option<StaffUser> {
    let resp = match probe_profile(http).await {
        Ok(resp) => resp,
        Err(e) => {
            tracing::debug!(error = %e, "staff profile probe failed");
            return None;
        }
    };
    staff_from_probe(&resp)
}

/// Probe the profile endpoint for a customer identity.
///
/// Only an exact 200 with at least one identity field is accepted.
pub async fn fetch_customer_profile<T: Transport>(http: &HttpClient<T>) -> Option<CustomerSession> {
    let resp = match probe_profile(http).await {
        Ok(resp) => resp,
        Err(e) => {
            tracing::debug!(error = %e, "customer profile probe failed");
            return None;
        }
    };
    customer_from_probe(&resp)
}

pub(crate) fn staff_from_probe(resp: &RawResponse) -> Option<StaffUser> {
    if !resp.is_success() {
        return None;
    }
    let data = probe_payload(resp)?;
    if looks_like_customer(&data) {
        tracing::debug!("profile probe returned a customer; not a staff session");
        return None;
    }
    serde_json::from_value(data)
        .map_err(|e| tracing::warn!(error = %e, "staff profile payload malformed"))
        .ok()
}

pub(crate) fn customer_from_probe(resp: &RawResponse) -> Option<CustomerSession> {
    if resp.status != 200 {
        return None;
    }
    let data = probe_payload(resp)?;
    let customer: CustomerSession = serde_json::from_value(data).ok()?;
    customer.has_identity().then_some(customer)
}

fn probe_payload(resp: &RawResponse) -> Option<Value> {
    let value = resp.value();
    if value.get("exito").and_then(Value::as_bool) != Some(true) {
        return None;
    }
    value.get("datos").filter(|d| d.is_object()).cloned()
}

fn looks_like_customer(data: &Value) -> bool {
    let has_tenant = data.get("empresaId").is_some_and(|v| !v.is_null());
    let customer_role = data.get("rol").and_then(Value::as_str) == Some(CUSTOMER_ROLE);
    has_tenant || customer_role
}
