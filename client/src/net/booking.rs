//! Public booking flow under `/publico`.
//!
//! These endpoints need neither a session nor a CSRF token; customers hit
//! them before (or instead of) signing in.

#[cfg(test)]
#[path = "booking_test.rs"]
mod booking_test;

use serde::{Deserialize, Serialize};

use super::cancellation_policies::Policy;
use super::error::ApiError;
use super::http::HttpClient;
use super::transport::{ApiRequest, Transport};
use super::types::{CustomerSession, PublicTenant};

fn tenant_path(slug: &str) -> String {
    format!("/publico/empresa/{slug}")
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PublicService {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "duracionMinutos")]
    pub duration_minutes: u32,
    #[serde(rename = "precio")]
    pub price: f64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicProfessional {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "apellido", default)]
    pub surname: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
}

/// Bookable slot; times are ISO date-times.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    #[serde(rename = "horaInicio")]
    pub start: String,
    #[serde(rename = "horaFin")]
    pub end: String,
    #[serde(rename = "profesionalId")]
    pub professional_id: i64,
    #[serde(rename = "profesionalNombre", default)]
    pub professional_name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterCustomerRequest {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "apellido")]
    pub surname: String,
    pub email: String,
    #[serde(rename = "contrasena")]
    pub password: String,
    #[serde(rename = "telefono")]
    pub phone: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    #[serde(rename = "servicioId")]
    pub service_id: i64,
    #[serde(rename = "profesionalId")]
    pub professional_id: i64,
    /// `YYYY-MM-DD`
    #[serde(rename = "fecha")]
    pub date: String,
    /// `HH:mm`
    #[serde(rename = "horaInicio")]
    pub start: String,
    #[serde(rename = "nombreCliente")]
    pub customer_name: String,
    #[serde(rename = "telefonoCliente")]
    pub customer_phone: String,
    #[serde(rename = "emailCliente", skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    #[serde(rename = "observaciones", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A booked appointment ("turno").
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    #[serde(rename = "servicioId")]
    pub service_id: i64,
    #[serde(rename = "servicioNombre", default)]
    pub service_name: String,
    #[serde(rename = "profesionalId")]
    pub professional_id: i64,
    #[serde(rename = "profesionalNombre", default)]
    pub professional_name: String,
    #[serde(rename = "profesionalApellido", default)]
    pub professional_surname: String,
    #[serde(rename = "fecha")]
    pub date: String,
    #[serde(rename = "horaInicio")]
    pub start: String,
    #[serde(rename = "horaFin")]
    pub end: String,
    #[serde(rename = "duracionMinutos", default)]
    pub duration_minutes: u32,
    #[serde(rename = "precio", default)]
    pub price: f64,
    #[serde(rename = "estado")]
    pub status: String,
    #[serde(rename = "clienteNombre", default)]
    pub customer_name: String,
    #[serde(rename = "clienteTelefono", default)]
    pub customer_phone: String,
    #[serde(rename = "clienteEmail", default)]
    pub customer_email: Option<String>,
    #[serde(rename = "observaciones", default)]
    pub notes: Option<String>,
}

#[derive(Serialize)]
struct CustomerCredentials<'a> {
    #[serde(rename = "telefono")]
    phone: &'a str,
    #[serde(rename = "contrasena")]
    password: &'a str,
}

/// Public record of the tenant with `slug`.
pub async fn tenant<T: Transport>(http: &HttpClient<T>, slug: &str) -> Result<PublicTenant, ApiError> {
    http.fetch(ApiRequest::get(tenant_path(slug))).await
}

/// Active services a tenant offers.
pub async fn services<T: Transport>(http: &HttpClient<T>, slug: &str) -> Result<Vec<PublicService>, ApiError> {
    http.fetch(ApiRequest::get(format!("{}/servicios", tenant_path(slug))))
        .await
}

/// Professionals who can perform `service_id`.
pub async fn professionals<T: Transport>(
    http: &HttpClient<T>,
    slug: &str,
    service_id: i64,
) -> Result<Vec<PublicProfessional>, ApiError> {
    let req = ApiRequest::get(format!("{}/profesionales", tenant_path(slug))).query("servicioId", service_id);
    http.fetch(req).await
}

/// Free slots for one professional, service and date (`YYYY-MM-DD`).
pub async fn availability<T: Transport>(
    http: &HttpClient<T>,
    slug: &str,
    service_id: i64,
    professional_id: i64,
    date: &str,
) -> Result<Vec<Slot>, ApiError> {
    let req = ApiRequest::get("/publico/disponibilidad")
        .query("empresaSlug", slug)
        .query("servicioId", service_id)
        .query("profesionalId", professional_id)
        .query("fecha", date);
    http.fetch(req).await
}

pub async fn register_customer<T: Transport>(http: &HttpClient<T>, req: &RegisterCustomerRequest) -> Result<(), ApiError> {
    http.send_unit(ApiRequest::post("/publico/registro-cliente").json(req)?)
        .await
}

pub async fn create_booking<T: Transport>(
    http: &HttpClient<T>,
    slug: &str,
    req: &BookingRequest,
) -> Result<Booking, ApiError> {
    http.fetch(ApiRequest::post(format!("{}/turnos", tenant_path(slug))).json(req)?)
        .await
}

/// Whether `phone` already has an account with the tenant. Any failure
/// reads as "not registered".
pub async fn is_phone_registered<T: Transport>(http: &HttpClient<T>, slug: &str, phone: &str) -> bool {
    let req = ApiRequest::get(format!("{}/verificar-telefono", tenant_path(slug))).query("telefono", phone);
    match http.fetch::<bool>(req).await {
        Ok(registered) => registered,
        Err(e) => {
            tracing::debug!(error = %e, slug, "phone check failed; assuming unregistered");
            false
        }
    }
}

pub async fn active_policies<T: Transport>(http: &HttpClient<T>, slug: &str) -> Result<Vec<Policy>, ApiError> {
    http.fetch(ApiRequest::get(format!("{}/politicas-cancelacion/activas", tenant_path(slug))))
        .await
}

/// `POST /publico/empresa/{slug}/login-cliente`.
///
/// Sent with the redirect opt-out; bad credentials surface as
/// [`ApiError::Status`] without clearing any session.
pub async fn login_customer<T: Transport>(
    http: &HttpClient<T>,
    slug: &str,
    phone: &str,
    password: &str,
) -> Result<CustomerSession, ApiError> {
    let req = ApiRequest::post(format!("{}/login-cliente", tenant_path(slug)))
        .json(&CustomerCredentials { phone, password })?
        .suppress_auth_redirect();
    let resp = http.execute(req).await?;
    if !resp.is_success() {
        return Err(ApiError::Status { status: resp.status, message: resp.message() });
    }
    resp.data()
}
