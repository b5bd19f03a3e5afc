//! Weekly availability of the signed-in professional.

use serde::{Deserialize, Serialize};

use super::error::ApiError;
use super::http::HttpClient;
use super::transport::{ApiRequest, Transport};
use super::types::Weekday;

const BASE: &str = "/profesional/disponibilidad";
const TENANT_HOURS_PATH: &str = "/profesional/horarios-empresa";

/// One weekly slot; times are `HH:mm`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityRequest {
    #[serde(rename = "diaSemana")]
    pub weekday: Weekday,
    #[serde(rename = "horaInicio")]
    pub start: String,
    #[serde(rename = "horaFin")]
    pub end: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    /// `None` for slots inherited from the tenant hours and not yet saved.
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(rename = "diaSemana")]
    pub weekday: Weekday,
    #[serde(rename = "horaInicio")]
    pub start: String,
    #[serde(rename = "horaFin")]
    pub end: String,
    #[serde(rename = "activo", default)]
    pub active: bool,
}

/// Opening hours of the professional's tenant. The shape is tenant-defined,
/// so it is returned as raw JSON.
pub async fn tenant_hours<T: Transport>(http: &HttpClient<T>) -> Result<serde_json::Value, ApiError> {
    http.fetch(ApiRequest::get(TENANT_HOURS_PATH)).await
}

pub async fn list<T: Transport>(http: &HttpClient<T>) -> Result<Vec<Availability>, ApiError> {
    http.fetch(ApiRequest::get(BASE)).await
}

/// Seed the professional's availability from the tenant hours.
pub async fn initialize_from_tenant<T: Transport>(http: &HttpClient<T>) -> Result<serde_json::Value, ApiError> {
    http.fetch(ApiRequest::post(format!("{BASE}/inicializar-desde-empresa")))
        .await
}

pub async fn create<T: Transport>(http: &HttpClient<T>, req: &AvailabilityRequest) -> Result<Availability, ApiError> {
    http.fetch(ApiRequest::post(BASE).json(req)?).await
}

pub async fn update<T: Transport>(
    http: &HttpClient<T>,
    id: i64,
    req: &AvailabilityRequest,
) -> Result<Availability, ApiError> {
    http.fetch(ApiRequest::put(format!("{BASE}/{id}")).json(req)?)
        .await
}

pub async fn delete<T: Transport>(http: &HttpClient<T>, id: i64) -> Result<(), ApiError> {
    http.send_unit(ApiRequest::delete(format!("{BASE}/{id}"))).await
}
