//! Specialty catalog: managed by the platform admin, read by owners.

use serde::{Deserialize, Serialize};

use super::error::ApiError;
use super::http::HttpClient;
use super::transport::{ApiRequest, Transport};

const ADMIN_BASE: &str = "/admin/especialidades";
const ACTIVE_PATH: &str = "/especialidades";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialtyRequest {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specialty {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "activa")]
    pub active: bool,
    #[serde(rename = "fechaCreacion", default)]
    pub created_at: Option<String>,
}

/// Every specialty, active or not (admin only).
pub async fn list_all<T: Transport>(http: &HttpClient<T>) -> Result<Vec<Specialty>, ApiError> {
    http.fetch(ApiRequest::get(ADMIN_BASE)).await
}

/// Active specialties, readable by any staff role.
pub async fn list_active<T: Transport>(http: &HttpClient<T>) -> Result<Vec<Specialty>, ApiError> {
    http.fetch(ApiRequest::get(ACTIVE_PATH)).await
}

pub async fn create<T: Transport>(http: &HttpClient<T>, req: &SpecialtyRequest) -> Result<Specialty, ApiError> {
    http.fetch(ApiRequest::post(ADMIN_BASE).json(req)?).await
}

pub async fn update<T: Transport>(
    http: &HttpClient<T>,
    id: i64,
    req: &SpecialtyRequest,
) -> Result<Specialty, ApiError> {
    http.fetch(ApiRequest::put(format!("{ADMIN_BASE}/{id}")).json(req)?)
        .await
}

pub async fn activate<T: Transport>(http: &HttpClient<T>, id: i64) -> Result<(), ApiError> {
    http.send_unit(ApiRequest::patch(format!("{ADMIN_BASE}/{id}/activar")))
        .await
}

pub async fn deactivate<T: Transport>(http: &HttpClient<T>, id: i64) -> Result<(), ApiError> {
    http.send_unit(ApiRequest::patch(format!("{ADMIN_BASE}/{id}/desactivar")))
        .await
}
