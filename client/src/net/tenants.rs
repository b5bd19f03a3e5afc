//! Platform-admin tenant management (`/admin/empresas`).

use serde::{Deserialize, Serialize};

use super::error::ApiError;
use super::http::HttpClient;
use super::transport::{ApiRequest, Transport};

const BASE: &str = "/admin/empresas";

/// New tenant plus the owner account that manages it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantWithOwnerRequest {
    #[serde(rename = "nombre")]
    pub name: String,
    pub slug: String,
    #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "direccion", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "ciudad", skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(rename = "provincia", skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(rename = "telefono", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "nombreDueno")]
    pub owner_name: String,
    #[serde(rename = "apellidoDueno")]
    pub owner_surname: String,
    #[serde(rename = "emailDueno")]
    pub owner_email: String,
    #[serde(rename = "contrasenaDueno")]
    pub owner_password: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    pub slug: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "ciudad", default)]
    pub city: Option<String>,
    #[serde(rename = "activa", alias = "activo", default)]
    pub active: bool,
    #[serde(rename = "fechaCreacion", default)]
    pub created_at: Option<String>,
}

pub async fn create_with_owner<T: Transport>(
    http: &HttpClient<T>,
    req: &TenantWithOwnerRequest,
) -> Result<Tenant, ApiError> {
    http.fetch(ApiRequest::post(BASE).json(req)?).await
}

pub async fn list<T: Transport>(http: &HttpClient<T>) -> Result<Vec<Tenant>, ApiError> {
    http.fetch(ApiRequest::get(BASE)).await
}

pub async fn get<T: Transport>(http: &HttpClient<T>, id: i64) -> Result<Tenant, ApiError> {
    http.fetch(ApiRequest::get(format!("{BASE}/{id}"))).await
}

pub async fn activate<T: Transport>(http: &HttpClient<T>, id: i64) -> Result<(), ApiError> {
    http.send_unit(ApiRequest::put(format!("{BASE}/{id}/activar")))
        .await
}

pub async fn deactivate<T: Transport>(http: &HttpClient<T>, id: i64) -> Result<(), ApiError> {
    http.send_unit(ApiRequest::put(format!("{BASE}/{id}/desactivar")))
        .await
}
