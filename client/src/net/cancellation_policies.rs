//! Tenant cancellation / no-show policies (`/politicas-cancelacion`).
//!
//! The backend infers the tenant from the authenticated owner, so requests
//! never carry a tenant id.

#[cfg(test)]
#[path = "cancellation_policies_test.rs"]
mod cancellation_policies_test;

use serde::{Deserialize, Serialize};

use super::error::ApiError;
use super::http::HttpClient;
use super::transport::{ApiRequest, Transport};

const BASE: &str = "/politicas-cancelacion";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolicyKind {
    #[serde(rename = "CANCELACION")]
    Cancellation,
    #[serde(rename = "INASISTENCIA")]
    NoShow,
    #[serde(rename = "AMBOS")]
    Both,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Penalty {
    #[serde(rename = "NINGUNA")]
    NoPenalty,
    #[serde(rename = "ADVERTENCIA")]
    Warning,
    #[serde(rename = "BLOQUEO")]
    Block,
    #[serde(rename = "MULTA")]
    Fine,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyRequest {
    #[serde(rename = "tipo")]
    pub kind: PolicyKind,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "horasLimiteCancelacion")]
    pub cancellation_deadline_hours: u32,
    #[serde(rename = "penalizacion")]
    pub penalty: Penalty,
    #[serde(rename = "mensajeCliente", skip_serializing_if = "Option::is_none")]
    pub customer_message: Option<String>,
    #[serde(rename = "activa")]
    pub active: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    pub id: i64,
    #[serde(rename = "empresaId", default)]
    pub tenant_id: Option<i64>,
    #[serde(rename = "tipo")]
    pub kind: PolicyKind,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "horasLimiteCancelacion")]
    pub cancellation_deadline_hours: u32,
    #[serde(rename = "penalizacion")]
    pub penalty: Penalty,
    #[serde(rename = "mensajeCliente", default)]
    pub customer_message: Option<String>,
    #[serde(rename = "activa")]
    pub active: bool,
    #[serde(rename = "fechaCreacion", default)]
    pub created_at: Option<String>,
    #[serde(rename = "fechaModificacion", default)]
    pub updated_at: Option<String>,
}

pub async fn list_active<T: Transport>(http: &HttpClient<T>) -> Result<Vec<Policy>, ApiError> {
    http.fetch(ApiRequest::get(format!("{BASE}/activas"))).await
}

pub async fn list_all<T: Transport>(http: &HttpClient<T>) -> Result<Vec<Policy>, ApiError> {
    http.fetch(ApiRequest::get(BASE)).await
}

pub async fn create<T: Transport>(http: &HttpClient<T>, req: &PolicyRequest) -> Result<Policy, ApiError> {
    http.fetch(ApiRequest::post(BASE).json(req)?).await
}

pub async fn update<T: Transport>(http: &HttpClient<T>, id: i64, req: &PolicyRequest) -> Result<Policy, ApiError> {
    http.fetch(ApiRequest::put(format!("{BASE}/{id}")).json(req)?)
        .await
}

pub async fn activate<T: Transport>(http: &HttpClient<T>, id: i64) -> Result<(), ApiError> {
    http.send_unit(ApiRequest::put(format!("{BASE}/{id}/activar")))
        .await
}

pub async fn deactivate<T: Transport>(http: &HttpClient<T>, id: i64) -> Result<(), ApiError> {
    http.send_unit(ApiRequest::put(format!("{BASE}/{id}/desactivar")))
        .await
}

pub async fn delete<T: Transport>(http: &HttpClient<T>, id: i64) -> Result<(), ApiError> {
    http.send_unit(ApiRequest::delete(format!("{BASE}/{id}"))).await
}

/// Active policies of a tenant by id.
pub async fn list_active_for_tenant<T: Transport>(http: &HttpClient<T>, tenant_id: i64) -> Result<Vec<Policy>, ApiError> {
    http.fetch(ApiRequest::get(format!("{BASE}/empresa/{tenant_id}/activas")))
        .await
}
