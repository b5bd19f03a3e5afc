//! Owner-managed service catalog (`/dueno/servicios`).

#[cfg(test)]
#[path = "services_test.rs"]
mod services_test;

use serde::{Deserialize, Serialize};

use super::error::ApiError;
use super::http::HttpClient;
use super::transport::{ApiRequest, Transport};

const BASE: &str = "/dueno/servicios";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ServiceRequest {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "duracionMinutos")]
    pub duration_minutes: u32,
    #[serde(rename = "bufferMinutos", skip_serializing_if = "Option::is_none")]
    pub buffer_minutes: Option<u32>,
    #[serde(rename = "precio")]
    pub price: f64,
    #[serde(rename = "especialidades", default)]
    pub specialties: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "duracionMinutos")]
    pub duration_minutes: u32,
    #[serde(rename = "bufferMinutos", default)]
    pub buffer_minutes: Option<u32>,
    #[serde(rename = "precio")]
    pub price: f64,
    #[serde(rename = "especialidades", default)]
    pub specialties: Vec<String>,
    #[serde(rename = "activo")]
    pub active: bool,
    #[serde(rename = "fechaCreacion", default)]
    pub created_at: Option<String>,
}

/// List the owner's services. The endpoint returns a bare array; anything
/// else reads as an empty catalog.
pub async fn list<T: Transport>(http: &HttpClient<T>) -> Result<Vec<Service>, ApiError> {
    let resp = http.execute(ApiRequest::get(BASE)).await?;
    match resp.value() {
        items @ serde_json::Value::Array(_) => {
            serde_json::from_value(items).map_err(|e| ApiError::Decode(e.to_string()))
        }
        _ => Ok(Vec::new()),
    }
}

pub async fn create<T: Transport>(http: &HttpClient<T>, req: &ServiceRequest) -> Result<Service, ApiError> {
    http.fetch(ApiRequest::post(BASE).json(req)?).await
}

pub async fn update<T: Transport>(http: &HttpClient<T>, id: i64, req: &ServiceRequest) -> Result<Service, ApiError> {
    http.fetch(ApiRequest::put(format!("{BASE}/{id}")).json(req)?)
        .await
}

pub async fn activate<T: Transport>(http: &HttpClient<T>, id: i64) -> Result<(), ApiError> {
    http.send_unit(ApiRequest::patch(format!("{BASE}/{id}/activar")))
        .await
}

pub async fn deactivate<T: Transport>(http: &HttpClient<T>, id: i64) -> Result<(), ApiError> {
    http.send_unit(ApiRequest::patch(format!("{BASE}/{id}/desactivar")))
        .await
}
