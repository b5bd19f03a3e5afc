//! Date blocks (time off) for the signed-in professional, including the
//! conflict check against already-booked appointments.

#[cfg(test)]
#[path = "blocks_test.rs"]
mod blocks_test;

use serde::{Deserialize, Serialize};

use super::error::ApiError;
use super::http::HttpClient;
use super::transport::{ApiRequest, Transport};

const BASE: &str = "/profesional/bloqueos";
pub const DEFAULT_SUGGESTION_DAYS: u32 = 30;

/// Dates are `YYYY-MM-DD`; `end` is absent for single-day blocks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRequest {
    #[serde(rename = "fechaInicio")]
    pub start: String,
    #[serde(rename = "fechaFin", skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(rename = "motivo", skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub id: i64,
    #[serde(rename = "profesionalId")]
    pub professional_id: i64,
    #[serde(rename = "fechaInicio")]
    pub start: String,
    #[serde(rename = "fechaFin", default)]
    pub end: Option<String>,
    #[serde(rename = "motivo", default)]
    pub reason: Option<String>,
    #[serde(rename = "activo", default)]
    pub active: bool,
    #[serde(rename = "fechaCreacion", default)]
    pub created_at: Option<String>,
}

/// A booked appointment that falls inside a proposed block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictingBooking {
    #[serde(rename = "turnoId")]
    pub booking_id: i64,
    #[serde(rename = "fecha")]
    pub date: String,
    #[serde(rename = "horaInicio")]
    pub start: String,
    #[serde(rename = "horaFin")]
    pub end: String,
    #[serde(rename = "clienteNombre")]
    pub customer_name: String,
    #[serde(rename = "clienteTelefono")]
    pub customer_phone: String,
    #[serde(rename = "servicioNombre")]
    pub service_name: String,
    #[serde(rename = "estado")]
    pub status: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictReport {
    #[serde(rename = "tieneConflictos")]
    pub has_conflicts: bool,
    #[serde(rename = "cantidadConflictos")]
    pub conflict_count: u32,
    #[serde(rename = "turnosConflictivos", default)]
    pub bookings: Vec<ConflictingBooking>,
    #[serde(rename = "mensaje", default)]
    pub message: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConflictAction {
    #[serde(rename = "CANCELAR_TODOS")]
    CancelAll,
    #[serde(rename = "REPROGRAMAR")]
    Reschedule,
    #[serde(rename = "CANCELAR_FUTUROS")]
    CancelFuture,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reschedule {
    #[serde(rename = "turnoId")]
    pub booking_id: i64,
    #[serde(rename = "nuevaFecha")]
    pub new_date: String,
    #[serde(rename = "nuevaHora")]
    pub new_time: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedBlockRequest {
    #[serde(rename = "bloqueo")]
    pub block: BlockRequest,
    #[serde(rename = "accion")]
    pub action: ConflictAction,
    #[serde(rename = "reprogramaciones", default, skip_serializing_if = "Vec::is_empty")]
    pub reschedules: Vec<Reschedule>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedSlot {
    #[serde(rename = "fecha")]
    pub date: String,
    #[serde(rename = "horaInicio")]
    pub start: String,
    #[serde(rename = "horaFin")]
    pub end: String,
    #[serde(rename = "dia")]
    pub day: String,
}

pub async fn list<T: Transport>(http: &HttpClient<T>) -> Result<Vec<Block>, ApiError> {
    http.fetch(ApiRequest::get(BASE)).await
}

/// Ask which booked appointments a proposed block would hit.
pub async fn check_conflicts<T: Transport>(http: &HttpClient<T>, req: &BlockRequest) -> Result<ConflictReport, ApiError> {
    http.fetch(ApiRequest::post(format!("{BASE}/verificar-conflictos")).json(req)?)
        .await
}

/// Create a block and resolve its conflicts in one call.
pub async fn create_with_resolution<T: Transport>(
    http: &HttpClient<T>,
    req: &ResolvedBlockRequest,
) -> Result<Block, ApiError> {
    http.fetch(ApiRequest::post(format!("{BASE}/con-resolucion")).json(req)?)
        .await
}

/// Free slots to move `booking_id` to, searching `days` ahead.
pub async fn suggested_slots<T: Transport>(
    http: &HttpClient<T>,
    booking_id: i64,
    days: Option<u32>,
) -> Result<Vec<SuggestedSlot>, ApiError> {
    let req = ApiRequest::get(format!("{BASE}/slots-sugeridos/{booking_id}"))
        .query("diasABuscar", days.unwrap_or(DEFAULT_SUGGESTION_DAYS));
    http.fetch(req).await
}

pub async fn create<T: Transport>(http: &HttpClient<T>, req: &BlockRequest) -> Result<Block, ApiError> {
    http.fetch(ApiRequest::post(BASE).json(req)?).await
}

pub async fn update<T: Transport>(http: &HttpClient<T>, id: i64, req: &BlockRequest) -> Result<Block, ApiError> {
    http.fetch(ApiRequest::put(format!("{BASE}/{id}")).json(req)?)
        .await
}

pub async fn delete<T: Transport>(http: &HttpClient<T>, id: i64) -> Result<(), ApiError> {
    http.send_unit(ApiRequest::delete(format!("{BASE}/{id}"))).await
}
