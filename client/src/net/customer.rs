//! Endpoints for a signed-in customer (`/cliente`).

use super::booking::Booking;
use super::error::ApiError;
use super::http::HttpClient;
use super::transport::{ApiRequest, Transport};
use super::types::CustomerSession;

pub async fn my_bookings<T: Transport>(http: &HttpClient<T>) -> Result<Vec<Booking>, ApiError> {
    http.fetch(ApiRequest::get("/cliente/mis-turnos")).await
}

pub async fn profile<T: Transport>(http: &HttpClient<T>) -> Result<CustomerSession, ApiError> {
    http.fetch(ApiRequest::get("/cliente/perfil")).await
}
