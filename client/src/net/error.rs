//! Error type shared by the HTTP pipeline and the resource wrappers.
//!
//! ERROR HANDLING
//! ==============
//! Session reconciliation never surfaces these to the user: the guard and the
//! stores collapse them into "no session". Resource calls return them so
//! views (and the CLI) can report what went wrong.

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("request failed: {0}")]
    Transport(String),

    /// 401/403 from a request without the redirect opt-out.
    #[error("unauthorized (status {status})")]
    Unauthorized { status: u16, message: Option<String> },

    /// Any other non-success HTTP status.
    #[error("request failed with status {status}: {}", message.as_deref().unwrap_or("no details"))]
    Status { status: u16, message: Option<String> },

    /// The backend answered 2xx but its envelope reported `exito: false`.
    #[error("backend rejected request: {0}")]
    Rejected(String),

    /// The response body did not match the expected shape.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// The request could not be built (bad URL, unserializable body).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// HTTP status carried by the error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { status, .. } | Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}
