//! Identity and tenant DTOs shared by the stores, the guard and the CLI.
//!
//! DESIGN
//! ======
//! Field names follow the backend's Spanish JSON keys through serde renames
//! so the Rust side can use English names. Resource-specific payloads live
//! next to the wrappers that send them.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Staff role as issued by the backend.
///
/// Anything the client does not recognize decodes as [`Role::Unknown`] so a
/// new backend role can never be mistaken for an existing one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "SUPER_ADMIN")]
    SuperAdmin,
    #[serde(rename = "DUENO")]
    Dueno,
    #[serde(rename = "PROFESIONAL")]
    Profesional,
    #[serde(other)]
    Unknown,
}

impl Role {
    /// Landing route for an authenticated user of this role.
    #[must_use]
    pub fn landing_path(self) -> Option<&'static str> {
        match self {
            Self::SuperAdmin => Some("/admin"),
            Self::Dueno => Some("/dueno"),
            Self::Profesional => Some("/profesional"),
            Self::Unknown => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SuperAdmin => "SUPER_ADMIN",
            Self::Dueno => "DUENO",
            Self::Profesional => "PROFESIONAL",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role string the backend uses for end customers on the shared profile endpoint.
pub const CUSTOMER_ROLE: &str = "CLIENTE";

/// Authenticated staff member.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffUser {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "apellido", default)]
    pub surname: String,
    pub email: String,
    #[serde(rename = "rol")]
    pub role: Role,
}

impl StaffUser {
    #[must_use]
    pub fn display_name(&self) -> String {
        if self.surname.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.name, self.surname)
        }
    }
}

/// End customer session, scoped to the tenant that issued it.
///
/// Every field is optional because the profile probe may return a partial
/// record; [`CustomerSession::has_identity`] decides whether it is usable.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerSession {
    pub id: Option<i64>,
    #[serde(rename = "nombre")]
    pub name: Option<String>,
    #[serde(rename = "telefono")]
    pub phone: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "empresaId")]
    pub tenant_id: Option<i64>,
    #[serde(rename = "empresaNombre")]
    pub tenant_name: Option<String>,
    #[serde(rename = "empresaSlug")]
    pub tenant_slug: Option<String>,
}

impl CustomerSession {
    /// At least one of id, tenant id or phone is present.
    #[must_use]
    pub fn has_identity(&self) -> bool {
        self.id.is_some() || self.tenant_id.is_some() || self.phone.as_deref().is_some_and(|p| !p.is_empty())
    }

    /// Whether the session was issued by `tenant`, by id or by slug.
    #[must_use]
    pub fn belongs_to(&self, tenant: &PublicTenant) -> bool {
        let id_match = self.tenant_id.is_some_and(|id| id == tenant.id);
        let slug_match = self
            .tenant_slug
            .as_deref()
            .is_some_and(|slug| slug == tenant.slug);
        id_match || slug_match
    }

    /// Whether the session is already bound to the tenant with `slug`.
    #[must_use]
    pub fn is_bound_to(&self, slug: &str) -> bool {
        self.tenant_slug.as_deref() == Some(slug)
    }
}

/// Public tenant record served by `/publico/empresa/{slug}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicTenant {
    pub id: i64,
    pub slug: String,
    #[serde(rename = "nombre", default)]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "direccion", default)]
    pub address: Option<String>,
    #[serde(rename = "ciudad", default)]
    pub city: Option<String>,
    #[serde(rename = "provincia", default)]
    pub province: Option<String>,
    #[serde(rename = "telefono", default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// How far ahead customers may book.
    #[serde(rename = "diasMaximosReserva", default)]
    pub max_booking_days: Option<u32>,
}

/// Day of week as the scheduling endpoints spell it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Weekday {
    Lunes,
    Martes,
    Miercoles,
    Jueves,
    Viernes,
    Sabado,
    Domingo,
}

impl Weekday {
    pub const ALL: [Self; 7] =
        [Self::Lunes, Self::Martes, Self::Miercoles, Self::Jueves, Self::Viernes, Self::Sabado, Self::Domingo];
}
