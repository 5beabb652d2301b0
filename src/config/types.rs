//! Raw status catalog types matching the JSON catalog file.

use serde::{Deserialize, Serialize};

/// One status enumeration as written in the catalog file. Every key is optional;
/// omitted keys keep the built-in value.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatusSetConfig {
    #[serde(default)]
    pub values: Option<Vec<String>>,
    #[serde(default)]
    pub default: Option<String>,
    /// Statuses that hold an apartment (reservations only).
    #[serde(default)]
    pub active: Option<Vec<String>>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    #[serde(default)]
    pub apartment: Option<StatusSetConfig>,
    #[serde(default)]
    pub reservation: Option<StatusSetConfig>,
}

pub const APARTMENT_STATUSES: &[&str] = &["disponible", "alquilado", "reservado", "inactivo"];
pub const APARTMENT_DEFAULT_STATUS: &str = "disponible";

pub const RESERVATION_STATUSES: &[&str] = &["pendiente", "confirmado", "cancelado", "expirado"];
pub const RESERVATION_DEFAULT_STATUS: &str = "pendiente";
pub const RESERVATION_ACTIVE_STATUSES: &[&str] = &["pendiente", "confirmado"];
