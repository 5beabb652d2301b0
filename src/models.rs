//! Records stored in `apartamentos`, `reservas` and `imagenes`, plus their create,
//! patch and filter shapes. Field names on the wire and in the store are Spanish.

use crate::sql::{nullable_text, text, value, BindValue, SparseFields};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Apartment {
    pub id: i64,
    #[serde(rename = "direccion")]
    #[sqlx(rename = "direccion")]
    pub address: String,
    #[serde(rename = "ciudad")]
    #[sqlx(rename = "ciudad")]
    pub city: String,
    #[serde(rename = "pais")]
    #[sqlx(rename = "pais")]
    pub country: String,
    #[serde(rename = "codigo_postal")]
    #[sqlx(rename = "codigo_postal")]
    pub postal_code: String,
    #[serde(rename = "superficie")]
    #[sqlx(rename = "superficie")]
    pub surface: f64,
    #[serde(rename = "habitaciones")]
    #[sqlx(rename = "habitaciones")]
    pub rooms: i64,
    #[serde(rename = "baños")]
    #[sqlx(rename = "baños")]
    pub bathrooms: i64,
    #[serde(rename = "precio")]
    #[sqlx(rename = "precio")]
    pub price: f64,
    #[serde(rename = "estado")]
    #[sqlx(rename = "estado")]
    pub status: String,
    #[serde(rename = "descripcion")]
    #[sqlx(rename = "descripcion")]
    pub description: Option<String>,
    #[serde(rename = "propietario_id")]
    #[sqlx(rename = "propietario_id")]
    pub owner_id: i64,
}

/// Candidate apartment for `POST /apartamentos/add`. `estado` falls back to the catalog default.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct NewApartment {
    #[serde(rename = "direccion")]
    pub address: String,
    #[serde(rename = "ciudad")]
    pub city: String,
    #[serde(rename = "pais")]
    pub country: String,
    #[serde(rename = "codigo_postal")]
    pub postal_code: String,
    #[serde(rename = "superficie")]
    pub surface: f64,
    #[serde(rename = "habitaciones")]
    pub rooms: i64,
    #[serde(rename = "baños")]
    pub bathrooms: i64,
    #[serde(rename = "precio")]
    pub price: f64,
    #[serde(rename = "estado", default)]
    pub status: Option<String>,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "propietario_id")]
    pub owner_id: i64,
}

impl NewApartment {
    /// Parameters for `INSERT_APARTMENT`, in column order.
    pub fn insert_params(&self) -> Vec<BindValue> {
        vec![
            self.address.as_str().into(),
            self.city.as_str().into(),
            self.country.as_str().into(),
            self.postal_code.as_str().into(),
            self.surface.into(),
            self.rooms.into(),
            self.bathrooms.into(),
            self.price.into(),
            self.status.clone().into(),
            self.description.clone().into(),
            self.owner_id.into(),
        ]
    }

    /// Stored form after insert. Call on a validated candidate so `estado` is set.
    pub fn into_record(self, id: i64) -> Apartment {
        Apartment {
            id,
            address: self.address,
            city: self.city,
            country: self.country,
            postal_code: self.postal_code,
            surface: self.surface,
            rooms: self.rooms,
            bathrooms: self.bathrooms,
            price: self.price,
            status: self.status.unwrap_or_default(),
            description: self.description,
            owner_id: self.owner_id,
        }
    }
}

/// Partial update for `PUT /apartamentos/:id`. Only these columns can be patched.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ApartmentPatch {
    #[serde(rename = "direccion", default)]
    pub address: Option<String>,
    #[serde(rename = "ciudad", default)]
    pub city: Option<String>,
    #[serde(rename = "pais", default)]
    pub country: Option<String>,
    #[serde(rename = "codigo_postal", default)]
    pub postal_code: Option<String>,
    #[serde(rename = "superficie", default)]
    pub surface: Option<f64>,
    #[serde(rename = "habitaciones", default)]
    pub rooms: Option<i64>,
    #[serde(rename = "baños", default)]
    pub bathrooms: Option<i64>,
    #[serde(rename = "precio", default)]
    pub price: Option<f64>,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "propietario_id", default)]
    pub owner_id: Option<i64>,
    #[serde(rename = "estado", default)]
    pub status: Option<String>,
}

impl SparseFields for ApartmentPatch {
    fn fields(&self) -> Vec<(&'static str, Option<BindValue>)> {
        vec![
            ("direccion", text(&self.address)),
            ("ciudad", text(&self.city)),
            ("pais", text(&self.country)),
            ("codigo_postal", text(&self.postal_code)),
            ("superficie", value(self.surface)),
            ("habitaciones", value(self.rooms)),
            ("baños", value(self.bathrooms)),
            ("precio", value(self.price)),
            ("descripcion", nullable_text(&self.description)),
            ("propietario_id", value(self.owner_id)),
            ("estado", text(&self.status)),
        ]
    }
}

/// Filter for `GET /apartamentos`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ApartmentFilter {
    pub city: Option<String>,
    pub status: Option<String>,
    pub price: Option<f64>,
    pub rooms: Option<i64>,
    pub bathrooms: Option<i64>,
}

impl SparseFields for ApartmentFilter {
    fn fields(&self) -> Vec<(&'static str, Option<BindValue>)> {
        vec![
            ("ciudad", text(&self.city)),
            ("estado", text(&self.status)),
            ("precio", value(self.price)),
            ("habitaciones", value(self.rooms)),
            ("baños", value(self.bathrooms)),
        ]
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Reservation {
    pub id: i64,
    #[serde(rename = "apartamento_id")]
    #[sqlx(rename = "apartamento_id")]
    pub apartment_id: i64,
    #[serde(rename = "usuario_id")]
    #[sqlx(rename = "usuario_id")]
    pub user_id: i64,
    #[serde(rename = "fecha_inicio")]
    #[sqlx(rename = "fecha_inicio")]
    pub start_date: String,
    #[serde(rename = "fecha_fin")]
    #[sqlx(rename = "fecha_fin")]
    pub end_date: String,
    #[serde(rename = "estado")]
    #[sqlx(rename = "estado")]
    pub status: String,
}

/// Candidate reservation for `POST /reservas/add`. Dates are opaque strings.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct NewReservation {
    #[serde(rename = "apartamento_id", default)]
    pub apartment_id: Option<i64>,
    #[serde(rename = "usuario_id", default)]
    pub user_id: Option<i64>,
    #[serde(rename = "fecha_inicio")]
    pub start_date: String,
    #[serde(rename = "fecha_fin")]
    pub end_date: String,
    #[serde(rename = "estado", default)]
    pub status: Option<String>,
}

/// Reservation accepted by the validator: references checked for sign, `estado` resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct ReservationDraft {
    pub apartment_id: i64,
    pub user_id: i64,
    pub start_date: String,
    pub end_date: String,
    pub status: String,
}

impl ReservationDraft {
    /// Insert values in column order; the guarded insert appends its condition values.
    pub fn insert_params(&self) -> Vec<BindValue> {
        vec![
            self.apartment_id.into(),
            self.user_id.into(),
            self.start_date.as_str().into(),
            self.end_date.as_str().into(),
            self.status.as_str().into(),
        ]
    }

    pub fn into_record(self, id: i64) -> Reservation {
        Reservation {
            id,
            apartment_id: self.apartment_id,
            user_id: self.user_id,
            start_date: self.start_date,
            end_date: self.end_date,
            status: self.status,
        }
    }
}

/// Partial update for `PUT /reservas/:id`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ReservationPatch {
    #[serde(rename = "fecha_inicio", default)]
    pub start_date: Option<String>,
    #[serde(rename = "fecha_fin", default)]
    pub end_date: Option<String>,
    #[serde(rename = "estado", default)]
    pub status: Option<String>,
}

impl SparseFields for ReservationPatch {
    fn fields(&self) -> Vec<(&'static str, Option<BindValue>)> {
        vec![
            ("fecha_inicio", text(&self.start_date)),
            ("fecha_fin", text(&self.end_date)),
            ("estado", text(&self.status)),
        ]
    }
}

/// Filter for `GET /reservas`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReservationFilter {
    pub status: Option<String>,
    pub user_id: Option<i64>,
    pub apartment_id: Option<i64>,
}

impl SparseFields for ReservationFilter {
    fn fields(&self) -> Vec<(&'static str, Option<BindValue>)> {
        vec![
            ("estado", text(&self.status)),
            ("usuario_id", value(self.user_id)),
            ("apartamento_id", value(self.apartment_id)),
        ]
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Image {
    pub id: i64,
    #[serde(rename = "apartamento_id")]
    #[sqlx(rename = "apartamento_id")]
    pub apartment_id: i64,
    /// Encoded payload as uploaded (base64 or data URL), stored verbatim.
    #[serde(rename = "imagen")]
    #[sqlx(rename = "imagen")]
    pub payload: String,
    #[serde(rename = "descripcion")]
    #[sqlx(rename = "descripcion")]
    pub description: String,
}

/// Upload body for `POST /apartamentos/:id/imagenes`; the apartment comes from the path.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ImageUpload {
    #[serde(rename = "imagen", default)]
    pub payload: Option<String>,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewImage {
    pub apartment_id: i64,
    pub payload: Option<String>,
    pub description: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ImageDraft {
    pub apartment_id: i64,
    pub payload: String,
    pub description: String,
}

impl ImageDraft {
    pub fn insert_params(&self) -> Vec<BindValue> {
        vec![
            self.apartment_id.into(),
            self.payload.as_str().into(),
            self.description.as_str().into(),
        ]
    }

    pub fn into_record(self, id: i64) -> Image {
        Image {
            id,
            apartment_id: self.apartment_id,
            payload: self.payload,
            description: self.description,
        }
    }
}

impl ImageUpload {
    pub fn for_apartment(self, apartment_id: i64) -> NewImage {
        NewImage {
            apartment_id,
            payload: self.payload,
            description: self.description,
        }
    }
}
