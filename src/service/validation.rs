//! Field checks for candidate records. Pure: lookups (address in use, apartment exists,
//! active reservation, duplicate image) happen in the record services.

use crate::config::StatusSet;
use crate::models::{
    ApartmentPatch, ImageDraft, NewApartment, NewImage, NewReservation, ReservationDraft, ReservationPatch,
};
use thiserror::Error;

/// Why a candidate record was refused. Always maps to 400.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Rejection {
    #[error("{field} '{value}' is not one of: {}", .allowed.join(", "))]
    InvalidStatus {
        field: &'static str,
        value: String,
        allowed: Vec<String>,
    },
    #[error("{field} must be greater than 0")]
    NonPositive { field: &'static str },
    #[error("{field} is required")]
    Missing { field: &'static str },
    #[error("an apartment is already registered at '{address}'")]
    DuplicateAddress { address: String },
    #[error("apartment {id} does not exist")]
    ApartmentNotFound { id: i64 },
    #[error("apartment {apartment_id} already has an active reservation ({status})")]
    ActiveReservation { apartment_id: i64, status: String },
}

impl Rejection {
    /// Wire name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Rejection::InvalidStatus { field, .. } => field,
            Rejection::NonPositive { field } => field,
            Rejection::Missing { field } => field,
            Rejection::DuplicateAddress { .. } => "direccion",
            Rejection::ApartmentNotFound { .. } | Rejection::ActiveReservation { .. } => "apartamento_id",
        }
    }
}

fn check_status(set: &StatusSet, value: &str) -> Result<(), Rejection> {
    if set.contains(value) {
        Ok(())
    } else {
        Err(Rejection::InvalidStatus {
            field: "estado",
            value: value.to_string(),
            allowed: set.values.clone(),
        })
    }
}

/// Absent or empty `estado` resolves to the set default.
fn resolve_status(set: &StatusSet, value: Option<String>) -> Result<String, Rejection> {
    match value.filter(|v| !v.is_empty()) {
        Some(v) => {
            check_status(set, &v)?;
            Ok(v)
        }
        None => Ok(set.default.clone()),
    }
}

fn positive_f64(field: &'static str, v: f64) -> Result<(), Rejection> {
    // NaN fails too
    if v > 0.0 {
        Ok(())
    } else {
        Err(Rejection::NonPositive { field })
    }
}

fn positive_i64(field: &'static str, v: i64) -> Result<(), Rejection> {
    if v > 0 {
        Ok(())
    } else {
        Err(Rejection::NonPositive { field })
    }
}

fn required_id(field: &'static str, v: Option<i64>) -> Result<i64, Rejection> {
    let v = v.ok_or(Rejection::Missing { field })?;
    positive_i64(field, v)?;
    Ok(v)
}

fn required_text(field: &'static str, v: Option<String>) -> Result<String, Rejection> {
    v.filter(|s| !s.is_empty()).ok_or(Rejection::Missing { field })
}

/// Create: status membership (defaulted), price, surface and owner. Returns the candidate with `estado` set.
pub fn validate_new_apartment(mut new: NewApartment, statuses: &StatusSet) -> Result<NewApartment, Rejection> {
    new.status = Some(resolve_status(statuses, new.status.take())?);
    positive_f64("precio", new.price)?;
    positive_f64("superficie", new.surface)?;
    positive_i64("propietario_id", new.owner_id)?;
    Ok(new)
}

/// Update: only supplied fields are checked.
pub fn validate_apartment_patch(patch: &ApartmentPatch, statuses: &StatusSet) -> Result<(), Rejection> {
    if let Some(status) = patch.status.as_deref().filter(|s| !s.is_empty()) {
        check_status(statuses, status)?;
    }
    if let Some(price) = patch.price {
        positive_f64("precio", price)?;
    }
    if let Some(surface) = patch.surface {
        positive_f64("superficie", surface)?;
    }
    if let Some(owner) = patch.owner_id {
        positive_i64("propietario_id", owner)?;
    }
    Ok(())
}

pub fn validate_new_reservation(new: NewReservation, statuses: &StatusSet) -> Result<ReservationDraft, Rejection> {
    let apartment_id = required_id("apartamento_id", new.apartment_id)?;
    let user_id = required_id("usuario_id", new.user_id)?;
    let status = resolve_status(statuses, new.status)?;
    Ok(ReservationDraft {
        apartment_id,
        user_id,
        start_date: new.start_date,
        end_date: new.end_date,
        status,
    })
}

/// Any status may move to any other; only membership is checked.
pub fn validate_reservation_patch(patch: &ReservationPatch, statuses: &StatusSet) -> Result<(), Rejection> {
    if let Some(status) = patch.status.as_deref().filter(|s| !s.is_empty()) {
        check_status(statuses, status)?;
    }
    Ok(())
}

/// The payload is stored as sent; it is not decoded.
pub fn validate_new_image(new: NewImage) -> Result<ImageDraft, Rejection> {
    positive_i64("apartamento_id", new.apartment_id)?;
    Ok(ImageDraft {
        apartment_id: new.apartment_id,
        payload: required_text("imagen", new.payload)?,
        description: required_text("descripcion", new.description)?,
    })
}
