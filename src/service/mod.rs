//! Record services: validate, check existence, build the statement, execute, map the result.

mod apartments;
mod images;
mod reservations;
mod validation;

pub use apartments::ApartmentService;
pub use images::{ImageOutcome, ImageService};
pub use reservations::ReservationService;
pub use validation::*;

use crate::error::AppError;

/// Result of an update: the re-read record and whether any row changed.
#[derive(Clone, Debug, PartialEq)]
pub struct Updated<T> {
    pub record: T,
    pub changed: bool,
}

fn rejected(rejection: Rejection) -> AppError {
    tracing::warn!(field = rejection.field(), reason = %rejection, "rejected");
    AppError::Rejected(rejection)
}
