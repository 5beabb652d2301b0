//! REST backend for apartment listings, their reservations and images, on SQLite.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod models;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{load_catalog, ListFailurePolicy, Settings, StatusCatalog, StatusSet};
pub use error::{AppError, ConfigError};
pub use migration::apply_schema;
pub use routes::router;
pub use service::{ApartmentService, ImageOutcome, ImageService, Rejection, ReservationService, Updated};
pub use state::AppState;
pub use store::Store;
