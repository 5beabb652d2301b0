#![allow(dead_code)]

use rental_backend::models::{NewApartment, NewReservation};
use rental_backend::{apply_schema, load_catalog, AppState, Settings, Store};

/// Fresh in-memory store with the schema applied. Each call is an isolated database.
pub async fn memory_state() -> AppState {
    memory_state_with(Settings::default()).await
}

pub async fn memory_state_with(settings: Settings) -> AppState {
    let settings = Settings {
        database_url: "sqlite::memory:".into(),
        ..settings
    };
    let catalog = load_catalog(&settings).await.expect("catalog");
    let store = Store::connect(&settings).await.expect("in-memory store");
    apply_schema(&store, &catalog).await.expect("schema");
    AppState::new(store, catalog, settings)
}

/// Store in a database file under `dir`, with a pool of several connections.
pub async fn file_state(dir: &std::path::Path) -> AppState {
    let settings = Settings {
        database_url: format!("sqlite://{}", dir.join("rental.sqlite").display()),
        max_connections: 4,
        ..Settings::default()
    };
    let catalog = load_catalog(&settings).await.expect("catalog");
    let store = Store::connect(&settings).await.expect("file store");
    apply_schema(&store, &catalog).await.expect("schema");
    AppState::new(store, catalog, settings)
}

pub fn falsa_123() -> NewApartment {
    NewApartment {
        address: "Calle Falsa 123".into(),
        city: "Madrid".into(),
        country: "España".into(),
        postal_code: "28001".into(),
        surface: 85.5,
        rooms: 2,
        bathrooms: 1,
        price: 1200.0,
        status: Some("disponible".into()),
        description: Some("Nuevo".into()),
        owner_id: 1,
    }
}

pub fn apartment_at(address: &str, city: &str) -> NewApartment {
    NewApartment {
        address: address.into(),
        city: city.into(),
        ..falsa_123()
    }
}

pub fn reservation_for(apartment_id: i64) -> NewReservation {
    NewReservation {
        apartment_id: Some(apartment_id),
        user_id: Some(7),
        start_date: "2024-06-01".into(),
        end_date: "2024-06-15".into(),
        status: None,
    }
}
