//! Record routes. Creation lives under `/add`; items are addressed by integer id.

use crate::handlers::{apartments, catalog, images, reservations};
use crate::state::AppState;
use axum::{routing::get, routing::post, Router};

pub fn record_routes(state: AppState) -> Router {
    Router::new()
        .route("/apartamentos", get(apartments::list))
        .route("/apartamentos/add", post(apartments::create))
        .route(
            "/apartamentos/:id",
            get(apartments::read).put(apartments::update).delete(apartments::delete),
        )
        .route("/apartamentos/:id/imagenes", get(images::list).post(images::create))
        .route(
            "/apartamentos/:id/imagenes/:imagen_id",
            get(images::read).delete(images::delete),
        )
        .route("/reservas", get(reservations::list))
        .route("/reservas/add", post(reservations::create))
        .route(
            "/reservas/:id",
            get(reservations::read).put(reservations::update).delete(reservations::delete),
        )
        .with_state(state)
}

pub fn catalog_routes(state: AppState) -> Router {
    Router::new()
        .route("/catalog/estados", get(catalog::statuses))
        .with_state(state)
}
