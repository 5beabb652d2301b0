use crate::response::success_one_ok;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};

/// GET /catalog/estados: the status sets in force.
pub async fn statuses(State(state): State<AppState>) -> impl IntoResponse {
    success_one_ok(state.catalog.as_ref().clone())
}
