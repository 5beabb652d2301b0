use super::{apply_list_policy, number_param, parse_id, text_param};
use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::models::{NewReservation, ReservationFilter, ReservationPatch};
use crate::response::{success_many, success_one, success_one_meta, success_one_ok};
use crate::service::ReservationService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use std::collections::HashMap;

fn filter_from_query(params: &HashMap<String, String>) -> Result<ReservationFilter, AppError> {
    Ok(ReservationFilter {
        status: text_param(params, "estado"),
        user_id: number_param(params, "usuario_id")?,
        apartment_id: number_param(params, "apartamento_id")?,
    })
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let filter = filter_from_query(&params)?;
    let rows = apply_list_policy(
        state.settings.list_failure_policy,
        ReservationService::list(&state.store, &filter).await,
    )?;
    Ok(success_many(rows))
}

pub async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<NewReservation>,
) -> Result<impl IntoResponse, AppError> {
    let row = ReservationService::create(
        &state.store,
        &state.reservation_gate,
        &state.catalog.reservation,
        body,
    )
    .await?;
    Ok(success_one(row))
}

pub async fn read(State(state): State<AppState>, Path(id_str): Path<String>) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let row = ReservationService::get(&state.store, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("reservation {}", id_str)))?;
    Ok(success_one_ok(row))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    JsonBody(patch): JsonBody<ReservationPatch>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let updated = ReservationService::update(&state.store, &state.catalog.reservation, id, &patch)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("reservation {}", id_str)))?;
    Ok(success_one_meta(
        updated.record,
        serde_json::json!({ "changed": updated.changed }),
    ))
}

pub async fn delete(State(state): State<AppState>, Path(id_str): Path<String>) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let row = ReservationService::delete(&state.store, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("reservation {}", id_str)))?;
    Ok(success_one_ok(row))
}
