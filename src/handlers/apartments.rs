//! Apartment handlers: create, read, update, delete, list.

use super::{apply_list_policy, number_param, parse_id, text_param};
use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::models::{ApartmentFilter, ApartmentPatch, NewApartment};
use crate::response::{success_many, success_one, success_one_meta, success_one_ok};
use crate::service::ApartmentService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use std::collections::HashMap;

fn filter_from_query(params: &HashMap<String, String>) -> Result<ApartmentFilter, AppError> {
    Ok(ApartmentFilter {
        city: text_param(params, "ciudad"),
        status: text_param(params, "estado"),
        price: number_param(params, "precio")?,
        rooms: number_param(params, "habitaciones")?,
        bathrooms: number_param(params, "baños")?,
    })
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let filter = filter_from_query(&params)?;
    let rows = apply_list_policy(
        state.settings.list_failure_policy,
        ApartmentService::list(&state.store, &filter).await,
    )?;
    Ok(success_many(rows))
}

pub async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<NewApartment>,
) -> Result<impl IntoResponse, AppError> {
    let row = ApartmentService::create(&state.store, &state.catalog.apartment, body).await?;
    Ok(success_one(row))
}

pub async fn read(State(state): State<AppState>, Path(id_str): Path<String>) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let row = ApartmentService::get(&state.store, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("apartment {}", id_str)))?;
    Ok(success_one_ok(row))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    JsonBody(patch): JsonBody<ApartmentPatch>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let updated = ApartmentService::update(&state.store, &state.catalog.apartment, id, &patch)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("apartment {}", id_str)))?;
    Ok(success_one_meta(
        updated.record,
        serde_json::json!({ "changed": updated.changed }),
    ))
}

pub async fn delete(State(state): State<AppState>, Path(id_str): Path<String>) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let row = ApartmentService::delete(&state.store, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("apartment {}", id_str)))?;
    Ok(success_one_ok(row))
}
