//! Image handlers under `/apartamentos/:id/imagenes`. A missing apartment is 404 for every route.

use super::parse_id;
use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::models::ImageUpload;
use crate::response::{success_many, success_one, success_one_meta, success_one_ok};
use crate::service::{ApartmentService, ImageOutcome, ImageService};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};

async fn require_apartment(state: &AppState, id_str: &str) -> Result<i64, AppError> {
    let id = parse_id(id_str)?;
    match ApartmentService::get(&state.store, id).await? {
        Some(_) => Ok(id),
        None => Err(AppError::NotFound(format!("apartment {}", id_str))),
    }
}

pub async fn create(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    JsonBody(upload): JsonBody<ImageUpload>,
) -> Result<Response, AppError> {
    let apartment_id = require_apartment(&state, &id_str).await?;
    let outcome = ImageService::create(&state.store, upload.for_apartment(apartment_id)).await?;
    Ok(match outcome {
        ImageOutcome::Stored(image) => success_one(image).into_response(),
        ImageOutcome::Duplicate(image) => {
            success_one_meta(image, serde_json::json!({ "duplicate": true })).into_response()
        }
    })
}

pub async fn list(State(state): State<AppState>, Path(id_str): Path<String>) -> Result<impl IntoResponse, AppError> {
    let apartment_id = require_apartment(&state, &id_str).await?;
    let rows = ImageService::list_for_apartment(&state.store, apartment_id).await?;
    Ok(success_many(rows))
}

pub async fn read(
    State(state): State<AppState>,
    Path((id_str, image_str)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let apartment_id = require_apartment(&state, &id_str).await?;
    let image_id = parse_id(&image_str)?;
    let row = ImageService::get(&state.store, apartment_id, image_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("image {}", image_str)))?;
    Ok(success_one_ok(row))
}

pub async fn delete(
    State(state): State<AppState>,
    Path((id_str, image_str)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let apartment_id = require_apartment(&state, &id_str).await?;
    let image_id = parse_id(&image_str)?;
    let row = ImageService::delete(&state.store, apartment_id, image_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("image {}", image_str)))?;
    Ok(success_one_ok(row))
}
