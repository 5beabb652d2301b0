//! Listing images, always addressed through their apartment.

use super::{rejected, validate_new_image};
use crate::error::AppError;
use crate::models::{Image, NewImage};
use crate::sql::BindValue;
use crate::store::{queries, Store};

/// A repeated (apartment, payload) upload stores nothing and hands back the existing row.
#[derive(Clone, Debug, PartialEq)]
pub enum ImageOutcome {
    Stored(Image),
    Duplicate(Image),
}

impl ImageOutcome {
    pub fn image(&self) -> &Image {
        match self {
            ImageOutcome::Stored(image) | ImageOutcome::Duplicate(image) => image,
        }
    }
}

pub struct ImageService;

impl ImageService {
    #[tracing::instrument(skip_all, fields(apartamento_id = new.apartment_id))]
    pub async fn create(store: &Store, new: NewImage) -> Result<ImageOutcome, AppError> {
        let draft = validate_new_image(new).map_err(rejected)?;
        if let Some(existing) = Self::find_by_content(store, draft.apartment_id, &draft.payload).await? {
            tracing::info!(id = existing.id, "duplicate image ignored");
            return Ok(ImageOutcome::Duplicate(existing));
        }
        match store.run(queries::INSERT_IMAGE, &draft.insert_params()).await {
            Ok(done) => {
                tracing::info!(id = done.last_insert_id, "image stored");
                Ok(ImageOutcome::Stored(draft.into_record(done.last_insert_id)))
            }
            // Lost a race against an identical upload: the unique index kept one row.
            Err(AppError::Constraint(reason)) => {
                match Self::find_by_content(store, draft.apartment_id, &draft.payload).await? {
                    Some(existing) => Ok(ImageOutcome::Duplicate(existing)),
                    None => Err(AppError::Constraint(reason)),
                }
            }
            Err(e) => Err(e),
        }
    }

    pub async fn list_for_apartment(store: &Store, apartment_id: i64) -> Result<Vec<Image>, AppError> {
        store
            .all(queries::SELECT_IMAGES_BY_APARTMENT, &[BindValue::Int(apartment_id)])
            .await
    }

    /// `Ok(None)` also when the image belongs to another apartment.
    pub async fn get(store: &Store, apartment_id: i64, id: i64) -> Result<Option<Image>, AppError> {
        if id <= 0 || apartment_id <= 0 {
            return Ok(None);
        }
        let image: Option<Image> = store.get(queries::SELECT_IMAGE_BY_ID, &[BindValue::Int(id)]).await?;
        Ok(image.filter(|i| i.apartment_id == apartment_id))
    }

    #[tracing::instrument(skip(store))]
    pub async fn delete(store: &Store, apartment_id: i64, id: i64) -> Result<Option<Image>, AppError> {
        let Some(current) = Self::get(store, apartment_id, id).await? else {
            return Ok(None);
        };
        store.run(queries::DELETE_IMAGE, &[BindValue::Int(id)]).await?;
        tracing::info!("image deleted");
        Ok(Some(current))
    }

    async fn find_by_content(store: &Store, apartment_id: i64, payload: &str) -> Result<Option<Image>, AppError> {
        store
            .get(
                queries::SELECT_IMAGE_BY_CONTENT,
                &[BindValue::Int(apartment_id), payload.into()],
            )
            .await
    }
}
