//! Apartment listings.

use super::{rejected, validate_apartment_patch, validate_new_apartment, Rejection, Updated};
use crate::config::StatusSet;
use crate::error::AppError;
use crate::models::{Apartment, ApartmentFilter, ApartmentPatch, NewApartment};
use crate::sql::{select_list, update, BindValue};
use crate::store::{queries, Store};

pub struct ApartmentService;

impl ApartmentService {
    /// Insert a validated listing. The address must not be registered yet.
    #[tracing::instrument(skip_all, fields(direccion = %new.address))]
    pub async fn create(store: &Store, statuses: &StatusSet, new: NewApartment) -> Result<Apartment, AppError> {
        let new = validate_new_apartment(new, statuses).map_err(rejected)?;
        if Self::find_by_address(store, &new.address).await?.is_some() {
            return Err(rejected(Rejection::DuplicateAddress { address: new.address }));
        }
        let done = store.run(queries::INSERT_APARTMENT, &new.insert_params()).await?;
        tracing::info!(id = done.last_insert_id, "apartment created");
        Ok(new.into_record(done.last_insert_id))
    }

    pub async fn get(store: &Store, id: i64) -> Result<Option<Apartment>, AppError> {
        if id <= 0 {
            return Ok(None);
        }
        store.get(queries::SELECT_APARTMENT_BY_ID, &[BindValue::Int(id)]).await
    }

    /// Exact-match filter on the supplied fields, ordered by id.
    pub async fn list(store: &Store, filter: &ApartmentFilter) -> Result<Vec<Apartment>, AppError> {
        let q = select_list(queries::APARTMENTS, filter);
        store.all(&q.sql, &q.params).await
    }

    /// Apply the present fields of `patch`. `Ok(None)` when the apartment does not exist.
    #[tracing::instrument(skip(store, statuses, patch))]
    pub async fn update(
        store: &Store,
        statuses: &StatusSet,
        id: i64,
        patch: &ApartmentPatch,
    ) -> Result<Option<Updated<Apartment>>, AppError> {
        let Some(current) = Self::get(store, id).await? else {
            return Ok(None);
        };
        validate_apartment_patch(patch, statuses).map_err(rejected)?;
        if let Some(address) = patch.address.as_deref().filter(|a| !a.is_empty()) {
            if let Some(other) = Self::find_by_address(store, address).await? {
                if other.id != id {
                    return Err(rejected(Rejection::DuplicateAddress {
                        address: address.to_string(),
                    }));
                }
            }
        }
        let Some(q) = update(queries::APARTMENTS, id, patch) else {
            tracing::debug!("empty patch");
            return Ok(Some(Updated {
                record: current,
                changed: false,
            }));
        };
        let done = store.run(&q.sql, &q.params).await?;
        let record = Self::get(store, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("apartment {}", id)))?;
        Ok(Some(Updated {
            record,
            changed: done.rows_affected > 0,
        }))
    }

    /// Remove a listing; its reservations and images go with it. Returns the prior state.
    #[tracing::instrument(skip(store))]
    pub async fn delete(store: &Store, id: i64) -> Result<Option<Apartment>, AppError> {
        let Some(current) = Self::get(store, id).await? else {
            return Ok(None);
        };
        store.run(queries::DELETE_APARTMENT, &[BindValue::Int(id)]).await?;
        tracing::info!("apartment deleted");
        Ok(Some(current))
    }

    async fn find_by_address(store: &Store, address: &str) -> Result<Option<Apartment>, AppError> {
        store.get(queries::SELECT_APARTMENT_BY_ADDRESS, &[address.into()]).await
    }
}
