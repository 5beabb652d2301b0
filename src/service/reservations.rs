//! Reservations. Creation writes through one conditional insert (apartment exists, no active
//! reservation) issued first in its transaction, so the write lock is taken before any read.

use super::{rejected, validate_new_reservation, validate_reservation_patch, Rejection, Updated};
use crate::config::StatusSet;
use crate::error::AppError;
use crate::models::{Apartment, NewReservation, Reservation, ReservationFilter, ReservationPatch};
use crate::sql::{select_list, select_where_in, update, BindValue};
use crate::store::{queries, Store, StoreTx};
use tokio::sync::Mutex;

pub struct ReservationService;

impl ReservationService {
    /// Insert a reservation for an existing apartment with no active reservation.
    #[tracing::instrument(skip_all, fields(apartamento_id = ?new.apartment_id, usuario_id = ?new.user_id))]
    pub async fn create(
        store: &Store,
        gate: &Mutex<()>,
        statuses: &StatusSet,
        new: NewReservation,
    ) -> Result<Reservation, AppError> {
        let draft = validate_new_reservation(new, statuses).map_err(rejected)?;
        let _gate = gate.lock().await;

        let mut params = draft.insert_params();
        params.push(BindValue::Int(draft.apartment_id));
        if !statuses.active.is_empty() {
            params.push(BindValue::Int(draft.apartment_id));
            params.extend(statuses.active.iter().map(|s| BindValue::from(s.as_str())));
        }
        let sql = queries::insert_reservation_if_free(statuses.active.len());

        let mut tx = store.begin().await?;
        let done = tx.run(&sql, &params).await?;
        if done.rows_affected == 0 {
            let rejection = Self::why_refused(&mut tx, draft.apartment_id, statuses).await?;
            return Err(rejected(rejection));
        }
        tx.commit().await?;
        tracing::info!(id = done.last_insert_id, "reservation created");
        Ok(draft.into_record(done.last_insert_id))
    }

    /// Which condition of the guarded insert failed. Runs inside the same transaction.
    async fn why_refused(tx: &mut StoreTx, apartment_id: i64, statuses: &StatusSet) -> Result<Rejection, AppError> {
        let apartment: Option<Apartment> = tx
            .get(queries::SELECT_APARTMENT_BY_ID, &[BindValue::Int(apartment_id)])
            .await?;
        if apartment.is_none() {
            return Ok(Rejection::ApartmentNotFound { id: apartment_id });
        }
        let q = select_where_in(
            queries::RESERVATIONS,
            "apartamento_id",
            BindValue::Int(apartment_id),
            "estado",
            &statuses.active,
        );
        let active: Option<Reservation> = tx.get(&q.sql, &q.params).await?;
        match active {
            Some(existing) => Ok(Rejection::ActiveReservation {
                apartment_id,
                status: existing.status,
            }),
            None => Err(AppError::Constraint(format!(
                "reservation for apartment {} was not inserted",
                apartment_id
            ))),
        }
    }

    pub async fn get(store: &Store, id: i64) -> Result<Option<Reservation>, AppError> {
        if id <= 0 {
            return Ok(None);
        }
        store.get(queries::SELECT_RESERVATION_BY_ID, &[BindValue::Int(id)]).await
    }

    pub async fn list(store: &Store, filter: &ReservationFilter) -> Result<Vec<Reservation>, AppError> {
        let q = select_list(queries::RESERVATIONS, filter);
        store.all(&q.sql, &q.params).await
    }

    /// Patch dates and status. The active-reservation rule is not re-checked here.
    #[tracing::instrument(skip(store, statuses, patch))]
    pub async fn update(
        store: &Store,
        statuses: &StatusSet,
        id: i64,
        patch: &ReservationPatch,
    ) -> Result<Option<Updated<Reservation>>, AppError> {
        let Some(current) = Self::get(store, id).await? else {
            return Ok(None);
        };
        validate_reservation_patch(patch, statuses).map_err(rejected)?;
        let Some(q) = update(queries::RESERVATIONS, id, patch) else {
            return Ok(Some(Updated {
                record: current,
                changed: false,
            }));
        };
        let done = store.run(&q.sql, &q.params).await?;
        let record = Self::get(store, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("reservation {}", id)))?;
        Ok(Some(Updated {
            record,
            changed: done.rows_affected > 0,
        }))
    }

    #[tracing::instrument(skip(store))]
    pub async fn delete(store: &Store, id: i64) -> Result<Option<Reservation>, AppError> {
        let Some(current) = Self::get(store, id).await? else {
            return Ok(None);
        };
        store.run(queries::DELETE_RESERVATION, &[BindValue::Int(id)]).await?;
        tracing::info!("reservation deleted");
        Ok(Some(current))
    }
}
