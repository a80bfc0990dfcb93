use crate::backend::{CustomerDirectory, ReservationStore, SalonDirectory, WorkingHoursCatalog};
use crate::error::BookingError;
use crate::interval::TimeInterval;
use crate::request::RawBookingRequest;
use crate::types::{NewReservation, Reservation};
use chrono::NaiveDate;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

/// Orchestrates the scheduling pipeline: syntactic validation, interval
/// construction, salon/working-hours/customer resolution, conflict check,
/// persistence. Strictly sequential and fail-fast; a failed stage aborts the
/// request before the next stage runs.
#[derive(Clone)]
pub struct ReservationScheduler<S, C, W, R> {
    salons: S,
    customers: C,
    working_hours: W,
    reservations: R,
    // One async mutex per (salon, date) serializes the conflict check with
    // the store write; without it two concurrent overlapping requests could
    // both pass the check before either commits.
    slot_locks: Arc<Mutex<HashMap<(u32, NaiveDate), Arc<tokio::sync::Mutex<()>>>>>,
}

impl<S, C, W, R> ReservationScheduler<S, C, W, R>
where
    S: SalonDirectory,
    C: CustomerDirectory,
    W: WorkingHoursCatalog,
    R: ReservationStore,
{
    pub fn new(salons: S, customers: C, working_hours: W, reservations: R) -> Self {
        Self {
            salons,
            customers,
            working_hours,
            reservations,
            slot_locks: Arc::default(),
        }
    }

    /// Runs a raw booking request through the whole pipeline. Returns the
    /// persisted reservation with its store-assigned identity, or the first
    /// error the pipeline hit; nothing is committed on failure.
    pub async fn schedule(&self, raw: &RawBookingRequest) -> Result<Reservation, BookingError> {
        let request = raw.validate()?;
        let interval = request.interval()?;

        let salon = self
            .salons
            .find_by_id(request.salon_id)
            .await
            .ok_or(BookingError::NotFound {
                entity: "salon",
                id: request.salon_id,
            })?;

        let windows = self
            .working_hours
            .find_by_date_and_salon(request.date, request.salon_id)
            .await;
        if windows.is_empty() {
            return Err(BookingError::NoWorkingHours {
                salon_id: request.salon_id,
                date: request.date,
            });
        }
        // A salon may declare several windows for one date (split shifts);
        // the request must fit entirely inside one of them.
        if !windows
            .iter()
            .any(|window| interval.contained_in(&window.interval))
        {
            return Err(BookingError::OutsideWorkingHours);
        }

        let customer =
            self.customers
                .find_by_id(request.customer_id)
                .await
                .ok_or(BookingError::NotFound {
                    entity: "customer",
                    id: request.customer_id,
                })?;

        let slot_lock = self.slot_lock(request.salon_id, request.date);
        let _guard = slot_lock.lock().await;

        let overlapping = self.find_overlaps(request.salon_id, &interval).await;
        if !overlapping.is_empty() {
            tracing::debug!(
                salon_id = request.salon_id,
                date = %request.date,
                conflicts = overlapping.len(),
                "rejecting overlapping reservation"
            );
            return Err(BookingError::OverlappingReservation(overlapping.len()));
        }

        let reservation = NewReservation {
            interval,
            service: request.service,
            salon,
            customer,
        };
        self.reservations
            .save(reservation)
            .await
            .map_err(BookingError::PersistenceFailure)
    }

    /// Queries the store for same-salon same-date reservations and keeps the
    /// ones that overlap the requested interval.
    pub async fn find_overlaps(&self, salon_id: u32, interval: &TimeInterval) -> Vec<Reservation> {
        self.reservations
            .find_by_salon_and_date(salon_id, interval.date)
            .await
            .into_iter()
            .filter(|reservation| reservation.interval.overlaps(interval))
            .collect()
    }

    fn slot_lock(&self, salon_id: u32, date: NaiveDate) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.slot_locks.lock().unwrap();
        locks.entry((salon_id, date)).or_default().clone()
    }
}
