use crate::interval::TimeInterval;
use crate::types::{Customer, NewReservation, Reservation, Salon, WorkingWindow};
use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

/// Directory of salons. `find_by_id` returning `None` means the salon does
/// not exist; the scheduler translates that into its own not-found error.
#[async_trait]
pub trait SalonDirectory: Clone + Send + Sync + 'static {
    async fn salons(&self) -> Vec<Salon>;
    async fn find_by_id(&self, id: u32) -> Option<Salon>;
    async fn add_salon(&self, name: String, address: String, phone: String, email: String)
        -> Salon;
    async fn remove_salon(&self, id: u32) -> Result<(), String>;
}

#[async_trait]
pub trait CustomerDirectory: Clone + Send + Sync + 'static {
    async fn customers(&self) -> Vec<Customer>;
    async fn find_by_id(&self, id: u32) -> Option<Customer>;
    async fn add_customer(
        &self,
        first_name: String,
        last_name: String,
        phone: String,
        email: String,
    ) -> Customer;
    async fn remove_customer(&self, id: u32) -> Result<(), String>;
}

/// Catalog of declared working windows. A (salon, date) pair may map to any
/// number of windows, including zero.
#[async_trait]
pub trait WorkingHoursCatalog: Clone + Send + Sync + 'static {
    async fn working_windows(&self) -> Vec<WorkingWindow>;
    async fn find_by_id(&self, id: u32) -> Option<WorkingWindow>;
    async fn find_by_date_and_salon(&self, date: NaiveDate, salon_id: u32) -> Vec<WorkingWindow>;
    async fn add_window(&self, salon_id: u32, interval: TimeInterval) -> WorkingWindow;
    async fn remove_window(&self, id: u32) -> Result<(), String>;
}

/// Store of committed reservations. `save` assigns the identity.
#[async_trait]
pub trait ReservationStore: Clone + Send + Sync + 'static {
    async fn reservations(&self) -> Vec<Reservation>;
    async fn find_by_salon_and_date(&self, salon_id: u32, date: NaiveDate) -> Vec<Reservation>;
    async fn save(&self, reservation: NewReservation) -> Result<Reservation, String>;
    async fn delete_by_id(&self, id: Uuid) -> Result<(), String>;
}
