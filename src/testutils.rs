use crate::backend::{CustomerDirectory, ReservationStore, SalonDirectory, WorkingHoursCatalog};
use crate::interval::TimeInterval;
use crate::types::{Customer, NewReservation, Reservation, Salon, WorkingWindow};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, AtomicU64, Ordering},
        Arc, Mutex,
    },
};
use uuid::Uuid;

pub fn date(raw: &str) -> NaiveDate {
    raw.parse().unwrap()
}

pub fn time(raw: &str) -> NaiveTime {
    NaiveTime::parse_from_str(raw, "%H:%M").unwrap()
}

pub fn interval(day: &str, start: &str, end: &str) -> TimeInterval {
    TimeInterval::new(date(day), time(start), time(end)).unwrap()
}

pub fn example_salon(id: u32) -> Salon {
    Salon {
        id,
        name: "Chop Chop".into(),
        address: "1 High Street".into(),
        phone: "555-0100".into(),
        email: "hello@chopchop.example".into(),
    }
}

pub fn example_customer(id: u32) -> Customer {
    Customer {
        id,
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        phone: "555-0101".into(),
        email: "ada@example.com".into(),
    }
}

/// One backend standing in for all four collaborators, counting every call
/// so tests can verify exactly which lookups a request triggered.
pub struct MockBackendInner {
    pub save_success: AtomicBool,
    pub calls_to_find_salon: AtomicU64,
    pub calls_to_find_customer: AtomicU64,
    pub calls_to_find_working_hours: AtomicU64,
    pub calls_to_find_reservations: AtomicU64,
    pub calls_to_save: AtomicU64,
    pub calls_to_delete_reservation: AtomicU64,
    pub salons: Mutex<HashMap<u32, Salon>>,
    pub customers: Mutex<HashMap<u32, Customer>>,
    pub windows: Mutex<Vec<WorkingWindow>>,
    pub reservations: Mutex<Vec<Reservation>>,
}

#[derive(Clone)]
pub struct MockBackend(pub Arc<MockBackendInner>);

impl MockBackend {
    pub fn new() -> Self {
        Self(Arc::new(MockBackendInner {
            save_success: AtomicBool::new(true),
            calls_to_find_salon: AtomicU64::default(),
            calls_to_find_customer: AtomicU64::default(),
            calls_to_find_working_hours: AtomicU64::default(),
            calls_to_find_reservations: AtomicU64::default(),
            calls_to_save: AtomicU64::default(),
            calls_to_delete_reservation: AtomicU64::default(),
            salons: Mutex::default(),
            customers: Mutex::default(),
            windows: Mutex::default(),
            reservations: Mutex::default(),
        }))
    }

    pub fn with_salon(self, salon: Salon) -> Self {
        self.0.salons.lock().unwrap().insert(salon.id, salon);
        self
    }

    pub fn with_customer(self, customer: Customer) -> Self {
        self.0
            .customers
            .lock()
            .unwrap()
            .insert(customer.id, customer);
        self
    }

    pub fn with_window(self, salon_id: u32, interval: TimeInterval) -> Self {
        let mut windows = self.0.windows.lock().unwrap();
        let id = windows.len() as u32 + 1;
        windows.push(WorkingWindow {
            id,
            salon_id,
            interval,
        });
        drop(windows);
        self
    }

    pub fn with_reservation(self, salon: Salon, customer: Customer, interval: TimeInterval) -> Self {
        self.0.reservations.lock().unwrap().push(Reservation {
            id: Uuid::new_v4(),
            interval,
            service: "Haircut".into(),
            salon,
            customer,
        });
        self
    }

    pub fn no_collaborator_was_called(&self) -> bool {
        self.0.calls_to_find_salon.load(Ordering::SeqCst) == 0
            && self.0.calls_to_find_customer.load(Ordering::SeqCst) == 0
            && self.0.calls_to_find_working_hours.load(Ordering::SeqCst) == 0
            && self.0.calls_to_find_reservations.load(Ordering::SeqCst) == 0
            && self.0.calls_to_save.load(Ordering::SeqCst) == 0
    }
}

#[async_trait]
impl SalonDirectory for MockBackend {
    async fn salons(&self) -> Vec<Salon> {
        self.0.salons.lock().unwrap().values().cloned().collect()
    }

    async fn find_by_id(&self, id: u32) -> Option<Salon> {
        self.0.calls_to_find_salon.fetch_add(1, Ordering::SeqCst);
        self.0.salons.lock().unwrap().get(&id).cloned()
    }

    async fn add_salon(
        &self,
        name: String,
        address: String,
        phone: String,
        email: String,
    ) -> Salon {
        let mut salons = self.0.salons.lock().unwrap();
        let id = salons.len() as u32 + 1;
        let salon = Salon {
            id,
            name,
            address,
            phone,
            email,
        };
        salons.insert(id, salon.clone());
        salon
    }

    async fn remove_salon(&self, id: u32) -> Result<(), String> {
        match self.0.salons.lock().unwrap().remove(&id) {
            Some(_) => Ok(()),
            None => Err("Supposed to fail".into()),
        }
    }
}

#[async_trait]
impl CustomerDirectory for MockBackend {
    async fn customers(&self) -> Vec<Customer> {
        self.0.customers.lock().unwrap().values().cloned().collect()
    }

    async fn find_by_id(&self, id: u32) -> Option<Customer> {
        self.0.calls_to_find_customer.fetch_add(1, Ordering::SeqCst);
        self.0.customers.lock().unwrap().get(&id).cloned()
    }

    async fn add_customer(
        &self,
        first_name: String,
        last_name: String,
        phone: String,
        email: String,
    ) -> Customer {
        let mut customers = self.0.customers.lock().unwrap();
        let id = customers.len() as u32 + 1;
        let customer = Customer {
            id,
            first_name,
            last_name,
            phone,
            email,
        };
        customers.insert(id, customer.clone());
        customer
    }

    async fn remove_customer(&self, id: u32) -> Result<(), String> {
        match self.0.customers.lock().unwrap().remove(&id) {
            Some(_) => Ok(()),
            None => Err("Supposed to fail".into()),
        }
    }
}

#[async_trait]
impl WorkingHoursCatalog for MockBackend {
    async fn working_windows(&self) -> Vec<WorkingWindow> {
        self.0.windows.lock().unwrap().clone()
    }

    async fn find_by_id(&self, id: u32) -> Option<WorkingWindow> {
        self.0
            .windows
            .lock()
            .unwrap()
            .iter()
            .find(|window| window.id == id)
            .cloned()
    }

    async fn find_by_date_and_salon(&self, date: NaiveDate, salon_id: u32) -> Vec<WorkingWindow> {
        self.0
            .calls_to_find_working_hours
            .fetch_add(1, Ordering::SeqCst);
        self.0
            .windows
            .lock()
            .unwrap()
            .iter()
            .filter(|window| window.salon_id == salon_id && window.interval.date == date)
            .cloned()
            .collect()
    }

    async fn add_window(&self, salon_id: u32, interval: TimeInterval) -> WorkingWindow {
        let mut windows = self.0.windows.lock().unwrap();
        let id = windows.len() as u32 + 1;
        let window = WorkingWindow {
            id,
            salon_id,
            interval,
        };
        windows.push(window.clone());
        window
    }

    async fn remove_window(&self, id: u32) -> Result<(), String> {
        let mut windows = self.0.windows.lock().unwrap();
        let before = windows.len();
        windows.retain(|window| window.id != id);
        if windows.len() == before {
            return Err("Supposed to fail".into());
        }
        Ok(())
    }
}

#[async_trait]
impl ReservationStore for MockBackend {
    async fn reservations(&self) -> Vec<Reservation> {
        self.0.reservations.lock().unwrap().clone()
    }

    async fn find_by_salon_and_date(&self, salon_id: u32, date: NaiveDate) -> Vec<Reservation> {
        // Yield so concurrent pipelines interleave between their conflict
        // check and their write, as they would against a real store.
        tokio::task::yield_now().await;
        self.0
            .calls_to_find_reservations
            .fetch_add(1, Ordering::SeqCst);
        self.0
            .reservations
            .lock()
            .unwrap()
            .iter()
            .filter(|reservation| {
                reservation.salon.id == salon_id && reservation.interval.date == date
            })
            .cloned()
            .collect()
    }

    async fn save(&self, reservation: NewReservation) -> Result<Reservation, String> {
        tokio::task::yield_now().await;
        self.0.calls_to_save.fetch_add(1, Ordering::SeqCst);
        if !self.0.save_success.load(Ordering::SeqCst) {
            return Err("Supposed to fail".into());
        }
        let reservation = Reservation {
            id: Uuid::new_v4(),
            interval: reservation.interval,
            service: reservation.service,
            salon: reservation.salon,
            customer: reservation.customer,
        };
        self.0
            .reservations
            .lock()
            .unwrap()
            .push(reservation.clone());
        Ok(reservation)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), String> {
        self.0
            .calls_to_delete_reservation
            .fetch_add(1, Ordering::SeqCst);
        let mut reservations = self.0.reservations.lock().unwrap();
        let before = reservations.len();
        reservations.retain(|reservation| reservation.id != id);
        if reservations.len() == before {
            return Err("Supposed to fail".into());
        }
        Ok(())
    }
}
