use crate::backend::{CustomerDirectory, ReservationStore, SalonDirectory, WorkingHoursCatalog};
use crate::interval::TimeInterval;
use crate::types::{Customer, NewReservation, Reservation, Salon, WorkingWindow};
use async_trait::async_trait;
use chrono::{Duration, Local, NaiveDate, NaiveTime};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};
use uuid::Uuid;

/// Rows keyed by a store-assigned integer id.
#[derive(Debug)]
struct Table<T> {
    next_id: u32,
    rows: HashMap<u32, T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: HashMap::new(),
        }
    }
}

impl<T> Table<T> {
    fn insert(&mut self, build: impl FnOnce(u32) -> T) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.rows.insert(id, build(id));
        id
    }
}

#[derive(Debug, Clone, Default)]
pub struct LocalSalons {
    salons: Arc<Mutex<Table<Salon>>>,
}

#[async_trait]
impl SalonDirectory for LocalSalons {
    async fn salons(&self) -> Vec<Salon> {
        self.salons.lock().unwrap().rows.values().cloned().collect()
    }

    async fn find_by_id(&self, id: u32) -> Option<Salon> {
        self.salons.lock().unwrap().rows.get(&id).cloned()
    }

    async fn add_salon(
        &self,
        name: String,
        address: String,
        phone: String,
        email: String,
    ) -> Salon {
        let mut salons = self.salons.lock().unwrap();
        let id = salons.insert(|id| Salon {
            id,
            name,
            address,
            phone,
            email,
        });
        salons.rows[&id].clone()
    }

    async fn remove_salon(&self, id: u32) -> Result<(), String> {
        let mut salons = self.salons.lock().unwrap();
        if salons.rows.remove(&id).is_none() {
            return Err("Salon does not exist and can therefore not be removed".into());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct LocalCustomers {
    customers: Arc<Mutex<Table<Customer>>>,
}

#[async_trait]
impl CustomerDirectory for LocalCustomers {
    async fn customers(&self) -> Vec<Customer> {
        self.customers
            .lock()
            .unwrap()
            .rows
            .values()
            .cloned()
            .collect()
    }

    async fn find_by_id(&self, id: u32) -> Option<Customer> {
        self.customers.lock().unwrap().rows.get(&id).cloned()
    }

    async fn add_customer(
        &self,
        first_name: String,
        last_name: String,
        phone: String,
        email: String,
    ) -> Customer {
        let mut customers = self.customers.lock().unwrap();
        let id = customers.insert(|id| Customer {
            id,
            first_name,
            last_name,
            phone,
            email,
        });
        customers.rows[&id].clone()
    }

    async fn remove_customer(&self, id: u32) -> Result<(), String> {
        let mut customers = self.customers.lock().unwrap();
        if customers.rows.remove(&id).is_none() {
            return Err("Customer does not exist and can therefore not be removed".into());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct LocalWorkingHours {
    windows: Arc<Mutex<Table<WorkingWindow>>>,
}

#[async_trait]
impl WorkingHoursCatalog for LocalWorkingHours {
    async fn working_windows(&self) -> Vec<WorkingWindow> {
        self.windows
            .lock()
            .unwrap()
            .rows
            .values()
            .cloned()
            .collect()
    }

    async fn find_by_id(&self, id: u32) -> Option<WorkingWindow> {
        self.windows.lock().unwrap().rows.get(&id).cloned()
    }

    async fn find_by_date_and_salon(&self, date: NaiveDate, salon_id: u32) -> Vec<WorkingWindow> {
        self.windows
            .lock()
            .unwrap()
            .rows
            .values()
            .filter(|window| window.salon_id == salon_id && window.interval.date == date)
            .cloned()
            .collect()
    }

    async fn add_window(&self, salon_id: u32, interval: TimeInterval) -> WorkingWindow {
        let mut windows = self.windows.lock().unwrap();
        let id = windows.insert(|id| WorkingWindow {
            id,
            salon_id,
            interval,
        });
        windows.rows[&id].clone()
    }

    async fn remove_window(&self, id: u32) -> Result<(), String> {
        let mut windows = self.windows.lock().unwrap();
        if windows.rows.remove(&id).is_none() {
            return Err("Working window does not exist and can therefore not be removed".into());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct LocalReservations {
    reservations: Arc<Mutex<HashMap<Uuid, Reservation>>>,
}

#[async_trait]
impl ReservationStore for LocalReservations {
    async fn reservations(&self) -> Vec<Reservation> {
        self.reservations
            .lock()
            .unwrap()
            .values()
            .cloned()
            .collect()
    }

    async fn find_by_salon_and_date(&self, salon_id: u32, date: NaiveDate) -> Vec<Reservation> {
        self.reservations
            .lock()
            .unwrap()
            .values()
            .filter(|reservation| {
                reservation.salon.id == salon_id && reservation.interval.date == date
            })
            .cloned()
            .collect()
    }

    async fn save(&self, reservation: NewReservation) -> Result<Reservation, String> {
        let id = Uuid::new_v4();
        let reservation = Reservation {
            id,
            interval: reservation.interval,
            service: reservation.service,
            salon: reservation.salon,
            customer: reservation.customer,
        };
        self.reservations
            .lock()
            .unwrap()
            .insert(id, reservation.clone());
        Ok(reservation)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), String> {
        let mut reservations = self.reservations.lock().unwrap();
        if reservations.remove(&id).is_none() {
            return Err("Reservation does not exist and can therefore not be removed".into());
        }
        Ok(())
    }
}

/// Seeds one salon, one customer and two weeks of 09:00-20:00 working
/// windows so a fresh server is immediately bookable.
pub async fn insert_example_data(
    salons: &LocalSalons,
    customers: &LocalCustomers,
    working_hours: &LocalWorkingHours,
) {
    const NUMBER_OF_DAYS: i64 = 14;

    let salon = salons
        .add_salon(
            "Chop Chop".into(),
            "1 High Street".into(),
            "555-0100".into(),
            "hello@chopchop.example".into(),
        )
        .await;
    customers
        .add_customer(
            "Ada".into(),
            "Lovelace".into(),
            "555-0101".into(),
            "ada@example.com".into(),
        )
        .await;

    let open = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
    let close = NaiveTime::from_hms_opt(20, 0, 0).unwrap();
    let today = Local::now().date_naive();
    for day in 0..NUMBER_OF_DAYS {
        let date = today + Duration::days(day);
        let interval = TimeInterval::new(date, open, close).unwrap();
        working_hours.add_window(salon.id, interval).await;
    }
    tracing::info!(salon = %salon.name, days = NUMBER_OF_DAYS, "inserted example data");
}
