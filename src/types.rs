use crate::interval::TimeInterval;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Salon {
    pub id: u32,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: u32,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
}

/// One declared open period for a salon on a specific date. A salon may
/// declare several windows per date (split shifts); each is its own record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingWindow {
    pub id: u32,
    pub salon_id: u32,
    pub interval: TimeInterval,
}

/// A committed booking. Only the scheduling pipeline creates these; they are
/// deleted by id and never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: Uuid,
    pub interval: TimeInterval,
    pub service: String,
    pub salon: Salon,
    pub customer: Customer,
}

/// A reservation that passed every check but has no identity yet; the store
/// assigns one on save.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReservation {
    pub interval: TimeInterval,
    pub service: String,
    pub salon: Salon,
    pub customer: Customer,
}
