use chrono::NaiveDate;
use thiserror::Error;

/// Everything that can go wrong while scheduling a reservation. Exactly one
/// of these is produced per failed request; the pipeline never commits
/// partial state before failing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    #[error("missing required parameters: {0}")]
    MissingParameters(String),

    #[error("invalid parameter: {field}")]
    InvalidParameters { field: &'static str },

    #[error("start time must be strictly before end time")]
    InvalidTimeOrder,

    #[error("no {entity} found with id {id}")]
    NotFound { entity: &'static str, id: u32 },

    #[error("no working hours declared for salon {salon_id} on {date}")]
    NoWorkingHours { salon_id: u32, date: NaiveDate },

    #[error("reservation is outside the salon's working hours")]
    OutsideWorkingHours,

    #[error("reservation overlaps {0} existing reservation(s)")]
    OverlappingReservation(usize),

    #[error("failed to persist reservation: {0}")]
    PersistenceFailure(String),
}

impl BookingError {
    /// True for failures caused by the caller's input; false only for
    /// store-side faults.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, BookingError::PersistenceFailure(_))
    }
}
