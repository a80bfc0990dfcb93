use crate::error::BookingError;
use crate::interval::TimeInterval;
use chrono::{NaiveDate, NaiveTime};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref DATE_RE: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
    static ref TIME_RE: Regex = Regex::new(r"^([01][0-9]|2[0-3]):[0-5][0-9]$").unwrap();
}

/// A booking request exactly as it arrives from the transport layer, before
/// any checking. Every field is optional here so that absence is diagnosed by
/// the validator rather than by deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBookingRequest {
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub service: Option<String>,
    #[serde(alias = "hairSalonId")]
    pub salon_id: Option<i64>,
    pub customer_id: Option<i64>,
}

/// The same request after the purely syntactic checks passed. No lookup has
/// happened yet; ids are well-formed but not known to exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub service: String,
    pub salon_id: u32,
    pub customer_id: u32,
}

impl BookingRequest {
    pub fn interval(&self) -> Result<TimeInterval, BookingError> {
        TimeInterval::new(self.date, self.start_time, self.end_time)
    }
}

impl RawBookingRequest {
    /// Syntactic validation only, no I/O. All absent fields are reported
    /// together; the first malformed field aborts.
    pub fn validate(&self) -> Result<BookingRequest, BookingError> {
        let mut missing = Vec::new();
        if self.date.as_deref().map_or(true, str::is_empty) {
            missing.push("date");
        }
        if self.start_time.as_deref().map_or(true, str::is_empty) {
            missing.push("startTime");
        }
        if self.end_time.as_deref().map_or(true, str::is_empty) {
            missing.push("endTime");
        }
        if self.service.as_deref().map_or(true, str::is_empty) {
            missing.push("service");
        }
        if self.salon_id.is_none() {
            missing.push("salonId");
        }
        if self.customer_id.is_none() {
            missing.push("customerId");
        }
        if !missing.is_empty() {
            return Err(BookingError::MissingParameters(missing.join(", ")));
        }

        let date = parse_date(self.date.as_deref().unwrap(), "date")?;
        let start_time = parse_time(self.start_time.as_deref().unwrap(), "startTime")?;
        let end_time = parse_time(self.end_time.as_deref().unwrap(), "endTime")?;
        let salon_id = parse_id(self.salon_id.unwrap(), "salonId")?;
        let customer_id = parse_id(self.customer_id.unwrap(), "customerId")?;

        Ok(BookingRequest {
            date,
            start_time,
            end_time,
            service: self.service.clone().unwrap(),
            salon_id,
            customer_id,
        })
    }
}

pub(crate) fn parse_date(raw: &str, field: &'static str) -> Result<NaiveDate, BookingError> {
    if !DATE_RE.is_match(raw) {
        return Err(BookingError::InvalidParameters { field });
    }
    // The regex fixes the shape; chrono rejects impossible calendar dates
    // such as 2017-13-40.
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| BookingError::InvalidParameters { field })
}

pub(crate) fn parse_time(raw: &str, field: &'static str) -> Result<NaiveTime, BookingError> {
    if !TIME_RE.is_match(raw) {
        return Err(BookingError::InvalidParameters { field });
    }
    NaiveTime::parse_from_str(raw, "%H:%M").map_err(|_| BookingError::InvalidParameters { field })
}

fn parse_id(raw: i64, field: &'static str) -> Result<u32, BookingError> {
    if raw < 1 || raw > i64::from(u32::MAX) {
        return Err(BookingError::InvalidParameters { field });
    }
    Ok(raw as u32)
}
