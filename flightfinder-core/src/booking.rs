use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::CoreError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    /// Registered user who placed the booking. By-reference only; existence
    /// is checked at creation time, never enforced by the store.
    pub user: Uuid,
    /// Flight record the booking is against.
    pub flight: Uuid,
    pub flight_name: String,
    pub flight_id: String,
    pub departure: String,
    pub destination: String,
    pub email: String,
    pub mobile: String,
    pub passengers: Vec<Passenger>,
    pub total_price: i64,
    pub journey_date: NaiveDate,
    pub journey_time: String,
    pub seat_class: CabinClass,
    /// Comma-separated seat labels, e.g. "E-1, E-2, E-3". Assigned once at
    /// creation and never released.
    pub seats: String,
    pub booking_status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Passenger {
    pub name: String,
    pub age: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Active,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Active => "active",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(BookingStatus::Active),
            "cancelled" => Ok(BookingStatus::Cancelled),
            other => Err(CoreError::UnknownBookingStatus(other.to_string())),
        }
    }
}

/// Fare class of an entire booking. Every passenger on a booking shares one
/// class; the class letter prefixes each seat label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CabinClass {
    Economy,
    PremiumEconomy,
    Business,
    FirstClass,
}

impl CabinClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            CabinClass::Economy => "economy",
            CabinClass::PremiumEconomy => "premium-economy",
            CabinClass::Business => "business",
            CabinClass::FirstClass => "first-class",
        }
    }

    /// Single-letter coach code used as the seat-label prefix.
    pub fn coach_code(&self) -> char {
        match self {
            CabinClass::Economy => 'E',
            CabinClass::PremiumEconomy => 'P',
            CabinClass::Business => 'B',
            CabinClass::FirstClass => 'A',
        }
    }
}

impl std::str::FromStr for CabinClass {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "economy" => Ok(CabinClass::Economy),
            "premium-economy" => Ok(CabinClass::PremiumEconomy),
            "business" => Ok(CabinClass::Business),
            "first-class" => Ok(CabinClass::FirstClass),
            other => Err(CoreError::UnknownCabinClass(other.to_string())),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub user: Uuid,
    pub flight: Uuid,
    pub flight_name: String,
    pub flight_id: String,
    pub departure: String,
    pub destination: String,
    pub email: String,
    pub mobile: String,
    pub passengers: Vec<Passenger>,
    pub total_price: i64,
    pub journey_date: NaiveDate,
    pub journey_time: String,
    /// Raw class tag; parsed by the handler so an unrecognized value maps to
    /// a validation failure instead of a body-rejection.
    pub seat_class: String,
}
