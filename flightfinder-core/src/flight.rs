use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A scheduled flight. Seat consumption is never stored here; occupancy is
/// derived by counting passengers across bookings for a journey date.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    pub id: Uuid,
    pub flight_name: String,
    /// Carrier flight code, e.g. "FF-204". Distinct from the record id.
    pub flight_id: String,
    pub origin: String,
    pub destination: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub base_price: i64,
    pub total_seats: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFlightRequest {
    pub flight_name: String,
    pub flight_id: String,
    pub origin: String,
    pub destination: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub base_price: i64,
    pub total_seats: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFlightRequest {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub flight_name: String,
    pub flight_id: String,
    pub origin: String,
    pub destination: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub base_price: i64,
    pub total_seats: i32,
}
