use std::sync::Arc;

use flightfinder_core::repository::{BookingRepository, FlightRepository, UserRepository};
use flightfinder_core::seating::SeatLocks;

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub flights: Arc<dyn FlightRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    /// Serializes the count-then-insert window of booking creation per
    /// (flight, journey date, cabin class).
    pub seat_locks: Arc<SeatLocks>,
}
