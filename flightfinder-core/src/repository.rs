use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::booking::{Booking, BookingStatus, CabinClass};
use crate::flight::Flight;
use crate::user::{ApprovalStatus, User};

type RepoError = Box<dyn std::error::Error + Send + Sync>;

/// Repository trait for the users collection
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, user: &User) -> Result<(), RepoError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    async fn list_users(&self) -> Result<Vec<User>, RepoError>;

    /// Overwrite the approval state. Returns false when no record matched.
    async fn set_approval(&self, id: Uuid, approval: ApprovalStatus) -> Result<bool, RepoError>;
}

/// Repository trait for the flights collection
#[async_trait]
pub trait FlightRepository: Send + Sync {
    async fn create_flight(&self, flight: &Flight) -> Result<(), RepoError>;

    async fn get_flight(&self, id: Uuid) -> Result<Option<Flight>, RepoError>;

    async fn list_flights(&self) -> Result<Vec<Flight>, RepoError>;

    /// Full-record overwrite keyed by id. Returns false when no record matched.
    async fn update_flight(&self, flight: &Flight) -> Result<bool, RepoError>;
}

/// Repository trait for the bookings collection
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create_booking(&self, booking: &Booking) -> Result<(), RepoError>;

    async fn get_booking(&self, id: Uuid) -> Result<Option<Booking>, RepoError>;

    async fn list_bookings(&self) -> Result<Vec<Booking>, RepoError>;

    /// Summed passenger count across every booking in one seat pool,
    /// cancelled bookings included.
    async fn count_booked_seats(
        &self,
        flight: Uuid,
        journey_date: NaiveDate,
        seat_class: CabinClass,
    ) -> Result<i64, RepoError>;

    /// Returns false when no record matched.
    async fn set_status(&self, id: Uuid, status: BookingStatus) -> Result<bool, RepoError>;
}
