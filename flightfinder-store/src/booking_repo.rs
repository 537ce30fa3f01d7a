use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use flightfinder_core::booking::{Booking, BookingStatus, CabinClass, Passenger};
use flightfinder_core::repository::BookingRepository;

pub struct PostgresBookingRepository {
    pool: PgPool,
}

impl PostgresBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal struct for type-safe querying. The passenger list is embedded as
// JSONB, mirroring the original document layout.
#[derive(sqlx::FromRow)]
struct BookingRow {
    id: Uuid,
    user_id: Uuid,
    flight_ref: Uuid,
    flight_name: String,
    flight_id: String,
    departure: String,
    destination: String,
    email: String,
    mobile: String,
    passengers: serde_json::Value,
    total_price: i64,
    journey_date: NaiveDate,
    journey_time: String,
    seat_class: String,
    seats: String,
    booking_status: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<BookingRow> for Booking {
    type Error = Box<dyn std::error::Error + Send + Sync>;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        let passengers: Vec<Passenger> = serde_json::from_value(row.passengers)?;

        Ok(Booking {
            id: row.id,
            user: row.user_id,
            flight: row.flight_ref,
            flight_name: row.flight_name,
            flight_id: row.flight_id,
            departure: row.departure,
            destination: row.destination,
            email: row.email,
            mobile: row.mobile,
            passengers,
            total_price: row.total_price,
            journey_date: row.journey_date,
            journey_time: row.journey_time,
            seat_class: row.seat_class.parse()?,
            seats: row.seats,
            booking_status: row.booking_status.parse()?,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl BookingRepository for PostgresBookingRepository {
    async fn create_booking(
        &self,
        booking: &Booking,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let passengers = serde_json::to_value(&booking.passengers)?;

        sqlx::query(
            r#"
            INSERT INTO bookings (id, user_id, flight_ref, flight_name, flight_id,
                                  departure, destination, email, mobile, passengers,
                                  total_price, journey_date, journey_time, seat_class,
                                  seats, booking_status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            "#,
        )
        .bind(booking.id)
        .bind(booking.user)
        .bind(booking.flight)
        .bind(&booking.flight_name)
        .bind(&booking.flight_id)
        .bind(&booking.departure)
        .bind(&booking.destination)
        .bind(&booking.email)
        .bind(&booking.mobile)
        .bind(passengers)
        .bind(booking.total_price)
        .bind(booking.journey_date)
        .bind(&booking.journey_time)
        .bind(booking.seat_class.as_str())
        .bind(&booking.seats)
        .bind(booking.booking_status.as_str())
        .bind(booking.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_booking(
        &self,
        id: Uuid,
    ) -> Result<Option<Booking>, Box<dyn std::error::Error + Send + Sync>> {
        let row = sqlx::query_as::<_, BookingRow>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Booking::try_from).transpose()
    }

    async fn list_bookings(
        &self,
    ) -> Result<Vec<Booking>, Box<dyn std::error::Error + Send + Sync>> {
        let rows = sqlx::query_as::<_, BookingRow>("SELECT * FROM bookings ORDER BY created_at")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Booking::try_from).collect()
    }

    async fn count_booked_seats(
        &self,
        flight: Uuid,
        journey_date: NaiveDate,
        seat_class: CabinClass,
    ) -> Result<i64, Box<dyn std::error::Error + Send + Sync>> {
        // Cancelled bookings still count: a cancelled seat is never returned
        // to the pool.
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(jsonb_array_length(passengers)), 0)::BIGINT
            FROM bookings
            WHERE flight_ref = $1 AND journey_date = $2 AND seat_class = $3
            "#,
        )
        .bind(flight)
        .bind(journey_date)
        .bind(seat_class.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn set_status(
        &self,
        id: Uuid,
        status: BookingStatus,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
        let result = sqlx::query("UPDATE bookings SET booking_status = $1 WHERE id = $2")
            .bind(status.as_str())
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
