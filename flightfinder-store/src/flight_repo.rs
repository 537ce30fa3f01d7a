use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use flightfinder_core::flight::Flight;
use flightfinder_core::repository::FlightRepository;

pub struct PostgresFlightRepository {
    pool: PgPool,
}

impl PostgresFlightRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal struct for type-safe querying
#[derive(sqlx::FromRow)]
struct FlightRow {
    id: Uuid,
    flight_name: String,
    flight_id: String,
    origin: String,
    destination: String,
    departure_time: String,
    arrival_time: String,
    base_price: i64,
    total_seats: i32,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<FlightRow> for Flight {
    fn from(row: FlightRow) -> Self {
        Flight {
            id: row.id,
            flight_name: row.flight_name,
            flight_id: row.flight_id,
            origin: row.origin,
            destination: row.destination,
            departure_time: row.departure_time,
            arrival_time: row.arrival_time,
            base_price: row.base_price,
            total_seats: row.total_seats,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl FlightRepository for PostgresFlightRepository {
    async fn create_flight(
        &self,
        flight: &Flight,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        sqlx::query(
            r#"
            INSERT INTO flights (id, flight_name, flight_id, origin, destination,
                                 departure_time, arrival_time, base_price, total_seats, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(flight.id)
        .bind(&flight.flight_name)
        .bind(&flight.flight_id)
        .bind(&flight.origin)
        .bind(&flight.destination)
        .bind(&flight.departure_time)
        .bind(&flight.arrival_time)
        .bind(flight.base_price)
        .bind(flight.total_seats)
        .bind(flight.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_flight(
        &self,
        id: Uuid,
    ) -> Result<Option<Flight>, Box<dyn std::error::Error + Send + Sync>> {
        let row = sqlx::query_as::<_, FlightRow>("SELECT * FROM flights WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Flight::from))
    }

    async fn list_flights(&self) -> Result<Vec<Flight>, Box<dyn std::error::Error + Send + Sync>> {
        let rows = sqlx::query_as::<_, FlightRow>("SELECT * FROM flights ORDER BY created_at")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Flight::from).collect())
    }

    async fn update_flight(
        &self,
        flight: &Flight,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
        let result = sqlx::query(
            r#"
            UPDATE flights
            SET flight_name = $1, flight_id = $2, origin = $3, destination = $4,
                departure_time = $5, arrival_time = $6, base_price = $7, total_seats = $8
            WHERE id = $9
            "#,
        )
        .bind(&flight.flight_name)
        .bind(&flight.flight_id)
        .bind(&flight.origin)
        .bind(&flight.destination)
        .bind(&flight.departure_time)
        .bind(&flight.arrival_time)
        .bind(flight.base_price)
        .bind(flight.total_seats)
        .bind(flight.id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
