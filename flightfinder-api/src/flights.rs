use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};
use chrono::Utc;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use flightfinder_core::flight::{CreateFlightRequest, Flight, UpdateFlightRequest};

use crate::error::{internal, AppError};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/add-flight", post(add_flight))
        .route("/update-flight", put(update_flight))
        .route("/fetch-flights", get(fetch_flights))
        .route("/fetch-flight/{id}", get(fetch_flight))
}

#[derive(Debug, Serialize)]
struct AckResponse {
    message: String,
}

/// POST /add-flight
async fn add_flight(
    State(state): State<AppState>,
    Json(req): Json<CreateFlightRequest>,
) -> Result<Json<AckResponse>, AppError> {
    validate_flight_fields(&req.flight_name, &req.origin, &req.destination, req.total_seats)?;

    let flight = Flight {
        id: Uuid::new_v4(),
        flight_name: req.flight_name,
        flight_id: req.flight_id,
        origin: req.origin,
        destination: req.destination,
        departure_time: req.departure_time,
        arrival_time: req.arrival_time,
        base_price: req.base_price,
        total_seats: req.total_seats,
        created_at: Utc::now(),
    };

    state.flights.create_flight(&flight).await.map_err(internal)?;

    info!("Added flight {} ({})", flight.id, flight.flight_id);

    Ok(Json(AckResponse { message: "flight added".to_string() }))
}

/// PUT /update-flight
async fn update_flight(
    State(state): State<AppState>,
    Json(req): Json<UpdateFlightRequest>,
) -> Result<Json<AckResponse>, AppError> {
    validate_flight_fields(&req.flight_name, &req.origin, &req.destination, req.total_seats)?;

    let mut flight = state
        .flights
        .get_flight(req.id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::NotFoundError("Flight not found".to_string()))?;

    flight.flight_name = req.flight_name;
    flight.flight_id = req.flight_id;
    flight.origin = req.origin;
    flight.destination = req.destination;
    flight.departure_time = req.departure_time;
    flight.arrival_time = req.arrival_time;
    flight.base_price = req.base_price;
    flight.total_seats = req.total_seats;

    state.flights.update_flight(&flight).await.map_err(internal)?;

    Ok(Json(AckResponse { message: "flight updated".to_string() }))
}

/// GET /fetch-flights
async fn fetch_flights(State(state): State<AppState>) -> Result<Json<Vec<Flight>>, AppError> {
    let flights = state.flights.list_flights().await.map_err(internal)?;
    Ok(Json(flights))
}

/// GET /fetch-flight/:id
async fn fetch_flight(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Flight>, AppError> {
    let flight = state
        .flights
        .get_flight(id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::NotFoundError("Flight not found".to_string()))?;

    Ok(Json(flight))
}

fn validate_flight_fields(
    flight_name: &str,
    origin: &str,
    destination: &str,
    total_seats: i32,
) -> Result<(), AppError> {
    if flight_name.trim().is_empty() || origin.trim().is_empty() || destination.trim().is_empty() {
        return Err(AppError::ValidationError(
            "flightName, origin and destination are required".to_string(),
        ));
    }
    if total_seats <= 0 {
        return Err(AppError::ValidationError(
            "totalSeats must be positive".to_string(),
        ));
    }
    Ok(())
}
