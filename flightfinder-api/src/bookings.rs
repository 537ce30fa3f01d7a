use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};
use chrono::Utc;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use flightfinder_core::booking::{Booking, BookingStatus, CabinClass, CreateBookingRequest};
use flightfinder_core::seating::{seat_labels, SeatPoolKey};

use crate::error::{internal, AppError};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/fetch-bookings", get(fetch_bookings))
        .route("/book-ticket", post(book_ticket))
        .route("/cancel-ticket/{id}", put(cancel_ticket))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BookingAckResponse {
    message: String,
    booking_id: Uuid,
    /// Assigned labels, e.g. "E-4, E-5". The original contract omitted these;
    /// callers need them, so the ack carries them.
    seats: String,
}

#[derive(Debug, Serialize)]
struct AckResponse {
    message: String,
}

/// GET /fetch-bookings
async fn fetch_bookings(State(state): State<AppState>) -> Result<Json<Vec<Booking>>, AppError> {
    let bookings = state.bookings.list_bookings().await.map_err(internal)?;
    Ok(Json(bookings))
}

/// POST /book-ticket
async fn book_ticket(
    State(state): State<AppState>,
    Json(req): Json<CreateBookingRequest>,
) -> Result<Json<BookingAckResponse>, AppError> {
    if req.passengers.is_empty() {
        return Err(AppError::ValidationError(
            "at least one passenger is required".to_string(),
        ));
    }

    let seat_class: CabinClass = req
        .seat_class
        .parse()
        .map_err(|e: flightfinder_core::CoreError| AppError::ValidationError(e.to_string()))?;

    // References are loose identifiers; check both exist before writing.
    state
        .users
        .find_by_id(req.user)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::NotFoundError("User not found".to_string()))?;

    state
        .flights
        .get_flight(req.flight)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::NotFoundError("Flight not found".to_string()))?;

    let key = SeatPoolKey {
        flight: req.flight,
        journey_date: req.journey_date,
        seat_class,
    };

    // Hold the pool lock across count and insert so concurrent requests for
    // the same flight/date/class never compute overlapping labels.
    let _pool_guard = state.seat_locks.acquire(key).await;

    let already_booked = state
        .bookings
        .count_booked_seats(req.flight, req.journey_date, seat_class)
        .await
        .map_err(internal)?;

    let labels = seat_labels(seat_class, already_booked, req.passengers.len());
    let seats = labels.join(", ");

    let booking = Booking {
        id: Uuid::new_v4(),
        user: req.user,
        flight: req.flight,
        flight_name: req.flight_name,
        flight_id: req.flight_id,
        departure: req.departure,
        destination: req.destination,
        email: req.email,
        mobile: req.mobile,
        passengers: req.passengers,
        total_price: req.total_price,
        journey_date: req.journey_date,
        journey_time: req.journey_time,
        seat_class,
        seats: seats.clone(),
        booking_status: BookingStatus::Active,
        created_at: Utc::now(),
    };

    state.bookings.create_booking(&booking).await.map_err(internal)?;

    info!(
        "Booked {} seat(s) on flight {} for {}: {}",
        booking.passengers.len(),
        booking.flight,
        booking.journey_date,
        seats
    );

    Ok(Json(BookingAckResponse {
        message: "Booking successful!!".to_string(),
        booking_id: booking.id,
        seats,
    }))
}

/// PUT /cancel-ticket/:id
///
/// One-way transition to cancelled; repeating it is a no-op. The seats stay
/// counted against the pool.
async fn cancel_ticket(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AckResponse>, AppError> {
    let cancelled = state
        .bookings
        .set_status(id, BookingStatus::Cancelled)
        .await
        .map_err(internal)?;

    if !cancelled {
        return Err(AppError::NotFoundError("Booking not found".to_string()));
    }

    info!("Cancelled booking {}", id);

    Ok(Json(AckResponse { message: "booking cancelled".to_string() }))
}
