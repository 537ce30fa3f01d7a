use std::net::SocketAddr;
use std::sync::Arc;

use flightfinder_api::{app, AppState};
use flightfinder_core::seating::SeatLocks;
use flightfinder_store::{
    PostgresBookingRepository, PostgresFlightRepository, PostgresUserRepository,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "flightfinder_api=debug,tower_http=debug,axum::rejection=trace".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = flightfinder_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting Flight Finder API on port {}", config.server.port);

    // A missing database at startup is fatal.
    let db = flightfinder_store::DbClient::new(&config.database.url)
        .await
        .expect("Failed to connect to database");
    db.migrate().await.expect("Failed to run migrations");

    let app_state = AppState {
        users: Arc::new(PostgresUserRepository::new(db.pool.clone())),
        flights: Arc::new(PostgresFlightRepository::new(db.pool.clone())),
        bookings: Arc::new(PostgresBookingRepository::new(db.pool.clone())),
        seat_locks: Arc::new(SeatLocks::new()),
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}
