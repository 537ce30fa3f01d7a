pub mod app_config;
pub mod booking_repo;
pub mod database;
pub mod flight_repo;
pub mod user_repo;

pub use booking_repo::PostgresBookingRepository;
pub use database::DbClient;
pub use flight_repo::PostgresFlightRepository;
pub use user_repo::PostgresUserRepository;
