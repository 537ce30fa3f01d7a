pub mod booking;
pub mod flight;
pub mod repository;
pub mod seating;
pub mod user;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("unknown cabin class: {0}")]
    UnknownCabinClass(String),
    #[error("unknown booking status: {0}")]
    UnknownBookingStatus(String),
    #[error("unknown approval state: {0}")]
    UnknownApprovalState(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
