use crate::airport::AirportCode;
use crate::flight::FlightKey;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AirlineError>;

#[derive(Debug, Error)]
pub enum AirlineError {
    #[error("airport code {0} is already registered")]
    DuplicateAirportCode(AirportCode),

    #[error("airport {0} not found")]
    AirportNotFound(AirportCode),

    #[error("airport {0} is still served by route {1}")]
    AirportInUse(AirportCode, String),

    #[error("aircraft {0} not found")]
    AircraftNotFound(String),

    #[error("aircraft {0} already exists")]
    DuplicateAircraft(String),

    #[error("route {0} not found")]
    RouteNotFound(String),

    #[error("route {0} already exists")]
    DuplicateRoute(String),

    #[error("aircraft {aircraft} is already flying on {date}")]
    AircraftUnavailable { aircraft: String, date: String },

    #[error("flight {0} is already scheduled")]
    DuplicateFlight(FlightKey),

    #[error("client {0} not found")]
    ClientNotFound(String),

    #[error("client {0} already exists")]
    DuplicateClient(String),

    #[error("flight {0} not found")]
    FlightNotFound(FlightKey),

    /// Not enough seats left for the whole batch; nothing was sold.
    #[error("flight {flight} overbooked: requested {requested}, available {available}")]
    Overbooked {
        flight: FlightKey,
        requested: usize,
        available: usize,
    },

    #[error("no ticket codes left to issue")]
    TicketCodesExhausted,

    #[error("aircraft {0} must have at least one seat")]
    InvalidCapacity(String),

    #[error("invalid clock time {0}, expected HHMM")]
    InvalidClockTime(String),

    #[error("invalid date {0}, expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("unsupported storage format: {0}")]
    UnsupportedFormat(String),

    #[error("storage failure: {0}")]
    StorageIOFailure(#[from] std::io::Error),

    #[error("inconsistent data: {0}")]
    InconsistentData(String),
}

impl From<serde_json::Error> for AirlineError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            AirlineError::StorageIOFailure(err.into())
        } else {
            AirlineError::InconsistentData(err.to_string())
        }
    }
}
