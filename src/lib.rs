pub mod aircraft;
pub mod airline;
pub mod airport;
pub mod client;
pub mod error;
pub mod fare;
pub mod flight;
pub mod persistence;
pub mod route;
pub mod ticket;
pub mod time;

pub use airline::Airline;
pub use error::{AirlineError, Result};
