use crate::airport::{Airport, distance_km};
use crate::time::ClockTime;
use std::sync::Arc;
use tabled::Tabled;

pub type RouteCode = Arc<str>;

#[derive(Debug, Clone, PartialEq, Tabled)]
pub struct Route {
    pub code: RouteCode,
    pub origin: Arc<Airport>,
    pub destination: Arc<Airport>,
    pub departure_time: ClockTime,
    pub arrival_time: ClockTime,
}

impl Route {
    pub fn distance_km(&self) -> u32 {
        distance_km(&self.origin, &self.destination)
    }
}
