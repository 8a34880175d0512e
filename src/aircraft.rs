use crate::error::{AirlineError, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tabled::Tabled;

pub type AircraftName = Arc<str>;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Tabled)]
pub struct Aircraft {
    pub name: AircraftName,
    pub capacity: usize,
}

impl Aircraft {
    pub fn new(name: &str, capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(AirlineError::InvalidCapacity(name.to_string()));
        }
        Ok(Aircraft {
            name: Arc::from(name),
            capacity,
        })
    }
}
