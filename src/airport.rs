use crate::error::{AirlineError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fmt::Formatter;
use std::sync::Arc;
use tabled::Tabled;

pub type AirportCode = Arc<str>;

const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Tabled)]
pub struct Airport {
    pub code: AirportCode,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl fmt::Display for Airport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)
    }
}

/// Approximate distance in kilometres.
///
/// Equirectangular projection around the mean latitude. Good enough for
/// nearby airports, increasingly wrong over long spans.
pub fn distance_km(a: &Airport, b: &Airport) -> u32 {
    let (lat_a, lon_a) = (a.latitude.to_radians(), a.longitude.to_radians());
    let (lat_b, lon_b) = (b.latitude.to_radians(), b.longitude.to_radians());

    let dx = (lon_b - lon_a) * ((lat_a + lat_b) / 2.0).cos();
    let dy = lat_b - lat_a;

    ((dx * dx + dy * dy).sqrt() * EARTH_RADIUS_KM).round() as u32
}

/// Live airports keyed by code. A code can only be registered once until it
/// is unregistered again.
#[derive(Default)]
pub struct AirportRegistry {
    airports: HashMap<AirportCode, Arc<Airport>>,
}

impl AirportRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        code: &str,
        name: &str,
        latitude: f64,
        longitude: f64,
    ) -> Result<Arc<Airport>> {
        if self.contains(code) {
            return Err(AirlineError::DuplicateAirportCode(Arc::from(code)));
        }
        let airport = Arc::new(Airport {
            code: Arc::from(code),
            name: name.to_string(),
            latitude,
            longitude,
        });
        self.airports.insert(airport.code.clone(), airport.clone());
        Ok(airport)
    }

    pub fn unregister(&mut self, code: &str) -> Option<Arc<Airport>> {
        self.airports.remove(code)
    }

    pub fn get(&self, code: &str) -> Option<&Arc<Airport>> {
        self.airports.get(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.airports.contains_key(code)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Airport>> {
        self.airports.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn airport(code: &str, latitude: f64, longitude: f64) -> Airport {
        Airport {
            code: Arc::from(code),
            name: code.to_string(),
            latitude,
            longitude,
        }
    }

    #[test]
    fn test_one_degree_on_equator() {
        let a = airport("AAA", 0.0, 0.0);
        let b = airport("BBB", 0.0, 1.0);
        assert_eq!(111, distance_km(&a, &b));
    }

    #[test]
    fn test_same_point() {
        let a = airport("BOG", 4.7016, -74.1469);
        assert_eq!(0, distance_km(&a, &a));
    }

    #[test]
    fn test_bogota_medellin() {
        let bog = airport("BOG", 4.7016, -74.1469);
        let mde = airport("MDE", 6.1645, -75.4231);
        assert_eq!(215, distance_km(&bog, &mde));
    }

    #[test]
    fn test_duplicate_code_rejected() {
        let mut registry = AirportRegistry::new();
        registry.register("BOG", "El Dorado", 4.7016, -74.1469).unwrap();
        let result = registry.register("BOG", "Other", 0.0, 0.0);
        assert!(matches!(result, Err(AirlineError::DuplicateAirportCode(code)) if &*code == "BOG"));
        assert_eq!("El Dorado", registry.get("BOG").unwrap().name);
    }

    #[test]
    fn test_code_reuse_after_unregister() {
        let mut registry = AirportRegistry::new();
        registry.register("BOG", "El Dorado", 4.7016, -74.1469).unwrap();
        assert!(registry.unregister("BOG").is_some());
        assert!(!registry.contains("BOG"));
        registry.register("BOG", "New El Dorado", 4.7, -74.1).unwrap();
        assert_eq!("New El Dorado", registry.get("BOG").unwrap().name);
    }

    #[test]
    fn test_registries_are_independent() {
        let mut first = AirportRegistry::new();
        let mut second = AirportRegistry::new();
        first.register("BOG", "El Dorado", 4.7016, -74.1469).unwrap();
        assert!(second.register("BOG", "El Dorado", 4.7016, -74.1469).is_ok());
    }

    proptest! {
        #[test]
        fn test_distance_is_symmetric(
            lat_a in -80.0..80.0f64,
            lon_a in -180.0..180.0f64,
            lat_b in -80.0..80.0f64,
            lon_b in -180.0..180.0f64,
        ) {
            let a = airport("AAA", lat_a, lon_a);
            let b = airport("BBB", lat_b, lon_b);
            prop_assert_eq!(distance_km(&a, &b), distance_km(&b, &a));
        }
    }
}
