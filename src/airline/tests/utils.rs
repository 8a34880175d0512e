use crate::aircraft::Aircraft;
use crate::airline::Airline;
use crate::client::{Client, CompanySize};
use crate::ticket::TicketLedger;
use crate::time::FlightDate;

pub fn date(s: &str) -> FlightDate {
    s.parse().unwrap()
}

pub fn add_airport(airline: &mut Airline, code: &str, latitude: f64, longitude: f64) {
    airline
        .register_airport(code, code, latitude, longitude)
        .unwrap();
}

pub fn add_aircraft(airline: &mut Airline, name: &str, capacity: usize) {
    airline
        .add_aircraft(Aircraft::new(name, capacity).unwrap())
        .unwrap();
}

pub fn add_route(airline: &mut Airline, code: &str, origin: &str, destination: &str) {
    airline
        .add_route(
            code,
            origin,
            destination,
            "800".parse().unwrap(),
            "1030".parse().unwrap(),
        )
        .unwrap();
}

pub fn add_individual(airline: &mut Airline, name: &str) {
    airline.add_client(Client::individual(name)).unwrap();
}

pub fn add_corporate(airline: &mut Airline, name: &str, size: CompanySize) {
    airline.add_client(Client::corporate(name, size)).unwrap();
}

/// Two airports exactly 500 km apart along the equator, route `R500`
/// between them, and aircraft `PLANE_1` (3 seats) and `PLANE_2` (10 seats).
pub fn airline() -> Airline {
    let mut airline = Airline::with_ledger(TicketLedger::with_seed(42));
    // 500 km / (6371 km * pi / 180) degrees of longitude
    add_airport(&mut airline, "AAA", 0.0, 0.0);
    add_airport(&mut airline, "BBB", 0.0, 4.4966);
    add_airport(&mut airline, "CCC", 0.0, 1.0);
    add_route(&mut airline, "R500", "AAA", "BBB");
    add_route(&mut airline, "R111", "AAA", "CCC");
    add_aircraft(&mut airline, "PLANE_1", 3);
    add_aircraft(&mut airline, "PLANE_2", 10);
    add_individual(&mut airline, "ana");
    add_corporate(&mut airline, "ACME", CompanySize::Small);
    airline
}
