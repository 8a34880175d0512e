use crate::aircraft::{Aircraft, AircraftName};
use crate::airline::Airline;
use crate::airport::{Airport, AirportCode};
use crate::client::{Client, ClientKind};
use crate::error::{AirlineError, Result};
use crate::flight::FlightKey;
use crate::route::RouteCode;
use crate::ticket::{Ticket, TicketLedger};
use crate::time::{ClockTime, FlightDate};
use log::info;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageFormat {
    Json,
    /// Reserved, not implemented yet.
    Plain,
}

impl FromStr for StorageFormat {
    type Err = AirlineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(StorageFormat::Json),
            "plain" | "txt" => Ok(StorageFormat::Plain),
            other => Err(AirlineError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for StorageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageFormat::Json => write!(f, "json"),
            StorageFormat::Plain => write!(f, "plain"),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RouteRecord {
    code: RouteCode,
    origin: AirportCode,
    destination: AirportCode,
    departure_time: ClockTime,
    arrival_time: ClockTime,
}

#[derive(Serialize, Deserialize)]
struct FlightRecord {
    route: RouteCode,
    date: FlightDate,
    aircraft: AircraftName,
}

#[derive(Default, Serialize, Deserialize)]
#[serde(default)]
struct Snapshot {
    airports: Vec<Airport>,
    aircraft: Vec<Aircraft>,
    routes: Vec<RouteRecord>,
    clients: Vec<ClientKind>,
    flights: Vec<FlightRecord>,
    tickets: Vec<Ticket>,
}

fn inconsistent(err: AirlineError) -> AirlineError {
    match err {
        AirlineError::InconsistentData(_) => err,
        other => AirlineError::InconsistentData(other.to_string()),
    }
}

fn json_only(format: StorageFormat) -> Result<()> {
    match format {
        StorageFormat::Json => Ok(()),
        StorageFormat::Plain => Err(AirlineError::UnsupportedFormat(
            "plain text storage is not implemented".to_string(),
        )),
    }
}

impl Airline {
    pub fn load_from_file(path: impl AsRef<Path>, format: StorageFormat) -> Result<Self> {
        Self::load_from_file_with_ledger(path, format, TicketLedger::new())
    }

    /// Loads a saved airline into a fresh aggregate whose ledger is `ledger`.
    /// Every stored airport and ticket code is registered again, so new
    /// tickets never reuse a stored code.
    pub fn load_from_file_with_ledger(
        path: impl AsRef<Path>,
        format: StorageFormat,
        ledger: TicketLedger,
    ) -> Result<Self> {
        json_only(format)?;
        let data = std::fs::read_to_string(path.as_ref())?;
        let airline = Self::from_json(&data, ledger)?;
        info!(
            "loaded {} flights and {} tickets from {}",
            airline.flights.len(),
            airline.ledger.len(),
            path.as_ref().display()
        );
        Ok(airline)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>, format: StorageFormat) -> Result<()> {
        json_only(format)?;
        std::fs::write(path.as_ref(), self.to_json()?)?;
        info!(
            "saved {} flights and {} tickets to {}",
            self.flights.len(),
            self.ledger.len(),
            path.as_ref().display()
        );
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        let mut airports = self
            .airports
            .iter()
            .map(|a| Airport::clone(a))
            .collect::<Vec<_>>();
        airports.sort_by(|a, b| a.code.cmp(&b.code));

        let mut aircraft = self
            .aircraft
            .values()
            .map(|a| Aircraft::clone(a))
            .collect::<Vec<_>>();
        aircraft.sort_by(|a, b| a.name.cmp(&b.name));

        let mut routes = self
            .routes
            .values()
            .map(|r| RouteRecord {
                code: r.code.clone(),
                origin: r.origin.code.clone(),
                destination: r.destination.code.clone(),
                departure_time: r.departure_time,
                arrival_time: r.arrival_time,
            })
            .collect::<Vec<_>>();
        routes.sort_by(|a, b| a.code.cmp(&b.code));

        let mut clients = self
            .clients
            .values()
            .map(|c| c.kind().clone())
            .collect::<Vec<_>>();
        clients.sort_by(|a, b| a.id().cmp(b.id()));

        let snapshot = Snapshot {
            airports,
            aircraft,
            routes,
            clients,
            flights: self
                .flights
                .iter()
                .map(|f| FlightRecord {
                    route: f.route.code.clone(),
                    date: f.date,
                    aircraft: f.aircraft.name.clone(),
                })
                .collect(),
            tickets: self.ledger.iter().cloned().collect(),
        };
        Ok(serde_json::to_string_pretty(&snapshot)?)
    }

    /// Rebuilds an airline from a JSON snapshot. Records that break a
    /// catalog or capacity rule are reported as inconsistent data.
    pub fn from_json(data: &str, ledger: TicketLedger) -> Result<Self> {
        let raw: Snapshot = serde_json::from_str(data)?;
        let mut airline = Airline::with_ledger(ledger);

        for airport in raw.airports {
            airline
                .register_airport(&airport.code, &airport.name, airport.latitude, airport.longitude)
                .map_err(inconsistent)?;
        }

        for aircraft in raw.aircraft {
            let aircraft = Aircraft::new(&aircraft.name, aircraft.capacity).map_err(inconsistent)?;
            airline.add_aircraft(aircraft).map_err(inconsistent)?;
        }

        for route in raw.routes {
            airline
                .add_route(
                    &route.code,
                    &route.origin,
                    &route.destination,
                    route.departure_time,
                    route.arrival_time,
                )
                .map_err(inconsistent)?;
        }

        for kind in raw.clients {
            airline.add_client(Client::new(kind)).map_err(inconsistent)?;
        }

        for flight in raw.flights {
            airline
                .schedule_flight(flight.date, &flight.route, &flight.aircraft)
                .map_err(inconsistent)?;
        }

        for ticket in raw.tickets {
            airline.restore_ticket(ticket)?;
        }

        airline.assert_invariants();
        Ok(airline)
    }

    fn restore_ticket(&mut self, ticket: Ticket) -> Result<()> {
        let key: FlightKey = ticket.flight.clone();
        if self.flight(&key.route, key.date).is_none() {
            return Err(AirlineError::InconsistentData(format!(
                "ticket {} refers to unknown flight {}",
                ticket.code, key
            )));
        }
        if !self.has_client(&ticket.client) {
            return Err(AirlineError::InconsistentData(format!(
                "ticket {} refers to unknown client {}",
                ticket.code, ticket.client
            )));
        }

        let code = ticket.code;
        let client_id = ticket.client.clone();
        self.ledger.insert(ticket)?;
        if let Some(flight) = self.flight_mut(&key) {
            flight.attach_ticket(code)?;
        }
        if let Some(client) = self.clients.get_mut(&client_id) {
            client.add_ticket(code);
        }
        Ok(())
    }
}
