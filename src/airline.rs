use crate::aircraft::{Aircraft, AircraftName};
use crate::airport::{Airport, AirportCode, AirportRegistry};
use crate::client::{Client, ClientId};
use crate::error::{AirlineError, Result};
use crate::fare::{FareQuote, Season};
use crate::flight::{Flight, FlightKey};
use crate::route::{Route, RouteCode};
use crate::ticket::{Ticket, TicketLedger};
use crate::time::{ClockTime, FlightDate};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::sync::Arc;

#[cfg(test)]
mod tests;

/// Catalogs, scheduled flights, clients and the ticket ledger of one airline.
pub struct Airline {
    pub(crate) airports: AirportRegistry,
    pub(crate) aircraft: HashMap<AircraftName, Arc<Aircraft>>,
    pub(crate) routes: HashMap<RouteCode, Arc<Route>>,
    pub(crate) flights: Vec<Flight>,
    flights_index: HashMap<FlightKey, usize>,
    pub(crate) clients: HashMap<ClientId, Client>,
    pub(crate) ledger: TicketLedger,
}

impl Default for Airline {
    fn default() -> Self {
        Self::with_ledger(TicketLedger::new())
    }
}

impl Airline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ledger(ledger: TicketLedger) -> Self {
        Airline {
            airports: AirportRegistry::new(),
            aircraft: HashMap::new(),
            routes: HashMap::new(),
            flights: vec![],
            flights_index: HashMap::new(),
            clients: HashMap::new(),
            ledger,
        }
    }

    pub fn register_airport(
        &mut self,
        code: &str,
        name: &str,
        latitude: f64,
        longitude: f64,
    ) -> Result<Arc<Airport>> {
        self.airports.register(code, name, latitude, longitude)
    }

    pub fn remove_airport(&mut self, code: &str) -> Result<Arc<Airport>> {
        if let Some(route) = self
            .routes
            .values()
            .find(|r| &*r.origin.code == code || &*r.destination.code == code)
        {
            return Err(AirlineError::AirportInUse(
                Arc::from(code),
                route.code.to_string(),
            ));
        }
        self.airports
            .unregister(code)
            .ok_or_else(|| AirlineError::AirportNotFound(Arc::from(code)))
    }

    pub fn airport(&self, code: &str) -> Option<&Arc<Airport>> {
        self.airports.get(code)
    }

    pub fn airports(&self) -> impl Iterator<Item = &Arc<Airport>> {
        self.airports.iter()
    }

    /// Fails if an aircraft with the same name exists.
    pub fn add_aircraft(&mut self, aircraft: Aircraft) -> Result<Arc<Aircraft>> {
        if self.aircraft.contains_key(&aircraft.name) {
            return Err(AirlineError::DuplicateAircraft(aircraft.name.to_string()));
        }
        let aircraft = Arc::new(aircraft);
        self.aircraft.insert(aircraft.name.clone(), aircraft.clone());
        Ok(aircraft)
    }

    pub fn aircraft(&self) -> impl Iterator<Item = &Arc<Aircraft>> {
        self.aircraft.values()
    }

    /// Adds a route with a new code. Both airports must be registered.
    pub fn add_route(
        &mut self,
        code: &str,
        origin: &str,
        destination: &str,
        departure_time: ClockTime,
        arrival_time: ClockTime,
    ) -> Result<Arc<Route>> {
        if self.routes.contains_key(code) {
            return Err(AirlineError::DuplicateRoute(code.to_string()));
        }
        let lookup = |code: &str| {
            self.airports
                .get(code)
                .cloned()
                .ok_or_else(|| AirlineError::AirportNotFound(AirportCode::from(code)))
        };
        let route = Arc::new(Route {
            code: Arc::from(code),
            origin: lookup(origin)?,
            destination: lookup(destination)?,
            departure_time,
            arrival_time,
        });
        self.routes.insert(route.code.clone(), route.clone());
        Ok(route)
    }

    pub fn route(&self, code: &str) -> Option<&Arc<Route>> {
        self.routes.get(code)
    }

    pub fn routes(&self) -> impl Iterator<Item = &Arc<Route>> {
        self.routes.values()
    }

    pub fn add_client(&mut self, client: Client) -> Result<()> {
        if self.clients.contains_key(client.id()) {
            return Err(AirlineError::DuplicateClient(client.id().to_string()));
        }
        self.clients.insert(client.id().clone(), client);
        Ok(())
    }

    pub fn has_client(&self, id: &str) -> bool {
        self.clients.contains_key(id)
    }

    pub fn client(&self, id: &str) -> Option<&Client> {
        self.clients.get(id)
    }

    pub fn clients(&self) -> impl Iterator<Item = &Client> {
        self.clients.values()
    }

    pub fn flight(&self, route_code: &str, date: FlightDate) -> Option<&Flight> {
        self.flight_index(route_code, date).map(|i| &self.flights[i])
    }

    pub fn flights(&self) -> &[Flight] {
        &self.flights
    }

    /// Every ticket sold, flight by flight.
    pub fn tickets(&self) -> impl Iterator<Item = &Ticket> {
        self.flights
            .iter()
            .flat_map(|f| f.tickets().iter())
            .filter_map(|code| self.ledger.get(code))
    }

    pub fn ledger(&self) -> &TicketLedger {
        &self.ledger
    }

    fn flight_index(&self, route_code: &str, date: FlightDate) -> Option<usize> {
        self.flights_index
            .get(&FlightKey::new(Arc::from(route_code), date))
            .copied()
    }

    pub(crate) fn flight_mut(&mut self, key: &FlightKey) -> Option<&mut Flight> {
        self.flights_index
            .get(key)
            .copied()
            .map(|i| &mut self.flights[i])
    }

    fn push_flight(&mut self, flight: Flight) {
        self.flights_index.insert(flight.key(), self.flights.len());
        self.flights.push(flight);
    }

    /// Schedules `aircraft_name` to fly `route_code` on `date`.
    ///
    /// An aircraft flies at most one flight per date. Whether it is at the
    /// route's origin is not checked.
    pub fn schedule_flight(
        &mut self,
        date: FlightDate,
        route_code: &str,
        aircraft_name: &str,
    ) -> Result<&Flight> {
        let aircraft = self
            .aircraft
            .get(aircraft_name)
            .cloned()
            .ok_or_else(|| AirlineError::AircraftNotFound(aircraft_name.to_string()))?;
        let route = self
            .routes
            .get(route_code)
            .cloned()
            .ok_or_else(|| AirlineError::RouteNotFound(route_code.to_string()))?;

        if self
            .flights
            .iter()
            .any(|f| f.date == date && f.aircraft.name == aircraft.name)
        {
            return Err(AirlineError::AircraftUnavailable {
                aircraft: aircraft_name.to_string(),
                date: date.to_string(),
            });
        }

        let flight = Flight::new(route, date, aircraft);
        if self.flights_index.contains_key(&flight.key()) {
            return Err(AirlineError::DuplicateFlight(flight.key()));
        }

        info!("scheduled flight {} with {}", flight.key(), aircraft_name);
        self.push_flight(flight);
        Ok(&self.flights[self.flights.len() - 1])
    }

    /// Per-ticket fare `client_id` would pay on the flight.
    pub fn quote(&self, client_id: &str, date: FlightDate, route_code: &str) -> Result<FareQuote> {
        let client = self
            .clients
            .get(client_id)
            .ok_or_else(|| AirlineError::ClientNotFound(client_id.to_string()))?;
        let flight = self
            .flight(route_code, date)
            .ok_or_else(|| AirlineError::FlightNotFound(Self::key(route_code, date)))?;
        let quote = Season::for_date(&flight.date).quote(flight.route.distance_km(), client.kind());
        debug!("quoted {:?} for {} on {}", quote, client_id, flight.key());
        Ok(quote)
    }

    /// Sells `quantity` tickets and returns the total charged.
    pub fn sell_tickets(
        &mut self,
        client_id: &str,
        date: FlightDate,
        route_code: &str,
        quantity: usize,
    ) -> Result<u64> {
        let client = self
            .clients
            .get_mut(client_id)
            .ok_or_else(|| AirlineError::ClientNotFound(client_id.to_string()))?;
        let idx = self
            .flights_index
            .get(&Self::key(route_code, date))
            .copied()
            .ok_or_else(|| AirlineError::FlightNotFound(Self::key(route_code, date)))?;
        let flight = &mut self.flights[idx];

        let season = Season::for_date(&flight.date);
        let total = flight.sell(client, &season, &mut self.ledger, quantity)?;
        info!(
            "sold {} tickets on {} to {} for {} ({} season)",
            quantity,
            flight.key(),
            client_id,
            total,
            season
        );
        self.assert_invariants();
        Ok(total)
    }

    /// Marks every ticket of the flight as used and returns how many were not
    /// used before. An unknown flight is logged and otherwise ignored.
    pub fn complete_flight(&mut self, date: FlightDate, route_code: &str) -> usize {
        let Some(idx) = self.flight_index(route_code, date) else {
            warn!("flight {} not found, nothing to complete", Self::key(route_code, date));
            return 0;
        };
        let flight = &self.flights[idx];
        let marked = flight
            .tickets()
            .iter()
            .filter(|code| self.ledger.mark_used(code))
            .count();
        info!("completed flight {}, {} tickets used", flight.key(), marked);
        self.assert_invariants();
        marked
    }

    /// Marks only `client_id`'s tickets on the flight as used.
    pub fn use_client_tickets(
        &mut self,
        client_id: &str,
        date: FlightDate,
        route_code: &str,
    ) -> Result<usize> {
        let client = self
            .clients
            .get(client_id)
            .ok_or_else(|| AirlineError::ClientNotFound(client_id.to_string()))?;
        let key = Self::key(route_code, date);
        if !self.flights_index.contains_key(&key) {
            return Err(AirlineError::FlightNotFound(key));
        }
        Ok(client.mark_used_for_flight(&key, &mut self.ledger))
    }

    pub fn pending_balance(&self, client_id: &str) -> Result<u64> {
        self.clients
            .get(client_id)
            .map(|c| c.pending_balance(&self.ledger))
            .ok_or_else(|| AirlineError::ClientNotFound(client_id.to_string()))
    }

    pub fn total_spent(&self, client_id: &str) -> Result<u64> {
        self.clients
            .get(client_id)
            .map(|c| c.total_spent(&self.ledger))
            .ok_or_else(|| AirlineError::ClientNotFound(client_id.to_string()))
    }

    fn key(route_code: &str, date: FlightDate) -> FlightKey {
        FlightKey::new(Arc::from(route_code), date)
    }

    pub(crate) fn assert_invariants(&self) {
        debug_assert!(
            self.flights.iter().all(|f| f.ticket_count() <= f.capacity()),
            "Ticket count <-> capacity invariant violated"
        );
        debug_assert!(
            self.flights.iter().all(|f| f
                .tickets()
                .iter()
                .all(|code| self.ledger.get(code).is_some_and(|t| t.flight == f.key()))),
            "Flight tickets <-> ledger invariant violated"
        );
        debug_assert!(
            self.clients.values().all(|c| c
                .ticket_codes()
                .iter()
                .all(|code| self.ledger.get(code).is_some_and(|t| t.client == *c.id()))),
            "Client tickets <-> ledger invariant violated"
        );
    }
}
