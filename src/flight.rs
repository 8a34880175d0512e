use crate::aircraft::Aircraft;
use crate::client::Client;
use crate::error::{AirlineError, Result};
use crate::fare::FareCalculator;
use crate::route::{Route, RouteCode};
use crate::ticket::{TicketCode, TicketLedger};
use crate::time::FlightDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Flights are looked up by route and date.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FlightKey {
    pub route: RouteCode,
    pub date: FlightDate,
}

impl FlightKey {
    pub fn new(route: RouteCode, date: FlightDate) -> Self {
        FlightKey { route, date }
    }
}

impl fmt::Display for FlightKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on {}", self.route, self.date)
    }
}

#[derive(Debug, Clone)]
pub struct Flight {
    pub route: Arc<Route>,
    pub date: FlightDate,
    pub aircraft: Arc<Aircraft>,
    tickets: Vec<TicketCode>,
}

impl PartialEq for Flight {
    fn eq(&self, other: &Self) -> bool {
        self.route.code == other.route.code
            && self.date == other.date
            && self.aircraft == other.aircraft
    }
}

impl Flight {
    pub fn new(route: Arc<Route>, date: FlightDate, aircraft: Arc<Aircraft>) -> Self {
        Flight {
            route,
            date,
            aircraft,
            tickets: vec![],
        }
    }

    pub fn key(&self) -> FlightKey {
        FlightKey::new(self.route.code.clone(), self.date)
    }

    pub fn tickets(&self) -> &[TicketCode] {
        &self.tickets
    }

    pub fn ticket_count(&self) -> usize {
        self.tickets.len()
    }

    pub fn capacity(&self) -> usize {
        self.aircraft.capacity
    }

    pub fn available_seats(&self) -> usize {
        self.capacity().saturating_sub(self.tickets.len())
    }

    /// Attaches an already existing ticket, e.g. one read back from storage.
    pub(crate) fn attach_ticket(&mut self, code: TicketCode) -> Result<()> {
        if self.available_seats() == 0 {
            return Err(AirlineError::InconsistentData(format!(
                "flight {} holds more tickets than its {} seats",
                self.key(),
                self.capacity()
            )));
        }
        self.tickets.push(code);
        Ok(())
    }

    /// Sells `quantity` tickets to `client` and returns the sum of their fares.
    ///
    /// Seats are checked once for the whole batch, so either every ticket is
    /// issued or none is.
    pub fn sell<F: FareCalculator>(
        &mut self,
        client: &mut Client,
        fares: &F,
        ledger: &mut TicketLedger,
        quantity: usize,
    ) -> Result<u64> {
        let available = self.available_seats();
        if quantity > available {
            return Err(AirlineError::Overbooked {
                flight: self.key(),
                requested: quantity,
                available,
            });
        }
        if ledger.remaining_codes() < quantity {
            return Err(AirlineError::TicketCodesExhausted);
        }

        let key = self.key();
        let mut total = 0;
        for _ in 0..quantity {
            let fare = fares.fare(&self.route, client.kind());
            let code = ledger.issue(key.clone(), client.id().clone(), fare)?;
            self.tickets.push(code);
            client.add_ticket(code);
            total += fare;
        }
        Ok(total)
    }
}
