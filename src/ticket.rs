use crate::client::ClientId;
use crate::error::{AirlineError, Result};
use crate::flight::FlightKey;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

const CODE_SPACE: u32 = 10_000_000;

/// Seven decimal digits, zero padded when displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TicketCode(u32);

impl fmt::Display for TicketCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:07}", self.0)
    }
}

impl FromStr for TicketCode {
    type Err = AirlineError;

    fn from_str(s: &str) -> Result<Self> {
        if s.len() != 7 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AirlineError::InconsistentData(format!(
                "ticket code {s} is not 7 digits"
            )));
        }
        s.parse::<u32>()
            .map(TicketCode)
            .map_err(|e| AirlineError::InconsistentData(e.to_string()))
    }
}

impl TryFrom<String> for TicketCode {
    type Error = AirlineError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<TicketCode> for String {
    fn from(value: TicketCode) -> Self {
        value.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub code: TicketCode,
    pub flight: FlightKey,
    pub client: ClientId,
    pub fare: u64,
    #[serde(default)]
    used: bool,
}

impl Ticket {
    pub fn new(code: TicketCode, flight: FlightKey, client: ClientId, fare: u64) -> Self {
        Ticket {
            code,
            flight,
            client,
            fare,
            used: false,
        }
    }

    pub fn is_used(&self) -> bool {
        self.used
    }

    /// Returns true if the ticket was unused before this call.
    pub fn mark_used(&mut self) -> bool {
        !std::mem::replace(&mut self.used, true)
    }
}

/// Owns every ticket and the set of codes that can no longer be issued.
pub struct TicketLedger {
    codes: HashSet<TicketCode>,
    tickets: BTreeMap<TicketCode, Ticket>,
    rng: StdRng,
    space: u32,
}

impl Default for TicketLedger {
    fn default() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl TicketLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        TicketLedger {
            codes: HashSet::new(),
            tickets: BTreeMap::new(),
            rng,
            space: CODE_SPACE,
        }
    }

    /// Draws codes from `0..space` only, so tests can run out of codes.
    #[cfg(test)]
    pub(crate) fn with_code_space(seed: u64, space: u32) -> Self {
        TicketLedger {
            space: space.min(CODE_SPACE),
            ..Self::with_seed(seed)
        }
    }

    /// Draws a fresh code and reserves it.
    pub fn issue_code(&mut self) -> Result<TicketCode> {
        if self.remaining_codes() == 0 {
            return Err(AirlineError::TicketCodesExhausted);
        }
        loop {
            let code = TicketCode(self.rng.gen_range(0..self.space));
            if self.codes.insert(code) {
                return Ok(code);
            }
            debug!("ticket code {} collided, drawing again", code);
        }
    }

    /// Reserves a code issued elsewhere. Returns false if it was already known.
    pub fn register(&mut self, code: TicketCode) -> bool {
        self.codes.insert(code)
    }

    pub fn is_known(&self, code: &TicketCode) -> bool {
        self.codes.contains(code)
    }

    pub fn remaining_codes(&self) -> usize {
        (self.space as usize).saturating_sub(self.codes.len())
    }

    pub fn issue(&mut self, flight: FlightKey, client: ClientId, fare: u64) -> Result<TicketCode> {
        let code = self.issue_code()?;
        self.tickets.insert(code, Ticket::new(code, flight, client, fare));
        Ok(code)
    }

    /// Stores a ticket created outside the ledger, e.g. when reloading.
    pub fn insert(&mut self, ticket: Ticket) -> Result<()> {
        if self.tickets.contains_key(&ticket.code) {
            return Err(AirlineError::InconsistentData(format!(
                "duplicate ticket code {}",
                ticket.code
            )));
        }
        self.codes.insert(ticket.code);
        self.tickets.insert(ticket.code, ticket);
        Ok(())
    }

    pub fn get(&self, code: &TicketCode) -> Option<&Ticket> {
        self.tickets.get(code)
    }

    pub fn mark_used(&mut self, code: &TicketCode) -> bool {
        self.tickets
            .get_mut(code)
            .map(Ticket::mark_used)
            .unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ticket> {
        self.tickets.values()
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }
}
