use crate::flight::FlightKey;
use crate::ticket::{Ticket, TicketCode, TicketLedger};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

pub type ClientId = Arc<str>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompanySize {
    Small,
    Medium,
    Large,
}

impl fmt::Display for CompanySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompanySize::Small => write!(f, "small"),
            CompanySize::Medium => write!(f, "medium"),
            CompanySize::Large => write!(f, "large"),
        }
    }
}

impl std::str::FromStr for CompanySize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "small" | "s" => Ok(CompanySize::Small),
            "medium" | "m" => Ok(CompanySize::Medium),
            "large" | "l" => Ok(CompanySize::Large),
            other => Err(format!("unknown company size: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientKind {
    Individual {
        name: ClientId,
    },
    #[serde(rename_all = "camelCase")]
    Corporate {
        company_name: ClientId,
        size_tier: CompanySize,
    },
}

impl ClientKind {
    pub fn id(&self) -> &ClientId {
        match self {
            ClientKind::Individual { name } => name,
            ClientKind::Corporate { company_name, .. } => company_name,
        }
    }

    pub fn category(&self) -> &'static str {
        match self {
            ClientKind::Individual { .. } => "Individual",
            ClientKind::Corporate { .. } => "Corporate",
        }
    }
}

/// A client and the codes of the tickets it bought. The tickets themselves
/// live in the [`TicketLedger`].
#[derive(Debug, Clone, PartialEq)]
pub struct Client {
    kind: ClientKind,
    tickets: Vec<TicketCode>,
}

impl Client {
    pub fn individual(name: &str) -> Self {
        Self::new(ClientKind::Individual {
            name: Arc::from(name),
        })
    }

    pub fn corporate(company_name: &str, size_tier: CompanySize) -> Self {
        Self::new(ClientKind::Corporate {
            company_name: Arc::from(company_name),
            size_tier,
        })
    }

    pub fn new(kind: ClientKind) -> Self {
        Client {
            kind,
            tickets: vec![],
        }
    }

    pub fn id(&self) -> &ClientId {
        self.kind.id()
    }

    pub fn kind(&self) -> &ClientKind {
        &self.kind
    }

    pub fn ticket_codes(&self) -> &[TicketCode] {
        &self.tickets
    }

    pub(crate) fn add_ticket(&mut self, code: TicketCode) {
        self.tickets.push(code);
    }

    pub fn tickets<'a>(&'a self, ledger: &'a TicketLedger) -> impl Iterator<Item = &'a Ticket> {
        self.tickets.iter().filter_map(|code| ledger.get(code))
    }

    /// Sum of fares of tickets not flown yet.
    pub fn pending_balance(&self, ledger: &TicketLedger) -> u64 {
        self.tickets(ledger)
            .filter(|t| !t.is_used())
            .map(|t| t.fare)
            .sum()
    }

    pub fn total_spent(&self, ledger: &TicketLedger) -> u64 {
        self.tickets(ledger).map(|t| t.fare).sum()
    }

    /// Marks this client's tickets for `flight` as used, returning how many
    /// changed state.
    pub fn mark_used_for_flight(&self, flight: &FlightKey, ledger: &mut TicketLedger) -> usize {
        let codes = self
            .tickets
            .iter()
            .filter(|code| ledger.get(code).is_some_and(|t| t.flight == *flight))
            .copied()
            .collect::<Vec<_>>();
        codes.iter().filter(|code| ledger.mark_used(code)).count()
    }
}
