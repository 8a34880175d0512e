use crate::client::{ClientKind, CompanySize};
use crate::route::Route;
use crate::time::FlightDate;
use std::fmt;

const TAX_PERCENT: u64 = 28;
const HIGH_SEASON_RATE: u64 = 1000;
const LOW_SEASON_CORPORATE_RATE: u64 = 900;
const LOW_SEASON_INDIVIDUAL_RATE: u64 = 600;

/// Prices one ticket for a client on a route. Called once per ticket sold.
pub trait FareCalculator {
    fn fare(&self, route: &Route, client: &ClientKind) -> u64;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Season {
    /// January to May, September to November.
    Low,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FareQuote {
    pub distance_km: u32,
    pub base: u64,
    pub discount_percent: u64,
    pub tax: u64,
    pub total: u64,
}

// half-up rounding of amount * percent / 100
fn percent_of(amount: u64, percent: u64) -> u64 {
    (amount * percent + 50) / 100
}

impl Season {
    pub fn for_month(month: u32) -> Season {
        match month {
            1..=5 | 9..=11 => Season::Low,
            _ => Season::High,
        }
    }

    pub fn for_date(date: &FlightDate) -> Season {
        Self::for_month(date.month())
    }

    fn rate_per_km(&self, client: &ClientKind) -> u64 {
        match (self, client) {
            (Season::High, _) => HIGH_SEASON_RATE,
            (Season::Low, ClientKind::Corporate { .. }) => LOW_SEASON_CORPORATE_RATE,
            (Season::Low, ClientKind::Individual { .. }) => LOW_SEASON_INDIVIDUAL_RATE,
        }
    }

    fn discount_percent(&self, client: &ClientKind) -> u64 {
        match (self, client) {
            (Season::High, _) => 0,
            (Season::Low, ClientKind::Individual { .. }) => 0,
            (Season::Low, ClientKind::Corporate { size_tier, .. }) => match size_tier {
                CompanySize::Small => 2,
                CompanySize::Medium => 10,
                CompanySize::Large => 20,
            },
        }
    }

    /// Tax is levied on the base before the discount; the discount only
    /// reduces the principal.
    pub fn quote(&self, distance_km: u32, client: &ClientKind) -> FareQuote {
        let base = u64::from(distance_km) * self.rate_per_km(client);
        let discount_percent = self.discount_percent(client);
        let tax = percent_of(base, TAX_PERCENT);
        let total = percent_of(base, 100 - discount_percent) + tax;
        FareQuote {
            distance_km,
            base,
            discount_percent,
            tax,
            total,
        }
    }
}

impl FareCalculator for Season {
    fn fare(&self, route: &Route, client: &ClientKind) -> u64 {
        self.quote(route.distance_km(), client).total
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Season::Low => write!(f, "low"),
            Season::High => write!(f, "high"),
        }
    }
}
