//! Per-record statistics shown on detail cards (orders, revenue)
//!
//! There is no analytics backend yet, so the production provider makes
//! numbers up. Tests use [`FixedStatistics`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::cell::RefCell;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub orders_today: u32,
    pub orders_this_month: u32,
    /// Revenue this month, in tenge
    pub revenue_this_month: u64,
}

impl Stats {
    /// Revenue per order this month, 0 when there were none
    pub fn average_check(&self) -> u64 {
        if self.orders_this_month == 0 {
            0
        } else {
            self.revenue_this_month / self.orders_this_month as u64
        }
    }
}

pub trait StatisticsProvider {
    fn stats_for(&self, id: u64) -> Stats;
}

/// Mock numbers in a plausible range for a single reception point
#[derive(Debug)]
pub struct RandomStatistics {
    rng: RefCell<StdRng>,
}

impl RandomStatistics {
    pub fn new() -> Self {
        Self {
            rng: RefCell::new(StdRng::from_os_rng()),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: RefCell::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomStatistics {
    fn default() -> Self {
        Self::new()
    }
}

impl StatisticsProvider for RandomStatistics {
    fn stats_for(&self, _id: u64) -> Stats {
        let mut rng = self.rng.borrow_mut();
        let orders_today = rng.random_range(0..40);
        let orders_this_month = orders_today + rng.random_range(100..900);
        let revenue_this_month = orders_this_month as u64 * rng.random_range(2_500..9_000);
        Stats {
            orders_today,
            orders_this_month,
            revenue_this_month,
        }
    }
}

/// Deterministic provider: fixed stats per id, zeros otherwise
#[derive(Debug, Default, Clone)]
pub struct FixedStatistics {
    stats: HashMap<u64, Stats>,
}

impl FixedStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, id: u64, stats: Stats) -> Self {
        self.stats.insert(id, stats);
        self
    }
}

impl StatisticsProvider for FixedStatistics {
    fn stats_for(&self, id: u64) -> Stats {
        self.stats.get(&id).copied().unwrap_or_default()
    }
}
