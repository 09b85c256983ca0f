use serde::{Deserialize, Serialize};
use std::fmt;

/// One customer taking part in an allocation run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomerRecord {
    /// Opaque identifier, unique within a single run
    pub name: String,
    /// Share weight, not necessarily normalised across the customer set
    pub ratio: f64,
    /// Requested quantity; a hard ceiling on `allocated`
    pub demand: f64,
    /// Quantity assigned by the allocator
    #[serde(default)]
    pub allocated: f64,
}

impl CustomerRecord {
    /// Creates a record with nothing allocated yet.
    pub fn new(name: impl Into<String>, ratio: f64, demand: f64) -> Self {
        Self { name: name.into(), ratio, demand, allocated: 0.0 }
    }

    /// Demand not yet covered by the current allocation.
    pub fn remaining(&self) -> f64 {
        self.demand - self.allocated
    }

    /// Whether the customer can still absorb stock.
    pub fn has_unmet_demand(&self) -> bool {
        self.remaining() > 0.0
    }
}

/// How fractional allocations become whole units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Ties go to the nearest even integer (2.5 -> 2, 3.5 -> 4)
    #[default]
    HalfEven,
    /// Ties go away from zero (2.5 -> 3)
    HalfUp,
}

impl RoundingMode {
    /// Rounds a single value according to this mode.
    pub fn apply(self, value: f64) -> f64 {
        match self {
            RoundingMode::HalfEven => value.round_ties_even(),
            RoundingMode::HalfUp => value.round(),
        }
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundingMode::HalfEven => write!(f, "half_even"),
            RoundingMode::HalfUp => write!(f, "half_up"),
        }
    }
}

/// Totals reported alongside the per-customer results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AllocationSummary {
    /// Incoming stock before the discretion split
    pub total_stock: u64,
    /// Stock held back for manual allocation
    pub discretion_stock: u64,
    /// Stock handed to the allocator
    pub logic_stock: u64,
    /// Sum of all customer demand
    pub total_demand: f64,
    /// Sum of the rounded allocations
    pub total_allocated: f64,
    /// Logic stock the allocator did not place; negative when rounding drifted upwards
    pub logic_unallocated: f64,
    /// Discretion stock plus unplaced logic stock
    pub not_allocated_total: f64,
}
