//! Proportional stock allocation.
//!
//! A run has three phases:
//!
//! 1. **Initial pass**: every customer receives `ratio * stock`, capped at its demand.
//! 2. **Redistribution**: stock left over because of caps is shared among the
//!    customers that still have unmet demand, with their ratios re-normalised
//!    over that group. Rounds repeat until the leftover is exhausted, nobody can
//!    absorb more, or the round cap is reached.
//! 3. **Rounding**: each allocation is turned into whole units exactly once.

use haibun_types::CustomerRecord;
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info, instrument, warn};

use crate::config::AllocatorConfig;
use crate::error::{AllocationError, AllocationResult};
use crate::rounding::{reconcile_allocations, round_allocations};

/// Why the redistribution loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// Leftover fell to the epsilon or below
    Exhausted,
    /// Every customer reached its demand
    Saturated,
    /// Customers with unmet demand all carry a zero ratio
    ZeroWeight,
    /// A round placed nothing
    Stalled,
    /// The round cap was hit before any other condition
    RoundLimit,
}

/// Result of an allocation run; the allocations themselves live in the records.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AllocationOutcome {
    /// Stock that could not be placed, measured before rounding
    pub unallocated: f64,
    /// Redistribution rounds executed after the initial pass
    pub rounds: usize,
    pub termination: Termination,
}

/// Distributes stock across customers in proportion to their ratios.
#[derive(Debug, Clone, Default)]
pub struct Allocator {
    config: AllocatorConfig,
}

impl Allocator {
    pub fn new(config: AllocatorConfig) -> AllocationResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AllocatorConfig {
        &self.config
    }

    /// Allocates `stock` and rounds the result to whole units.
    ///
    /// Inputs are validated before any record is touched, so an `Err` leaves
    /// `customers` exactly as it was passed in.
    pub fn allocate(
        &self,
        customers: &mut [CustomerRecord],
        stock: f64,
    ) -> AllocationResult<AllocationOutcome> {
        let outcome = self.distribute(customers, stock)?;

        if self.config.reconcile {
            reconcile_allocations(customers, self.config.rounding);
        } else {
            round_allocations(customers, self.config.rounding);
        }

        info!(
            customers = customers.len(),
            stock,
            allocated = customers.iter().map(|c| c.allocated).sum::<f64>(),
            unallocated = outcome.unallocated,
            rounds = outcome.rounds,
            termination = ?outcome.termination,
            "Allocation completed"
        );
        Ok(outcome)
    }

    /// Runs the initial pass and the redistribution rounds without rounding.
    #[instrument(level = "debug", skip_all, fields(customers = customers.len(), stock = stock))]
    pub fn distribute(
        &self,
        customers: &mut [CustomerRecord],
        stock: f64,
    ) -> AllocationResult<AllocationOutcome> {
        validate_inputs(customers, stock)?;

        let mut leftover = initial_pass(customers, stock);
        debug!(leftover, "Initial pass completed");

        let epsilon = self.config.epsilon;
        let limit = self.config.round_limit(customers.len());
        let mut rounds = 0;

        let termination = loop {
            if leftover <= epsilon {
                break Termination::Exhausted;
            }
            if !customers.iter().any(CustomerRecord::has_unmet_demand) {
                break Termination::Saturated;
            }

            let ratio_sum: f64 =
                customers.iter().filter(|c| c.has_unmet_demand()).map(|c| c.ratio).sum();
            if ratio_sum <= 0.0 {
                break Termination::ZeroWeight;
            }
            if rounds >= limit {
                warn!(rounds, leftover, "Redistribution hit the round limit");
                break Termination::RoundLimit;
            }

            rounds += 1;
            let placed = redistribute_round(customers, leftover, ratio_sum);
            leftover = (leftover - placed).max(0.0);
            debug!(round = rounds, placed, leftover, "Redistribution round");

            if placed <= 0.0 {
                break Termination::Stalled;
            }
        };

        debug_assert!(customers.iter().all(|c| c.allocated >= 0.0 && c.allocated <= c.demand));

        Ok(AllocationOutcome { unallocated: leftover, rounds, termination })
    }
}

/// Allocates with the default configuration.
pub fn allocate(customers: &mut [CustomerRecord], stock: f64) -> AllocationResult<AllocationOutcome> {
    Allocator::default().allocate(customers, stock)
}

fn validate_inputs(customers: &[CustomerRecord], stock: f64) -> AllocationResult<()> {
    if !stock.is_finite() || stock < 0.0 {
        return Err(AllocationError::invalid_argument(
            "stock",
            format!("stock must be a non-negative finite number, got {stock}"),
        ));
    }

    let mut seen = HashSet::with_capacity(customers.len());
    for customer in customers {
        if !customer.ratio.is_finite() || customer.ratio < 0.0 {
            return Err(AllocationError::invalid_customer(
                &customer.name,
                "ratio",
                format!(
                    "ratio for '{}' must be a non-negative finite number, got {}",
                    customer.name, customer.ratio
                ),
            ));
        }
        if !customer.demand.is_finite() || customer.demand < 0.0 {
            return Err(AllocationError::invalid_customer(
                &customer.name,
                "demand",
                format!(
                    "demand for '{}' must be a non-negative finite number, got {}",
                    customer.name, customer.demand
                ),
            ));
        }
        if !seen.insert(customer.name.as_str()) {
            return Err(AllocationError::invalid_customer(
                &customer.name,
                "name",
                format!("customer '{}' appears more than once", customer.name),
            ));
        }
    }
    Ok(())
}

/// Caps `ratio * stock` at demand and returns the stock left over.
///
/// Ratios summing above one are scaled down for this pass so it never commits
/// more than `stock`.
fn initial_pass(customers: &mut [CustomerRecord], stock: f64) -> f64 {
    let ratio_total: f64 = customers.iter().map(|c| c.ratio).sum();
    let scale = if ratio_total > 1.0 { 1.0 / ratio_total } else { 1.0 };

    let mut used = 0.0;
    for customer in customers.iter_mut() {
        customer.allocated = (customer.ratio * scale * stock).min(customer.demand);
        used += customer.allocated;
    }
    (stock - used).max(0.0)
}

/// Shares `leftover` among customers with unmet demand and returns the amount placed.
fn redistribute_round(customers: &mut [CustomerRecord], leftover: f64, ratio_sum: f64) -> f64 {
    let mut placed = 0.0;
    for customer in customers.iter_mut().filter(|c| c.has_unmet_demand()) {
        let portion = leftover * (customer.ratio / ratio_sum);
        let before = customer.allocated;
        customer.allocated = (before + portion).min(customer.demand);
        placed += customer.allocated - before;
    }
    placed
}
