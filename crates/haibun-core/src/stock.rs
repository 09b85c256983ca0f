//! Splitting incoming stock and summarising a finished run.
//!
//! Part of every delivery is held back for manual ("discretion") allocation;
//! only the remaining logic stock is handed to the [`Allocator`](crate::Allocator).

use haibun_types::{AllocationSummary, CustomerRecord, RoundingMode};
use serde::Serialize;

use crate::error::{AllocationError, AllocationResult};

/// Incoming stock divided into a discretion reserve and a logic quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StockSplit {
    pub total: u64,
    pub discretion: u64,
    pub logic: u64,
}

impl StockSplit {
    /// Reserves `round_half_even(total * discretion_ratio)` units and leaves the rest to the allocator.
    pub fn new(total: u64, discretion_ratio: f64) -> AllocationResult<Self> {
        if !discretion_ratio.is_finite() || !(0.0..=1.0).contains(&discretion_ratio) {
            return Err(AllocationError::invalid_argument(
                "discretion_ratio",
                format!("discretion ratio must be within [0, 1], got {discretion_ratio}"),
            ));
        }

        let discretion =
            (RoundingMode::HalfEven.apply(total as f64 * discretion_ratio) as u64).min(total);
        Ok(Self { total, discretion, logic: total - discretion })
    }

    /// Sends the whole quantity through the allocator.
    pub fn logic_only(total: u64) -> Self {
        Self { total, discretion: 0, logic: total }
    }
}

/// Computes the reporting totals for rounded allocations.
pub fn summarize(customers: &[CustomerRecord], split: &StockSplit) -> AllocationSummary {
    let total_demand: f64 = customers.iter().map(|c| c.demand).sum();
    let total_allocated: f64 = customers.iter().map(|c| c.allocated).sum();
    let logic_unallocated = split.logic as f64 - total_allocated;

    AllocationSummary {
        total_stock: split.total,
        discretion_stock: split.discretion,
        logic_stock: split.logic,
        total_demand,
        total_allocated,
        logic_unallocated,
        not_allocated_total: split.discretion as f64 + logic_unallocated,
    }
}

/// Orders records by ratio, largest first; equal ratios keep their input order.
pub fn sort_by_ratio(customers: &mut [CustomerRecord]) {
    customers.sort_by(|a, b| b.ratio.total_cmp(&a.ratio));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_reserves_discretion_share() {
        let split = StockSplit::new(100, 0.3).unwrap();
        assert_eq!(split, StockSplit { total: 100, discretion: 30, logic: 70 });
    }

    #[test]
    fn split_rounds_ties_to_even() {
        assert_eq!(StockSplit::new(5, 0.5).unwrap().discretion, 2);
        assert_eq!(StockSplit::new(7, 0.5).unwrap().discretion, 4);
        assert_eq!(StockSplit::new(10, 1.0).unwrap().logic, 0);
        assert_eq!(StockSplit::new(0, 0.3).unwrap(), StockSplit::logic_only(0));
    }

    #[test]
    fn split_rejects_ratio_out_of_range() {
        for ratio in [-0.1, 1.5, f64::NAN] {
            let err = StockSplit::new(100, ratio).unwrap_err();
            assert_eq!(err.category(), "invalid_input");
        }
    }

    #[test]
    fn summary_counts_discretion_and_logic_leftover() {
        let split = StockSplit::new(100, 0.3).unwrap();
        let customers = vec![
            CustomerRecord { allocated: 40.0, ..CustomerRecord::new("a", 0.6, 40.0) },
            CustomerRecord { allocated: 25.0, ..CustomerRecord::new("b", 0.4, 25.0) },
        ];
        let summary = summarize(&customers, &split);
        assert_eq!(summary.total_demand, 65.0);
        assert_eq!(summary.total_allocated, 65.0);
        assert_eq!(summary.logic_unallocated, 5.0);
        assert_eq!(summary.not_allocated_total, 35.0);
    }

    #[test]
    fn sort_is_descending_and_stable() {
        let mut customers = vec![
            CustomerRecord::new("a", 0.2, 1.0),
            CustomerRecord::new("b", 0.5, 1.0),
            CustomerRecord::new("c", 0.2, 1.0),
        ];
        sort_by_ratio(&mut customers);
        let names: Vec<_> = customers.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }
}
