//! Conversion of fractional allocations into whole units.
//!
//! Plain rounding is applied per record and may leave the rounded total a few
//! units away from the stock that was actually placed. The largest-remainder
//! variant floors every record and hands the missing units to the records with
//! the biggest fractional parts, so the total is preserved wherever demand
//! leaves room for it.

use haibun_types::{CustomerRecord, RoundingMode};
use std::cmp::Ordering;

/// Rounds every record's allocation independently.
pub fn round_allocations(customers: &mut [CustomerRecord], mode: RoundingMode) {
    for customer in customers.iter_mut() {
        customer.allocated = mode.apply(customer.allocated);
    }
}

/// Rounds allocations so that their total equals the rounded pre-rounding total.
///
/// Only records with a non-zero fractional part whose floor plus one still fits
/// their demand can be bumped up. Ties between equal remainders are broken by
/// input order.
pub fn reconcile_allocations(customers: &mut [CustomerRecord], mode: RoundingMode) {
    let placed: f64 = customers.iter().map(|c| c.allocated).sum();
    let target = mode.apply(placed);

    let mut remainders: Vec<(usize, f64)> = Vec::with_capacity(customers.len());
    let mut floored_total = 0.0;
    for (index, customer) in customers.iter_mut().enumerate() {
        let floor = customer.allocated.floor();
        let fraction = customer.allocated - floor;
        if fraction > 0.0 && floor + 1.0 <= customer.demand {
            remainders.push((index, fraction));
        }
        customer.allocated = floor;
        floored_total += floor;
    }

    let units = (target - floored_total).max(0.0) as usize;
    remainders.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal).then(a.0.cmp(&b.0)));

    for &(index, _) in remainders.iter().take(units) {
        customers[index].allocated += 1.0;
    }
}
