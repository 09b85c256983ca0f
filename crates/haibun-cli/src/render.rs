//! Output formats for finished allocation runs.

use anyhow::Result;
use haibun_core::{AllocationOutcome, AllocationSummary, CustomerRecord, StockSplit};
use serde::Serialize;
use std::fmt::Write;

/// Everything reported for one run, with customers ordered by ratio.
#[derive(Serialize, Debug, Clone)]
pub struct AllocationReport {
    pub customers: Vec<CustomerRecord>,
    pub split: StockSplit,
    pub summary: AllocationSummary,
    pub outcome: AllocationOutcome,
}

impl AllocationReport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_table(&self) -> String {
        let name_width =
            self.customers.iter().map(|c| c.name.chars().count()).max().unwrap_or(0).max(8);

        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:<name_width$}  {:>8}  {:>10}  {:>10}",
            "customer", "ratio", "demand", "allocated"
        );
        let _ = writeln!(out, "{}", "-".repeat(name_width + 36));
        for customer in &self.customers {
            let _ = writeln!(
                out,
                "{:<name_width$}  {:>8.4}  {:>10}  {:>10}",
                customer.name, customer.ratio, customer.demand, customer.allocated
            );
        }

        let summary = &self.summary;
        let _ = writeln!(out);
        let _ = writeln!(out, "total demand:        {}", summary.total_demand);
        let _ = writeln!(out, "incoming stock:      {}", summary.total_stock);
        let _ = writeln!(out, "logic stock:         {}", summary.logic_stock);
        let _ = writeln!(out, "allocated:           {}", summary.total_allocated);
        let _ = writeln!(out, "discretion stock:    {}", summary.discretion_stock);
        let _ = writeln!(out, "not allocated total: {}", summary.not_allocated_total);
        out
    }
}
