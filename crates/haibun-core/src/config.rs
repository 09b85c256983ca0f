use haibun_types::RoundingMode;
use serde::{Deserialize, Serialize};

use crate::error::{AllocationError, AllocationResult};

/// Tuning knobs for the allocator.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
pub struct AllocatorConfig {
    /// Leftover at or below this is treated as fully placed
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
    /// Redistribution rounds allowed on top of one round per customer
    #[serde(default = "default_extra_rounds")]
    pub extra_rounds: usize,
    #[serde(default)]
    pub rounding: RoundingMode,
    /// Use largest-remainder rounding so the rounded total matches the placed total
    #[serde(default)]
    pub reconcile: bool,
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            epsilon: default_epsilon(),
            extra_rounds: default_extra_rounds(),
            rounding: RoundingMode::default(),
            reconcile: false,
        }
    }
}

impl AllocatorConfig {
    pub fn validate(&self) -> AllocationResult<()> {
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(AllocationError::configuration(
                "epsilon",
                format!("epsilon must be a positive finite number, got {}", self.epsilon),
            ));
        }
        Ok(())
    }

    /// Upper bound on redistribution rounds for a run over `customers` records.
    pub fn round_limit(&self, customers: usize) -> usize {
        customers.saturating_add(self.extra_rounds)
    }
}

fn default_epsilon() -> f64 {
    1e-9
}

fn default_extra_rounds() -> usize {
    16
}
