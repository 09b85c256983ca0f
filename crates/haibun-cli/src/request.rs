//! JSON allocation requests.

use anyhow::{Context, Result, bail};
use haibun_core::CustomerRecord;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// A finalized customer list plus the optional stock figures supplied with it.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct AllocationRequest {
    pub customers: Vec<CustomerRecord>,
    #[serde(default)]
    pub total_stock: Option<u64>,
    #[serde(default)]
    pub discretion_ratio: Option<f64>,
}

impl AllocationRequest {
    pub fn from_json(raw: &str) -> Result<Self> {
        let mut request: Self = serde_json::from_str(raw).context("malformed allocation request")?;
        for customer in &mut request.customers {
            customer.allocated = 0.0;
        }
        Ok(request)
    }

    /// Reads a request from `path`, or from stdin when `path` is `-`.
    pub fn read(path: &Path) -> Result<Self> {
        let raw = if path == Path::new("-") {
            let mut raw = String::new();
            std::io::stdin().read_to_string(&mut raw).context("cannot read request from stdin")?;
            raw
        } else {
            std::fs::read_to_string(path)
                .with_context(|| format!("cannot read request {}", path.display()))?
        };

        if raw.trim().is_empty() {
            bail!("allocation request is empty");
        }
        Self::from_json(&raw)
    }
}
