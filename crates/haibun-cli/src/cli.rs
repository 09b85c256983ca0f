//! Command-line interface for running allocations.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use haibun_core::{Allocator, StockSplit, sort_by_ratio, summarize};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::config::HaibunConfig;
use crate::render::AllocationReport;
use crate::request::AllocationRequest;

/// Proportional stock allocation tool
#[derive(Parser, Debug)]
#[command(name = "haibun")]
#[command(about = "Distributes incoming stock across customers by ratio and demand")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (defaults to $HAIBUN_CONFIG_PATH or haibun.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Allocate stock for the customers in a JSON request
    Allocate {
        /// Request file, or `-` for stdin
        #[arg(short, long)]
        input: PathBuf,

        /// Allocate exactly this quantity, skipping the discretion split
        #[arg(long, conflicts_with_all = ["total", "discretion"])]
        stock: Option<u64>,

        /// Incoming stock before the discretion split
        #[arg(long)]
        total: Option<u64>,

        /// Share of incoming stock held back for manual allocation
        #[arg(long)]
        discretion: Option<f64>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Print the effective configuration
    Config,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl Cli {
    /// Executes the command and returns the text to print.
    pub fn execute(&self) -> Result<String> {
        let config = HaibunConfig::load(self.config.as_deref())?;

        match &self.command {
            Command::Allocate { input, stock, total, discretion, format } => {
                let request = AllocationRequest::read(input)?;
                let split = resolve_split(&request, &config, *stock, *total, *discretion)?;
                let report = run_allocation(request, split, &config)?;
                match format {
                    OutputFormat::Table => Ok(report.to_table()),
                    OutputFormat::Json => report.to_json(),
                }
            }
            Command::Config => config.to_toml(),
        }
    }
}

/// Picks the stock quantity: `--stock` wins, then `--total`/request total with a discretion split.
pub fn resolve_split(
    request: &AllocationRequest,
    config: &HaibunConfig,
    stock: Option<u64>,
    total: Option<u64>,
    discretion: Option<f64>,
) -> Result<StockSplit> {
    if let Some(stock) = stock {
        return Ok(StockSplit::logic_only(stock));
    }

    let Some(total) = total.or(request.total_stock) else {
        bail!("no stock quantity given; pass --stock, --total or set total_stock in the request");
    };
    let ratio = discretion.or(request.discretion_ratio).unwrap_or(config.stock.discretion_ratio);

    let split = StockSplit::new(total, ratio).context("invalid discretion split")?;
    debug!(total = split.total, discretion = split.discretion, logic = split.logic, "Stock split");
    Ok(split)
}

/// Allocates the split's logic stock and assembles the report.
pub fn run_allocation(
    request: AllocationRequest,
    split: StockSplit,
    config: &HaibunConfig,
) -> Result<AllocationReport> {
    let allocator = Allocator::new(config.allocator)?;
    let mut customers = request.customers;

    info!(customers = customers.len(), logic_stock = split.logic, "Running allocation");
    let outcome = allocator.allocate(&mut customers, split.logic as f64)?;

    let summary = summarize(&customers, &split);
    sort_by_ratio(&mut customers);

    Ok(AllocationReport { customers, split, summary, outcome })
}
