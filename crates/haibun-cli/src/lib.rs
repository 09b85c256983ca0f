//! Command-line front end for the Haibun allocator.
//!
//! Reads a finalized customer list from JSON, splits incoming stock into a
//! discretion reserve and a logic quantity, runs the allocator and renders the
//! result as a table or JSON.

pub mod cli;
pub mod config;
pub mod render;
pub mod request;

pub use cli::{Cli, Command, OutputFormat};
pub use config::HaibunConfig;
pub use render::AllocationReport;
pub use request::AllocationRequest;

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber; logs go to stderr so stdout stays machine-readable.
pub fn init_tracing(verbose: bool, json: bool) {
    let default_filter = if verbose { "haibun=debug,info" } else { "haibun=info,warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
