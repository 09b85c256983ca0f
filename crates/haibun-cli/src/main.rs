use clap::Parser;
use haibun_cli::{Cli, init_tracing};
use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    info!(version = env!("CARGO_PKG_VERSION"), "Starting Haibun allocator");

    match cli.execute() {
        Ok(output) => {
            println!("{output}");
            Ok(())
        }
        Err(err) => {
            error!(error = %err, "Allocation failed");
            Err(err)
        }
    }
}
