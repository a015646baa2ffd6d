use anyhow::Result;
use clap::Parser;
use ledgerlab::cli::{init_logging, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_format);
    cli.run()
}
