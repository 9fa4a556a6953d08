//! Hemp0x Commander dashboard CLI
//! Usage: hemp0x-dash [OPTIONS] <COMMAND>
//!
//! Commands:
//!   balance <VALUE>   compact balance display
//!   amount <VALUE>    grouped amount display
//!   size <BYTES>      byte count display
//!   snapshot          initial state as JSON
//!   config            effective configuration
//!   watch --file <P>  poll a dashboard payload file

use anyhow::Result;
use clap::Parser;
use hemp0x_dash::DashboardState;
use hemp0x_types::{format_amount, format_balance, format_size};

mod cli;

use cli::commands::{Cli, Commands};
use cli::utils::{init_logging, load_config};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_logging(&cli, &config.logging)?;

    match &cli.command {
        Commands::Balance { value } => println!("{}", format_balance(value)),
        Commands::Amount { value } => println!("{}", format_amount(value)),
        Commands::Size { bytes } => println!("{}", format_size(*bytes)),
        Commands::Snapshot => {
            let snapshot = DashboardState::new().snapshot();
            println!("{}", snapshot.to_json_pretty()?);
        }
        Commands::Config => print!("{}", config.to_toml()?),
        Commands::Watch { file, once } => cli::watch::run_watch(file, *once, &config).await?,
    }

    Ok(())
}
