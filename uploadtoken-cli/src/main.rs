//! uploadtoken - upload token lookup service
//!
//! Subcommands:
//! - `serve`: run the HTTP lookup service
//! - `lookup`: resolve one owner/repo pair and print the result

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "uploadtoken",
    author,
    version,
    about = "Resolve repository upload tokens from the owners/repos tables"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP lookup service
    Serve(commands::serve::ServeArgs),
    /// Look up a single upload token and print it
    Lookup(commands::lookup::LookupArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Env files must be loaded before clap reads `env = ...` defaults
    uploadtoken_server::config::load_dotenv();

    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Lookup(args) => commands::run_lookup(args).await?,
    }

    Ok(())
}
