//! crudgate CLI - HTTP gateway over the sample CRUD database
//!
//! - `serve`: run the gateway (PostgreSQL, or `--in-memory` sample tables)
//! - `check`: verify the database is reachable with the pool settings

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "crudgate",
    author,
    version,
    about = "HTTP gateway exposing CRUD endpoints over a relational database"
)]
struct Cli {
    /// Debug logging (RUST_LOG still wins when set)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP gateway
    Serve(commands::serve::ServeArgs),
    /// Check that the database answers
    Check(commands::check::CheckArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before clap reads env fallbacks
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Check(args) => commands::run_check(args).await?,
    }

    Ok(())
}
