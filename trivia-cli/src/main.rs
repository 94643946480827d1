//! trivia CLI - runs and prepares the trivia API server
//!
//! - `serve`: HTTP API over Postgres (or an in-memory store)
//! - `migrate`: create the questions/categories tables
//! - `seed`: insert the default categories into an empty database

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "trivia",
    author,
    version,
    about = "Trivia questions, categories and quizzes over a JSON API"
)]
struct Cli {
    /// Enable debug logging (unless RUST_LOG is set)
    #[arg(long, global = true)]
    debug: bool,

    /// Export traces over OTLP (requires the `telemetry` feature)
    #[arg(long, global = true)]
    otel: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Create database tables if they don't exist
    Migrate(commands::db::DatabaseArgs),
    /// Insert the default categories when none exist
    Seed(commands::db::DatabaseArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; flags and real environment variables win
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let tracing_config = TracingConfig {
        debug: cli.debug,
        otel: cli.otel,
    };
    tracing_setup::init(&tracing_config).ok();

    let result = match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await,
        Commands::Migrate(args) => commands::run_migrate(args).await,
        Commands::Seed(args) => commands::run_seed(args).await,
    };

    tracing_setup::shutdown_otel();
    result
}
