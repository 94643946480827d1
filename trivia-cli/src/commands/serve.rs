//! HTTP server command

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use trivia_server::db::migrations::{self, DEFAULT_CATEGORIES};
use trivia_server::{run_server, MemoryStore, PgStore, ServerConfig, TriviaStore};

use super::db::DatabaseArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "TRIVIA_BIND", default_value = "127.0.0.1:5000")]
    pub bind: SocketAddr,

    /// Keep data in memory instead of Postgres (lost on exit; ignores DATABASE_URL)
    #[arg(long)]
    pub in_memory: bool,

    /// Insert the default categories if none exist
    #[arg(long)]
    pub seed: bool,

    #[command(flatten)]
    pub database: DatabaseArgs,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let store: Arc<dyn TriviaStore> = if args.in_memory {
        tracing::warn!("Using in-memory store; data is lost on exit");
        if args.seed {
            Arc::new(MemoryStore::with_categories(DEFAULT_CATEGORIES))
        } else {
            Arc::new(MemoryStore::new())
        }
    } else {
        let pool = args.database.connect().await?;
        migrations::run(&pool).await.context("Migration failed")?;
        if args.seed {
            migrations::seed_categories(&pool)
                .await
                .context("Seeding categories failed")?;
        }
        Arc::new(PgStore::new(pool))
    };

    tracing::info!("Starting trivia server on {}", args.bind);

    let config = ServerConfig {
        bind_addr: args.bind,
    };

    // Blocks until shutdown
    run_server(store, config).await.context("Server error")?;

    Ok(())
}
