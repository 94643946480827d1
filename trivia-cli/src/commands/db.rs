//! Database commands: connection arguments, `migrate` and `seed`

use anyhow::{Context, Result};
use clap::Parser;
use trivia_server::db::{create_pool_with_options, migrations, pool::DEFAULT_MAX_CONNECTIONS, PgPool};

/// Database connection arguments
#[derive(Parser, Debug, Clone)]
pub struct DatabaseArgs {
    /// Database URL (overrides .env)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum pooled connections
    #[arg(long, default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,
}

impl DatabaseArgs {
    /// Connect to Postgres.
    pub async fn connect(&self) -> Result<PgPool> {
        let database_url = self
            .database_url
            .as_deref()
            .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or .env")?;

        create_pool_with_options(database_url, self.max_connections)
            .await
            .context("Failed to create database pool")
    }
}

/// Create tables if missing.
pub async fn run_migrate(args: DatabaseArgs) -> Result<()> {
    let pool = args.connect().await?;
    migrations::run(&pool).await.context("Migration failed")?;
    Ok(())
}

/// Create tables, then insert the default categories into an empty table.
pub async fn run_seed(args: DatabaseArgs) -> Result<()> {
    let pool = args.connect().await?;
    migrations::run(&pool).await.context("Migration failed")?;
    let inserted = migrations::seed_categories(&pool)
        .await
        .context("Seeding categories failed")?;
    println!("Inserted {} categories", inserted);
    Ok(())
}
