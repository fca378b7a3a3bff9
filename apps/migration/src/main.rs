//! Migration CLI tool.
//!
//! Logging is configured by the migration CLI itself (`-v` for verbose).

use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    cli::run_cli(migration::Migrator).await;
}
