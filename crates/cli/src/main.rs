//! Campus Eats CLI - Database migrations and catalog management.
//!
//! # Usage
//!
//! ```bash
//! # Run storefront database migrations
//! ce-cli migrate
//!
//! # Check a catalog file without touching the database
//! ce-cli seed check catalog.yaml
//!
//! # Replace the stored catalog with the contents of a file
//! ce-cli seed catalog catalog.yaml
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed catalog` - Load a YAML catalog into `PostgreSQL`
//! - `seed check` - Validate a YAML catalog offline

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "ce-cli")]
#[command(author, version, about = "Campus Eats CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run storefront database migrations
    Migrate,
    /// Manage the canteen catalog
    Seed {
        #[command(subcommand)]
        action: SeedAction,
    },
}

#[derive(Subcommand)]
enum SeedAction {
    /// Replace the stored catalog with a YAML file
    Catalog {
        /// Path to the catalog YAML file
        file: PathBuf,
    },
    /// Validate a catalog YAML file without connecting to the database
    Check {
        /// Path to the catalog YAML file
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::storefront().await?,
        Commands::Seed { action } => match action {
            SeedAction::Catalog { file } => commands::seed::catalog(&file).await?,
            SeedAction::Check { file } => commands::seed::check(&file).await?,
        },
    }
    Ok(())
}
