//! CLI command implementations.

pub mod migrate;
pub mod seed;

use secrecy::SecretString;
use sqlx::PgPool;
use thiserror::Error;

use campus_eats_storefront::config::{ConfigError, StorefrontConfig};
use campus_eats_storefront::db::{self, CatalogLoadError, RepositoryError};

/// Errors returned by CLI commands.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("CAMPUS_EATS_DATABASE_URL (or DATABASE_URL) is not set")]
    MissingDatabaseUrl,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("{0}")]
    Catalog(#[from] CatalogLoadError),

    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Connect to the database named by the storefront configuration.
async fn connect() -> Result<PgPool, CommandError> {
    let config = StorefrontConfig::from_env()?;
    let database_url: SecretString = config
        .database_url
        .ok_or(CommandError::MissingDatabaseUrl)?;

    tracing::info!("Connecting to storefront database...");
    Ok(db::create_pool(&database_url).await?)
}
