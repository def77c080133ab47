//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::StorefrontConfig;
use crate::db::{
    CatalogRepository, MemoryCatalogRepository, MemoryUserRepository, PgCatalogRepository,
    PgUserRepository, UserRepository,
};
use crate::services::auth::AuthService;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the repositories and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Arc<dyn CatalogRepository>,
    users: Arc<dyn UserRepository>,
    pool: Option<PgPool>,
}

impl AppState {
    /// Create application state from explicit repositories.
    #[must_use]
    pub fn new(
        config: StorefrontConfig,
        catalog: Arc<dyn CatalogRepository>,
        users: Arc<dyn UserRepository>,
        pool: Option<PgPool>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                users,
                pool,
            }),
        }
    }

    /// State backed by `PostgreSQL` for both catalog and accounts.
    #[must_use]
    pub fn postgres(config: StorefrontConfig, pool: PgPool) -> Self {
        let catalog = Arc::new(PgCatalogRepository::new(pool.clone()));
        let users = Arc::new(PgUserRepository::new(pool.clone()));
        Self::new(config, catalog, users, Some(pool))
    }

    /// State held entirely in process memory.
    #[must_use]
    pub fn in_memory(config: StorefrontConfig, catalog: MemoryCatalogRepository) -> Self {
        Self::new(
            config,
            Arc::new(catalog),
            Arc::new(MemoryUserRepository::new()),
            None,
        )
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Catalog lookups.
    #[must_use]
    pub fn catalog(&self) -> &dyn CatalogRepository {
        self.inner.catalog.as_ref()
    }

    /// Account storage.
    #[must_use]
    pub fn users(&self) -> &dyn UserRepository {
        self.inner.users.as_ref()
    }

    /// Authentication over the configured account storage.
    #[must_use]
    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(self.users())
    }

    /// Database pool, when running against `PostgreSQL`.
    #[must_use]
    pub fn pool(&self) -> Option<&PgPool> {
        self.inner.pool.as_ref()
    }
}
