//! Catalog seeding commands.
//!
//! Reads a YAML catalog (same format as the bundled
//! `crates/storefront/data/catalog.yaml`), validates it, and either reports
//! on it or replaces the catalog stored in `PostgreSQL`.

use std::path::Path;

use tracing::info;

use campus_eats_core::Catalog;
use campus_eats_storefront::db::{CatalogLoadError, PgCatalogRepository, parse_catalog};

use super::{CommandError, connect};

/// Load a catalog into the database, replacing what is there.
///
/// The file is validated before any connection is made.
///
/// # Errors
///
/// Returns an error if the file is unreadable or invalid, or if the import
/// fails (in which case nothing is changed).
pub async fn catalog(path: &Path) -> Result<(), CommandError> {
    let catalog = load(path).await?;
    report(&catalog);

    let pool = connect().await?;
    PgCatalogRepository::new(pool).import(&catalog).await?;

    info!("Catalog import complete!");
    Ok(())
}

/// Validate a catalog file and print a summary.
///
/// # Errors
///
/// Returns an error if the file is unreadable or invalid.
pub async fn check(path: &Path) -> Result<(), CommandError> {
    let catalog = load(path).await?;
    report(&catalog);
    info!("Catalog is valid");
    Ok(())
}

async fn load(path: &Path) -> Result<Catalog, CommandError> {
    info!(path = %path.display(), "Loading catalog from file");
    let yaml = tokio::fs::read_to_string(path)
        .await
        .map_err(CatalogLoadError::from)?;
    Ok(parse_catalog(&yaml)?)
}

fn report(catalog: &Catalog) {
    let items: usize = catalog.canteens().iter().map(|c| c.menu.len()).sum();
    info!(
        universities = catalog.universities().len(),
        canteens = catalog.canteens().len(),
        menu_items = items,
        "Parsed catalog"
    );
    for university in catalog.universities() {
        let count = catalog.canteens_at(university).count();
        info!("  {university}: {count} canteen(s)");
    }
}
