//! Catalog repository: universities, canteens and menus.
//!
//! The catalog is read-only while the server runs. The in-memory store is
//! built from a YAML document (the bundled seed by default); the `PostgreSQL`
//! store reads the tables that `ce-cli seed catalog` fills.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use sqlx::PgPool;

use campus_eats_core::{Canteen, CanteenId, Catalog, MenuItem, Price};

use super::RepositoryError;

/// Catalog bundled with the binary, used when no other source is configured.
pub const BUNDLED_CATALOG: &str = include_str!("../../data/catalog.yaml");

/// Errors loading a catalog document.
#[derive(Debug, thiserror::Error)]
pub enum CatalogLoadError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid catalog: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Parse and validate a YAML catalog document.
///
/// # Errors
///
/// Returns `CatalogLoadError::Parse` for malformed YAML or catalog data that
/// breaks a catalog invariant.
pub fn parse_catalog(yaml: &str) -> Result<Catalog, CatalogLoadError> {
    Ok(serde_yaml::from_str(yaml)?)
}

/// Read-only catalog lookups.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// University names in display order.
    async fn universities(&self) -> Result<Vec<String>, RepositoryError>;

    /// Canteens at `university`, matched case-insensitively after trimming.
    async fn canteens_at(&self, university: &str) -> Result<Vec<Canteen>, RepositoryError>;

    /// A canteen with its menu.
    async fn canteen(&self, id: CanteenId) -> Result<Option<Canteen>, RepositoryError>;
}

// =============================================================================
// In-memory
// =============================================================================

/// Catalog held in process memory.
#[derive(Debug, Clone)]
pub struct MemoryCatalogRepository {
    catalog: Catalog,
}

impl MemoryCatalogRepository {
    #[must_use]
    pub const fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    /// The catalog compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns `CatalogLoadError::Parse` if the bundled seed is invalid.
    pub fn bundled() -> Result<Self, CatalogLoadError> {
        parse_catalog(BUNDLED_CATALOG).map(Self::new)
    }

    /// Load a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogLoadError` if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, CatalogLoadError> {
        let yaml = std::fs::read_to_string(path)?;
        parse_catalog(&yaml).map(Self::new)
    }
}

#[async_trait]
impl CatalogRepository for MemoryCatalogRepository {
    async fn universities(&self) -> Result<Vec<String>, RepositoryError> {
        Ok(self.catalog.universities().to_vec())
    }

    async fn canteens_at(&self, university: &str) -> Result<Vec<Canteen>, RepositoryError> {
        Ok(self.catalog.canteens_at(university).cloned().collect())
    }

    async fn canteen(&self, id: CanteenId) -> Result<Option<Canteen>, RepositoryError> {
        Ok(self.catalog.canteen(id).cloned())
    }
}

// =============================================================================
// PostgreSQL
// =============================================================================

#[derive(sqlx::FromRow)]
struct CanteenRow {
    id: CanteenId,
    university_name: String,
    name: String,
    address: String,
}

#[derive(sqlx::FromRow)]
struct MenuItemRow {
    canteen_id: CanteenId,
    name: String,
    price: Price,
}

/// Catalog stored in `PostgreSQL`.
#[derive(Debug, Clone)]
pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Replace the stored catalog with `catalog` in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails; nothing is
    /// changed in that case.
    pub async fn import(&self, catalog: &Catalog) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM storefront.menu_item")
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM storefront.canteen")
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM storefront.university")
            .execute(&mut *tx)
            .await?;

        for (position, name) in catalog.universities().iter().enumerate() {
            sqlx::query("INSERT INTO storefront.university (name, position) VALUES ($1, $2)")
                .bind(name)
                .bind(position_to_i32(position)?)
                .execute(&mut *tx)
                .await?;
        }

        for canteen in catalog.canteens() {
            sqlx::query(
                r"
                INSERT INTO storefront.canteen (id, university_name, name, address)
                VALUES ($1, $2, $3, $4)
                ",
            )
            .bind(canteen.id)
            .bind(&canteen.university_name)
            .bind(&canteen.name)
            .bind(&canteen.address)
            .execute(&mut *tx)
            .await?;

            for (position, item) in canteen.menu.iter().enumerate() {
                sqlx::query(
                    r"
                    INSERT INTO storefront.menu_item (canteen_id, position, name, price)
                    VALUES ($1, $2, $3, $4)
                    ",
                )
                .bind(canteen.id)
                .bind(position_to_i32(position)?)
                .bind(&item.name)
                .bind(item.price)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        Ok(())
    }

    /// Attach menus to canteen rows, keeping row order.
    async fn with_menus(&self, rows: Vec<CanteenRow>) -> Result<Vec<Canteen>, RepositoryError> {
        let ids: Vec<i32> = rows.iter().map(|row| row.id.as_i32()).collect();
        let items: Vec<MenuItemRow> = sqlx::query_as(
            r"
            SELECT canteen_id, name, price
            FROM storefront.menu_item
            WHERE canteen_id = ANY($1)
            ORDER BY canteen_id, position
            ",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut menus: HashMap<CanteenId, Vec<MenuItem>> = HashMap::new();
        for item in items {
            menus
                .entry(item.canteen_id)
                .or_default()
                .push(MenuItem::new(&item.name, item.price));
        }

        Ok(rows
            .into_iter()
            .map(|row| Canteen {
                menu: menus.remove(&row.id).unwrap_or_default(),
                id: row.id,
                university_name: row.university_name,
                name: row.name,
                address: row.address,
            })
            .collect())
    }
}

#[async_trait]
impl CatalogRepository for PgCatalogRepository {
    async fn universities(&self) -> Result<Vec<String>, RepositoryError> {
        let names = sqlx::query_scalar::<_, String>(
            "SELECT name FROM storefront.university ORDER BY position, id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(names)
    }

    async fn canteens_at(&self, university: &str) -> Result<Vec<Canteen>, RepositoryError> {
        let rows: Vec<CanteenRow> = sqlx::query_as(
            r"
            SELECT id, university_name, name, address
            FROM storefront.canteen
            WHERE lower(university_name) = lower($1)
            ORDER BY id
            ",
        )
        .bind(university.trim())
        .fetch_all(&self.pool)
        .await?;
        self.with_menus(rows).await
    }

    async fn canteen(&self, id: CanteenId) -> Result<Option<Canteen>, RepositoryError> {
        let row: Option<CanteenRow> = sqlx::query_as(
            r"
            SELECT id, university_name, name, address
            FROM storefront.canteen
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        Ok(self.with_menus(vec![row]).await?.into_iter().next())
    }
}

fn position_to_i32(position: usize) -> Result<i32, RepositoryError> {
    i32::try_from(position)
        .map_err(|_| RepositoryError::DataCorruption(format!("position {position} out of range")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_catalog_is_valid() {
        let repo = MemoryCatalogRepository::bundled().unwrap();
        assert_eq!(repo.catalog.universities().len(), 8);
        assert_eq!(repo.catalog.canteens().len(), 8);
        assert!(
            repo.catalog
                .canteens()
                .iter()
                .all(|canteen| !canteen.menu.is_empty())
        );
    }

    #[tokio::test]
    async fn test_memory_lookups() {
        let repo = MemoryCatalogRepository::bundled().unwrap();

        let universities = repo.universities().await.unwrap();
        assert_eq!(universities[0], "Vellore Institute of Technology");

        let vit = repo
            .canteens_at("  vellore institute of technology ")
            .await
            .unwrap();
        let names: Vec<_> = vit.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["SJT Canteen", "Darling Bakery", "Foodys"]);

        assert!(repo.canteens_at("Delhi University").await.unwrap().is_empty());
        assert!(repo.canteens_at("Nowhere").await.unwrap().is_empty());

        let sjt = repo.canteen(CanteenId::new(1)).await.unwrap().unwrap();
        assert_eq!(sjt.item("Veg Fried Rice").unwrap().price, Price::from(120));
        assert!(repo.canteen(CanteenId::new(999)).await.unwrap().is_none());
    }

    #[test]
    fn test_parse_catalog_rejects_invalid_documents() {
        let yaml = r"
universities: [IIT Madras]
canteens:
  - id: 6
    university: SRM University
    name: Ram's Cafe
    address: Hostel Zone
";
        assert!(matches!(
            parse_catalog(yaml),
            Err(CatalogLoadError::Parse(_))
        ));
    }
}
