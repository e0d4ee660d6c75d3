//! PostgreSQL implementation of MenuCatalog.
//!
//! Menus join their restaurant. Soft-deleted menus and restaurants
//! (`deleted_at IS NOT NULL`) never become candidates.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::decision::{MenuItem, RestaurantRef};
use crate::domain::foundation::{DomainError, MenuItemId, RestaurantId};
use crate::ports::MenuCatalog;

#[derive(Clone)]
pub struct PostgresMenuCatalog {
    pool: PgPool,
}

impl std::fmt::Debug for PostgresMenuCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresMenuCatalog")
            .field("pool", &"PgPool")
            .finish()
    }
}

impl PostgresMenuCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MenuRow {
    id: i64,
    dish_name: String,
    restaurant_id: i64,
    restaurant_name: String,
}

impl From<MenuRow> for MenuItem {
    fn from(row: MenuRow) -> Self {
        MenuItem::new(
            MenuItemId::new(row.id),
            row.dish_name,
            RestaurantRef::new(RestaurantId::new(row.restaurant_id), row.restaurant_name),
        )
    }
}

#[async_trait]
impl MenuCatalog for PostgresMenuCatalog {
    async fn list_all(&self) -> Result<Vec<MenuItem>, DomainError> {
        let rows: Vec<MenuRow> = sqlx::query_as(
            r#"
            SELECT m.id, m.dish_name, r.id AS restaurant_id, r.name AS restaurant_name
            FROM menus m
            JOIN restaurants r ON r.id = m.restaurant_id
            WHERE m.deleted_at IS NULL AND r.deleted_at IS NULL
            ORDER BY m.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list menus: {}", e)))?;

        Ok(rows.into_iter().map(MenuItem::from).collect())
    }

    async fn list_by_ids(&self, ids: &[MenuItemId]) -> Result<Vec<MenuItem>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i64> = ids.iter().map(MenuItemId::value).collect();

        let rows: Vec<MenuRow> = sqlx::query_as(
            r#"
            SELECT m.id, m.dish_name, r.id AS restaurant_id, r.name AS restaurant_name
            FROM menus m
            JOIN restaurants r ON r.id = m.restaurant_id
            WHERE m.id = ANY($1) AND m.deleted_at IS NULL AND r.deleted_at IS NULL
            ORDER BY m.id
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch menus by id: {}", e)))?;

        Ok(rows.into_iter().map(MenuItem::from).collect())
    }
}
