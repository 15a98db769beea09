//! SQLite-backed product and order collections

pub mod orders;
pub mod products;
mod schema;

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::path::Path;

use super::{OrderStore, ProductStore};
use crate::catalog::{Product, ProductData, ProductId};
use crate::services::orders::{Order, OrderUpdate};

/// Both document collections in one SQLite database
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if needed) the database file and apply the schema
    pub async fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create data directory: {}", parent.display()))?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to open database: {}", path.display()))?;

        debug!("Opened store at {}", path.display());
        Self::with_pool(pool).await
    }

    /// Private in-memory database
    #[cfg(test)]
    pub async fn in_memory() -> Result<Self> {
        // A single connection that never expires, otherwise the database vanishes
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .context("Failed to open in-memory database")?;

        Self::with_pool(pool).await
    }

    async fn with_pool(pool: SqlitePool) -> Result<Self> {
        schema::apply(&pool).await?;
        Ok(Self { pool })
    }

    #[cfg(test)]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl ProductStore for SqliteStore {
    async fn list_products(&self) -> Result<Vec<Product>> {
        products::list_products(&self.pool).await
    }

    async fn get_product(&self, id: &ProductId) -> Result<Option<Product>> {
        products::get_product(&self.pool, id).await
    }

    async fn insert_product(&self, data: &ProductData) -> Result<Product> {
        products::insert_product(&self.pool, data).await
    }

    async fn update_product(&self, id: &ProductId, data: &ProductData) -> Result<Option<Product>> {
        products::update_product(&self.pool, id, data).await
    }

    async fn set_visibility(&self, id: &ProductId, show: bool) -> Result<Option<Product>> {
        products::set_visibility(&self.pool, id, show).await
    }

    async fn delete_product(&self, id: &ProductId) -> Result<bool> {
        products::delete_product(&self.pool, id).await
    }
}

#[async_trait]
impl OrderStore for SqliteStore {
    async fn list_orders(&self) -> Result<Vec<Order>> {
        orders::list_orders(&self.pool).await
    }

    async fn get_order(&self, id: &str) -> Result<Option<Order>> {
        orders::get_order(&self.pool, id).await
    }

    async fn apply_update(&self, id: &str, update: OrderUpdate) -> Result<Option<Order>> {
        orders::apply_update(&self.pool, id, update).await
    }

    async fn import_orders(&self, orders: &[Order]) -> Result<usize> {
        orders::upsert_orders(&self.pool, orders).await
    }
}
