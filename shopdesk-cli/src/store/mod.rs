//! Backing stores for products, orders and product images
//!
//! The catalog and order services only see the traits below. The workspace
//! ships a SQLite implementation for both document collections and a local
//! directory standing in for object storage.

pub mod images;
pub mod sqlite;

pub use images::LocalImageStore;
pub use sqlite::SqliteStore;

use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;

use crate::catalog::{Product, ProductData, ProductId};
use crate::services::orders::{Order, OrderUpdate};

/// Document collection holding the product catalog
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// All products in store order
    async fn list_products(&self) -> Result<Vec<Product>>;

    async fn get_product(&self, id: &ProductId) -> Result<Option<Product>>;

    /// Insert a new product. The store assigns the id and both timestamps.
    async fn insert_product(&self, data: &ProductData) -> Result<Product>;

    /// Overwrite the payload of an existing product and refresh `updated_on`
    /// Returns None when the id is unknown
    async fn update_product(&self, id: &ProductId, data: &ProductData) -> Result<Option<Product>>;

    /// Set the visibility flag and refresh `updated_on`
    async fn set_visibility(&self, id: &ProductId, show: bool) -> Result<Option<Product>>;

    /// Returns false when nothing was deleted
    async fn delete_product(&self, id: &ProductId) -> Result<bool>;
}

/// Document collection holding incoming orders
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// All orders in store order
    async fn list_orders(&self) -> Result<Vec<Order>>;

    async fn get_order(&self, id: &str) -> Result<Option<Order>>;

    /// Apply a status change; returns the updated order or None if unknown
    async fn apply_update(&self, id: &str, update: OrderUpdate) -> Result<Option<Order>>;

    /// Insert or replace orders by id, returning how many were written
    async fn import_orders(&self, orders: &[Order]) -> Result<usize>;
}

/// Object storage for product images
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Upload `source` to `object_path` and return its public URL
    async fn upload(&self, source: &Path, object_path: &str) -> Result<String>;
}
