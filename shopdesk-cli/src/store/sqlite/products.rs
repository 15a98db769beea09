//! Product collection repository

use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::catalog::{Category, Product, ProductData, ProductId};

const SELECT_PRODUCT: &str = "SELECT id, name, description, category, price, stock_quantity,
        image, show, created_on, updated_on
 FROM products";

fn row_to_product(row: &SqliteRow) -> Result<Product> {
    let id: String = row.try_get("id")?;
    let category: String = row.try_get("category")?;
    let category: Category = category
        .parse()
        .with_context(|| format!("Product {} has an invalid category", id))?;
    let stock: i64 = row.try_get("stock_quantity")?;

    Ok(Product {
        data: ProductData {
            // Missing names read back as empty text
            name: row.try_get::<Option<String>, _>("name")?.unwrap_or_default(),
            description: row.try_get("description")?,
            category,
            price: row.try_get("price")?,
            stock_quantity: u32::try_from(stock)
                .with_context(|| format!("Product {} has an invalid stock quantity: {}", id, stock))?,
            image: row.try_get("image")?,
            show: row.try_get("show")?,
            created_on: row.try_get("created_on")?,
            updated_on: row.try_get("updated_on")?,
        },
        id: ProductId::new(id),
    })
}

/// List all products in insertion order
pub async fn list_products(pool: &SqlitePool) -> Result<Vec<Product>> {
    let rows = sqlx::query(&format!("{} ORDER BY rowid", SELECT_PRODUCT))
        .fetch_all(pool)
        .await
        .context("Failed to list products")?;

    rows.iter().map(row_to_product).collect()
}

/// Get a product by id
pub async fn get_product(pool: &SqlitePool, id: &ProductId) -> Result<Option<Product>> {
    let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_PRODUCT))
        .bind(id.as_str())
        .fetch_optional(pool)
        .await
        .context("Failed to get product")?;

    row.as_ref().map(row_to_product).transpose()
}

/// Insert a product, assigning a fresh id and both timestamps
pub async fn insert_product(pool: &SqlitePool, data: &ProductData) -> Result<Product> {
    let id = ProductId::new(Uuid::new_v4().to_string());
    let now = Utc::now();

    sqlx::query(
        "INSERT INTO products
            (id, name, description, category, price, stock_quantity, image, show, created_on, updated_on)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id.as_str())
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.category.slug())
    .bind(data.price)
    .bind(i64::from(data.stock_quantity))
    .bind(&data.image)
    .bind(data.show)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .context("Failed to insert product")?;

    get_product(pool, &id)
        .await?
        .with_context(|| format!("Product {} missing right after insert", id))
}

/// Overwrite every payload field of a product; `created_on` is kept
pub async fn update_product(
    pool: &SqlitePool,
    id: &ProductId,
    data: &ProductData,
) -> Result<Option<Product>> {
    let result = sqlx::query(
        "UPDATE products
         SET name = ?, description = ?, category = ?, price = ?, stock_quantity = ?,
             image = ?, show = ?, updated_on = ?
         WHERE id = ?",
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.category.slug())
    .bind(data.price)
    .bind(i64::from(data.stock_quantity))
    .bind(&data.image)
    .bind(data.show)
    .bind(Utc::now())
    .bind(id.as_str())
    .execute(pool)
    .await
    .context("Failed to update product")?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }
    get_product(pool, id).await
}

/// Set the visibility flag of a product
pub async fn set_visibility(pool: &SqlitePool, id: &ProductId, show: bool) -> Result<Option<Product>> {
    let result = sqlx::query("UPDATE products SET show = ?, updated_on = ? WHERE id = ?")
        .bind(show)
        .bind(Utc::now())
        .bind(id.as_str())
        .execute(pool)
        .await
        .context("Failed to update product visibility")?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }
    get_product(pool, id).await
}

/// Delete a product by id
pub async fn delete_product(pool: &SqlitePool, id: &ProductId) -> Result<bool> {
    let result = sqlx::query("DELETE FROM products WHERE id = ?")
        .bind(id.as_str())
        .execute(pool)
        .await
        .context("Failed to delete product")?;

    Ok(result.rows_affected() > 0)
}
