use anyhow::{Context, Result};
use sqlx::SqlitePool;

const STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS products (
        id TEXT PRIMARY KEY NOT NULL,
        name TEXT,
        description TEXT NOT NULL DEFAULT '',
        category TEXT NOT NULL,
        price REAL NOT NULL DEFAULT 0,
        stock_quantity INTEGER NOT NULL DEFAULT 0,
        image TEXT NOT NULL DEFAULT '',
        show INTEGER NOT NULL DEFAULT 1,
        created_on TEXT,
        updated_on TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS orders (
        id TEXT PRIMARY KEY NOT NULL,
        paid INTEGER NOT NULL DEFAULT 0,
        rejected INTEGER NOT NULL DEFAULT 0,
        body TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_products_category ON products(category)",
    "CREATE INDEX IF NOT EXISTS idx_orders_status ON orders(rejected, paid)",
];

/// Create tables and indexes if they do not exist yet
pub async fn apply(pool: &SqlitePool) -> Result<()> {
    for statement in STATEMENTS {
        sqlx::query(statement)
            .execute(pool)
            .await
            .context("Failed to apply database schema")?;
    }
    Ok(())
}
