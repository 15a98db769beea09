//! Order collection repository
//!
//! Orders are stored as JSON documents. `paid` and `rejected` are mirrored in
//! their own columns and take precedence over the document body on read.

use anyhow::{Context, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::services::orders::{Order, OrderUpdate};

fn row_to_order(row: &SqliteRow) -> Result<Order> {
    let id: String = row.try_get("id")?;
    let body: String = row.try_get("body")?;
    let mut order: Order = serde_json::from_str(&body)
        .with_context(|| format!("Failed to deserialize order {}", id))?;

    order.id = id;
    order.paid = row.try_get("paid")?;
    order.rejected = row.try_get("rejected")?;
    Ok(order)
}

/// List all orders in arrival order
pub async fn list_orders(pool: &SqlitePool) -> Result<Vec<Order>> {
    let rows = sqlx::query("SELECT id, paid, rejected, body FROM orders ORDER BY rowid")
        .fetch_all(pool)
        .await
        .context("Failed to list orders")?;

    rows.iter().map(row_to_order).collect()
}

/// Get an order by document id
pub async fn get_order(pool: &SqlitePool, id: &str) -> Result<Option<Order>> {
    let row = sqlx::query("SELECT id, paid, rejected, body FROM orders WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to get order")?;

    row.as_ref().map(row_to_order).transpose()
}

/// Apply a status toggle inside a transaction
pub async fn apply_update(pool: &SqlitePool, id: &str, update: OrderUpdate) -> Result<Option<Order>> {
    let mut tx = pool.begin().await.context("Failed to start transaction")?;

    let row = sqlx::query("SELECT id, paid, rejected, body FROM orders WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .context("Failed to load order for update")?;

    let mut order = match row {
        Some(row) => row_to_order(&row)?,
        None => return Ok(None),
    };

    update.apply(&mut order);

    let body = serde_json::to_string(&order).context("Failed to serialize order")?;
    sqlx::query("UPDATE orders SET paid = ?, rejected = ?, body = ? WHERE id = ?")
        .bind(order.paid)
        .bind(order.rejected)
        .bind(body)
        .bind(id)
        .execute(&mut *tx)
        .await
        .context("Failed to write order update")?;

    tx.commit().await.context("Failed to commit order update")?;
    Ok(Some(order))
}

/// Insert or replace orders by id; existing orders keep their position
pub async fn upsert_orders(pool: &SqlitePool, orders: &[Order]) -> Result<usize> {
    let mut tx = pool.begin().await.context("Failed to start transaction")?;

    for order in orders {
        let body = serde_json::to_string(order)
            .with_context(|| format!("Failed to serialize order {}", order.id))?;
        sqlx::query(
            "INSERT INTO orders (id, paid, rejected, body) VALUES (?, ?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET
                paid = excluded.paid,
                rejected = excluded.rejected,
                body = excluded.body",
        )
        .bind(&order.id)
        .bind(order.paid)
        .bind(order.rejected)
        .bind(body)
        .execute(&mut *tx)
        .await
        .with_context(|| format!("Failed to write order {}", order.id))?;
    }

    tx.commit().await.context("Failed to commit order import")?;
    Ok(orders.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SqliteStore;

    fn order(id: &str, paid: bool, rejected: bool) -> Order {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "orderId": format!("N-{}", id),
            "amount": 1000,
            "currency": "RWF",
            "paid": paid,
            "rejected": rejected,
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_upsert_and_list() {
        let store = SqliteStore::in_memory().await.unwrap();
        let written = upsert_orders(
            store.pool(),
            &[order("b", false, false), order("a", true, false)],
        )
        .await
        .unwrap();
        assert_eq!(written, 2);

        let ids: Vec<String> = list_orders(store.pool())
            .await
            .unwrap()
            .into_iter()
            .map(|o| o.id)
            .collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[tokio::test]
    async fn test_upsert_replaces_in_place() {
        let store = SqliteStore::in_memory().await.unwrap();
        upsert_orders(store.pool(), &[order("a", false, false), order("b", false, false)])
            .await
            .unwrap();
        upsert_orders(store.pool(), &[order("a", true, false)]).await.unwrap();

        let orders = list_orders(store.pool()).await.unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].id, "a");
        assert!(orders[0].paid);
    }

    #[tokio::test]
    async fn test_apply_update_persists() {
        let store = SqliteStore::in_memory().await.unwrap();
        upsert_orders(store.pool(), &[order("a", false, false)]).await.unwrap();

        let updated = apply_update(store.pool(), "a", OrderUpdate::ToggleRejected)
            .await
            .unwrap()
            .unwrap();
        assert!(updated.rejected);

        let reloaded = get_order(store.pool(), "a").await.unwrap().unwrap();
        assert!(reloaded.rejected);
        assert!(!reloaded.paid);
        assert_eq!(reloaded.order_id, "N-a");
    }

    #[tokio::test]
    async fn test_apply_update_unknown() {
        let store = SqliteStore::in_memory().await.unwrap();
        let result = apply_update(store.pool(), "nope", OrderUpdate::TogglePaid)
            .await
            .unwrap();
        assert!(result.is_none());
    }
}
