// Order handling: tab views and status toggles over an OrderStore

pub mod models;

pub use models::{Order, OrderTab, OrderUpdate};

use anyhow::{Context, Result};
use log::info;
use std::sync::Arc;

use crate::session::OperatorContext;
use crate::store::OrderStore;

/// Order operations for the back office
#[derive(Clone)]
pub struct Orders {
    store: Arc<dyn OrderStore>,
}

impl Orders {
    pub fn new(store: Arc<dyn OrderStore>) -> Self {
        Self { store }
    }

    /// Orders shown under `tab`, in store order
    pub async fn list(&self, tab: OrderTab) -> Result<Vec<Order>> {
        let orders = self.store.list_orders().await.context("Failed to load orders")?;
        Ok(orders.into_iter().filter(|o| tab.includes(o)).collect())
    }

    pub async fn get(&self, id: &str) -> Result<Order> {
        self.store
            .get_order(id)
            .await?
            .with_context(|| format!("Order not found: {}", id))
    }

    pub async fn update(
        &self,
        operator: &OperatorContext,
        id: &str,
        update: OrderUpdate,
    ) -> Result<Order> {
        let order = self
            .store
            .apply_update(id, update)
            .await
            .with_context(|| format!("Failed to update order {}", id))?
            .with_context(|| format!("Order not found: {}", id))?;

        info!(
            "{} set order {} to {} / {}",
            operator,
            order.order_id,
            order.payment_label(),
            order.status_label()
        );
        Ok(order)
    }

    /// Load orders delivered outside the back office (JSON array)
    pub async fn import(&self, operator: &OperatorContext, mut orders: Vec<Order>) -> Result<usize> {
        for order in orders.iter_mut() {
            if order.id.is_empty() {
                order.id = uuid::Uuid::new_v4().to_string();
            }
        }
        let written = self.store.import_orders(&orders).await.context("Failed to import orders")?;
        info!("{} imported {} order(s)", operator, written);
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SqliteStore;

    fn order(id: &str, order_id: &str, paid: bool, rejected: bool) -> Order {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "orderId": order_id,
            "amount": 2500,
            "paid": paid,
            "rejected": rejected,
        }))
        .unwrap()
    }

    async fn orders() -> (Orders, OperatorContext) {
        let store = Arc::new(SqliteStore::in_memory().await.unwrap());
        let operator = OperatorContext::new("ops@shop.rw", Some("Aline".to_string())).unwrap();
        (Orders::new(store), operator)
    }

    #[tokio::test]
    async fn test_import_assigns_missing_ids() {
        let (orders, operator) = orders().await;
        let written = orders
            .import(&operator, vec![order("", "N-1", false, false), order("kept", "N-2", false, false)])
            .await
            .unwrap();
        assert_eq!(written, 2);

        let all = orders.list(OrderTab::All).await.unwrap();
        assert!(!all[0].id.is_empty());
        assert_eq!(all[1].id, "kept");
    }

    #[tokio::test]
    async fn test_tabs_and_toggles() {
        let (orders, operator) = orders().await;
        orders
            .import(
                &operator,
                vec![
                    order("a", "N-1", false, false),
                    order("b", "N-2", true, false),
                    order("c", "N-3", false, true),
                ],
            )
            .await
            .unwrap();

        let processing = orders.list(OrderTab::Processing).await.unwrap();
        assert_eq!(processing.len(), 1);
        assert_eq!(processing[0].id, "a");

        let paid = orders.update(&operator, "a", OrderUpdate::TogglePaid).await.unwrap();
        assert!(paid.paid);
        assert!(orders.list(OrderTab::Processing).await.unwrap().is_empty());

        let completed: Vec<String> = orders
            .list(OrderTab::Completed)
            .await
            .unwrap()
            .into_iter()
            .map(|o| o.id)
            .collect();
        assert_eq!(completed, vec!["a", "b"]);

        orders.update(&operator, "b", OrderUpdate::ToggleRejected).await.unwrap();
        assert_eq!(orders.list(OrderTab::Rejected).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_order() {
        let (orders, operator) = orders().await;
        assert!(orders.get("missing").await.is_err());
        assert!(orders
            .update(&operator, "missing", OrderUpdate::TogglePaid)
            .await
            .is_err());
    }
}
