//! Live catalog snapshots
//!
//! The catalog publishes a fresh, ordered snapshot after every write or
//! refresh. Consumers hold a [`Subscription`] for as long as they render from
//! it; dropping the subscription releases it.

use anyhow::{Context, Result};
use log::debug;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::watch;

use super::models::Product;

/// Point-in-time, ordered copy of the catalog
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    version: u64,
    products: Arc<[Product]>,
}

impl CatalogSnapshot {
    fn empty() -> Self {
        Self {
            version: 0,
            products: Arc::from(Vec::new()),
        }
    }

    /// Incremented on every publish; 0 means nothing has been loaded yet
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Publisher side of the catalog feed
#[derive(Debug, Clone)]
pub struct CatalogFeed {
    sender: Arc<watch::Sender<CatalogSnapshot>>,
    subscribers: Arc<AtomicUsize>,
}

impl CatalogFeed {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(CatalogSnapshot::empty());
        Self {
            sender: Arc::new(sender),
            subscribers: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Replace the current snapshot, returning its new version
    pub fn publish(&self, products: Vec<Product>) -> u64 {
        let mut version = 0;
        self.sender.send_modify(|snapshot| {
            snapshot.version += 1;
            snapshot.products = Arc::from(products);
            version = snapshot.version;
        });
        debug!(
            "Catalog feed: published v{} to {} subscriber(s)",
            version,
            self.subscriber_count()
        );
        version
    }

    /// Latest snapshot without subscribing
    pub fn current(&self) -> CatalogSnapshot {
        self.sender.borrow().clone()
    }

    /// Start receiving snapshots. The subscription ends when the guard drops.
    pub fn subscribe(&self) -> Subscription {
        let receiver = self.sender.subscribe();
        let count = self.subscribers.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("Catalog feed: subscriber attached ({} live)", count);
        Subscription {
            receiver,
            subscribers: Arc::clone(&self.subscribers),
        }
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.load(Ordering::SeqCst)
    }
}

impl Default for CatalogFeed {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving side of the catalog feed
#[derive(Debug)]
pub struct Subscription {
    receiver: watch::Receiver<CatalogSnapshot>,
    subscribers: Arc<AtomicUsize>,
}

impl Subscription {
    /// Latest snapshot, marking it as seen
    pub fn snapshot(&mut self) -> CatalogSnapshot {
        self.receiver.borrow_and_update().clone()
    }

    /// Whether a snapshot newer than the last one seen is waiting
    pub fn has_changed(&self) -> bool {
        self.receiver.has_changed().unwrap_or(false)
    }

    /// Wait for the next snapshot
    pub async fn changed(&mut self) -> Result<CatalogSnapshot> {
        self.receiver
            .changed()
            .await
            .context("Catalog feed closed")?;
        Ok(self.receiver.borrow_and_update().clone())
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let remaining = self.subscribers.fetch_sub(1, Ordering::SeqCst) - 1;
        debug!("Catalog feed: subscriber released ({} live)", remaining);
    }
}
