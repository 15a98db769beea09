//! Catalog operations over a product store and an image store
//!
//! Every write republishes the whole catalog on the feed, so subscribers always
//! see an ordered snapshot that reflects the store.

use anyhow::{Context, Result};
use chrono::Utc;
use log::{debug, info};
use std::sync::Arc;

use super::editor::{EditMode, ImageSource, ProductDraft, image_object_path};
use super::feed::{CatalogFeed, CatalogSnapshot, Subscription};
use super::models::{CategoryFilter, Product, ProductId};
use crate::session::OperatorContext;
use crate::store::{ImageStore, ProductStore};

#[derive(Clone)]
pub struct Catalog {
    products: Arc<dyn ProductStore>,
    images: Arc<dyn ImageStore>,
    feed: CatalogFeed,
}

impl Catalog {
    pub fn new(products: Arc<dyn ProductStore>, images: Arc<dyn ImageStore>) -> Self {
        Self {
            products,
            images,
            feed: CatalogFeed::new(),
        }
    }

    /// Reload every product from the store and publish it
    pub async fn refresh(&self) -> Result<CatalogSnapshot> {
        let products = self
            .products
            .list_products()
            .await
            .context("Failed to load catalog")?;
        debug!("Loaded {} product(s)", products.len());
        self.feed.publish(products);
        Ok(self.feed.current())
    }

    pub fn subscribe(&self) -> Subscription {
        self.feed.subscribe()
    }

    /// Products in the current snapshot that fall under `filter`, in store order
    pub fn list(&self, filter: CategoryFilter) -> Vec<Product> {
        self.feed
            .current()
            .products()
            .iter()
            .filter(|p| filter.includes(p))
            .cloned()
            .collect()
    }

    pub async fn get(&self, id: &ProductId) -> Result<Product> {
        self.products
            .get_product(id)
            .await?
            .with_context(|| format!("Product not found: {}", id))
    }

    /// Create a product from a create-mode draft
    pub async fn add(&self, operator: &OperatorContext, draft: ProductDraft) -> Result<Product> {
        if draft.mode() != &EditMode::Create {
            anyhow::bail!("Draft was opened for editing, not for a new product");
        }
        draft.validate()?;

        let image = self.resolve_image(&draft).await?;
        let product = self
            .products
            .insert_product(&draft.to_data(image))
            .await
            .context("Failed to add product")?;

        info!("{} added product {} ({})", operator, product.id, product.data.name);
        self.refresh().await?;
        Ok(product)
    }

    /// Write every field of an edit-mode draft back to its product
    pub async fn update(&self, operator: &OperatorContext, draft: ProductDraft) -> Result<Product> {
        let id = match draft.mode() {
            EditMode::Edit(id) => id.clone(),
            EditMode::Create => anyhow::bail!("Draft has no product to update"),
        };
        draft.validate()?;

        let image = self.resolve_image(&draft).await?;
        let product = self
            .products
            .update_product(&id, &draft.to_data(image))
            .await
            .with_context(|| format!("Failed to update product {}", id))?
            .with_context(|| format!("Product not found: {}", id))?;

        info!("{} updated product {}", operator, id);
        self.refresh().await?;
        Ok(product)
    }

    /// Flip whether shoppers can see a product
    pub async fn toggle_visibility(&self, operator: &OperatorContext, id: &ProductId) -> Result<Product> {
        let current = self.get(id).await?;
        let product = self
            .products
            .set_visibility(id, !current.data.show)
            .await
            .with_context(|| format!("Failed to change visibility of {}", id))?
            .with_context(|| format!("Product not found: {}", id))?;

        info!(
            "{} made product {} {}",
            operator,
            id,
            if product.data.show { "visible" } else { "hidden" }
        );
        self.refresh().await?;
        Ok(product)
    }

    pub async fn delete(&self, operator: &OperatorContext, id: &ProductId) -> Result<()> {
        let deleted = self
            .products
            .delete_product(id)
            .await
            .with_context(|| format!("Failed to delete product {}", id))?;
        if !deleted {
            anyhow::bail!("Product not found: {}", id);
        }

        info!("{} deleted product {}", operator, id);
        self.refresh().await?;
        Ok(())
    }

    /// Upload a local image or keep an existing URL
    async fn resolve_image(&self, draft: &ProductDraft) -> Result<String> {
        match &draft.image {
            Some(ImageSource::File(path)) => {
                let object_path = image_object_path(&draft.name, Utc::now());
                self.images.upload(path, &object_path).await
            }
            Some(ImageSource::Url(url)) => Ok(url.clone()),
            None => Ok(String::new()),
        }
    }
}
