//! Product editing shared by the add and edit flows
//!
//! A [`ProductDraft`] carries the editable fields of a product together with
//! the mode it was opened in. Create drafts start from defaults and need an
//! image; edit drafts start from an existing product and keep its image unless
//! a new one is supplied.

use chrono::{DateTime, Utc};
use regex::Regex;
use std::fmt;
use std::path::PathBuf;

use super::models::{Category, Product, ProductData, ProductId};

/// Whether a draft creates a new product or edits an existing one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditMode {
    Create,
    Edit(ProductId),
}

/// Where the product image comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Local file that still has to be uploaded
    File(PathBuf),
    /// Image already in object storage
    Url(String),
}

/// Reasons a draft cannot be saved
#[derive(Debug, Clone, PartialEq)]
pub enum DraftError {
    MissingName,
    MissingDescription,
    MissingImage,
    InvalidPrice(f64),
}

impl fmt::Display for DraftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DraftError::MissingName => write!(f, "product name is required"),
            DraftError::MissingDescription => write!(f, "product description is required"),
            DraftError::MissingImage => write!(f, "an image must be uploaded for new products"),
            DraftError::InvalidPrice(price) => {
                write!(f, "price must be a non-negative number, got {}", price)
            }
        }
    }
}

impl std::error::Error for DraftError {}

/// Editable product fields plus the mode they were opened in
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    mode: EditMode,
    pub name: String,
    pub description: String,
    pub category: Category,
    price: f64,
    pub stock_quantity: u32,
    pub show: bool,
    pub image: Option<ImageSource>,
    created_on: Option<DateTime<Utc>>,
}

impl ProductDraft {
    /// Blank draft for the add flow
    pub fn new() -> Self {
        ProductDraft {
            mode: EditMode::Create,
            name: String::new(),
            description: String::new(),
            category: Category::default(),
            price: 0.0,
            stock_quantity: 0,
            show: true,
            image: None,
            created_on: None,
        }
    }

    /// Draft pre-filled from an existing product for the edit flow
    pub fn from_product(product: &Product) -> Self {
        let data = &product.data;
        ProductDraft {
            mode: EditMode::Edit(product.id.clone()),
            name: data.name.clone(),
            description: data.description.clone(),
            category: data.category,
            price: data.price,
            stock_quantity: data.stock_quantity,
            show: data.show,
            image: (!data.image.is_empty()).then(|| ImageSource::Url(data.image.clone())),
            created_on: data.created_on,
        }
    }

    pub fn mode(&self) -> &EditMode {
        &self.mode
    }

    pub fn set_price(&mut self, price: f64) -> Result<(), DraftError> {
        if !price.is_finite() || price < 0.0 {
            return Err(DraftError::InvalidPrice(price));
        }
        self.price = price;
        Ok(())
    }

    /// Check the draft can be written in its current mode
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.name.trim().is_empty() {
            return Err(DraftError::MissingName);
        }
        if self.description.trim().is_empty() {
            return Err(DraftError::MissingDescription);
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(DraftError::InvalidPrice(self.price));
        }
        if self.mode == EditMode::Create && self.image.is_none() {
            return Err(DraftError::MissingImage);
        }
        Ok(())
    }

    /// Payload to hand to the store once the image URL is known
    pub fn to_data(&self, image_url: String) -> ProductData {
        ProductData {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            category: self.category,
            price: self.price,
            stock_quantity: self.stock_quantity,
            image: image_url,
            show: self.show,
            created_on: self.created_on,
            updated_on: None,
        }
    }
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self::new()
    }
}

/// Object-storage path for a freshly uploaded product image
///
/// Runs of whitespace and path separators in the name collapse to `_`, so the
/// name always stays a single path segment. The upload time in milliseconds
/// is appended: `products/LED_Panel_1718000000000.jpg`.
pub fn image_object_path(name: &str, now: DateTime<Utc>) -> String {
    let separators = Regex::new(r"[\s/\\]+").expect("static regex is valid");
    format!(
        "products/{}_{}.jpg",
        separators.replace_all(name.trim(), "_"),
        now.timestamp_millis()
    )
}
