//! Product catalog: model, shared editor, live feed and the service tying
//! them to the backing stores

pub mod editor;
pub mod feed;
pub mod models;
pub mod service;

pub use editor::{ImageSource, ProductDraft};
pub use feed::{CatalogSnapshot, Subscription};
pub use models::{Category, CategoryFilter, Product, ProductData, ProductId};
pub use service::Catalog;
