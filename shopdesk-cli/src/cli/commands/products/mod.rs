//! `products` subcommands

pub mod handler;

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::catalog::{Category, CategoryFilter};

#[derive(Args, Debug)]
pub struct ProductsCommands {
    #[command(subcommand)]
    pub command: ProductsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ProductsSubcommand {
    /// List catalog products
    List {
        /// Category slug, or `all`
        #[arg(short, long, default_value = "all")]
        category: CategoryFilter,

        /// Leave out products hidden from shoppers
        #[arg(long)]
        visible_only: bool,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Add a product (an image is required)
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        description: String,

        #[arg(long, default_value = "lighting-group")]
        category: Category,

        #[arg(long, default_value_t = 0.0)]
        price: f64,

        #[arg(long, default_value_t = 0)]
        stock: u32,

        /// Local image file to upload, or an existing image URL
        #[arg(long)]
        image: String,

        /// Create the product hidden from shoppers
        #[arg(long)]
        hidden: bool,
    },
    /// Change fields of an existing product
    Edit {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        category: Option<Category>,

        #[arg(long)]
        price: Option<f64>,

        #[arg(long)]
        stock: Option<u32>,

        /// Replacement image file or URL
        #[arg(long)]
        image: Option<String>,
    },
    /// Show or hide a product from shoppers
    Toggle { id: String },
    /// Delete a product
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Write the catalog to a CSV file
    Export {
        file: PathBuf,

        #[arg(short, long, default_value = "all")]
        category: CategoryFilter,
    },
}
