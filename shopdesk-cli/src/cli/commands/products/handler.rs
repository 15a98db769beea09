//! Products command handler

use anyhow::{Context, Result};
use colored::*;
use dialoguer::Confirm;
use is_terminal::IsTerminal;
use serde::Serialize;
use std::path::{Path, PathBuf};

use super::{ProductsCommands, ProductsSubcommand};
use crate::app::AppContext;
use crate::catalog::{CategoryFilter, ImageSource, Product, ProductDraft, ProductId};
use crate::cli::output::{print_json, print_table, yes_no};

pub async fn handle_products_command(app: &AppContext, args: ProductsCommands) -> Result<()> {
    match args.command {
        ProductsSubcommand::List {
            category,
            visible_only,
            json,
        } => list(app, category, visible_only, json).await,
        ProductsSubcommand::Add {
            name,
            description,
            category,
            price,
            stock,
            image,
            hidden,
        } => {
            let mut draft = ProductDraft::new();
            draft.name = name;
            draft.description = description;
            draft.category = category;
            draft.set_price(price)?;
            draft.stock_quantity = stock;
            draft.show = !hidden;
            draft.image = Some(image_source(&image));

            let operator = app.operator()?;
            let product = app.catalog.add(operator, draft).await?;
            println!(
                "{} Added {} ({})",
                "✓".green(),
                product.data.name.bold(),
                product.id.to_string().dimmed()
            );
            Ok(())
        }
        ProductsSubcommand::Edit {
            id,
            name,
            description,
            category,
            price,
            stock,
            image,
        } => {
            let operator = app.operator()?;
            let existing = app.catalog.get(&ProductId::new(id)).await?;
            let mut draft = ProductDraft::from_product(&existing);

            if let Some(name) = name {
                draft.name = name;
            }
            if let Some(description) = description {
                draft.description = description;
            }
            if let Some(category) = category {
                draft.category = category;
            }
            if let Some(price) = price {
                draft.set_price(price)?;
            }
            if let Some(stock) = stock {
                draft.stock_quantity = stock;
            }
            if let Some(image) = image {
                draft.image = Some(image_source(&image));
            }

            let product = app.catalog.update(operator, draft).await?;
            println!("{} Updated {}", "✓".green(), product.data.name.bold());
            Ok(())
        }
        ProductsSubcommand::Toggle { id } => {
            let operator = app.operator()?;
            let product = app
                .catalog
                .toggle_visibility(operator, &ProductId::new(id))
                .await?;
            let state = if product.data.show {
                "visible".green()
            } else {
                "hidden".yellow()
            };
            println!("{} is now {}", product.data.name.bold(), state);
            Ok(())
        }
        ProductsSubcommand::Delete { id, yes } => {
            let operator = app.operator()?;
            let id = ProductId::new(id);
            let product = app.catalog.get(&id).await?;

            if !yes && !confirm_delete(&product)? {
                println!("Cancelled");
                return Ok(());
            }

            app.catalog.delete(operator, &id).await?;
            println!("{} Deleted {}", "✓".green(), product.data.name.bold());
            Ok(())
        }
        ProductsSubcommand::Export { file, category } => export(app, &file, category).await,
    }
}

async fn list(app: &AppContext, filter: CategoryFilter, visible_only: bool, json: bool) -> Result<()> {
    app.catalog.refresh().await?;
    let products: Vec<Product> = app
        .catalog
        .list(filter)
        .into_iter()
        .filter(|p| !visible_only || p.data.show)
        .collect();

    if json {
        return print_json(&products);
    }

    if products.is_empty() {
        println!("{}", "No products".dimmed());
        return Ok(());
    }

    let rows: Vec<Vec<String>> = products
        .iter()
        .map(|p| {
            vec![
                p.id.to_string(),
                p.data.name.clone(),
                p.data.category.label().to_string(),
                app.format_price(p.data.price),
                p.data.stock_quantity.to_string(),
                yes_no(p.data.show).to_string(),
            ]
        })
        .collect();
    print_table(&["ID", "Name", "Category", "Price", "Stock", "Visible"], &rows);
    println!("{}", format!("{} product(s)", products.len()).dimmed());
    Ok(())
}

/// Flat CSV row for one product
#[derive(Serialize)]
struct ExportRow<'a> {
    id: &'a str,
    name: &'a str,
    description: &'a str,
    category: &'a str,
    price: f64,
    stock_quantity: u32,
    image: &'a str,
    show: bool,
    created_on: Option<String>,
    updated_on: Option<String>,
}

impl<'a> From<&'a Product> for ExportRow<'a> {
    fn from(product: &'a Product) -> Self {
        let data = &product.data;
        ExportRow {
            id: product.id.as_str(),
            name: &data.name,
            description: &data.description,
            category: data.category.slug(),
            price: data.price,
            stock_quantity: data.stock_quantity,
            image: &data.image,
            show: data.show,
            created_on: data.created_on.map(|t| t.to_rfc3339()),
            updated_on: data.updated_on.map(|t| t.to_rfc3339()),
        }
    }
}

fn write_csv(path: &Path, products: &[Product]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
    for product in products {
        writer
            .serialize(ExportRow::from(product))
            .with_context(|| format!("Failed to write product {}", product.id))?;
    }
    writer.flush().context("Failed to flush CSV file")?;
    Ok(())
}

async fn export(app: &AppContext, file: &Path, filter: CategoryFilter) -> Result<()> {
    app.catalog.refresh().await?;
    let products = app.catalog.list(filter);
    write_csv(file, &products)?;
    println!(
        "{} Exported {} product(s) to {}",
        "✓".green(),
        products.len(),
        file.display().to_string().bright_green()
    );
    Ok(())
}

fn confirm_delete(product: &Product) -> Result<bool> {
    if !std::io::stdin().is_terminal() {
        anyhow::bail!("Refusing to delete without confirmation; pass --yes");
    }
    Confirm::new()
        .with_prompt(format!("Delete '{}'? This cannot be undone", product.data.name))
        .default(false)
        .interact()
        .context("Failed to read confirmation")
}

/// URLs are kept as they are; anything else is a local file to upload
fn image_source(value: &str) -> ImageSource {
    let lower = value.to_lowercase();
    if ["http://", "https://", "file://"]
        .iter()
        .any(|scheme| lower.starts_with(scheme))
    {
        ImageSource::Url(value.to_string())
    } else {
        ImageSource::File(PathBuf::from(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Category, ProductData};

    #[test]
    fn test_image_source_detection() {
        assert_eq!(
            image_source("https://cdn.example/p.jpg"),
            ImageSource::Url("https://cdn.example/p.jpg".to_string())
        );
        assert_eq!(
            image_source("./photos/panel.jpg"),
            ImageSource::File(PathBuf::from("./photos/panel.jpg"))
        );
    }

    #[test]
    fn test_write_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.csv");
        let products = vec![Product {
            id: ProductId::new("p-1"),
            data: ProductData {
                name: "LED Panel, 60x60".to_string(),
                description: "Warm white".to_string(),
                category: Category::LightingGroup,
                price: 15000.0,
                stock_quantity: 4,
                image: "file:///img.jpg".to_string(),
                show: true,
                created_on: None,
                updated_on: None,
            },
        }];

        write_csv(&path, &products).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(&headers[0], "id");
        assert_eq!(&headers[3], "category");

        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(&record[1], "LED Panel, 60x60");
        assert_eq!(&record[3], "lighting-group");
        assert_eq!(&record[5], "4");
    }
}
