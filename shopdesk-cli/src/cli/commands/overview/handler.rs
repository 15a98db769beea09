//! Overview command handler

use anyhow::Result;
use colored::*;
use serde::Serialize;

use super::{OverviewCommands, OverviewSubcommand};
use crate::app::AppContext;
use crate::cli::output::{print_json, print_table};
use crate::services::orders::OrderTab;
use crate::services::overview::{TimeFrame, products_by_category, sales_by_period};

#[derive(Serialize)]
struct CategoryCount {
    category: &'static str,
    label: &'static str,
    products: usize,
}

pub async fn handle_overview_command(app: &AppContext, args: OverviewCommands) -> Result<()> {
    match args.command {
        OverviewSubcommand::Sales { timeframe, json } => sales(app, timeframe, json).await,
        OverviewSubcommand::Categories { json } => categories(app, json).await,
    }
}

async fn sales(app: &AppContext, timeframe: TimeFrame, json: bool) -> Result<()> {
    let orders = app.orders.list(OrderTab::All).await?;
    let totals = sales_by_period(&orders, timeframe);
    if json {
        return print_json(&totals);
    }

    if totals.is_empty() {
        println!("{}", "No paid sales yet".dimmed());
        return Ok(());
    }

    let rows: Vec<Vec<String>> = totals
        .iter()
        .map(|t| vec![t.label.clone(), app.format_price(t.amount)])
        .collect();
    print_table(&["Period", "Sales"], &rows);

    let grand_total: f64 = totals.iter().map(|t| t.amount).sum();
    println!("{} {}", "Total:".bold(), app.format_price(grand_total));
    Ok(())
}

async fn categories(app: &AppContext, json: bool) -> Result<()> {
    let snapshot = app.catalog.refresh().await?;
    if snapshot.is_empty() && !json {
        println!("{}", "No products".dimmed());
        return Ok(());
    }
    let counts = products_by_category(snapshot.products());

    if json {
        let counts: Vec<CategoryCount> = counts
            .iter()
            .map(|(category, products)| CategoryCount {
                category: category.slug(),
                label: category.label(),
                products: *products,
            })
            .collect();
        return print_json(&counts);
    }

    let rows: Vec<Vec<String>> = counts
        .iter()
        .map(|(category, count)| vec![category.label().to_string(), count.to_string()])
        .collect();
    print_table(&["Category", "Products"], &rows);
    Ok(())
}
