//! Orders command handler

use anyhow::{Context, Result};
use colored::*;
use std::fs;
use std::path::Path;

use super::{OrdersCommands, OrdersSubcommand};
use crate::app::AppContext;
use crate::cli::output::{print_json, print_table, yes_no};
use crate::services::orders::{Order, OrderTab, OrderUpdate};

pub async fn handle_orders_command(app: &AppContext, args: OrdersCommands) -> Result<()> {
    match args.command {
        OrdersSubcommand::List { tab, json } => list(app, tab, json).await,
        OrdersSubcommand::Show { id, json } => {
            let order = app.orders.get(&id).await?;
            if json {
                return print_json(&order);
            }
            show(app, &order);
            Ok(())
        }
        OrdersSubcommand::TogglePaid { id } => toggle(app, &id, OrderUpdate::TogglePaid).await,
        OrdersSubcommand::ToggleRejected { id } => {
            toggle(app, &id, OrderUpdate::ToggleRejected).await
        }
        OrdersSubcommand::Import { file } => import(app, &file).await,
    }
}

async fn list(app: &AppContext, tab: OrderTab, json: bool) -> Result<()> {
    let orders = app.orders.list(tab).await?;
    if json {
        return print_json(&orders);
    }

    println!("{}", tab.label().bold().underline());
    if orders.is_empty() {
        println!("{}", "No orders".dimmed());
        return Ok(());
    }

    let rows: Vec<Vec<String>> = orders
        .iter()
        .map(|o| {
            vec![
                o.id.clone(),
                o.order_id.clone(),
                o.date
                    .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_default(),
                o.phone.clone(),
                format!("{} {}", o.currency, o.amount),
                o.payment_label().to_string(),
                o.status_label().to_string(),
            ]
        })
        .collect();
    print_table(
        &["ID", "Order", "Date", "Phone", "Amount", "Payment", "Status"],
        &rows,
    );
    println!("{}", format!("{} order(s)", orders.len()).dimmed());
    Ok(())
}

fn show(app: &AppContext, order: &Order) {
    println!("{} {}", "Order".bold(), order.order_id.bold());
    println!("  ID:       {}", order.id.dimmed());
    if let Some(date) = order.date {
        println!("  Date:     {}", date.format("%Y-%m-%d %H:%M"));
    }
    println!("  Phone:    {}", order.phone);
    if let Some(tin) = &order.tin {
        println!("  TIN:      {}", tin);
    }
    if let Some(location) = order.delivery_location {
        println!("  Delivery: {:.5}, {:.5}", location.latitude, location.longitude);
    }
    let payment = if order.paid {
        order.payment_label().green()
    } else {
        order.payment_label().yellow()
    };
    let status = if order.rejected {
        order.status_label().red()
    } else {
        order.status_label().normal()
    };
    println!("  Payment:  {}", payment);
    println!("  Status:   {}", status);
    println!("  Accepted: {}", yes_no(order.accepted));
    println!("  Served:   {}", yes_no(order.served));
    println!();

    if order.products.is_empty() {
        println!("{}", "No product lines".dimmed());
    } else {
        let rows: Vec<Vec<String>> = order
            .products
            .iter()
            .map(|line| {
                vec![
                    line.product_name.clone(),
                    line.quantity.to_string(),
                    format!("{} {}", line.currency, line.price),
                    format!("{} {}", line.currency, line.total()),
                ]
            })
            .collect();
        print_table(&["Product", "Qty", "Price", "Total"], &rows);
        println!();
    }

    println!(
        "  {} {} {}",
        "Amount:".bold(),
        order.currency,
        order.amount
    );
    if (order.lines_total() - order.amount).abs() > f64::EPSILON && !order.products.is_empty() {
        println!(
            "  {}",
            format!("Lines add up to {}", app.format_price(order.lines_total())).dimmed()
        );
    }
}

async fn toggle(app: &AppContext, id: &str, update: OrderUpdate) -> Result<()> {
    let operator = app.operator()?;
    let order = app.orders.update(operator, id, update).await?;
    println!(
        "{} Order {} is now {} / {}",
        "✓".green(),
        order.order_id.bold(),
        order.payment_label(),
        order.status_label()
    );
    Ok(())
}

fn read_orders(path: &Path) -> Result<Vec<Order>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read orders file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse orders from {}", path.display()))
}

async fn import(app: &AppContext, path: &Path) -> Result<()> {
    let operator = app.operator()?;
    let orders = read_orders(path)?;
    let written = app.orders.import(operator, orders).await?;
    println!(
        "{} Imported {} order(s) from {}",
        "✓".green(),
        written,
        path.display()
    );
    Ok(())
}
