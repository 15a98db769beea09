//! Sales and category aggregates for the overview screen

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;
use std::collections::HashMap;

use crate::catalog::{Category, Product};
use crate::services::orders::Order;

/// Granularity of the sales breakdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum TimeFrame {
    #[default]
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

/// Summed sales for one period
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodTotal {
    pub label: String,
    pub amount: f64,
}

/// Week of the year, counting the partial week holding Jan 1 as week 1
/// and starting weeks on Sunday
pub fn week_number(date: DateTime<Utc>) -> u32 {
    let days = date.ordinal0();
    let jan1_weekday = date
        .with_ordinal0(0)
        .map(|jan1| jan1.weekday().num_days_from_sunday())
        .unwrap_or(0);
    (days + jan1_weekday + 1).div_ceil(7)
}

/// Label of the period `date` falls into
pub fn period_label(date: DateTime<Utc>, time_frame: TimeFrame) -> String {
    match time_frame {
        TimeFrame::Daily => format!("{} {}", date.format("%b"), date.day()),
        TimeFrame::Weekly => format!("Week {}", week_number(date)),
        TimeFrame::Monthly => date.format("%B").to_string(),
        TimeFrame::Yearly => date.year().to_string(),
    }
}

/// Whether an order counts toward sales
pub fn is_sale(order: &Order) -> bool {
    order.paid && !order.rejected && order.date.is_some()
}

/// Sum paid, non-rejected order amounts per period
///
/// Periods come back in the order of the earliest sale in each.
pub fn sales_by_period(orders: &[Order], time_frame: TimeFrame) -> Vec<PeriodTotal> {
    let mut periods: HashMap<String, (DateTime<Utc>, f64)> = HashMap::new();

    for order in orders.iter().filter(|o| is_sale(o)) {
        let Some(date) = order.date else { continue };
        let entry = periods
            .entry(period_label(date, time_frame))
            .or_insert((date, 0.0));
        entry.0 = entry.0.min(date);
        entry.1 += order.amount;
    }

    let mut totals: Vec<(DateTime<Utc>, PeriodTotal)> = periods
        .into_iter()
        .map(|(label, (earliest, amount))| (earliest, PeriodTotal { label, amount }))
        .collect();
    totals.sort_by(|a, b| a.0.cmp(&b.0));
    totals.into_iter().map(|(_, total)| total).collect()
}

/// Number of products per category, in order of first appearance
pub fn products_by_category(products: &[Product]) -> Vec<(Category, usize)> {
    let mut counts: Vec<(Category, usize)> = Vec::new();
    for product in products {
        match counts.iter_mut().find(|(c, _)| *c == product.data.category) {
            Some((_, count)) => *count += 1,
            None => counts.push((product.data.category, 1)),
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ProductData, ProductId};
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn order(date: Option<DateTime<Utc>>, amount: f64, paid: bool, rejected: bool) -> Order {
        let mut order: Order = serde_json::from_value(serde_json::json!({
            "amount": amount,
            "paid": paid,
            "rejected": rejected,
        }))
        .unwrap();
        order.date = date;
        order
    }

    fn product(category: Category) -> Product {
        Product {
            id: ProductId::new("p"),
            data: ProductData {
                name: "p".to_string(),
                description: String::new(),
                category,
                price: 0.0,
                stock_quantity: 0,
                image: String::new(),
                show: true,
                created_on: None,
                updated_on: None,
            },
        }
    }

    #[test]
    fn test_week_number() {
        // 2024-01-01 is a Monday
        assert_eq!(week_number(at(2024, 1, 1)), 1);
        assert_eq!(week_number(at(2024, 1, 6)), 1);
        assert_eq!(week_number(at(2024, 1, 7)), 2);
        // 2023-01-01 is a Sunday
        assert_eq!(week_number(at(2023, 1, 7)), 1);
        assert_eq!(week_number(at(2023, 1, 8)), 2);
    }

    #[test]
    fn test_period_labels() {
        let date = at(2024, 10, 19);
        assert_eq!(period_label(date, TimeFrame::Daily), "Oct 19");
        assert_eq!(period_label(at(2024, 3, 5), TimeFrame::Daily), "Mar 5");
        assert_eq!(period_label(date, TimeFrame::Weekly), "Week 42");
        assert_eq!(period_label(date, TimeFrame::Monthly), "October");
        assert_eq!(period_label(date, TimeFrame::Yearly), "2024");
    }

    #[test]
    fn test_only_paid_unrejected_dated_orders_count() {
        let orders = vec![
            order(Some(at(2024, 5, 1)), 1000.0, true, false),
            order(Some(at(2024, 5, 1)), 500.0, false, false),
            order(Some(at(2024, 5, 1)), 700.0, true, true),
            order(None, 900.0, true, false),
        ];
        let totals = sales_by_period(&orders, TimeFrame::Daily);
        assert_eq!(
            totals,
            vec![PeriodTotal {
                label: "May 1".to_string(),
                amount: 1000.0
            }]
        );
    }

    #[test]
    fn test_months_sorted_chronologically() {
        let orders = vec![
            order(Some(at(2024, 9, 3)), 300.0, true, false),
            order(Some(at(2024, 2, 10)), 100.0, true, false),
            order(Some(at(2024, 4, 20)), 200.0, true, false),
            order(Some(at(2024, 2, 28)), 50.0, true, false),
        ];
        let totals = sales_by_period(&orders, TimeFrame::Monthly);
        let labels: Vec<&str> = totals.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["February", "April", "September"]);
        assert_eq!(totals[0].amount, 150.0);
    }

    #[test]
    fn test_empty_orders() {
        assert!(sales_by_period(&[], TimeFrame::Yearly).is_empty());
    }

    #[test]
    fn test_products_by_category_first_seen_order() {
        let products = vec![
            product(Category::GroupSockets),
            product(Category::LightingGroup),
            product(Category::GroupSockets),
        ];
        assert_eq!(
            products_by_category(&products),
            vec![(Category::GroupSockets, 2), (Category::LightingGroup, 1)]
        );
    }
}
