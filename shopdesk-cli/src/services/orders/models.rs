//! Order types as delivered by the ordering channel

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single product line on an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub price: f64,
    /// Product id the line refers to
    #[serde(default)]
    pub product: String,
    #[serde(default)]
    pub product_image: String,
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub quantity: u32,
}

impl OrderLine {
    pub fn total(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeliveryLocation {
    pub latitude: f64,
    pub longitude: f64,
}

/// An incoming customer order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Store document id
    #[serde(default)]
    pub id: String,
    /// Customer-facing order number
    #[serde(default)]
    pub order_id: String,
    #[serde(rename = "TIN", default, skip_serializing_if = "Option::is_none")]
    pub tin: Option<String>,
    #[serde(default)]
    pub accepted: bool,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub country_code: String,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_location: Option<DeliveryLocation>,
    #[serde(default)]
    pub paid: bool,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub products: Vec<OrderLine>,
    #[serde(default)]
    pub rejected: bool,
    #[serde(default)]
    pub served: bool,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub vendor: String,
}

impl Order {
    /// Sum of line totals; may differ from `amount` if the channel applied fees
    pub fn lines_total(&self) -> f64 {
        self.products.iter().map(OrderLine::total).sum()
    }

    pub fn payment_label(&self) -> &'static str {
        if self.paid { "Paid" } else { "Unpaid" }
    }

    pub fn status_label(&self) -> &'static str {
        if self.rejected { "Rejected" } else { "Active" }
    }
}

/// Order list views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OrderTab {
    /// Not rejected and not yet paid
    #[default]
    Processing,
    /// Not rejected and paid
    Completed,
    /// Rejected, paid or not
    Rejected,
    /// Everything
    All,
}

impl OrderTab {
    pub fn includes(&self, order: &Order) -> bool {
        match self {
            OrderTab::Processing => !order.rejected && !order.paid,
            OrderTab::Completed => !order.rejected && order.paid,
            OrderTab::Rejected => order.rejected,
            OrderTab::All => true,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OrderTab::Processing => "Processing",
            OrderTab::Completed => "Completed",
            OrderTab::Rejected => "Rejected",
            OrderTab::All => "All",
        }
    }
}

/// Status toggles an operator can apply to an order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderUpdate {
    TogglePaid,
    ToggleRejected,
}

impl OrderUpdate {
    pub fn apply(&self, order: &mut Order) {
        match self {
            OrderUpdate::TogglePaid => order.paid = !order.paid,
            OrderUpdate::ToggleRejected => order.rejected = !order.rejected,
        }
    }
}
