//! `orders` subcommands

pub mod handler;

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::services::orders::OrderTab;

#[derive(Args, Debug)]
pub struct OrdersCommands {
    #[command(subcommand)]
    pub command: OrdersSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum OrdersSubcommand {
    /// List orders under a tab
    List {
        #[arg(short, long, value_enum, default_value_t = OrderTab::Processing)]
        tab: OrderTab,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show one order with its lines
    Show {
        id: String,

        #[arg(long)]
        json: bool,
    },
    /// Mark an order paid, or unpaid again
    TogglePaid { id: String },
    /// Reject an order, or restore it
    ToggleRejected { id: String },
    /// Load a JSON array of orders from the ordering channel
    Import { file: PathBuf },
}
