//! `overview` subcommands

pub mod handler;

use clap::{Args, Subcommand};

use crate::services::overview::TimeFrame;

#[derive(Args, Debug)]
pub struct OverviewCommands {
    #[command(subcommand)]
    pub command: OverviewSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum OverviewSubcommand {
    /// Paid sales summed per period
    Sales {
        #[arg(short, long, value_enum, default_value_t = TimeFrame::Daily)]
        timeframe: TimeFrame,

        #[arg(long)]
        json: bool,
    },
    /// Number of products in each category
    Categories {
        #[arg(long)]
        json: bool,
    },
}
