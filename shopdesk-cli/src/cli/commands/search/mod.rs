//! `search` command

pub mod handler;

use clap::Args;

#[derive(Args, Debug)]
pub struct SearchCommands {
    /// Text to look for in product names
    #[arg(required_unless_present = "interactive")]
    pub query: Option<String>,

    /// Read one query per line from stdin and search the live catalog for each
    #[arg(short, long, conflicts_with = "query")]
    pub interactive: bool,

    /// Show why each product matched
    #[arg(long)]
    pub explain: bool,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Override the configured similarity threshold (0 to 1)
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Leave out products hidden from shoppers
    #[arg(long)]
    pub visible_only: bool,

    /// Print at most this many rows (the match count still covers all)
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,
}
