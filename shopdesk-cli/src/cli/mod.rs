//! Command-line interface definition

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{
    orders::OrdersCommands, overview::OverviewCommands, products::ProductsCommands,
    search::SearchCommands, settings::SettingsCommands,
};

#[derive(Parser, Debug)]
#[command(name = "shopdesk")]
#[command(about = "Back office for a small product catalog and its orders")]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Operator email used for changes (overrides SHOPDESK_OPERATOR and the config)
    #[arg(long, global = true, value_name = "EMAIL")]
    pub operator: Option<String>,

    /// SQLite database to use (overrides SHOPDESK_DATABASE and the config)
    #[arg(long, global = true, value_name = "PATH")]
    pub database: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage catalog products
    Products(ProductsCommands),
    /// Find products by approximate name
    Search(SearchCommands),
    /// View and update incoming orders
    Orders(OrdersCommands),
    /// Sales and category summaries
    Overview(OverviewCommands),
    /// Operator preferences
    Settings(SettingsCommands),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "shopdesk",
            "search",
            "panel",
            "-vv",
            "--operator",
            "ops@shop.rw",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.operator.as_deref(), Some("ops@shop.rw"));
        assert!(matches!(cli.command, Commands::Search(_)));
    }
}
