mod app;
mod catalog;
mod cli;
mod config;
mod services;
mod session;
mod store;

use anyhow::Result;
use clap::Parser;
use is_terminal::IsTerminal;
use log::debug;

use app::AppContext;
use cli::{Cli, Commands};
use config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::init_from_env(env_logger::Env::default().default_filter_or(default_level));

    if cli.no_color || !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    run(cli).await
}

/// Load the config and dispatch one parsed command line
async fn run(cli: Cli) -> Result<()> {
    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::default_path()?,
    };
    let config = Config::load_from(&config_path)?;
    debug!("Using config at {}", config_path.display());

    let database = cli.database.as_deref();
    let operator = cli.operator.as_deref();
    let open = |config| AppContext::open(config, database, operator);

    match cli.command {
        // Settings only touch the config file, so no store is opened
        Commands::Settings(args) => {
            cli::commands::settings::handler::handle_settings_command(config, &config_path, args)
        }
        Commands::Products(args) => {
            let app = open(config).await?;
            cli::commands::products::handler::handle_products_command(&app, args).await
        }
        Commands::Search(args) => {
            let app = open(config).await?;
            cli::commands::search::handler::handle_search_command(&app, args).await
        }
        Commands::Orders(args) => {
            let app = open(config).await?;
            cli::commands::orders::handler::handle_orders_command(&app, args).await
        }
        Commands::Overview(args) => {
            let app = open(config).await?;
            cli::commands::overview::handler::handle_overview_command(&app, args).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Currency;

    // A database path whose parent is a regular file can never be opened
    fn blocked_database(dir: &std::path::Path) -> String {
        let blocker = dir.join("blocker");
        std::fs::write(&blocker, b"").unwrap();
        blocker.join("shop.db").display().to_string()
    }

    #[tokio::test]
    async fn test_settings_run_without_a_store() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        let cli = Cli::try_parse_from([
            "shopdesk",
            "--config",
            config_path.to_str().unwrap(),
            "--database",
            &blocked_database(dir.path()),
            "settings",
            "set-currency",
            "usd",
        ])
        .unwrap();

        run(cli).await.unwrap();
        let saved = Config::load_from(&config_path).unwrap();
        assert_eq!(saved.settings.currency, Currency::Usd);
    }

    #[tokio::test]
    async fn test_catalog_commands_open_the_store() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        let cli = Cli::try_parse_from([
            "shopdesk",
            "--config",
            config_path.to_str().unwrap(),
            "--database",
            &blocked_database(dir.path()),
            "search",
            "panel",
        ])
        .unwrap();

        let err = run(cli).await.unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to open store"));
    }
}
