//! Wiring of config, stores and services for a single CLI invocation

use anyhow::{Context, Result};
use log::debug;
use std::path::Path;
use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::{Config, DATABASE_ENV};
use crate::services::orders::Orders;
use crate::session::{self, OPERATOR_ENV, OperatorContext};
use crate::store::{LocalImageStore, SqliteStore};

/// Everything a command handler needs, built once in `main`
pub struct AppContext {
    pub config: Config,
    pub catalog: Catalog,
    pub orders: Orders,
    operator: Option<OperatorContext>,
}

impl AppContext {
    /// Open the store named by `database`, the environment or the config
    pub async fn open(
        config: Config,
        database: Option<&Path>,
        operator_flag: Option<&str>,
    ) -> Result<Self> {
        let database = match database {
            Some(path) => path.to_path_buf(),
            None => config.database_path(std::env::var(DATABASE_ENV).ok().as_deref())?,
        };
        let store = Arc::new(
            SqliteStore::open(&database)
                .await
                .with_context(|| format!("Failed to open store at {}", database.display()))?,
        );
        let images = Arc::new(LocalImageStore::new(config.images_dir()?));

        let operator = OperatorContext::resolve(
            operator_flag,
            std::env::var(OPERATOR_ENV).ok().as_deref(),
            &config,
        )?;
        match &operator {
            Some(op) => debug!("Operator: {}", op),
            None => debug!("No operator signed in"),
        }

        Ok(Self {
            catalog: Catalog::new(store.clone(), images),
            orders: Orders::new(store),
            config,
            operator,
        })
    }

    /// Operator for commands that write; fails when nobody is signed in
    pub fn operator(&self) -> Result<&OperatorContext> {
        session::require(self.operator.as_ref())
    }

    pub fn format_price(&self, amount: f64) -> String {
        self.config.settings.currency.format_amount(amount)
    }
}
