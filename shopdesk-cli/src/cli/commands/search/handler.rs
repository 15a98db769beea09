//! Search command handler

use anyhow::{Context, Result};
use colored::*;
use log::debug;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::SearchCommands;
use crate::app::AppContext;
use crate::catalog::{CatalogSnapshot, Product, Subscription};
use crate::cli::output::{print_json, print_table};
use crate::config::{Currency, SearchConfig};
use crate::services::matching::{ProductMatch, ProductMatcher};

/// Rows to print plus the number of matches before the row limit
#[derive(Debug)]
struct Selection<T> {
    rows: Vec<T>,
    total: usize,
}

/// Drop products shoppers cannot see (unless configured otherwise), then cut
/// to the row limit. Matching is per product, so filtering after it gives the
/// same set as filtering before.
fn select<T>(found: Vec<T>, product: impl Fn(&T) -> &Product, config: &SearchConfig) -> Selection<T> {
    let mut rows: Vec<T> = found
        .into_iter()
        .filter(|item| config.include_hidden || product(item).data.show)
        .collect();
    let total = rows.len();
    if let Some(limit) = config.result_limit {
        rows.truncate(limit);
    }
    Selection { rows, total }
}

/// How results are rendered, fixed for the whole invocation
struct SearchView {
    matcher: ProductMatcher,
    config: SearchConfig,
    currency: Currency,
    explain: bool,
    json: bool,
}

/// Catalog view that follows the feed between queries
struct LiveCatalog {
    subscription: Subscription,
    snapshot: CatalogSnapshot,
}

impl LiveCatalog {
    fn new(mut subscription: Subscription) -> Self {
        let snapshot = subscription.snapshot();
        Self {
            subscription,
            snapshot,
        }
    }

    /// Snapshot to search, taking anything published since the last query
    fn latest(&mut self) -> &CatalogSnapshot {
        if self.subscription.has_changed() {
            self.snapshot = self.subscription.snapshot();
        }
        &self.snapshot
    }

    fn apply(&mut self, snapshot: CatalogSnapshot) {
        debug!(
            "Catalog v{} received ({} product(s))",
            snapshot.version(),
            snapshot.len()
        );
        self.snapshot = snapshot;
    }
}

enum Event {
    Query(Option<String>),
    Published(CatalogSnapshot),
}

pub async fn handle_search_command(app: &AppContext, args: SearchCommands) -> Result<()> {
    let mut builder = app.config.search.to_builder();
    if let Some(threshold) = args.threshold {
        builder = builder.similarity_threshold(threshold);
    }
    if args.visible_only {
        builder = builder.include_hidden(false);
    }
    if let Some(limit) = args.limit {
        builder = builder.result_limit(limit);
    }
    let config = builder.build()?;

    let view = SearchView {
        matcher: ProductMatcher::from_config(&config),
        config,
        currency: app.config.settings.currency,
        explain: args.explain,
        json: args.json,
    };
    debug!("Searching with threshold {}", view.matcher.threshold());

    if args.interactive {
        return interactive(app, &view).await;
    }

    let query = args.query.unwrap_or_default();
    if query.trim().is_empty() {
        anyhow::bail!("Search query is empty. Use `shopdesk products list` to see every product.");
    }

    let snapshot = app.catalog.refresh().await?;
    view.run(&query, snapshot.products())
}

/// Answer one query per stdin line against the live catalog feed
async fn interactive(app: &AppContext, view: &SearchView) -> Result<()> {
    let mut live = LiveCatalog::new(app.catalog.subscribe());
    app.catalog.refresh().await?;

    if !view.json {
        let count = live.latest().len();
        println!(
            "{}",
            format!(
                "{} product(s) loaded. Type a product name and press Enter. Ctrl-D to quit.",
                count
            )
            .dimmed()
        );
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let event = tokio::select! {
            line = lines.next_line() => Event::Query(line.context("Failed to read query")?),
            published = live.subscription.changed() => Event::Published(published?),
        };

        match event {
            Event::Published(snapshot) => live.apply(snapshot),
            Event::Query(None) => break,
            Event::Query(Some(line)) => {
                if line.trim().is_empty() {
                    continue;
                }
                // Other processes may have written to the store since
                app.catalog.refresh().await?;
                if !view.json {
                    println!("{} {}", "›".cyan(), line.bold());
                }
                view.run(&line, live.latest().products())?;
            }
        }
    }
    Ok(())
}

impl SearchView {
    fn explained<'a>(&self, query: &str, catalog: &'a [Product]) -> Selection<ProductMatch<'a>> {
        select(self.matcher.explain(query, catalog), |m| m.product, &self.config)
    }

    fn plain<'a>(&self, query: &str, catalog: &'a [Product]) -> Selection<&'a Product> {
        select(self.matcher.filter(query, catalog), |p| *p, &self.config)
    }

    fn run(&self, query: &str, catalog: &[Product]) -> Result<()> {
        if self.explain {
            let selection = self.explained(query, catalog);
            if self.json {
                return print_json(&selection.rows);
            }
            let rows = selection
                .rows
                .iter()
                .map(|m| {
                    let mut row = self.row(m.product);
                    row.push(m.match_type.label());
                    row
                })
                .collect();
            self.print(rows, selection.total);
        } else {
            let selection = self.plain(query, catalog);
            if self.json {
                return print_json(&selection.rows);
            }
            let rows = selection.rows.iter().map(|p| self.row(p)).collect();
            self.print(rows, selection.total);
        }
        Ok(())
    }

    fn row(&self, p: &Product) -> Vec<String> {
        vec![
            p.id.to_string(),
            p.data.name.clone(),
            p.data.category.label().to_string(),
            self.currency.format_amount(p.data.price),
            p.data.stock_quantity.to_string(),
        ]
    }

    fn print(&self, rows: Vec<Vec<String>>, total: usize) {
        if rows.is_empty() {
            println!("{}", "No products found".dimmed());
            return;
        }

        let mut headers = vec!["ID", "Name", "Category", "Price", "Stock"];
        if self.explain {
            headers.push("Match");
        }
        print_table(&headers, &rows);

        if total > rows.len() {
            println!(
                "{}",
                format!("{} of {} match(es) shown", rows.len(), total).dimmed()
            );
        } else {
            println!("{}", format!("{} match(es)", total).dimmed());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, Category, ImageSource, ProductData, ProductDraft, ProductId};
    use crate::services::matching::MatchType;
    use crate::session::OperatorContext;
    use crate::store::{LocalImageStore, SqliteStore};
    use std::sync::Arc;
    use std::time::Duration;

    fn product(id: &str, name: &str, show: bool) -> Product {
        Product {
            id: ProductId::new(id),
            data: ProductData {
                name: name.to_string(),
                description: String::new(),
                category: Category::LightingGroup,
                price: 1000.0,
                stock_quantity: 1,
                image: String::new(),
                show,
                created_on: None,
                updated_on: None,
            },
        }
    }

    fn view(config: SearchConfig, explain: bool) -> SearchView {
        SearchView {
            matcher: ProductMatcher::from_config(&config),
            config,
            currency: Currency::Rwf,
            explain,
            json: false,
        }
    }

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.to_string()).collect()
    }

    fn catalog() -> Vec<Product> {
        vec![
            product("1", "LED Panel 60x60", true),
            product("2", "LED Panel 30x30", false),
            product("3", "Wall Switch", true),
            product("4", "LED Strip", true),
        ]
    }

    #[test]
    fn test_visible_only_drops_hidden_products() {
        let catalog = catalog();
        let config = SearchConfig::default()
            .to_builder()
            .include_hidden(false)
            .build()
            .unwrap();

        let selection = view(config, false).plain("led", &catalog);
        assert_eq!(ids(&selection.rows), vec!["1", "4"]);
        assert_eq!(selection.total, 2);
    }

    #[test]
    fn test_hidden_products_included_by_default() {
        let catalog = catalog();
        let selection = view(SearchConfig::default(), false).plain("led", &catalog);
        assert_eq!(ids(&selection.rows), vec!["1", "2", "4"]);
    }

    #[test]
    fn test_limit_cuts_rows_but_counts_every_match() {
        let catalog = catalog();
        let config = SearchConfig::default()
            .to_builder()
            .result_limit(2)
            .build()
            .unwrap();

        let selection = view(config, false).plain("led", &catalog);
        assert_eq!(ids(&selection.rows), vec!["1", "2"]);
        assert_eq!(selection.total, 3);
    }

    #[test]
    fn test_explained_rows_keep_match_type() {
        let catalog = vec![product("1", "Widget", true), product("2", "Lamp", true)];
        let selection = view(SearchConfig::default(), true).explained("wedget", &catalog);

        assert_eq!(selection.total, 1);
        assert_eq!(selection.rows[0].product.id.as_str(), "1");
        assert!(matches!(selection.rows[0].match_type, MatchType::Similar(_)));
    }

    #[test]
    fn test_select_limit_applies_after_visibility() {
        let found = vec![
            product("1", "a", false),
            product("2", "b", true),
            product("3", "c", true),
        ];
        let config = SearchConfig::default()
            .to_builder()
            .include_hidden(false)
            .result_limit(1)
            .build()
            .unwrap();

        let selection = select(found, |p| p, &config);
        assert_eq!(selection.rows.len(), 1);
        assert_eq!(selection.rows[0].id.as_str(), "2");
        assert_eq!(selection.total, 2);
    }

    #[tokio::test]
    async fn test_live_catalog_sees_products_added_after_subscribing() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("panel.jpg");
        std::fs::write(&image, b"jpeg").unwrap();
        let store = Arc::new(SqliteStore::in_memory().await.unwrap());
        let catalog = Catalog::new(store, Arc::new(LocalImageStore::new(dir.path().join("bucket"))));
        let operator = OperatorContext::new("ops@shop.rw", None).unwrap();

        let mut live = LiveCatalog::new(catalog.subscribe());
        catalog.refresh().await.unwrap();
        let search = view(SearchConfig::default(), false);
        assert!(search.plain("panel", live.latest().products()).rows.is_empty());

        let mut draft = ProductDraft::new();
        draft.name = "LED Panel".to_string();
        draft.description = "60x60".to_string();
        draft.image = Some(ImageSource::File(image));
        catalog.add(&operator, draft).await.unwrap();

        let selection = search.plain("panel", live.latest().products());
        assert_eq!(selection.total, 1);
        assert_eq!(selection.rows[0].data.name, "LED Panel");
    }

    #[tokio::test]
    async fn test_live_catalog_woken_by_publish() {
        let store = Arc::new(SqliteStore::in_memory().await.unwrap());
        let dir = tempfile::tempdir().unwrap();
        let catalog = Catalog::new(store, Arc::new(LocalImageStore::new(dir.path())));
        let mut live = LiveCatalog::new(catalog.subscribe());

        let publisher = catalog.clone();
        let handle = tokio::spawn(async move { publisher.refresh().await.unwrap().version() });

        let snapshot = tokio::time::timeout(Duration::from_secs(5), live.subscription.changed())
            .await
            .unwrap()
            .unwrap();
        let version = handle.await.unwrap();
        live.apply(snapshot);
        assert_eq!(live.latest().version(), version);
    }
}
