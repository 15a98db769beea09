// Approximate product matching
//
// Pure filtering of a catalog snapshot against the operator's search text.
// No index is kept: every call rescans the snapshot it is given.

pub mod core;
pub mod models;

// Re-export commonly used types
pub use self::core::DEFAULT_SIMILARITY_THRESHOLD;
pub use self::models::{MatchType, ProductMatch};

use crate::catalog::Product;
use crate::config::SearchConfig;

/// Substring-or-similar matcher over product names
#[derive(Debug, Clone, Copy)]
pub struct ProductMatcher {
    threshold: f64,
}

impl ProductMatcher {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(config.similarity_threshold)
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Classify a single name against an already-lowercased query
    /// Substring hits skip the distance computation entirely
    fn classify(&self, name: &str, normalized_query: &str) -> Option<MatchType> {
        let normalized_name = core::normalize(name);

        if normalized_name.contains(normalized_query) {
            return Some(MatchType::Substring);
        }

        let score = core::similarity(&normalized_name, normalized_query);
        (score >= self.threshold).then_some(MatchType::Similar(score))
    }

    /// Products matching `query`, in catalog order
    pub fn filter<'a>(&self, query: &str, catalog: &'a [Product]) -> Vec<&'a Product> {
        self.explain(query, catalog)
            .into_iter()
            .map(|m| m.product)
            .collect()
    }

    /// Like [`filter`](Self::filter) but keeps the reason each product matched
    pub fn explain<'a>(&self, query: &str, catalog: &'a [Product]) -> Vec<ProductMatch<'a>> {
        // Blank queries list nothing; callers show a different view instead
        if query.trim().is_empty() {
            return Vec::new();
        }

        let normalized_query = core::normalize(query);

        catalog
            .iter()
            .filter_map(|product| {
                self.classify(&product.data.name, &normalized_query)
                    .map(|match_type| ProductMatch { product, match_type })
            })
            .collect()
    }
}

impl Default for ProductMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_SIMILARITY_THRESHOLD)
    }
}
