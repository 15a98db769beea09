//! Search configuration with builder pattern

use serde::{Deserialize, Serialize};

use crate::services::matching::DEFAULT_SIMILARITY_THRESHOLD;

/// Settings for product search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Minimum edit-distance similarity for a non-substring match, in [0, 1]
    pub similarity_threshold: f64,
    /// Whether products hidden from shoppers appear in results
    pub include_hidden: bool,
    /// Cap on rows printed; matching itself is never truncated
    pub result_limit: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            include_hidden: true,
            result_limit: None,
        }
    }
}

impl SearchConfig {
    /// Builder seeded with these settings, for per-run overrides
    pub fn to_builder(&self) -> SearchConfigBuilder {
        SearchConfigBuilder {
            config: self.clone(),
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            anyhow::bail!(
                "search.similarity_threshold must be between 0 and 1, got {}",
                self.similarity_threshold
            );
        }
        if self.result_limit == Some(0) {
            anyhow::bail!("search.result_limit must be at least 1 when set");
        }
        Ok(())
    }
}

/// Builder for SearchConfig
#[derive(Debug)]
pub struct SearchConfigBuilder {
    config: SearchConfig,
}

impl SearchConfigBuilder {
    /// Set the similarity threshold
    pub fn similarity_threshold(mut self, threshold: f64) -> Self {
        self.config.similarity_threshold = threshold;
        self
    }

    /// Show or hide products not visible to shoppers
    pub fn include_hidden(mut self, include: bool) -> Self {
        self.config.include_hidden = include;
        self
    }

    /// Limit printed rows
    pub fn result_limit(mut self, limit: usize) -> Self {
        self.config.result_limit = Some(limit);
        self
    }

    /// Build the final configuration
    pub fn build(self) -> anyhow::Result<SearchConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
