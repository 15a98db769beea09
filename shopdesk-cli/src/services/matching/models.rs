use serde::Serialize;

use crate::catalog::Product;

/// How a product matched the query
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Substring,       // Query appears verbatim inside the name
    Similar(f64),    // Edit-distance similarity at or above the threshold
}

impl MatchType {
    /// Get display label for match type
    pub fn label(&self) -> String {
        match self {
            MatchType::Substring => "[Substring]".to_string(),
            MatchType::Similar(score) => format!("[Similar {:.2}]", score),
        }
    }
}

/// A matched product together with the reason it matched
#[derive(Debug, Clone, Serialize)]
pub struct ProductMatch<'a> {
    pub product: &'a Product,
    pub match_type: MatchType,
}
