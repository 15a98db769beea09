//! Product catalog types

use chrono::{DateTime, Utc};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::services::matching::core::edit_distance;

/// Store-assigned product identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        ProductId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The fixed set of catalog categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    ElitraPlusSeries,
    WeatherProofOf,
    GroupSockets,
    Accessory,
    AutomationGroup,
    MechanicalGroup,
    CableTrunking,
    #[default]
    LightingGroup,
}

impl Category {
    /// All categories, in menu order
    pub fn all() -> &'static [Category] {
        &[
            Category::ElitraPlusSeries,
            Category::WeatherProofOf,
            Category::GroupSockets,
            Category::Accessory,
            Category::AutomationGroup,
            Category::MechanicalGroup,
            Category::CableTrunking,
            Category::LightingGroup,
        ]
    }

    /// Stored form, e.g. `cable-trunking`
    pub fn slug(&self) -> &'static str {
        match self {
            Category::ElitraPlusSeries => "elitra-plus-series",
            Category::WeatherProofOf => "weather-proof-of",
            Category::GroupSockets => "group-sockets",
            Category::Accessory => "accessory",
            Category::AutomationGroup => "automation-group",
            Category::MechanicalGroup => "mechanical-group",
            Category::CableTrunking => "cable-trunking",
            Category::LightingGroup => "lighting-group",
        }
    }

    /// Get display label for UI
    pub fn label(&self) -> &'static str {
        match self {
            Category::ElitraPlusSeries => "Elitra Plus Series",
            Category::WeatherProofOf => "Weather Proof",
            Category::GroupSockets => "Group Sockets",
            Category::Accessory => "Accessory",
            Category::AutomationGroup => "Automation Group",
            Category::MechanicalGroup => "Mechanical Group",
            Category::CableTrunking => "Cable Trunking",
            Category::LightingGroup => "Lighting Group",
        }
    }

    /// Closest known slug to an unrecognised input
    fn suggest(input: &str) -> Option<Category> {
        let matcher = SkimMatcherV2::default();
        let needle = input.trim().to_lowercase();

        let fuzzy_best = Category::all()
            .iter()
            .filter_map(|c| matcher.fuzzy_match(c.slug(), &needle).map(|score| (*c, score)))
            .max_by_key(|(_, score)| *score)
            .map(|(c, _)| c);

        fuzzy_best.or_else(|| {
            // Nothing shares a subsequence; fall back to plain edit distance
            Category::all()
                .iter()
                .min_by_key(|c| edit_distance(c.slug(), &needle))
                .copied()
        })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Error for a category slug outside the fixed set
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownCategory {
    pub input: String,
    pub suggestion: Option<Category>,
}

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown category '{}'", self.input)?;
        if let Some(suggestion) = self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Category::all()
            .iter()
            .find(|c| c.slug() == wanted)
            .copied()
            .ok_or_else(|| UnknownCategory {
                input: s.to_string(),
                suggestion: Category::suggest(s),
            })
    }
}

/// Category selector for listings; `all` disables filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn includes(&self, product: &Product) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => product.data.category == *category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::Only)
    }
}

/// Product payload as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: Category,
    pub price: f64,
    pub stock_quantity: u32,
    /// URL of the uploaded product image
    pub image: String,
    /// Whether the product is visible to shoppers
    pub show: bool,
    /// Assigned by the store on insert
    #[serde(rename = "createdOn", default)]
    pub created_on: Option<DateTime<Utc>>,
    /// Assigned by the store on every write
    #[serde(rename = "updatedOn", default)]
    pub updated_on: Option<DateTime<Utc>>,
}

/// A catalog entry: store identifier plus payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub data: ProductData,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugs_round_trip_through_serde() {
        for category in Category::all() {
            let json = serde_json::to_string(category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.slug()));
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Cable-Trunking".parse::<Category>().unwrap(), Category::CableTrunking);
        assert_eq!(" accessory ".parse::<Category>().unwrap(), Category::Accessory);
    }

    #[test]
    fn test_unknown_category_suggests_nearest() {
        let err = "lighting".parse::<Category>().unwrap_err();
        assert_eq!(err.suggestion, Some(Category::LightingGroup));
        assert!(err.to_string().contains("did you mean 'lighting-group'"));
    }

    #[test]
    fn test_unknown_category_with_typo() {
        let err = "mechanicl-group".parse::<Category>().unwrap_err();
        assert_eq!(err.suggestion, Some(Category::MechanicalGroup));
    }

    #[test]
    fn test_default_category() {
        assert_eq!(Category::default(), Category::LightingGroup);
    }

    #[test]
    fn test_category_filter() {
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "group-sockets".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(Category::GroupSockets)
        );
        assert!("juice".parse::<CategoryFilter>().is_err());
    }

    #[test]
    fn test_product_deserializes_without_name() {
        let json = r#"{
            "id": "abc",
            "data": {
                "category": "accessory",
                "price": 1500.0,
                "stock_quantity": 3,
                "image": "https://img/1.jpg",
                "show": true
            }
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id.as_str(), "abc");
        assert_eq!(product.data.name, "");
        assert!(product.data.created_on.is_none());
    }
}
