//! Style recommendations and the products found for them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::analysis::Formality;

/// Kind of outfit a recommendation completes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutfitType {
    Business,
    Leisure,
    Everyday,
    SmartCasual,
}

impl std::fmt::Display for OutfitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutfitType::Business => write!(f, "business"),
            OutfitType::Leisure => write!(f, "leisure"),
            OutfitType::Everyday => write!(f, "everyday"),
            OutfitType::SmartCasual => write!(f, "smart-casual"),
        }
    }
}

/// User-supplied constraints (budget, brands, ...).
///
/// Accepted and passed through, not yet used for matching.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Preferences(pub serde_json::Map<String, serde_json::Value>);

impl Preferences {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A complementary garment suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub item_type: String,
    pub recommended_colors: Vec<String>,
    pub formality_level: Formality,
    pub season: Vec<String>,
    pub style_tags: BTreeSet<String>,
    /// At most 10 entries, most specific first
    pub search_terms: Vec<String>,
    /// Ranking weight, never below 1.0
    pub priority: f64,
    pub outfit_type: OutfitType,
}

/// A product scraped from a shopping site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub title: String,
    /// Site-formatted price or "N/A"
    pub price: String,
    pub url: String,
    pub image_url: String,
    /// Site-formatted rating or "N/A"
    pub rating: String,
    pub source: String,
    pub relevance_score: f64,
    pub search_term: String,
}
