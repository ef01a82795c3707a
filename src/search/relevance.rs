//! Title relevance scoring.

use crate::types::{Formality, Recommendation};

const ITEM_TYPE_WEIGHT: f64 = 1.0;
const COLOR_WEIGHT: f64 = 0.5;
const STYLE_TAG_WEIGHT: f64 = 0.3;
const FORMALITY_WEIGHT: f64 = 0.4;

const FORMAL_KEYWORDS: &[&str] = &["business", "formal", "dress", "professional"];
const CASUAL_KEYWORDS: &[&str] = &["casual", "comfortable", "relaxed"];

/// Score how well a product title fits a recommendation.
///
/// All matches are case-insensitive substring tests. The score is additive
/// and unbounded: each matching color and style tag counts separately, the
/// formality keywords count once.
pub fn relevance_score(title: &str, recommendation: &Recommendation) -> f64 {
    let title = title.to_lowercase();
    let contains = |needle: &str| title.contains(&needle.to_lowercase());

    let mut score = 0.0;

    if contains(&recommendation.item_type) {
        score += ITEM_TYPE_WEIGHT;
    }

    score += COLOR_WEIGHT
        * recommendation
            .recommended_colors
            .iter()
            .filter(|color| contains(color))
            .count() as f64;

    score += STYLE_TAG_WEIGHT
        * recommendation
            .style_tags
            .iter()
            .filter(|tag| contains(tag))
            .count() as f64;

    let keywords: &[&str] = match recommendation.formality_level {
        Formality::Formal => FORMAL_KEYWORDS,
        Formality::Casual => CASUAL_KEYWORDS,
        _ => &[],
    };
    if keywords.iter().any(|keyword| title.contains(keyword)) {
        score += FORMALITY_WEIGHT;
    }

    score
}
