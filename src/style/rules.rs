//! Static outfit rules.
//!
//! These tables drive the [`StyleMatcher`](super::StyleMatcher): which garments
//! pair with which, which garments count as tops/bottoms/outerwear, and the
//! fixed vocabularies used for tags and search terms.

use crate::types::Formality;

/// Garment type -> complementary garment types
pub type RuleSet = &'static [(&'static str, &'static [&'static str])];

// ============================================================================
// Complementary garments per formality level
// ============================================================================

pub const FORMAL_RULES: RuleSet = &[
    ("shirt", &["suit", "dress_pants", "blazer", "tie", "dress_shoes"]),
    ("suit", &["dress_shirt", "tie", "dress_shoes", "belt"]),
    ("dress", &["heels", "blazer", "cardigan", "accessories"]),
    ("blazer", &["dress_pants", "shirt", "dress_shoes"]),
    ("dress_pants", &["shirt", "blazer", "dress_shoes", "belt"]),
];

pub const CASUAL_RULES: RuleSet = &[
    ("t-shirt", &["jeans", "shorts", "sneakers", "jacket", "hoodie"]),
    ("jeans", &["t-shirt", "shirt", "sweater", "sneakers", "boots"]),
    ("shorts", &["t-shirt", "polo", "sandals", "sneakers"]),
    ("hoodie", &["jeans", "sweatpants", "sneakers"]),
    ("sweater", &["jeans", "pants", "boots", "scarf"]),
];

pub const SEMI_FORMAL_RULES: RuleSet = &[
    ("blouse", &["dress_pants", "skirt", "blazer", "heels"]),
    ("polo", &["chinos", "dress_pants", "loafers"]),
    ("cardigan", &["dress_pants", "skirt", "blouse", "flats"]),
    ("chinos", &["polo", "shirt", "loafers", "belt"]),
];

/// Rule set for a formality level; unknown levels have none
pub fn rules_for(formality: &Formality) -> RuleSet {
    match formality {
        Formality::Formal => FORMAL_RULES,
        Formality::Casual => CASUAL_RULES,
        Formality::SemiFormal => SEMI_FORMAL_RULES,
        Formality::Other(_) => &[],
    }
}

/// Table complements for `(formality, clothing_type)`, empty when absent
pub fn table_complements(formality: &Formality, clothing_type: &str) -> &'static [&'static str] {
    rules_for(formality)
        .iter()
        .find(|(garment, _)| *garment == clothing_type)
        .map(|(_, complements)| *complements)
        .unwrap_or(&[])
}

// ============================================================================
// Garment categories
// ============================================================================

pub const TOPS: &[&str] = &[
    "shirt", "t-shirt", "blouse", "sweater", "hoodie", "tank_top", "polo", "cardigan",
];

pub const BOTTOMS: &[&str] = &[
    "pants",
    "jeans",
    "shorts",
    "skirt",
    "dress_pants",
    "chinos",
    "sweatpants",
];

// hoodie and cardigan are also tops; the top check wins.
pub const OUTERWEAR: &[&str] = &["jacket", "coat", "blazer", "cardigan", "hoodie"];

pub const TOP_COMPLEMENTS: &[&str] = &["pants", "jeans", "skirt", "shorts"];
pub const BOTTOM_COMPLEMENTS: &[&str] = &["shirt", "t-shirt", "blouse", "sweater"];
pub const OUTERWEAR_COMPLEMENTS: &[&str] = &["shirt", "pants", "dress"];

pub fn is_top(clothing_type: &str) -> bool {
    TOPS.contains(&clothing_type)
}

pub fn is_bottom(clothing_type: &str) -> bool {
    BOTTOMS.contains(&clothing_type)
}

pub fn is_outerwear(clothing_type: &str) -> bool {
    OUTERWEAR.contains(&clothing_type)
}

/// Generic complements from the garment's category
pub fn category_complements(clothing_type: &str) -> &'static [&'static str] {
    if is_top(clothing_type) {
        TOP_COMPLEMENTS
    } else if is_bottom(clothing_type) {
        BOTTOM_COMPLEMENTS
    } else if is_outerwear(clothing_type) {
        OUTERWEAR_COMPLEMENTS
    } else {
        &[]
    }
}

// ============================================================================
// Color schemes
// ============================================================================

/// Appended after the schemes derived from the garment's own colors
pub const NEUTRAL_SCHEMES: &[&[&str]] = &[
    &["white", "black"],
    &["gray", "white"],
    &["black", "white"],
    &["navy", "white"],
];

/// Used when the analysis carries no colors
pub const FALLBACK_SCHEMES: &[&[&str]] = &[&["white"], &["black"], &["gray"]];

// ============================================================================
// Priority
// ============================================================================

/// (analysed garment, complement) pairs that make the strongest outfits
pub const HIGH_PRIORITY_PAIRS: &[(&str, &str)] = &[
    ("shirt", "pants"),
    ("pants", "shirt"),
    ("dress", "shoes"),
    ("shoes", "dress"),
    ("suit", "shirt"),
    ("shirt", "suit"),
];

pub const ESSENTIAL_ITEMS: &[&str] = &["shoes", "pants", "shirt", "dress"];

pub const BASE_PRIORITY: f64 = 1.0;
pub const HIGH_PRIORITY_PAIR_BONUS: f64 = 0.5;
pub const FORMAL_BONUS: f64 = 0.3;
pub const SEMI_FORMAL_BONUS: f64 = 0.2;
pub const ESSENTIAL_ITEM_BONUS: f64 = 0.2;

// ============================================================================
// Tags and search vocabulary
// ============================================================================

pub const SEASONS: &[&str] = &["spring", "summer", "fall", "winter"];

pub fn formality_descriptors(formality: &Formality) -> &'static [&'static str] {
    match formality {
        Formality::Formal => &["professional", "business", "elegant"],
        Formality::Casual => &["comfortable", "relaxed", "everyday"],
        _ => &["smart-casual", "versatile"],
    }
}

/// Prefixes for formality-qualified search terms
pub fn formality_search_prefixes(formality: &Formality) -> &'static [&'static str] {
    match formality {
        Formality::Formal => &["formal", "business", "professional"],
        Formality::Casual => &["casual", "comfortable"],
        _ => &[],
    }
}

pub const STYLE_MODIFIERS: &[&str] = &["cotton", "slim fit", "classic", "modern", "trendy"];

/// Items that make a casual outfit a leisure outfit
pub const LEISURE_ITEMS: &[&str] = &["shorts", "t-shirt"];
