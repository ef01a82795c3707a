//! Rule-based expansion of an analysis into outfit recommendations.

use std::collections::BTreeSet;

use tracing::debug;

use super::rules::{
    self, BASE_PRIORITY, ESSENTIAL_ITEMS, ESSENTIAL_ITEM_BONUS, FALLBACK_SCHEMES, FORMAL_BONUS,
    HIGH_PRIORITY_PAIRS, HIGH_PRIORITY_PAIR_BONUS, LEISURE_ITEMS, NEUTRAL_SCHEMES, SEASONS,
    SEMI_FORMAL_BONUS, STYLE_MODIFIERS,
};
use crate::color::compatible_colors;
use crate::types::{
    ClothingAnalysis, DominantColor, Formality, OutfitType, Preferences, Recommendation,
};

/// Style matcher with configurable output limits
#[derive(Debug, Clone)]
pub struct StyleMatcher {
    /// Recommendations returned per analysis
    pub max_recommendations: usize,
    /// Color schemes generated per complementary garment
    pub max_color_schemes: usize,
    /// Dominant colors considered when building schemes
    pub colors_considered: usize,
    /// Search terms kept per recommendation
    pub max_search_terms: usize,
}

impl Default for StyleMatcher {
    fn default() -> Self {
        Self {
            max_recommendations: 10,
            max_color_schemes: 8,
            colors_considered: 3,
            max_search_terms: 10,
        }
    }
}

impl StyleMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find garments that complete an outfit with the analysed piece.
    ///
    /// Every complementary garment is crossed with every color scheme; the
    /// result is stable-sorted by priority (ties keep generation order) and
    /// truncated. Never fails: missing table entries yield fewer results.
    pub fn find_matches(
        &self,
        analysis: &ClothingAnalysis,
        preferences: Option<&Preferences>,
    ) -> Vec<Recommendation> {
        let clothing_type = analysis.clothing_type.as_str();
        let formality = &analysis.formality_level;

        debug!(
            clothing_type,
            formality = %formality,
            colors = analysis.dominant_colors.len(),
            preferences = preferences.map_or(0, |p| p.0.len()),
            "Finding style matches"
        );

        let complementary = self.complementary_types(clothing_type, formality);
        let schemes = self.color_schemes(&analysis.dominant_colors);

        let mut matches = Vec::with_capacity(complementary.len() * schemes.len());
        for comp_type in &complementary {
            for scheme in &schemes {
                matches.push(Recommendation {
                    item_type: comp_type.clone(),
                    recommended_colors: scheme.clone(),
                    formality_level: formality.clone(),
                    season: analysis.season_suitability.clone(),
                    style_tags: style_tags(comp_type, formality, scheme),
                    search_terms: self.search_terms(comp_type, scheme, formality),
                    priority: priority(comp_type, clothing_type, formality),
                    outfit_type: outfit_type(comp_type, formality),
                });
            }
        }

        matches.sort_by(|a, b| {
            b.priority
                .partial_cmp(&a.priority)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        matches.truncate(self.max_recommendations);
        matches
    }

    /// Garment types that complement `clothing_type`.
    ///
    /// Table entries first, then category complements; duplicates keep their
    /// first position and the input garment itself is removed.
    pub fn complementary_types(&self, clothing_type: &str, formality: &Formality) -> Vec<String> {
        let mut seen = BTreeSet::new();
        rules::table_complements(formality, clothing_type)
            .iter()
            .chain(rules::category_complements(clothing_type))
            .filter(|garment| **garment != clothing_type)
            .filter(|garment| seen.insert(**garment))
            .map(|garment| garment.to_string())
            .collect()
    }

    /// Color schemes for complementary garments.
    ///
    /// For each of the leading dominant colors: the color alone, then its two
    /// best pairings. Neutral schemes follow; the whole list is capped.
    pub fn color_schemes(&self, colors: &[DominantColor]) -> Vec<Vec<String>> {
        if colors.is_empty() {
            return FALLBACK_SCHEMES.iter().map(|s| owned_names(s)).collect();
        }

        let mut schemes = Vec::new();
        for color in colors.iter().take(self.colors_considered) {
            let compatible = compatible_colors(&color.name);
            schemes.push(vec![color.name.clone()]);
            schemes.push(owned_names(&compatible[..compatible.len().min(2)]));
        }
        schemes.extend(NEUTRAL_SCHEMES.iter().map(|s| owned_names(s)));
        schemes.truncate(self.max_color_schemes);
        schemes
    }

    /// Search queries for one garment and scheme, most specific first
    pub fn search_terms(
        &self,
        item_type: &str,
        colors: &[String],
        formality: &Formality,
    ) -> Vec<String> {
        let mut terms = vec![item_type.to_string()];
        terms.extend(colors.iter().map(|color| format!("{color} {item_type}")));
        terms.extend(
            rules::formality_search_prefixes(formality)
                .iter()
                .map(|prefix| format!("{prefix} {item_type}")),
        );
        terms.extend(
            STYLE_MODIFIERS
                .iter()
                .map(|modifier| format!("{modifier} {item_type}")),
        );
        terms.truncate(self.max_search_terms);
        terms
    }
}

fn owned_names(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

/// Tags describing a recommendation for search and display
pub fn style_tags(item_type: &str, formality: &Formality, colors: &[String]) -> BTreeSet<String> {
    let mut tags = BTreeSet::new();
    tags.insert(item_type.to_string());
    tags.insert(formality.as_str().to_string());
    tags.extend(colors.iter().cloned());
    tags.extend(
        rules::formality_descriptors(formality)
            .iter()
            .map(|tag| tag.to_string()),
    );
    tags.extend(SEASONS.iter().map(|season| season.to_string()));
    tags
}

/// Ranking weight for suggesting `comp_type` alongside `base_type`
pub fn priority(comp_type: &str, base_type: &str, formality: &Formality) -> f64 {
    let mut score = BASE_PRIORITY;

    if HIGH_PRIORITY_PAIRS.contains(&(base_type, comp_type)) {
        score += HIGH_PRIORITY_PAIR_BONUS;
    }

    match formality {
        Formality::Formal => score += FORMAL_BONUS,
        Formality::SemiFormal => score += SEMI_FORMAL_BONUS,
        _ => {}
    }

    if ESSENTIAL_ITEMS.contains(&comp_type) {
        score += ESSENTIAL_ITEM_BONUS;
    }

    score
}

pub fn outfit_type(comp_type: &str, formality: &Formality) -> OutfitType {
    match formality {
        Formality::Formal => OutfitType::Business,
        Formality::Casual if LEISURE_ITEMS.contains(&comp_type) => OutfitType::Leisure,
        Formality::Casual => OutfitType::Everyday,
        _ => OutfitType::SmartCasual,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color(name: &str) -> DominantColor {
        DominantColor {
            name: name.to_string(),
            hex: String::new(),
            rgb: [0, 0, 0],
        }
    }

    fn analysis(clothing_type: &str, formality: &str, colors: &[&str]) -> ClothingAnalysis {
        ClothingAnalysis {
            clothing_type: clothing_type.to_string(),
            dominant_colors: colors.iter().map(|c| color(c)).collect(),
            formality_level: Formality::from(formality),
            ..ClothingAnalysis::degraded("")
        }
    }

    #[test]
    fn test_formal_shirt_matches() {
        let matcher = StyleMatcher::new();
        let results = matcher.find_matches(&analysis("shirt", "formal", &["blue"]), None);

        assert!(!results.is_empty());
        assert!(results.len() <= 10);
        for rec in &results {
            assert!(rec.priority >= 1.0);
            assert!(rec.recommended_colors.len() <= 2);
            assert!(rec.search_terms.len() <= 10);
            assert_ne!(rec.item_type, "shirt");
            assert_eq!(rec.outfit_type, OutfitType::Business);
        }
    }

    #[test]
    fn test_formal_shirt_ranking() {
        let matcher = StyleMatcher::new();
        let results = matcher.find_matches(&analysis("shirt", "formal", &["blue"]), None);

        // pants: 1.0 + 0.5 pair + 0.3 formal + 0.2 essential, six schemes
        let pants: Vec<_> = results.iter().filter(|r| r.item_type == "pants").collect();
        assert_eq!(pants.len(), 6);
        assert!((pants[0].priority - 2.0).abs() < 1e-9);
        assert!(results[..6].iter().all(|r| r.item_type == "pants"));

        // suit: 1.0 + 0.5 pair + 0.3 formal fills the rest
        assert!(results[6..].iter().all(|r| r.item_type == "suit"));
        assert!((results[6].priority - 1.8).abs() < 1e-9);

        // Generation order is kept within equal priorities
        assert_eq!(results[0].recommended_colors, vec!["blue"]);
        assert_eq!(results[1].recommended_colors, vec!["white", "gray"]);
    }

    #[test]
    fn test_high_priority_pair_outranks_plain_complement() {
        let formal = Formality::Formal;
        assert!(priority("pants", "shirt", &formal) > priority("jeans", "shirt", &formal));
        assert!(priority("suit", "shirt", &formal) > priority("tie", "shirt", &formal));
    }

    #[test]
    fn test_priority_components() {
        assert!((priority("tie", "shirt", &Formality::Casual) - 1.0).abs() < 1e-9);
        assert!((priority("tie", "shirt", &Formality::SemiFormal) - 1.2).abs() < 1e-9);
        assert!((priority("shoes", "dress", &Formality::Formal) - 2.0).abs() < 1e-9);
        assert!((priority("tie", "shirt", &Formality::from("odd")) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_complementary_types_dedup_and_exclude_input() {
        let matcher = StyleMatcher::new();
        // blazer table entry contains "shirt"; outerwear complements add it again
        let types = matcher.complementary_types("blazer", &Formality::Formal);
        assert_eq!(
            types,
            vec!["dress_pants", "shirt", "dress_shoes", "pants", "dress"]
        );

        // bottoms add shirt and t-shirt again; only blouse is new
        let types = matcher.complementary_types("jeans", &Formality::Casual);
        assert_eq!(
            types,
            vec!["t-shirt", "shirt", "sweater", "sneakers", "boots", "blouse"]
        );
    }

    #[test]
    fn test_unknown_garment_and_formality_yield_nothing() {
        let matcher = StyleMatcher::new();
        let results = matcher.find_matches(&analysis("unknown", "casual", &[]), None);
        assert!(results.is_empty());

        let results = matcher.find_matches(&analysis("suit", "black-tie", &["red"]), None);
        assert!(results.is_empty());
    }

    #[test]
    fn test_color_schemes() {
        let matcher = StyleMatcher::new();

        let schemes = matcher.color_schemes(&[color("blue")]);
        assert_eq!(
            schemes,
            vec![
                vec!["blue"],
                vec!["white", "gray"],
                vec!["white", "black"],
                vec!["gray", "white"],
                vec!["black", "white"],
                vec!["navy", "white"],
            ]
        );

        let schemes = matcher.color_schemes(&[color("blue"), color("red"), color("mixed")]);
        assert_eq!(schemes.len(), 8);
        assert_eq!(schemes[5], vec!["white", "black"]);
        assert_eq!(schemes[7], vec!["gray", "white"]);

        let schemes = matcher.color_schemes(&[]);
        assert_eq!(schemes, vec![vec!["white"], vec!["black"], vec!["gray"]]);
    }

    #[test]
    fn test_only_top_three_colors_used() {
        let matcher = StyleMatcher::new();
        let colors = [color("red"), color("red"), color("red"), color("green")];
        let schemes = matcher.color_schemes(&colors);
        assert!(schemes.iter().all(|s| !s.contains(&"green".to_string())));
    }

    #[test]
    fn test_search_terms() {
        let matcher = StyleMatcher::new();
        let colors = vec!["navy".to_string(), "white".to_string()];

        let terms = matcher.search_terms("pants", &colors, &Formality::Formal);
        assert_eq!(
            terms,
            vec![
                "pants",
                "navy pants",
                "white pants",
                "formal pants",
                "business pants",
                "professional pants",
                "cotton pants",
                "slim fit pants",
                "classic pants",
                "modern pants",
            ]
        );

        let terms = matcher.search_terms("skirt", &colors[..1], &Formality::SemiFormal);
        assert_eq!(terms.len(), 7);
        assert_eq!(terms[2], "cotton skirt");
        assert_eq!(terms[6], "trendy skirt");
    }

    #[test]
    fn test_style_tags() {
        let tags = style_tags("jeans", &Formality::Casual, &["blue".to_string()]);
        for tag in [
            "jeans",
            "casual",
            "blue",
            "comfortable",
            "relaxed",
            "everyday",
            "spring",
            "summer",
            "fall",
            "winter",
        ] {
            assert!(tags.contains(tag), "missing {tag}");
        }
        assert_eq!(tags.len(), 10);

        let tags = style_tags("skirt", &Formality::SemiFormal, &[]);
        assert!(tags.contains("smart-casual") && tags.contains("versatile"));
    }

    #[test]
    fn test_outfit_types() {
        assert_eq!(outfit_type("shorts", &Formality::Casual), OutfitType::Leisure);
        assert_eq!(outfit_type("t-shirt", &Formality::Casual), OutfitType::Leisure);
        assert_eq!(outfit_type("jeans", &Formality::Casual), OutfitType::Everyday);
        assert_eq!(outfit_type("shorts", &Formality::Formal), OutfitType::Business);
        assert_eq!(
            outfit_type("skirt", &Formality::SemiFormal),
            OutfitType::SmartCasual
        );
    }

    #[test]
    fn test_matching_is_deterministic() {
        let matcher = StyleMatcher::new();
        let input = analysis("t-shirt", "casual", &["white", "blue", "gray"]);
        let first = matcher.find_matches(&input, None);
        let second = matcher.find_matches(&input, Some(&Preferences::default()));
        assert_eq!(first, second);
    }
}
