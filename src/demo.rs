//! Fixed sample payloads served when demo mode is enabled.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::types::{
    ClothingAnalysis, DominantColor, Formality, OutfitType, Product, Recommendation, TextureInfo,
};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn color(name: &str, hex: &str, rgb: [u8; 3]) -> DominantColor {
    DominantColor {
        name: name.to_string(),
        hex: hex.to_string(),
        rgb,
    }
}

pub fn demo_analysis() -> ClothingAnalysis {
    let style_attributes = BTreeMap::from([
        ("has_patterns".to_string(), Value::Bool(false)),
        ("complexity".to_string(), Value::from("medium")),
        ("style_era".to_string(), Value::from("modern")),
        ("fit_type".to_string(), Value::from("regular")),
        ("sleeve_type".to_string(), Value::from("long")),
        ("neckline".to_string(), Value::from("collar")),
    ]);

    ClothingAnalysis {
        clothing_type: "shirt".to_string(),
        dominant_colors: vec![
            color("blue", "#1e40af", [30, 64, 175]),
            color("white", "#ffffff", [255, 255, 255]),
            color("gray", "#6b7280", [107, 114, 128]),
        ],
        style_attributes,
        texture: TextureInfo {
            pattern: "solid".to_string(),
            material: "cotton".to_string(),
            texture_type: "smooth".to_string(),
            uniformity_score: 45.0,
        },
        formality_level: Formality::SemiFormal,
        season_suitability: strings(&["spring", "fall", "winter"]),
        confidence_score: 0.89,
        error: None,
    }
}

fn demo_recommendation(
    item_type: &str,
    colors: &[&str],
    tags: &[&str],
    search_terms: &[&str],
    priority: f64,
) -> Recommendation {
    Recommendation {
        item_type: item_type.to_string(),
        recommended_colors: strings(colors),
        formality_level: Formality::SemiFormal,
        season: strings(&["spring", "fall", "winter"]),
        style_tags: tags.iter().map(|t| t.to_string()).collect(),
        search_terms: strings(search_terms),
        priority,
        outfit_type: OutfitType::Business,
    }
}

pub fn demo_recommendations() -> Vec<Recommendation> {
    vec![
        demo_recommendation(
            "dress_pants",
            &["navy", "charcoal", "black"],
            &["dress_pants", "semi-formal", "professional", "business"],
            &["navy dress pants", "charcoal slacks", "business pants"],
            1.7,
        ),
        demo_recommendation(
            "tie",
            &["red", "burgundy", "navy"],
            &["tie", "semi-formal", "professional", "elegant"],
            &["red tie", "burgundy necktie", "silk tie"],
            1.5,
        ),
        demo_recommendation(
            "blazer",
            &["navy", "charcoal", "gray"],
            &["blazer", "semi-formal", "professional", "jacket"],
            &["navy blazer", "charcoal sport coat", "business jacket"],
            1.6,
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn demo_product(
    title: &str,
    price: &str,
    slug: &str,
    swatch: &str,
    label: &str,
    rating: &str,
    relevance_score: f64,
    search_term: &str,
) -> Product {
    Product {
        title: title.to_string(),
        price: price.to_string(),
        url: format!("https://example.com/{slug}"),
        image_url: format!("https://via.placeholder.com/300x400/{swatch}/FFFFFF?text={label}"),
        rating: rating.to_string(),
        source: "Demo Store".to_string(),
        relevance_score,
        search_term: search_term.to_string(),
    }
}

pub fn demo_products() -> Vec<Product> {
    vec![
        demo_product(
            "Men's Classic Navy Dress Pants - Slim Fit",
            "45.99",
            "navy-pants",
            "1E40AF",
            "Navy+Pants",
            "4.2",
            0.95,
            "navy dress pants",
        ),
        demo_product(
            "Silk Red Tie - Professional Business Necktie",
            "24.99",
            "red-tie",
            "DC2626",
            "Red+Tie",
            "4.5",
            0.88,
            "red tie",
        ),
        demo_product(
            "Men's Navy Blazer - Classic Business Jacket",
            "129.99",
            "navy-blazer",
            "1E3A8A",
            "Navy+Blazer",
            "4.7",
            0.92,
            "navy blazer",
        ),
        demo_product(
            "Charcoal Gray Dress Pants - Modern Fit",
            "52.00",
            "charcoal-pants",
            "374151",
            "Charcoal+Pants",
            "4.3",
            0.87,
            "charcoal dress pants",
        ),
        demo_product(
            "Burgundy Silk Tie - Premium Quality",
            "32.99",
            "burgundy-tie",
            "991B1B",
            "Burgundy+Tie",
            "4.6",
            0.84,
            "burgundy tie",
        ),
        demo_product(
            "Light Gray Sport Coat - Versatile Blazer",
            "98.50",
            "gray-blazer",
            "6B7280",
            "Gray+Blazer",
            "4.4",
            0.81,
            "gray blazer",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_payload_shape() {
        let analysis = demo_analysis();
        assert_eq!(analysis.clothing_type, "shirt");
        assert_eq!(analysis.dominant_colors.len(), 3);
        assert!(analysis.error.is_none());

        assert_eq!(demo_recommendations().len(), 3);

        let products = demo_products();
        assert_eq!(products.len(), 6);
        assert!(products.iter().all(|p| p.source == "Demo Store"));
        assert_eq!(
            products[0].image_url,
            "https://via.placeholder.com/300x400/1E40AF/FFFFFF?text=Navy+Pants"
        );
    }

    #[test]
    fn test_demo_analysis_serializes_like_a_live_one() {
        let json = serde_json::to_value(demo_analysis()).unwrap();
        assert_eq!(json["formality_level"], "semi-formal");
        assert_eq!(json["style_attributes"]["neckline"], "collar");
        assert!(json.get("error").is_none());
    }
}
