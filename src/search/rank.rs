//! Product deduplication and ranking.

use std::collections::HashSet;

use crate::types::Product;

/// Tokens of the lower-cased title that identify a product
const TITLE_KEY_TOKENS: usize = 4;

fn title_key(title: &str) -> String {
    title
        .to_lowercase()
        .split_whitespace()
        .take(TITLE_KEY_TOKENS)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Drop products whose title key was already seen, keeping the first
pub fn dedup_products(products: Vec<Product>) -> Vec<Product> {
    let mut seen = HashSet::new();
    products
        .into_iter()
        .filter(|product| seen.insert(title_key(&product.title)))
        .collect()
}

/// Stable sort by relevance, highest first
pub fn sort_by_relevance(products: &mut [Product]) {
    products.sort_by(|a, b| {
        b.relevance_score
            .partial_cmp(&a.relevance_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

pub fn dedup_and_rank(products: Vec<Product>) -> Vec<Product> {
    let mut products = dedup_products(products);
    sort_by_relevance(&mut products);
    products
}
