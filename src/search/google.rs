//! Google Shopping results scraper.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use scraper::Html;
use tracing::debug;

use super::{element_text, fetch_html, relevance_score, selector, ProductSource, SearchError};
use crate::types::{Product, Recommendation};

const SEARCH_URL: &str = "https://www.google.com/search";
const SOURCE_NAME: &str = "Google Shopping";

const MAX_RESULTS: usize = 5;

pub struct GoogleShoppingSource {
    client: reqwest::Client,
}

impl GoogleShoppingSource {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProductSource for GoogleShoppingSource {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    async fn search(
        &self,
        term: &str,
        recommendation: &Recommendation,
    ) -> Result<Vec<Product>, SearchError> {
        let query = format!("{term} shopping");
        let request = self
            .client
            .get(SEARCH_URL)
            .query(&[("q", query.as_str()), ("tbm", "shop")]);
        let html = fetch_html(request).await?;
        let products = parse_results(&html, term, recommendation)?;
        debug!(term, count = products.len(), "Parsed Google Shopping results");
        Ok(products)
    }
}

/// A dollar amount such as `$25`
static PRICE_RE: LazyLock<Result<Regex, regex::Error>> = LazyLock::new(|| Regex::new(r"\$\d+"));

fn price_pattern() -> Result<&'static Regex, SearchError> {
    PRICE_RE
        .as_ref()
        .map_err(|e| SearchError::Parse(e.to_string()))
}

/// Extract products from a shopping results page.
///
/// Result cards carry no usable links, so `url` and `image_url` stay empty.
pub(crate) fn parse_results(
    html: &str,
    term: &str,
    recommendation: &Recommendation,
) -> Result<Vec<Product>, SearchError> {
    let card = selector("div.sh-dgr__content")?;
    let heading = selector("h3")?;
    let span = selector("span")?;
    let price_re = price_pattern()?;

    let document = Html::parse_document(html);

    let products = document
        .select(&card)
        .take(MAX_RESULTS)
        .map(|result| {
            let title = result
                .select(&heading)
                .next()
                .map(|h| element_text(&h))
                .unwrap_or_else(|| "N/A".to_string());

            let price = result
                .select(&span)
                .map(|s| element_text(&s))
                .find(|text| price_re.is_match(text))
                .unwrap_or_else(|| "N/A".to_string());

            Product {
                relevance_score: relevance_score(&title, recommendation),
                title,
                price,
                url: String::new(),
                image_url: String::new(),
                rating: "N/A".to_string(),
                source: SOURCE_NAME.to_string(),
                search_term: term.to_string(),
            }
        })
        .collect();

    Ok(products)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Formality, OutfitType};

    fn recommendation() -> Recommendation {
        Recommendation {
            item_type: "jeans".to_string(),
            recommended_colors: vec!["blue".to_string()],
            formality_level: Formality::Casual,
            season: vec![],
            style_tags: Default::default(),
            search_terms: vec![],
            priority: 1.0,
            outfit_type: OutfitType::Everyday,
        }
    }

    #[test]
    fn test_price_pattern() {
        let price = price_pattern().unwrap();
        assert!(price.is_match("$25.99"));
        assert!(price.is_match("now $5"));
        assert!(!price.is_match("$"));
        assert!(!price.is_match("$ 5"));
        assert!(!price.is_match("Free shipping"));
    }

    #[test]
    fn test_parse_results() {
        let page = r#"
            <div class="sh-dgr__content">
              <h3>Relaxed Blue Jeans</h3>
              <span>Free shipping</span><span>$49.99</span>
            </div>
            <div class="sh-dgr__content"><span>no title here</span></div>
        "#;
        let products = parse_results(page, "blue jeans", &recommendation()).unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].title, "Relaxed Blue Jeans");
        assert_eq!(products[0].price, "$49.99");
        assert_eq!(products[0].source, "Google Shopping");
        assert_eq!(products[0].rating, "N/A");
        // jeans +1.0, blue +0.5, relaxed +0.4
        assert!((products[0].relevance_score - 1.9).abs() < 1e-9);

        assert_eq!(products[1].title, "N/A");
        assert_eq!(products[1].price, "N/A");
    }

    #[test]
    fn test_parse_caps_results() {
        let page = r#"<div class="sh-dgr__content"><h3>Jeans</h3></div>"#.repeat(8);
        let products = parse_results(&page, "jeans", &recommendation()).unwrap();
        assert_eq!(products.len(), MAX_RESULTS);
    }
}
