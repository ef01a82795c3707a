//! Amazon search results scraper.

use async_trait::async_trait;
use scraper::Html;
use tracing::debug;

use super::{element_text, fetch_html, relevance_score, selector, ProductSource, SearchError};
use crate::types::{Product, Recommendation};

const SEARCH_URL: &str = "https://www.amazon.com/s";
const BASE_URL: &str = "https://amazon.com";
const SOURCE_NAME: &str = "Amazon";

/// Results kept per page
const MAX_RESULTS: usize = 10;

/// Garments searched within the fashion department
const FASHION_ITEMS: &[&str] = &["shirt", "t-shirt", "blouse"];

pub struct AmazonSource {
    client: reqwest::Client,
}

impl AmazonSource {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn query(term: &str, recommendation: &Recommendation) -> Vec<(&'static str, String)> {
        let mut params = vec![("k", term.to_string()), ("ref", "sr_pg_1".to_string())];
        if FASHION_ITEMS.contains(&recommendation.item_type.as_str()) {
            params.push(("i", "fashion-mens".to_string()));
        }
        params
    }
}

#[async_trait]
impl ProductSource for AmazonSource {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    async fn search(
        &self,
        term: &str,
        recommendation: &Recommendation,
    ) -> Result<Vec<Product>, SearchError> {
        let request = self
            .client
            .get(SEARCH_URL)
            .query(&Self::query(term, recommendation));
        let html = fetch_html(request).await?;
        let products = parse_results(&html, term, recommendation)?;
        debug!(term, count = products.len(), "Parsed Amazon results");
        Ok(products)
    }
}

/// Extract products from a search results page.
///
/// Results without a heading are skipped; missing fields fall back to
/// "N/A" (title, price, rating) or an empty string (links).
pub(crate) fn parse_results(
    html: &str,
    term: &str,
    recommendation: &Recommendation,
) -> Result<Vec<Product>, SearchError> {
    let result_sel = selector(r#"div[data-component-type="s-search-result"]"#)?;
    let heading_sel = selector("h2")?;
    let link_sel = selector("a")?;
    let span_sel = selector("span")?;
    let price_sel = selector("span.a-price-whole")?;
    let image_sel = selector("img.s-image")?;
    let rating_sel = selector("span.a-icon-alt")?;

    let document = Html::parse_document(html);
    let mut products = Vec::new();

    for item in document.select(&result_sel).take(MAX_RESULTS) {
        let Some(title_elem) = item.select(&heading_sel).next() else {
            continue;
        };
        let title_link = title_elem.select(&link_sel).next();

        let title = title_link
            .and_then(|a| a.select(&span_sel).next())
            .map(|s| element_text(&s))
            .unwrap_or_else(|| "N/A".to_string());

        let url = title_link
            .and_then(|a| a.value().attr("href"))
            .map(|href| {
                if href.starts_with('/') {
                    format!("{BASE_URL}{href}")
                } else {
                    href.to_string()
                }
            })
            .unwrap_or_default();

        let price = item
            .select(&price_sel)
            .next()
            .map(|p| element_text(&p))
            .unwrap_or_else(|| "N/A".to_string());

        let image_url = item
            .select(&image_sel)
            .next()
            .and_then(|img| img.value().attr("src"))
            .unwrap_or_default()
            .to_string();

        let rating = item
            .select(&rating_sel)
            .next()
            .and_then(|r| element_text(&r).split_whitespace().next().map(String::from))
            .unwrap_or_else(|| "N/A".to_string());

        products.push(Product {
            relevance_score: relevance_score(&title, recommendation),
            title,
            price,
            url,
            image_url,
            rating,
            source: SOURCE_NAME.to_string(),
            search_term: term.to_string(),
        });
    }

    Ok(products)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Formality, OutfitType};

    const RESULTS_PAGE: &str = r#"
        <html><body>
        <div data-component-type="s-search-result">
          <h2><a href="/Navy-Dress-Pants/dp/B01"><span>Navy Dress Pants</span></a></h2>
          <span class="a-price-whole">39.</span>
          <img class="s-image" src="https://m.media-amazon.com/images/1.jpg">
          <span class="a-icon-alt">4.5 out of 5 stars</span>
        </div>
        <div data-component-type="s-search-result">
          <p>Sponsored block without a heading</p>
        </div>
        <div data-component-type="s-search-result">
          <h2><a href="https://www.amazon.com/dp/B02"><span>Casual Chinos</span></a></h2>
        </div>
        <div class="unrelated"><h2><a href="/x"><span>Not a result</span></a></h2></div>
        </body></html>
    "#;

    fn recommendation(item_type: &str) -> Recommendation {
        Recommendation {
            item_type: item_type.to_string(),
            recommended_colors: vec!["navy".to_string()],
            formality_level: Formality::Formal,
            season: vec![],
            style_tags: Default::default(),
            search_terms: vec![],
            priority: 1.0,
            outfit_type: OutfitType::Business,
        }
    }

    #[test]
    fn test_parse_results() {
        let rec = recommendation("pants");
        let products = parse_results(RESULTS_PAGE, "navy pants", &rec).unwrap();

        assert_eq!(products.len(), 2);

        let first = &products[0];
        assert_eq!(first.title, "Navy Dress Pants");
        assert_eq!(first.url, "https://amazon.com/Navy-Dress-Pants/dp/B01");
        assert_eq!(first.price, "39.");
        assert_eq!(first.image_url, "https://m.media-amazon.com/images/1.jpg");
        assert_eq!(first.rating, "4.5");
        assert_eq!(first.source, "Amazon");
        assert_eq!(first.search_term, "navy pants");
        assert!((first.relevance_score - 1.9).abs() < 1e-9);

        let second = &products[1];
        assert_eq!(second.title, "Casual Chinos");
        assert_eq!(second.url, "https://www.amazon.com/dp/B02");
        assert_eq!(second.price, "N/A");
        assert_eq!(second.rating, "N/A");
        assert_eq!(second.image_url, "");
    }

    #[test]
    fn test_parse_caps_results() {
        let item = r#"<div data-component-type="s-search-result"><h2><a href="/p"><span>Item</span></a></h2></div>"#;
        let page = item.repeat(15);
        let products = parse_results(&page, "shirt", &recommendation("shirt")).unwrap();
        assert_eq!(products.len(), MAX_RESULTS);
    }

    #[test]
    fn test_fashion_department_filter() {
        let params = AmazonSource::query("white shirt", &recommendation("shirt"));
        assert!(params.contains(&("i", "fashion-mens".to_string())));
        assert_eq!(params[0], ("k", "white shirt".to_string()));

        let params = AmazonSource::query("pants", &recommendation("pants"));
        assert!(params.iter().all(|(key, _)| *key != "i"));
    }
}
