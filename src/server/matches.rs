//! Matching route handler.

use axum::extract::State;
use tracing::info;

use crate::error::AppError;
use crate::types::{FindMatchesRequest, FindMatchesResponse};

use super::extractors::{ApiBody, ResponseFormat};
use super::routes::Negotiated;
use super::AppState;

/// Products returned from find-matches
const MAX_PRODUCTS: usize = 20;

/// POST /api/find-matches
///
/// Expand a previously returned analysis into recommendations and search
/// products for every one of them.
pub async fn find_matches(
    State(state): State<AppState>,
    format: ResponseFormat,
    ApiBody(req): ApiBody<FindMatchesRequest>,
) -> Result<Negotiated<FindMatchesResponse>, AppError> {
    let analysis = req
        .clothing_analysis
        .ok_or_else(|| AppError::BadRequest("No clothing analysis provided".to_string()))?;

    let recommendations = state.matcher.find_matches(&analysis, req.preferences.as_ref());

    let mut products = Vec::new();
    for recommendation in &recommendations {
        products.extend(state.searcher.search_products(recommendation).await);
    }
    products.truncate(MAX_PRODUCTS);

    info!(
        clothing_type = %analysis.clothing_type,
        recommendations = recommendations.len(),
        products = products.len(),
        "Found matches"
    );

    Ok(Negotiated::new(
        format,
        FindMatchesResponse {
            success: true,
            recommendations,
            products,
        },
    ))
}
