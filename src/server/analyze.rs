//! Image analysis route handlers.

use axum::extract::{Multipart, State};
use bytes::Bytes;
use tracing::{error, info};

use crate::demo;
use crate::error::AppError;
use crate::types::{AnalyzeAndMatchResponse, AnalyzeResponse, ClothingAnalysis};

use super::extractors::ResponseFormat;
use super::routes::Negotiated;
use super::upload::read_upload;
use super::AppState;

/// Recommendations searched for products in the combined flow
const SEARCHED_RECOMMENDATIONS: usize = 5;

/// Products returned from the combined flow
const MAX_COMBINED_PRODUCTS: usize = 10;

/// Run the analyzer off the async runtime
async fn run_analysis(state: &AppState, bytes: Bytes) -> Result<ClothingAnalysis, AppError> {
    let analyzer = state.analyzer.clone();
    tokio::task::spawn_blocking(move || analyzer.analyze_bytes(&bytes))
        .await
        .map_err(|e| {
            error!(error = %e, "Analysis task panicked");
            AppError::Internal(e.to_string())
        })
}

/// POST /api/analyze
///
/// Analyze an uploaded clothing photo. Undecodable images still succeed
/// with a degraded analysis carrying the error.
pub async fn analyze(
    State(state): State<AppState>,
    format: ResponseFormat,
    multipart: Multipart,
) -> Result<Negotiated<AnalyzeResponse>, AppError> {
    let upload = read_upload(multipart).await?;
    let analysis = run_analysis(&state, upload.bytes).await?;

    info!(
        file_name = %upload.file_name,
        clothing_type = %analysis.clothing_type,
        degraded = analysis.error.is_some(),
        "Analyzed upload"
    );

    Ok(Negotiated::new(
        format,
        AnalyzeResponse {
            success: true,
            analysis,
        },
    ))
}

/// POST /api/analyze-and-match
///
/// Analyze a photo, match it and search products for the top
/// recommendations. Serves fixed sample data in demo mode.
pub async fn analyze_and_match(
    State(state): State<AppState>,
    format: ResponseFormat,
    multipart: Multipart,
) -> Result<Negotiated<AnalyzeAndMatchResponse>, AppError> {
    let upload = read_upload(multipart).await?;

    if state.demo_mode() {
        info!(file_name = %upload.file_name, "Serving demo results");
        return Ok(Negotiated::new(
            format,
            AnalyzeAndMatchResponse {
                success: true,
                analysis: demo::demo_analysis(),
                recommendations: demo::demo_recommendations(),
                products: demo::demo_products(),
            },
        ));
    }

    let analysis = run_analysis(&state, upload.bytes).await?;
    let recommendations = state
        .matcher
        .find_matches(&analysis, Some(&upload.preferences));

    let mut products = Vec::new();
    for recommendation in recommendations.iter().take(SEARCHED_RECOMMENDATIONS) {
        products.extend(state.searcher.search_products(recommendation).await);
    }
    products.truncate(MAX_COMBINED_PRODUCTS);

    info!(
        file_name = %upload.file_name,
        clothing_type = %analysis.clothing_type,
        recommendations = recommendations.len(),
        products = products.len(),
        "Analyzed and matched upload"
    );

    Ok(Negotiated::new(
        format,
        AnalyzeAndMatchResponse {
            success: true,
            analysis,
            recommendations,
            products,
        },
    ))
}
