//! Service info, health, and response encoding.

use std::collections::BTreeMap;

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::error::AppError;
use crate::types::{HealthResponse, HealthStatus, ServiceInfo};

use super::extractors::ResponseFormat;
use super::AppState;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// `MessagePack` response wrapper
pub struct MsgPack<T>(pub T);

impl<T: Serialize> IntoResponse for MsgPack<T> {
    fn into_response(self) -> Response {
        match rmp_serde::to_vec_named(&self.0) {
            Ok(bytes) => (
                StatusCode::OK,
                [("content-type", "application/msgpack")],
                bytes,
            )
                .into_response(),
            Err(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to serialize response: {e}"),
            )
                .into_response(),
        }
    }
}

/// Response body encoded in the format the client asked for
pub struct Negotiated<T> {
    pub format: ResponseFormat,
    pub body: T,
}

impl<T> Negotiated<T> {
    pub fn new(format: ResponseFormat, body: T) -> Self {
        Self { format, body }
    }
}

impl<T: Serialize> IntoResponse for Negotiated<T> {
    fn into_response(self) -> Response {
        match self.format {
            ResponseFormat::Json => Json(self.body).into_response(),
            ResponseFormat::MsgPack => MsgPack(self.body).into_response(),
        }
    }
}

/// Service description
///
/// GET /
pub async fn root(
    State(state): State<AppState>,
    format: ResponseFormat,
) -> Negotiated<ServiceInfo> {
    let endpoints = BTreeMap::from([
        ("analyze_clothing".to_string(), "/api/analyze".to_string()),
        ("find_matches".to_string(), "/api/find-matches".to_string()),
        (
            "analyze_and_match".to_string(),
            "/api/analyze-and-match".to_string(),
        ),
        ("health".to_string(), "/api/health".to_string()),
    ]);

    let mode = if state.demo_mode() { "demo" } else { "live" };

    Negotiated::new(
        format,
        ServiceInfo {
            message: "AI Wardrobe API is running!".to_string(),
            version: VERSION.to_string(),
            mode: mode.to_string(),
            uptime_seconds: state.uptime_seconds(),
            endpoints,
        },
    )
}

/// Health check endpoint
///
/// GET /api/health
///
/// Degraded when product search is configured but no source is available.
pub async fn health(
    State(state): State<AppState>,
    format: ResponseFormat,
) -> Negotiated<HealthResponse> {
    let search_missing = state.config.search.enabled && !state.searcher.has_sources();

    let body = if search_missing && !state.demo_mode() {
        HealthResponse {
            status: HealthStatus::Degraded,
            message: "Product search unavailable".to_string(),
        }
    } else {
        HealthResponse {
            status: HealthStatus::Healthy,
            message: "API is running normally".to_string(),
        }
    };

    Negotiated::new(format, body)
}

/// Fallback for unknown paths
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}
