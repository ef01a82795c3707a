//! HTTP server setup and routing.

mod analyze;
mod extractors;
mod matches;
mod routes;
mod upload;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::analyzer::ClothingAnalyzer;
use crate::config::AppConfig;
use crate::error::AppError;
use crate::search::WebSearcher;
use crate::style::StyleMatcher;

pub use extractors::{ApiBody, ResponseFormat};
pub use routes::{MsgPack, Negotiated};
pub use upload::{allowed_file, ImageUpload, ALLOWED_EXTENSIONS};

/// Shared application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub analyzer: Arc<ClothingAnalyzer>,
    pub matcher: Arc<StyleMatcher>,
    pub searcher: Arc<WebSearcher>,
    /// Server start time for uptime calculation
    pub started_at: Instant,
}

impl AppState {
    /// Create state with the product searcher described by the configuration
    pub fn new(config: AppConfig) -> Result<Self, AppError> {
        let searcher = WebSearcher::from_config(&config.search)?;
        Ok(Self::with_searcher(config, searcher))
    }

    /// Create state with an explicit product searcher
    pub fn with_searcher(config: AppConfig, searcher: WebSearcher) -> Self {
        Self {
            analyzer: Arc::new(ClothingAnalyzer::from_config(&config.analysis)),
            matcher: Arc::new(StyleMatcher::new()),
            searcher: Arc::new(searcher),
            config: Arc::new(config),
            started_at: Instant::now(),
        }
    }

    /// Builder method to replace the analyzer (e.g. with a model-backed classifier)
    pub fn with_analyzer(mut self, analyzer: ClothingAnalyzer) -> Self {
        self.analyzer = Arc::new(analyzer);
        self
    }

    pub fn demo_mode(&self) -> bool {
        self.config.demo.enabled
    }

    /// Get uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

/// Creates the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(routes::health))
        .route("/analyze", post(analyze::analyze))
        .route("/find-matches", post(matches::find_matches))
        .route("/analyze-and-match", post(analyze::analyze_and_match));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(routes::root))
        .nest("/api", api_routes)
        .fallback(routes::not_found)
        .layer(DefaultBodyLimit::max(state.config.server.max_upload_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
