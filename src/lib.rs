//! AI Wardrobe Matcher
//!
//! Analyzes a clothing photo, recommends complementary garments from fixed
//! outfit rules and searches shopping sites for matching products.

pub mod analyzer;
pub mod color;
pub mod config;
pub mod demo;
pub mod error;
pub mod search;
pub mod server;
pub mod style;
pub mod types;

pub use analyzer::ClothingAnalyzer;
pub use config::AppConfig;
pub use error::{AppError, Result};
pub use search::WebSearcher;
pub use style::StyleMatcher;
