//! API request and response types for analysis and matching operations.

use serde::{Deserialize, Serialize};

use super::analysis::ClothingAnalysis;
use super::recommendation::{Preferences, Product, Recommendation};

/// Response from the analyze endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub analysis: ClothingAnalysis,
}

/// Request to expand an existing analysis into recommendations and products
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindMatchesRequest {
    /// Analysis previously returned by the analyze endpoint
    #[serde(default)]
    pub clothing_analysis: Option<ClothingAnalysis>,

    /// Optional user preferences; `null` and absent mean none
    #[serde(default)]
    pub preferences: Option<Preferences>,
}

/// Response from the find-matches endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindMatchesResponse {
    pub success: bool,
    pub recommendations: Vec<Recommendation>,
    /// At most 20 products
    pub products: Vec<Product>,
}

/// Response from the combined analyze-and-match endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeAndMatchResponse {
    pub success: bool,
    pub analysis: ClothingAnalysis,
    pub recommendations: Vec<Recommendation>,
    /// At most 10 products
    pub products: Vec<Product>,
}
