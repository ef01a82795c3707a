//! Shared types for the wardrobe matcher API.
//!
//! These types are used across the application for request/response handling
//! and internal data representation.

pub mod analysis;
pub mod api;
pub mod recommendation;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use analysis::{ClothingAnalysis, DominantColor, Formality, TextureInfo};
pub use api::*;
pub use recommendation::{OutfitType, Preferences, Product, Recommendation};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

/// Service description returned from the root path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub message: String,
    pub version: String,
    /// "live" or "demo"
    pub mode: String,
    pub uptime_seconds: u64,
    pub endpoints: BTreeMap<String, String>,
}
