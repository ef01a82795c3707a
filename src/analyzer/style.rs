//! Edge-density style attributes.

use std::collections::BTreeMap;

use image::GrayImage;
use imageproc::edges::canny;
use serde_json::Value;

const CANNY_LOW: f32 = 50.0;
const CANNY_HIGH: f32 = 150.0;

/// Visual busyness derived from edge density
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Complexity {
    Low,
    Medium,
    High,
}

impl Complexity {
    pub fn from_edge_density(density: f64) -> Self {
        if density > 0.15 {
            Self::High
        } else if density > 0.05 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleAttributes {
    pub edge_density: f64,
    pub has_patterns: bool,
    pub complexity: Complexity,
}

impl StyleAttributes {
    pub fn from_edge_density(edge_density: f64) -> Self {
        Self {
            edge_density,
            has_patterns: edge_density > 0.1,
            complexity: Complexity::from_edge_density(edge_density),
        }
    }

    /// Attribute map as reported in an analysis
    pub fn to_map(&self) -> BTreeMap<String, Value> {
        BTreeMap::from([
            ("has_patterns".to_string(), Value::Bool(self.has_patterns)),
            ("complexity".to_string(), Value::from(self.complexity.as_str())),
            ("style_era".to_string(), Value::from("modern")),
            ("fit_type".to_string(), Value::from("regular")),
            ("sleeve_type".to_string(), Value::from("unknown")),
            ("neckline".to_string(), Value::from("unknown")),
        ])
    }
}

/// Fraction of pixels marked as edges by Canny
pub fn edge_density(gray: &GrayImage) -> f64 {
    let total = gray.width() as usize * gray.height() as usize;
    if total == 0 {
        return 0.0;
    }
    let edges = canny(gray, CANNY_LOW, CANNY_HIGH);
    let edge_pixels = edges.pixels().filter(|p| p.0[0] > 0).count();
    edge_pixels as f64 / total as f64
}

pub fn analyze_style(gray: &GrayImage) -> StyleAttributes {
    StyleAttributes::from_edge_density(edge_density(gray))
}
