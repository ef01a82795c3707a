//! Clothing analysis record produced by the image analyzer.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Coarse formality classification.
///
/// Unknown strings are preserved as [`Formality::Other`] so a client-supplied
/// analysis never fails to parse; they simply match no formality rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Formality {
    #[default]
    Casual,
    SemiFormal,
    Formal,
    Other(String),
}

impl Formality {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Casual => "casual",
            Self::SemiFormal => "semi-formal",
            Self::Formal => "formal",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for Formality {
    fn from(value: String) -> Self {
        match value.as_str() {
            "casual" => Self::Casual,
            "semi-formal" => Self::SemiFormal,
            "formal" => Self::Formal,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for Formality {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<Formality> for String {
    fn from(value: Formality) -> Self {
        match value {
            Formality::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for Formality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One dominant color cluster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DominantColor {
    /// Color name from the fixed vocabulary
    pub name: String,
    /// Lower-case `#rrggbb`
    #[serde(default)]
    pub hex: String,
    /// Cluster center
    #[serde(default)]
    pub rgb: [u8; 3],
}

/// Texture and material guess from the local binary pattern pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureInfo {
    pub pattern: String,
    pub material: String,
    #[serde(default)]
    pub texture_type: String,
    #[serde(default)]
    pub uniformity_score: f32,
}

impl Default for TextureInfo {
    fn default() -> Self {
        Self {
            pattern: "unknown".to_string(),
            material: "cotton".to_string(),
            texture_type: "medium".to_string(),
            uniformity_score: 50.0,
        }
    }
}

/// Result of analysing one clothing photo.
///
/// `dominant_colors` is ordered by cluster prevalence, most prevalent first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClothingAnalysis {
    #[serde(default = "default_clothing_type")]
    pub clothing_type: String,

    #[serde(default)]
    pub dominant_colors: Vec<DominantColor>,

    /// Free-form categorical attributes (complexity, fit_type, ...)
    #[serde(default)]
    pub style_attributes: BTreeMap<String, serde_json::Value>,

    #[serde(default)]
    pub texture: TextureInfo,

    #[serde(default)]
    pub formality_level: Formality,

    #[serde(default = "default_seasons")]
    pub season_suitability: Vec<String>,

    /// 0.0 for degraded analyses
    #[serde(default)]
    pub confidence_score: f32,

    /// Set when the analysis fell back to placeholder values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn default_clothing_type() -> String {
    "unknown".to_string()
}

fn default_seasons() -> Vec<String> {
    vec!["spring".to_string(), "fall".to_string()]
}

impl ClothingAnalysis {
    /// Placeholder analysis used when the image could not be processed
    pub fn degraded(message: impl Into<String>) -> Self {
        Self {
            clothing_type: default_clothing_type(),
            dominant_colors: Vec::new(),
            style_attributes: BTreeMap::new(),
            texture: TextureInfo {
                pattern: "unknown".to_string(),
                material: "unknown".to_string(),
                texture_type: String::new(),
                uniformity_score: 0.0,
            },
            formality_level: Formality::Casual,
            season_suitability: default_seasons(),
            confidence_score: 0.0,
            error: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formality_roundtrip_strings() {
        assert_eq!(Formality::from("semi-formal"), Formality::SemiFormal);
        assert_eq!(Formality::from("formal").as_str(), "formal");
        assert_eq!(
            Formality::from("black-tie"),
            Formality::Other("black-tie".to_string())
        );
        assert_eq!(String::from(Formality::SemiFormal), "semi-formal");
    }

    #[test]
    fn test_minimal_analysis_uses_defaults() {
        let analysis: ClothingAnalysis = serde_json::from_str(
            r#"{"clothing_type": "shirt", "dominant_colors": [{"name": "blue"}]}"#,
        )
        .unwrap();

        assert_eq!(analysis.clothing_type, "shirt");
        assert_eq!(analysis.dominant_colors[0].name, "blue");
        assert_eq!(analysis.dominant_colors[0].rgb, [0, 0, 0]);
        assert_eq!(analysis.formality_level, Formality::Casual);
        assert_eq!(analysis.season_suitability, vec!["spring", "fall"]);
        assert!(analysis.error.is_none());
    }

    #[test]
    fn test_formality_serializes_as_plain_string() {
        let json = serde_json::to_string(&Formality::SemiFormal).unwrap();
        assert_eq!(json, "\"semi-formal\"");
    }

    #[test]
    fn test_degraded_analysis() {
        let analysis = ClothingAnalysis::degraded("Analysis failed: bad image");
        assert_eq!(analysis.clothing_type, "unknown");
        assert!(analysis.dominant_colors.is_empty());
        assert_eq!(analysis.confidence_score, 0.0);

        let json = serde_json::to_string(&analysis).unwrap();
        assert!(json.contains("Analysis failed"));
    }
}
