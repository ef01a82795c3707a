//! Clothing photo analysis.
//!
//! Turns uploaded image bytes into a [`ClothingAnalysis`]:
//! - garment type via a pluggable [`GarmentClassifier`]; an ONNX image
//!   classifier when one is configured (`onnx` feature), otherwise the
//!   image's aspect ratio
//! - dominant colors via k-means
//! - style attributes from Canny edge density
//! - texture from local binary patterns
//! - formality and season from fixed heuristics
//!
//! Analysis never fails outright: undecodable input yields a degraded
//! analysis carrying the error message.

mod classify;
mod colors;
mod labels;
#[cfg(feature = "onnx")]
mod onnx;
mod style;
mod texture;

pub use classify::{
    garment_from_label, AspectRatioClassifier, GarmentClassifier, ImageLabeler, LabelClassifier,
};
pub use colors::{dominant_colors, unknown_color, KMeansParams};
pub use labels::{image_to_tensor_data, parse_labels, top_index, DEFAULT_INPUT_SIZE};
#[cfg(feature = "onnx")]
pub use onnx::OnnxLabeler;
pub use style::{analyze_style, edge_density, Complexity, StyleAttributes};
pub use texture::{analyze_texture, local_binary_pattern, texture_from_uniformity};

use std::path::Path;

use image::DynamicImage;
use tracing::{debug, info, warn};

use crate::config::AnalysisConfig;
use crate::types::{ClothingAnalysis, DominantColor, Formality};

/// Confidence reported for every successful analysis
pub const ANALYSIS_CONFIDENCE: f32 = 0.85;

/// Error type for image analysis
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Could not decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Image has no pixels")]
    EmptyImage,

    #[error("Classifier model error: {0}")]
    Model(String),
}

/// Analyzes clothing photos
pub struct ClothingAnalyzer {
    classifier: Box<dyn GarmentClassifier>,
    kmeans: KMeansParams,
}

impl ClothingAnalyzer {
    /// Create an analyzer using the aspect-ratio classifier
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            classifier: Box::new(AspectRatioClassifier),
            kmeans: KMeansParams {
                max_clusters: config.max_colors,
                seed: config.kmeans_seed,
                max_iterations: config.kmeans_max_iterations,
            },
        }
    }

    /// Create an analyzer with the classifier the configuration asks for.
    ///
    /// A configured model that cannot be loaded is logged and the
    /// aspect-ratio classifier is used instead.
    pub fn from_config(config: &AnalysisConfig) -> Self {
        let analyzer = Self::new(config);
        let Some(model_path) = config.classifier_model.as_deref() else {
            return analyzer;
        };

        match model_classifier(config, model_path) {
            Ok(Some(classifier)) => analyzer.with_boxed_classifier(classifier),
            Ok(None) => analyzer,
            Err(e) => {
                warn!(
                    model = %model_path.display(),
                    error = %e,
                    "Classifier model unavailable, using aspect ratio"
                );
                analyzer
            }
        }
    }

    /// Builder method to replace the garment classifier
    pub fn with_classifier(self, classifier: impl GarmentClassifier + 'static) -> Self {
        self.with_boxed_classifier(Box::new(classifier))
    }

    fn with_boxed_classifier(mut self, classifier: Box<dyn GarmentClassifier>) -> Self {
        info!(classifier = classifier.name(), "Garment classifier selected");
        self.classifier = classifier;
        self
    }

    pub fn classifier_name(&self) -> &'static str {
        self.classifier.name()
    }

    /// Analyze encoded image bytes, degrading instead of failing
    pub fn analyze_bytes(&self, bytes: &[u8]) -> ClothingAnalysis {
        match self.try_analyze_bytes(bytes) {
            Ok(analysis) => analysis,
            Err(e) => {
                warn!(error = %e, size = bytes.len(), "Image analysis failed");
                ClothingAnalysis::degraded(format!("Analysis failed: {e}"))
            }
        }
    }

    pub fn try_analyze_bytes(&self, bytes: &[u8]) -> Result<ClothingAnalysis, AnalysisError> {
        let image = image::load_from_memory(bytes)?;
        self.analyze_image(&image)
    }

    pub fn analyze_image(&self, image: &DynamicImage) -> Result<ClothingAnalysis, AnalysisError> {
        if image.width() == 0 || image.height() == 0 {
            return Err(AnalysisError::EmptyImage);
        }

        let rgb = image.to_rgb8();
        let gray = image.to_luma8();

        let clothing_type = self.classifier.classify(&rgb);
        let dominant_colors = dominant_colors(&rgb, &self.kmeans);
        let style = analyze_style(&gray);
        let texture = analyze_texture(&gray);
        let formality_level = determine_formality(&clothing_type, style.complexity);
        let season_suitability = determine_seasons(&clothing_type, &dominant_colors);

        debug!(
            clothing_type = %clothing_type,
            colors = dominant_colors.len(),
            edge_density = style.edge_density,
            formality = %formality_level,
            "Analyzed image"
        );

        Ok(ClothingAnalysis {
            clothing_type,
            dominant_colors,
            style_attributes: style.to_map(),
            texture,
            formality_level,
            season_suitability,
            confidence_score: ANALYSIS_CONFIDENCE,
            error: None,
        })
    }
}

impl Default for ClothingAnalyzer {
    fn default() -> Self {
        Self::new(&AnalysisConfig::default())
    }
}

#[cfg(feature = "onnx")]
fn model_classifier(
    config: &AnalysisConfig,
    model_path: &Path,
) -> Result<Option<Box<dyn GarmentClassifier>>, AnalysisError> {
    let labels_path = config.classifier_labels.as_deref().ok_or_else(|| {
        AnalysisError::Model("classifier_labels must be set with classifier_model".to_string())
    })?;
    let labeler = OnnxLabeler::load(model_path, labels_path, config.classifier_input_size)?;
    Ok(Some(Box::new(LabelClassifier::new(labeler))))
}

#[cfg(not(feature = "onnx"))]
fn model_classifier(
    _config: &AnalysisConfig,
    model_path: &Path,
) -> Result<Option<Box<dyn GarmentClassifier>>, AnalysisError> {
    warn!(
        model = %model_path.display(),
        "Classifier model configured but built without the onnx feature"
    );
    Ok(None)
}

const FORMAL_GARMENTS: &[&str] = &["suit", "blazer", "dress_shirt", "tie"];
const CASUAL_GARMENTS: &[&str] = &["t-shirt", "jeans", "hoodie", "shorts"];

pub fn determine_formality(clothing_type: &str, complexity: Complexity) -> Formality {
    if FORMAL_GARMENTS.contains(&clothing_type) {
        Formality::Formal
    } else if CASUAL_GARMENTS.contains(&clothing_type) || complexity != Complexity::High {
        Formality::Casual
    } else {
        Formality::SemiFormal
    }
}

const HEAVY_GARMENTS: &[&str] = &["coat", "sweater", "hoodie"];
const LIGHT_GARMENTS: &[&str] = &["shorts", "t-shirt", "tank_top"];
const DARK_COLORS: &[&str] = &["black", "brown", "gray", "navy"];
const LIGHT_COLORS: &[&str] = &["white", "yellow", "pink", "light_blue"];

pub fn determine_seasons(clothing_type: &str, colors: &[DominantColor]) -> Vec<String> {
    let seasons: [&str; 2] = if HEAVY_GARMENTS.contains(&clothing_type) {
        ["fall", "winter"]
    } else if LIGHT_GARMENTS.contains(&clothing_type) {
        ["spring", "summer"]
    } else {
        match colors.first().map(|c| c.name.as_str()) {
            Some(name) if DARK_COLORS.contains(&name) => ["fall", "winter"],
            Some(name) if LIGHT_COLORS.contains(&name) => ["spring", "summer"],
            _ => ["spring", "fall"],
        }
    };
    seasons.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    fn png_bytes(image: RgbImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(image)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn color(name: &str) -> DominantColor {
        DominantColor {
            name: name.to_string(),
            hex: String::new(),
            rgb: [0, 0, 0],
        }
    }

    #[test]
    fn test_analyze_solid_png() {
        let analyzer = ClothingAnalyzer::default();
        let bytes = png_bytes(RgbImage::from_pixel(40, 40, Rgb([255, 255, 255])));

        let analysis = analyzer.analyze_bytes(&bytes);

        assert!(analysis.error.is_none());
        assert_eq!(analysis.clothing_type, "shirt");
        assert_eq!(analysis.dominant_colors.len(), 1);
        assert_eq!(analysis.dominant_colors[0].name, "white");
        assert_eq!(analysis.dominant_colors[0].hex, "#ffffff");
        assert_eq!(analysis.formality_level, Formality::Casual);
        assert_eq!(analysis.season_suitability, vec!["spring", "summer"]);
        assert_eq!(analysis.texture.material, "silk");
        assert_eq!(analysis.style_attributes["complexity"], "low");
        assert!((analysis.confidence_score - 0.85).abs() < 1e-6);
    }

    #[test]
    fn test_wide_image_is_pants() {
        let analyzer = ClothingAnalyzer::default();
        let bytes = png_bytes(RgbImage::from_pixel(90, 40, Rgb([10, 10, 10])));
        let analysis = analyzer.analyze_bytes(&bytes);
        assert_eq!(analysis.clothing_type, "pants");
        assert_eq!(analysis.season_suitability, vec!["fall", "winter"]);
    }

    #[test]
    fn test_garbage_bytes_degrade() {
        let analyzer = ClothingAnalyzer::default();
        let analysis = analyzer.analyze_bytes(b"definitely not an image");

        assert_eq!(analysis.clothing_type, "unknown");
        assert!(analysis.dominant_colors.is_empty());
        assert!(analysis.style_attributes.is_empty());
        assert_eq!(analysis.confidence_score, 0.0);
        assert_eq!(analysis.formality_level, Formality::Casual);
        assert!(analysis.error.unwrap().starts_with("Analysis failed"));
    }

    #[test]
    fn test_custom_classifier() {
        struct Always(&'static str);
        impl GarmentClassifier for Always {
            fn classify(&self, _image: &RgbImage) -> String {
                self.0.to_string()
            }
        }

        let analyzer = ClothingAnalyzer::default().with_classifier(Always("suit"));
        let bytes = png_bytes(RgbImage::from_pixel(20, 20, Rgb([20, 20, 240])));
        let analysis = analyzer.analyze_bytes(&bytes);
        assert_eq!(analysis.clothing_type, "suit");
        assert_eq!(analysis.formality_level, Formality::Formal);
    }

    #[test]
    fn test_from_config_without_model_uses_aspect_ratio() {
        let analyzer = ClothingAnalyzer::from_config(&AnalysisConfig::default());
        assert_eq!(analyzer.classifier_name(), "aspect-ratio");
    }

    #[test]
    fn test_unloadable_model_falls_back_to_aspect_ratio() {
        let config = AnalysisConfig {
            classifier_model: Some("/nonexistent/garments.onnx".into()),
            classifier_labels: Some("/nonexistent/labels.txt".into()),
            ..AnalysisConfig::default()
        };
        let analyzer = ClothingAnalyzer::from_config(&config);
        assert_eq!(analyzer.classifier_name(), "aspect-ratio");

        let bytes = png_bytes(RgbImage::from_pixel(60, 20, Rgb([0, 0, 0])));
        assert_eq!(analyzer.analyze_bytes(&bytes).clothing_type, "pants");
    }

    #[test]
    fn test_formality_heuristic() {
        assert_eq!(determine_formality("blazer", Complexity::Low), Formality::Formal);
        assert_eq!(determine_formality("jeans", Complexity::High), Formality::Casual);
        assert_eq!(determine_formality("dress", Complexity::High), Formality::SemiFormal);
        assert_eq!(determine_formality("dress", Complexity::Medium), Formality::Casual);
    }

    #[test]
    fn test_season_heuristic() {
        assert_eq!(determine_seasons("hoodie", &[color("white")]), vec!["fall", "winter"]);
        assert_eq!(determine_seasons("t-shirt", &[color("black")]), vec!["spring", "summer"]);
        assert_eq!(determine_seasons("shirt", &[color("navy")]), vec!["fall", "winter"]);
        assert_eq!(determine_seasons("shirt", &[color("yellow")]), vec!["spring", "summer"]);
        assert_eq!(determine_seasons("shirt", &[color("red")]), vec!["spring", "fall"]);
        assert_eq!(determine_seasons("shirt", &[]), vec!["spring", "fall"]);
    }
}
