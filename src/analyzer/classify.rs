//! Garment type classification.

use image::RgbImage;
use tracing::debug;

/// Assigns a garment type to an image
pub trait GarmentClassifier: Send + Sync {
    fn classify(&self, image: &RgbImage) -> String;

    /// Short name for logs
    fn name(&self) -> &'static str {
        "custom"
    }
}

/// Produces a free-text label for an image, e.g. from an image-classification model
pub trait ImageLabeler: Send + Sync {
    /// Best label, or `None` when the labeler has no opinion
    fn top_label(&self, image: &RgbImage) -> Option<String>;
}

/// Label substrings and the garment type they map to, tested in order
const LABEL_GARMENTS: &[(&str, &str)] = &[
    ("suit", "suit"),
    ("dress", "dress"),
    ("shirt", "shirt"),
    ("blouse", "blouse"),
    ("sweater", "sweater"),
    ("jacket", "jacket"),
    ("coat", "outerwear"),
    ("pants", "pants"),
    ("jeans", "jeans"),
    ("skirt", "skirt"),
    ("shorts", "shorts"),
    ("t-shirt", "t-shirt"),
    ("polo", "polo"),
    ("hoodie", "hoodie"),
    ("cardigan", "cardigan"),
    ("blazer", "blazer"),
];

/// Map a model label to a garment type by first substring match.
///
/// Order matters: "t-shirt" contains "shirt" and so maps to shirt.
pub fn garment_from_label(label: &str) -> Option<&'static str> {
    let label = label.to_lowercase();
    LABEL_GARMENTS
        .iter()
        .find(|(key, _)| label.contains(key))
        .map(|(_, garment)| *garment)
}

/// Guesses the garment from the image's proportions
#[derive(Debug, Clone, Copy, Default)]
pub struct AspectRatioClassifier;

impl GarmentClassifier for AspectRatioClassifier {
    fn name(&self) -> &'static str {
        "aspect-ratio"
    }

    fn classify(&self, image: &RgbImage) -> String {
        let (width, height) = image.dimensions();
        if height == 0 {
            return "shirt".to_string();
        }
        let aspect_ratio = width as f64 / height as f64;

        let garment = if aspect_ratio > 1.5 {
            "pants"
        } else if aspect_ratio < 0.7 {
            "dress"
        } else {
            "shirt"
        };
        garment.to_string()
    }
}

/// Classifies with an [`ImageLabeler`], falling back to [`AspectRatioClassifier`]
/// when the label is missing or maps to no garment
pub struct LabelClassifier<L> {
    labeler: L,
    fallback: AspectRatioClassifier,
}

impl<L: ImageLabeler> LabelClassifier<L> {
    pub fn new(labeler: L) -> Self {
        Self {
            labeler,
            fallback: AspectRatioClassifier,
        }
    }
}

impl<L: ImageLabeler> GarmentClassifier for LabelClassifier<L> {
    fn name(&self) -> &'static str {
        "label-model"
    }

    fn classify(&self, image: &RgbImage) -> String {
        if let Some(label) = self.labeler.top_label(image) {
            if let Some(garment) = garment_from_label(&label) {
                return garment.to_string();
            }
            debug!(label = %label, "Label maps to no garment, using fallback");
        }
        self.fallback.classify(image)
    }
}
