//! ONNX Runtime image classifier used as an [`ImageLabeler`].

use std::path::Path;
use std::sync::Mutex;

use image::RgbImage;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Tensor;
use tracing::{debug, info, warn};

use super::classify::ImageLabeler;
use super::labels::{image_to_tensor_data, parse_labels, top_index};
use super::AnalysisError;

/// Image-classification model whose best label names the garment
pub struct OnnxLabeler {
    session: Mutex<Session>,
    labels: Vec<String>,
    input_size: u32,
}

impl std::fmt::Debug for OnnxLabeler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxLabeler")
            .field("labels", &self.labels.len())
            .field("input_size", &self.input_size)
            .finish()
    }
}

fn model_error(e: impl std::fmt::Display) -> AnalysisError {
    AnalysisError::Model(e.to_string())
}

impl OnnxLabeler {
    /// Load a classifier model and its labels file (one label per output index)
    pub fn load(
        model_path: &Path,
        labels_path: &Path,
        input_size: u32,
    ) -> Result<Self, AnalysisError> {
        let labels_text = std::fs::read_to_string(labels_path)
            .map_err(|e| AnalysisError::Model(format!("Failed to read labels file: {e}")))?;
        let labels = parse_labels(&labels_text);
        if labels.is_empty() {
            return Err(AnalysisError::Model("Labels file is empty".to_string()));
        }

        let model_bytes = std::fs::read(model_path)
            .map_err(|e| AnalysisError::Model(format!("Failed to read model file: {e}")))?;

        let session = Session::builder()
            .map_err(model_error)?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(model_error)?
            .with_intra_threads(4)
            .map_err(model_error)?
            .commit_from_memory(&model_bytes)
            .map_err(|e| AnalysisError::Model(format!("Failed to load model: {e}")))?;

        info!(
            model = %model_path.display(),
            labels = labels.len(),
            input_size,
            "Loaded garment classifier model"
        );

        Ok(Self {
            session: Mutex::new(session),
            labels,
            input_size,
        })
    }

    fn logits(&self, image: &RgbImage) -> Result<Vec<f32>, AnalysisError> {
        let size = self.input_size as usize;
        let data = image_to_tensor_data(image, self.input_size);
        let input = Tensor::from_array(([1usize, 3, size, size], data.into_boxed_slice()))
            .map_err(model_error)?;

        let mut session = self
            .session
            .lock()
            .map_err(|e| AnalysisError::Model(format!("Session lock error: {e}")))?;

        let input_name = session
            .inputs
            .first()
            .map(|input| input.name.clone())
            .ok_or_else(|| AnalysisError::Model("Model has no inputs".to_string()))?;
        let output_name = session
            .outputs
            .first()
            .map(|output| output.name.clone())
            .ok_or_else(|| AnalysisError::Model("Model has no outputs".to_string()))?;

        let outputs = session
            .run(ort::inputs![input_name.as_str() => input])
            .map_err(model_error)?;

        let output = outputs
            .get(output_name.as_str())
            .ok_or_else(|| AnalysisError::Model(format!("Output '{output_name}' not found")))?;

        let (shape, data) = output.try_extract_tensor::<f32>().map_err(model_error)?;
        debug!(?shape, "Classifier model output");

        Ok(data.to_vec())
    }
}

impl ImageLabeler for OnnxLabeler {
    fn top_label(&self, image: &RgbImage) -> Option<String> {
        match self.logits(image) {
            Ok(logits) => top_index(&logits).and_then(|index| self.labels.get(index).cloned()),
            Err(e) => {
                warn!(error = %e, "Classifier model failed");
                None
            }
        }
    }
}
