//! Input and output handling for image-classification models.
//!
//! Models take a `[1, 3, size, size]` float tensor normalised with the
//! ImageNet channel statistics and return one logit per label.

use image::imageops::{self, FilterType};
use image::RgbImage;

/// Input edge length expected by most ImageNet-style classifiers
pub const DEFAULT_INPUT_SIZE: u32 = 224;

const CHANNEL_MEAN: [f32; 3] = [0.485, 0.456, 0.406];
const CHANNEL_STD: [f32; 3] = [0.229, 0.224, 0.225];

/// Parse a labels file: one label per line, index = line number.
///
/// Trailing blank lines are dropped; blank lines in between keep their index.
pub fn parse_labels(text: &str) -> Vec<String> {
    let mut labels: Vec<String> = text.lines().map(|line| line.trim().to_string()).collect();
    while labels.last().is_some_and(|label| label.is_empty()) {
        labels.pop();
    }
    labels
}

/// Resize to `size`×`size` and lay out normalised pixels channel-first
pub fn image_to_tensor_data(image: &RgbImage, size: u32) -> Vec<f32> {
    let resized = imageops::resize(image, size, size, FilterType::Triangle);
    let plane = (size * size) as usize;
    let mut data = vec![0.0f32; 3 * plane];

    for (index, pixel) in resized.pixels().enumerate() {
        for channel in 0..3 {
            let value = pixel[channel] as f32 / 255.0;
            data[channel * plane + index] = (value - CHANNEL_MEAN[channel]) / CHANNEL_STD[channel];
        }
    }
    data
}

/// Index of the largest logit; the first one wins ties and NaN never wins
pub fn top_index(logits: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (index, &logit) in logits.iter().enumerate() {
        if logit.is_nan() {
            continue;
        }
        if best.map_or(true, |(_, top)| logit > top) {
            best = Some((index, logit));
        }
    }
    best.map(|(index, _)| index)
}
