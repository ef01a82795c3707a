//! Dominant color extraction with k-means.

use std::collections::BTreeSet;

use image::RgbImage;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::color::{rgb_to_color_name, to_hex};
use crate::types::DominantColor;

/// Pixels clustered per image; larger images are sampled with a fixed stride
const MAX_SAMPLES: usize = 20_000;

/// Clustering parameters
#[derive(Debug, Clone, Copy)]
pub struct KMeansParams {
    pub max_clusters: usize,
    pub seed: u64,
    pub max_iterations: usize,
}

impl Default for KMeansParams {
    fn default() -> Self {
        Self {
            max_clusters: 5,
            seed: 42,
            max_iterations: 50,
        }
    }
}

/// Placeholder reported when an image has no pixels
pub fn unknown_color() -> DominantColor {
    DominantColor {
        name: "unknown".to_string(),
        hex: "#808080".to_string(),
        rgb: [128, 128, 128],
    }
}

/// Cluster the image's pixels and report the centers, largest cluster first.
///
/// Uses `k = min(max_clusters, distinct colors)`. Initial centers are drawn
/// from the sorted distinct colors with a seeded RNG, so results are
/// reproducible for the same image and parameters.
pub fn dominant_colors(image: &RgbImage, params: &KMeansParams) -> Vec<DominantColor> {
    let pixels = sample_pixels(image);
    if pixels.is_empty() || params.max_clusters == 0 {
        return vec![unknown_color()];
    }

    let distinct: Vec<[u8; 3]> = pixels
        .iter()
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let k = params.max_clusters.min(distinct.len());

    let mut rng = StdRng::seed_from_u64(params.seed);
    let mut centers: Vec<[f64; 3]> = distinct
        .choose_multiple(&mut rng, k)
        .map(|c| [c[0] as f64, c[1] as f64, c[2] as f64])
        .collect();

    let mut assignments = vec![usize::MAX; pixels.len()];
    let mut counts = vec![0usize; k];

    for _ in 0..params.max_iterations.max(1) {
        let mut changed = false;
        let mut sums = vec![[0.0f64; 3]; k];
        counts.iter_mut().for_each(|c| *c = 0);

        for (pixel, assigned) in pixels.iter().zip(assignments.iter_mut()) {
            let nearest = nearest_center(pixel, &centers);
            if *assigned != nearest {
                *assigned = nearest;
                changed = true;
            }
            counts[nearest] += 1;
            for channel in 0..3 {
                sums[nearest][channel] += pixel[channel] as f64;
            }
        }

        for (center, (sum, count)) in centers.iter_mut().zip(sums.iter().zip(&counts)) {
            if *count > 0 {
                let n = *count as f64;
                *center = [sum[0] / n, sum[1] / n, sum[2] / n];
            }
        }

        if !changed {
            break;
        }
    }

    let mut clusters: Vec<(usize, [f64; 3])> = counts.into_iter().zip(centers).collect();
    clusters.sort_by(|a, b| b.0.cmp(&a.0));

    clusters
        .into_iter()
        .filter(|(count, _)| *count > 0)
        .map(|(_, center)| {
            // Truncate toward zero like an integer cast of the mean
            let rgb = [center[0] as u8, center[1] as u8, center[2] as u8];
            DominantColor {
                name: rgb_to_color_name(rgb).to_string(),
                hex: to_hex(rgb),
                rgb,
            }
        })
        .collect()
}

fn sample_pixels(image: &RgbImage) -> Vec<[u8; 3]> {
    let total = image.width() as usize * image.height() as usize;
    let stride = total.div_ceil(MAX_SAMPLES).max(1);
    image.pixels().step_by(stride).map(|p| p.0).collect()
}

fn nearest_center(pixel: &[u8; 3], centers: &[[f64; 3]]) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (index, center) in centers.iter().enumerate() {
        let distance: f64 = (0..3)
            .map(|c| {
                let d = pixel[c] as f64 - center[c];
                d * d
            })
            .sum();
        if distance < best_distance {
            best = index;
            best_distance = distance;
        }
    }
    best
}
