//! Local binary pattern texture estimate.

use image::imageops::{self, FilterType};
use image::GrayImage;

use crate::types::TextureInfo;

/// Side length the grayscale image is resized to before LBP
const TEXTURE_SIZE: u32 = 100;

/// 8-neighbour LBP codes for every interior pixel.
///
/// Bits run clockwise from the top-left neighbour; a bit is set when the
/// neighbour is at least as bright as the center.
pub fn local_binary_pattern(gray: &GrayImage) -> Vec<u8> {
    let (width, height) = gray.dimensions();
    if width < 3 || height < 3 {
        return Vec::new();
    }

    const NEIGHBOURS: [(i64, i64); 8] = [
        (-1, -1),
        (0, -1),
        (1, -1),
        (1, 0),
        (1, 1),
        (0, 1),
        (-1, 1),
        (-1, 0),
    ];

    let mut codes = Vec::with_capacity(((width - 2) * (height - 2)) as usize);
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let center = gray.get_pixel(x, y).0[0];
            let mut code = 0u8;
            for (bit, (dx, dy)) in NEIGHBOURS.iter().enumerate() {
                let nx = (x as i64 + dx) as u32;
                let ny = (y as i64 + dy) as u32;
                if gray.get_pixel(nx, ny).0[0] >= center {
                    code |= 1 << bit;
                }
            }
            codes.push(code);
        }
    }
    codes
}

/// Population standard deviation
fn std_dev(values: &[u8]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().map(|&v| v as f64).sum::<f64>() / n;
    let variance = values
        .iter()
        .map(|&v| {
            let d = v as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / n;
    variance.sqrt()
}

/// Classify a texture from the spread of its LBP codes
pub fn texture_from_uniformity(uniformity: f64) -> TextureInfo {
    let (texture_type, material) = if uniformity < 30.0 {
        ("smooth", "silk")
    } else if uniformity < 60.0 {
        ("medium", "cotton")
    } else {
        ("textured", "wool")
    };

    TextureInfo {
        pattern: if uniformity < 40.0 { "solid" } else { "textured" }.to_string(),
        material: material.to_string(),
        texture_type: texture_type.to_string(),
        uniformity_score: uniformity as f32,
    }
}

pub fn analyze_texture(gray: &GrayImage) -> TextureInfo {
    let small = imageops::resize(gray, TEXTURE_SIZE, TEXTURE_SIZE, FilterType::Triangle);
    let codes = local_binary_pattern(&small);
    texture_from_uniformity(std_dev(&codes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn test_flat_image_is_smooth() {
        let gray = GrayImage::from_pixel(40, 40, Luma([90]));
        let codes = local_binary_pattern(&gray);
        assert_eq!(codes.len(), 38 * 38);
        assert!(codes.iter().all(|&c| c == 255));

        let texture = analyze_texture(&gray);
        assert_eq!(texture.texture_type, "smooth");
        assert_eq!(texture.material, "silk");
        assert_eq!(texture.pattern, "solid");
        assert_eq!(texture.uniformity_score, 0.0);
    }

    #[test]
    fn test_lbp_bit_order() {
        // Bright pixel to the right of the center sets bit 3 only
        let mut gray = GrayImage::from_pixel(3, 3, Luma([0]));
        gray.put_pixel(1, 1, Luma([100]));
        gray.put_pixel(2, 1, Luma([200]));
        assert_eq!(local_binary_pattern(&gray), vec![8]);
    }

    #[test]
    fn test_texture_thresholds() {
        let t = texture_from_uniformity(35.0);
        assert_eq!((t.texture_type.as_str(), t.pattern.as_str()), ("medium", "solid"));
        let t = texture_from_uniformity(45.0);
        assert_eq!((t.material.as_str(), t.pattern.as_str()), ("cotton", "textured"));
        let t = texture_from_uniformity(60.0);
        assert_eq!(t.material, "wool");
    }

    #[test]
    fn test_std_dev() {
        assert_eq!(std_dev(&[]), 0.0);
        assert!((std_dev(&[0, 255]) - 127.5).abs() < 1e-9);
    }

    #[test]
    fn test_tiny_image_has_no_codes() {
        assert!(local_binary_pattern(&GrayImage::new(2, 5)).is_empty());
    }
}
