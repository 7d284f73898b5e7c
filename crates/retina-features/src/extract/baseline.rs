//! Center-patch baseline extractor.

use image::RgbImage;
use retina_core::{FeatureKind, FeatureVector};

use crate::FeatureError;

/// Side length of the sampled center patch.
const PATCH: i64 = 7;

/// Extract the 7x7 center patch as a 147-dimensional vector.
///
/// Emits B, G, R per pixel in row-major patch order, as raw 0-255 channel
/// values with no normalization. Sample coordinates are clamped to the image
/// bounds, so images smaller than 7x7 still yield a full-length vector by
/// repeating edge pixels.
///
/// # Errors
///
/// Returns [`FeatureError::EmptyImage`] for an empty pixel grid.
pub fn extract_baseline(image: &RgbImage) -> Result<FeatureVector, FeatureError> {
    super::require_pixels(image)?;

    let cols = i64::from(image.width());
    let rows = i64::from(image.height());
    let start_x = (cols / 2 - PATCH / 2).max(0);
    let start_y = (rows / 2 - PATCH / 2).max(0);

    let mut values = Vec::with_capacity((PATCH * PATCH * 3) as usize);
    for y in 0..PATCH {
        for x in 0..PATCH {
            let px = (start_x + x).clamp(0, cols - 1) as u32;
            let py = (start_y + y).clamp(0, rows - 1) as u32;
            let pixel = image.get_pixel(px, py);
            values.push(f32::from(pixel[2]));
            values.push(f32::from(pixel[1]));
            values.push(f32::from(pixel[0]));
        }
    }

    Ok(FeatureVector::new(FeatureKind::Baseline, "", values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn uniform_gray_is_constant_147_vector() {
        let image = RgbImage::from_pixel(14, 14, Rgb([128, 128, 128]));
        let feature = extract_baseline(&image).expect("extract");
        assert_eq!(feature.len(), 147);
        assert!(feature.as_slice().iter().all(|&v| v == 128.0));
    }

    #[test]
    fn channel_order_is_bgr() {
        let image = RgbImage::from_pixel(7, 7, Rgb([10, 20, 30]));
        let feature = extract_baseline(&image).expect("extract");
        assert_eq!(&feature.as_slice()[..3], &[30.0, 20.0, 10.0]);
    }

    #[test]
    fn tiny_image_repeats_edge_pixels() {
        let image = RgbImage::from_pixel(2, 3, Rgb([50, 60, 70]));
        let feature = extract_baseline(&image).expect("extract");
        assert_eq!(feature.len(), 147);
        assert!(feature.as_slice().chunks(3).all(|c| c == [70.0, 60.0, 50.0]));
    }

    #[test]
    fn samples_the_image_center() {
        // 9x9 image, all black except the center pixel: the patch covers
        // rows/cols 1..=7, so the center value must appear exactly once.
        let mut image = RgbImage::from_pixel(9, 9, Rgb([0, 0, 0]));
        image.put_pixel(4, 4, Rgb([255, 255, 255]));
        let feature = extract_baseline(&image).expect("extract");
        let whites = feature.as_slice().iter().filter(|&&v| v == 255.0).count();
        assert_eq!(whites, 3);
        // Patch position 3,3 (center of the 7x7 window at offset 1,1).
        let idx = (3 * 7 + 3) * 3;
        assert_eq!(&feature.as_slice()[idx..idx + 3], &[255.0, 255.0, 255.0]);
    }
}
