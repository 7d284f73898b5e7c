//! Combined texture and color extractor.

use image::{GrayImage, RgbImage};
use retina_core::{FeatureKind, FeatureVector};

use crate::gradient::gradient_magnitude;
use crate::FeatureError;

/// Extract a color histogram concatenated with a gradient-magnitude
/// histogram.
///
/// The color part is a joint histogram with `color_bins` per channel
/// (normalized by total pixel count); the texture part is a `texture_bins`
/// histogram over gradient magnitudes in 0-255 (also normalized by total
/// pixel count). With the defaults the output is 512 + 8 = 520 dims.
///
/// # Errors
///
/// Returns [`FeatureError::EmptyImage`] for an empty pixel grid.
pub fn extract_texture_color(
    image: &RgbImage,
    color_bins: usize,
    texture_bins: usize,
) -> Result<FeatureVector, FeatureError> {
    super::require_pixels(image)?;

    let color_total = color_bins * color_bins * color_bins;
    let mut values = vec![0.0f32; color_total + texture_bins];
    let total = (image.width() * image.height()) as f32;

    for pixel in image.pixels() {
        values[super::joint_bin_index(pixel, color_bins)] += 1.0;
    }
    for value in &mut values[..color_total] {
        *value /= total;
    }

    let magnitude = gradient_magnitude(image);
    magnitude_histogram(&magnitude, &mut values[color_total..]);

    Ok(FeatureVector::new(FeatureKind::TextureColor, "", values))
}

/// Histogram of gradient magnitudes over the 0-255 range, normalized by
/// total pixel count.
fn magnitude_histogram(magnitude: &GrayImage, out: &mut [f32]) {
    let bins = out.len();
    let bin_size = 255.0 / bins as f32;
    let total = (magnitude.width() * magnitude.height()) as f32;

    for pixel in magnitude.pixels() {
        let bin = ((f32::from(pixel[0]) / bin_size) as usize).min(bins - 1);
        out[bin] += 1.0;
    }
    if total > 0.0 {
        for value in out {
            *value /= total;
        }
    }
}
