//! Color histogram extractors.

use image::RgbImage;
use retina_core::{FeatureKind, FeatureVector};

use crate::FeatureError;

/// How the multi-region extractor partitions the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegionSplit {
    /// Top and bottom halves; the remainder row goes to the bottom region.
    #[default]
    TopBottom,
    /// Left and right halves; the remainder column goes to the right region.
    LeftRight,
}

/// Extract a joint RGB histogram with `bins` equal-width bins per channel.
///
/// Each channel value maps to `floor(value / (256 / bins))`, clamped to the
/// last bin; the joint index is `(r * bins + g) * bins + b`. The histogram is
/// divided by the total pixel count, so the output sums to 1.
///
/// # Errors
///
/// Returns [`FeatureError::EmptyImage`] for an empty pixel grid.
pub fn extract_histogram(image: &RgbImage, bins: usize) -> Result<FeatureVector, FeatureError> {
    super::require_pixels(image)?;

    let mut values = vec![0.0f32; bins * bins * bins];
    for pixel in image.pixels() {
        values[super::joint_bin_index(pixel, bins)] += 1.0;
    }

    let total = (image.width() * image.height()) as f32;
    for value in &mut values {
        *value /= total;
    }

    Ok(FeatureVector::new(FeatureKind::Histogram, "", values))
}

/// Extract two per-region histograms and concatenate them.
///
/// The image is split into two disjoint halves along the chosen axis; each
/// region's histogram is normalized by that region's own pixel count, so each
/// half of the output sums to 1 independently.
///
/// # Errors
///
/// Returns [`FeatureError::EmptyImage`] for an empty pixel grid.
pub fn extract_multi_histogram(
    image: &RgbImage,
    bins: usize,
    split: RegionSplit,
) -> Result<FeatureVector, FeatureError> {
    super::require_pixels(image)?;

    let width = image.width();
    let height = image.height();
    let bins_per_region = bins * bins * bins;
    let mut feature = FeatureVector::zeros(FeatureKind::MultiHistogram, bins_per_region * 2);

    let (first, second) = match split {
        RegionSplit::TopBottom => {
            ((0, width, 0, height / 2), (0, width, height / 2, height))
        }
        RegionSplit::LeftRight => {
            ((0, width / 2, 0, height), (width / 2, width, 0, height))
        }
    };

    accumulate_region(image, first, bins, &mut feature.as_mut_slice()[..bins_per_region]);
    accumulate_region(image, second, bins, &mut feature.as_mut_slice()[bins_per_region..]);

    Ok(feature)
}

/// Fill one region's histogram bins and normalize by the region pixel count.
fn accumulate_region(
    image: &RgbImage,
    (x0, x1, y0, y1): (u32, u32, u32, u32),
    bins: usize,
    out: &mut [f32],
) {
    let mut count = 0u32;
    for y in y0..y1 {
        for x in x0..x1 {
            out[super::joint_bin_index(image.get_pixel(x, y), bins)] += 1.0;
            count += 1;
        }
    }
    if count > 0 {
        for value in out {
            *value /= count as f32;
        }
    }
}
