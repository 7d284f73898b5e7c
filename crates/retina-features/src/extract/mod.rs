//! Descriptor extraction.
//!
//! Each extractor is a pure function from an RGB pixel grid to a
//! [`FeatureVector`]. Extraction fails only when the image holds no pixels.
//! The [`extract`] dispatcher applies the fixed default parameters for each
//! kind; per-extractor parameters are available on the individual functions
//! but are not configurable through dispatch.

mod baseline;
mod histogram;
mod sky;
mod texture;

pub use baseline::extract_baseline;
pub use histogram::{extract_histogram, extract_multi_histogram, RegionSplit};
pub use sky::extract_custom;
pub use texture::extract_texture_color;

use image::RgbImage;
use retina_core::{FeatureKind, FeatureVector};

use crate::FeatureError;

/// Default bins per channel for the global color histogram (16^3 = 4096 dims).
pub const HISTOGRAM_BINS: usize = 16;
/// Default bins per channel for each multi-histogram region (8^3 per region).
pub const REGION_BINS: usize = 8;
/// Default bins per channel for the texture-color color part.
pub const COLOR_BINS: usize = 8;
/// Default bins for the gradient-magnitude histogram.
pub const TEXTURE_BINS: usize = 8;

/// Extract a descriptor of the given kind with its default parameters.
///
/// # Errors
///
/// Returns [`FeatureError::EmptyImage`] for an empty pixel grid, or
/// [`FeatureError::NotPixelBased`] for [`FeatureKind::DnnEmbedding`], which
/// is looked up from an external table instead.
pub fn extract(image: &RgbImage, kind: FeatureKind) -> Result<FeatureVector, FeatureError> {
    match kind {
        FeatureKind::Baseline => extract_baseline(image),
        FeatureKind::Histogram => extract_histogram(image, HISTOGRAM_BINS),
        FeatureKind::MultiHistogram => {
            extract_multi_histogram(image, REGION_BINS, RegionSplit::TopBottom)
        }
        FeatureKind::TextureColor => extract_texture_color(image, COLOR_BINS, TEXTURE_BINS),
        FeatureKind::Custom => extract_custom(image),
        FeatureKind::DnnEmbedding => Err(FeatureError::NotPixelBased(kind)),
    }
}

/// Guard shared by every pixel extractor.
fn require_pixels(image: &RgbImage) -> Result<(), FeatureError> {
    if image.width() == 0 || image.height() == 0 {
        Err(FeatureError::EmptyImage)
    } else {
        Ok(())
    }
}

/// Joint bin index for one RGB pixel: `(r_bin * bins + g_bin) * bins + b_bin`,
/// with each channel bin clamped to the last bin.
fn joint_bin_index(pixel: &image::Rgb<u8>, bins: usize) -> usize {
    let bin_size = 256.0 / bins as f32;
    let r_bin = ((f32::from(pixel[0]) / bin_size) as usize).min(bins - 1);
    let g_bin = ((f32::from(pixel[1]) / bin_size) as usize).min(bins - 1);
    let b_bin = ((f32::from(pixel[2]) / bin_size) as usize).min(bins - 1);
    (r_bin * bins + g_bin) * bins + b_bin
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn dispatch_produces_default_dimensions() {
        let image = RgbImage::from_pixel(16, 16, Rgb([100, 140, 180]));
        for kind in [
            FeatureKind::Baseline,
            FeatureKind::Histogram,
            FeatureKind::MultiHistogram,
            FeatureKind::TextureColor,
            FeatureKind::Custom,
        ] {
            let feature = extract(&image, kind).expect("extract");
            assert_eq!(feature.len(), kind.default_dimension(), "kind {kind}");
            assert_eq!(feature.kind(), kind);
        }
    }

    #[test]
    fn dispatch_rejects_embedding_kind() {
        let image = RgbImage::from_pixel(4, 4, Rgb([0, 0, 0]));
        let result = extract(&image, FeatureKind::DnnEmbedding);
        assert!(matches!(result, Err(FeatureError::NotPixelBased(_))));
    }

    #[test]
    fn empty_image_is_an_error() {
        let image = RgbImage::new(0, 0);
        for kind in [FeatureKind::Baseline, FeatureKind::Histogram, FeatureKind::Custom] {
            assert!(matches!(extract(&image, kind), Err(FeatureError::EmptyImage)));
        }
    }

    #[test]
    fn joint_bin_index_extremes() {
        assert_eq!(joint_bin_index(&Rgb([0, 0, 0]), 16), 0);
        assert_eq!(joint_bin_index(&Rgb([255, 255, 255]), 16), 16 * 16 * 16 - 1);
        // 128 / (256/16) = bin 8 on each channel.
        assert_eq!(joint_bin_index(&Rgb([128, 128, 128]), 16), (8 * 16 + 8) * 16 + 8);
    }
}
