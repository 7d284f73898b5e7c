//! Hand-designed blue-sky descriptor.
//!
//! A 30-dimensional composite: a hue histogram restricted to a fixed blue
//! band, per-half spatial and brightness statistics, and two scalar sky
//! position features. A pixel counts as "blue" only when its hue lies in the
//! band AND its saturation and brightness clear fixed floors.

use image::RgbImage;
use retina_core::{FeatureKind, FeatureVector};

use crate::color::rgb_to_hsv;
use crate::FeatureError;

/// Blue hue band, in halved-degree units (100-140 degrees).
const BLUE_HUE_MIN: u8 = 50;
const BLUE_HUE_MAX: u8 = 70;
/// Bins for the blue hue histogram (indices 0..16).
const BLUE_HIST_BINS: usize = 16;
/// Horizontal stripes per image half (indices 16..24).
const SPATIAL_BINS: usize = 4;
/// A pixel needs at least this much saturation to read as sky blue.
const SATURATION_MIN: u8 = 50;
/// Brightness floor for the blue test.
const VALUE_MIN: u8 = 50;
/// Brightness threshold for the bright-pixel bins (indices 24..28).
const BRIGHT: u8 = 150;
const VERY_BRIGHT: u8 = 200;

/// Extract the 30-dimensional blue-sky descriptor.
///
/// Layout: `[0..16)` blue hue histogram (normalized by blue pixel count),
/// `[16..20)`/`[20..24)` blue stripe densities per half (normalized by that
/// half's pixel count), `[24..26)`/`[26..28)` bright-pixel bins per half,
/// `[28]` top-half share of blue pixels, `[29]` mean normalized row of blue
/// pixels. An image with no blue pixels leaves all blue-derived entries 0.
///
/// # Errors
///
/// Returns [`FeatureError::EmptyImage`] for an empty pixel grid.
pub fn extract_custom(image: &RgbImage) -> Result<FeatureVector, FeatureError> {
    super::require_pixels(image)?;

    let rows = image.height() as usize;
    let cols = image.width() as usize;
    let half = rows / 2;
    let top_pixels = half * cols;
    let bottom_pixels = (rows - half) * cols;

    let mut feature = FeatureVector::zeros(FeatureKind::Custom, 30);
    let values = feature.as_mut_slice();

    let mut blue_top = 0usize;
    let mut blue_bottom = 0usize;
    let mut blue_row_sum = 0.0f32;

    for (_, y, pixel) in image.enumerate_pixels() {
        let (h, s, v) = rgb_to_hsv(pixel[0], pixel[1], pixel[2]);
        let y = y as usize;
        let top = y < half;

        if (BLUE_HUE_MIN..=BLUE_HUE_MAX).contains(&h) && s >= SATURATION_MIN && v > VALUE_MIN {
            let normalized = f32::from(h - BLUE_HUE_MIN) / f32::from(BLUE_HUE_MAX - BLUE_HUE_MIN);
            let bin = ((normalized * BLUE_HIST_BINS as f32) as usize).min(BLUE_HIST_BINS - 1);
            values[bin] += 1.0;
            blue_row_sum += y as f32;

            if top {
                blue_top += 1;
                let stripe = (y * SPATIAL_BINS / half).min(SPATIAL_BINS - 1);
                values[16 + stripe] += 1.0;
            } else {
                blue_bottom += 1;
                let stripe = ((y - half) * SPATIAL_BINS / (rows - half)).min(SPATIAL_BINS - 1);
                values[20 + stripe] += 1.0;
            }
        }

        if v > BRIGHT {
            let bin = usize::from(v > VERY_BRIGHT);
            let offset = if top { 24 } else { 26 };
            values[offset + bin] += 1.0;
        }
    }

    let total_blue = blue_top + blue_bottom;
    if total_blue > 0 {
        for value in &mut values[..BLUE_HIST_BINS] {
            *value /= total_blue as f32;
        }
    }
    if top_pixels > 0 {
        for value in &mut values[16..20] {
            *value /= top_pixels as f32;
        }
        values[24] /= top_pixels as f32;
        values[25] /= top_pixels as f32;
    }
    if bottom_pixels > 0 {
        for value in &mut values[20..24] {
            *value /= bottom_pixels as f32;
        }
        values[26] /= bottom_pixels as f32;
        values[27] /= bottom_pixels as f32;
    }
    if total_blue > 0 {
        values[28] = blue_top as f32 / total_blue as f32;
        values[29] = (blue_row_sum / total_blue as f32) / rows as f32;
    }

    Ok(feature)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    /// A color whose hue sits in the middle of the detected band.
    const IN_BAND: Rgb<u8> = Rgb([0, 255, 0]); // hue 120 degrees = 60 halved

    #[test]
    fn all_black_image_is_all_zeros() {
        let image = RgbImage::from_pixel(10, 10, Rgb([0, 0, 0]));
        let feature = extract_custom(&image).expect("extract");
        assert_eq!(feature.len(), 30);
        assert!(feature.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn in_band_image_populates_all_groups() {
        let image = RgbImage::from_pixel(4, 4, IN_BAND);
        let feature = extract_custom(&image).expect("extract");
        let v = feature.as_slice();

        // Hue 60 maps to bin (60-50)/20 * 16 = 8; all mass in one bin.
        assert!((v[8] - 1.0).abs() < 1e-6);
        // Top half: rows 0,1 land in stripes 0 and 2, half the mass each.
        assert!((v[16] - 0.5).abs() < 1e-6);
        assert!((v[18] - 0.5).abs() < 1e-6);
        // Full brightness: very-bright bin saturates in both halves.
        assert!((v[25] - 1.0).abs() < 1e-6);
        assert!((v[27] - 1.0).abs() < 1e-6);
        // Blue mass is split evenly between halves.
        assert!((v[28] - 0.5).abs() < 1e-6);
        // Mean row = 1.5 of 4 rows.
        assert!((v[29] - 0.375).abs() < 1e-6);
    }

    #[test]
    fn saturation_floor_is_conjunctive() {
        // Same hue but washed out: saturation below the floor, so nothing is
        // detected even though hue and brightness pass.
        let image = RgbImage::from_pixel(4, 4, Rgb([230, 255, 230]));
        let feature = extract_custom(&image).expect("extract");
        assert!(feature.as_slice()[..24].iter().all(|&v| v == 0.0));
        assert_eq!(feature.as_slice()[28], 0.0);
    }

    #[test]
    fn dark_pixels_are_not_blue() {
        let image = RgbImage::from_pixel(4, 4, Rgb([0, 40, 0]));
        let feature = extract_custom(&image).expect("extract");
        assert!(feature.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn top_heavy_blue_raises_sky_position() {
        // Blue sky over a black ground.
        let mut image = RgbImage::from_pixel(6, 6, Rgb([0, 0, 0]));
        for y in 0..3 {
            for x in 0..6 {
                image.put_pixel(x, y, IN_BAND);
            }
        }
        let feature = extract_custom(&image).expect("extract");
        let v = feature.as_slice();
        assert!((v[28] - 1.0).abs() < 1e-6);
        // Mean row = 1.0 of 6 rows.
        assert!((v[29] - 1.0 / 6.0).abs() < 1e-6);
        assert!(v[20..24].iter().all(|&x| x == 0.0));
    }
}
