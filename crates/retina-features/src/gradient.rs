//! Gradient collaborator.
//!
//! Computes a per-pixel gradient magnitude image for texture descriptors:
//! 3x3 Sobel derivatives over the grayscale image, combined as the Euclidean
//! magnitude, then min-max rescaled to span exactly 0-255.

use image::{GrayImage, Luma, RgbImage};

const SOBEL_X: [[f32; 3]; 3] = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const SOBEL_Y: [[f32; 3]; 3] = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

/// Compute the Sobel gradient magnitude of an image, rescaled to 0-255.
///
/// A uniform image (zero gradient everywhere) yields an all-zero result.
#[must_use]
pub fn gradient_magnitude(image: &RgbImage) -> GrayImage {
    let gray = to_grayscale(image);
    let (width, height) = gray.dimensions();

    let mut magnitudes = vec![0.0f32; (width as usize) * (height as usize)];
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;

    for y in 0..height as i64 {
        for x in 0..width as i64 {
            let mut gx = 0.0;
            let mut gy = 0.0;
            for (ky, row) in SOBEL_X.iter().enumerate() {
                for (kx, &wx) in row.iter().enumerate() {
                    let sx = reflect(x + kx as i64 - 1, i64::from(width));
                    let sy = reflect(y + ky as i64 - 1, i64::from(height));
                    let value = f32::from(gray.get_pixel(sx as u32, sy as u32)[0]);
                    gx += wx * value;
                    gy += SOBEL_Y[ky][kx] * value;
                }
            }
            let magnitude = (gx * gx + gy * gy).sqrt();
            magnitudes[(y as usize) * (width as usize) + x as usize] = magnitude;
            min = min.min(magnitude);
            max = max.max(magnitude);
        }
    }

    let mut out = GrayImage::new(width, height);
    if max > min {
        let scale = 255.0 / (max - min);
        for (i, pixel) in out.pixels_mut().enumerate() {
            *pixel = Luma([((magnitudes[i] - min) * scale).round() as u8]);
        }
    }
    out
}

/// BT.601 luma conversion, matching the reference grayscale weights.
fn to_grayscale(image: &RgbImage) -> GrayImage {
    let (width, height) = image.dimensions();
    let mut gray = GrayImage::new(width, height);
    for (src, dst) in image.pixels().zip(gray.pixels_mut()) {
        let luma = 0.299 * f32::from(src[0]) + 0.587 * f32::from(src[1]) + 0.114 * f32::from(src[2]);
        *dst = Luma([luma.round() as u8]);
    }
    gray
}

/// Reflect an out-of-bounds index back into `0..n` without repeating the
/// border sample (reflect-101).
fn reflect(i: i64, n: i64) -> i64 {
    if n == 1 {
        return 0;
    }
    let mut i = i;
    while i < 0 || i >= n {
        if i < 0 {
            i = -i;
        }
        if i >= n {
            i = 2 * n - 2 - i;
        }
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn uniform_image_has_zero_gradient() {
        let image = RgbImage::from_pixel(8, 8, Rgb([128, 128, 128]));
        let magnitude = gradient_magnitude(&image);
        assert!(magnitude.pixels().all(|p| p[0] == 0));
    }

    #[test]
    fn rescaled_to_full_range() {
        // Vertical black/white edge: the strongest response must reach 255.
        let mut image = RgbImage::new(8, 8);
        for (x, _, pixel) in image.enumerate_pixels_mut() {
            let value = if x < 4 { 0 } else { 255 };
            *pixel = Rgb([value, value, value]);
        }
        let magnitude = gradient_magnitude(&image);
        assert_eq!(magnitude.pixels().map(|p| p[0]).max(), Some(255));
        assert_eq!(magnitude.pixels().map(|p| p[0]).min(), Some(0));
    }

    #[test]
    fn reflect_101_indexing() {
        assert_eq!(reflect(-1, 5), 1);
        assert_eq!(reflect(-2, 5), 2);
        assert_eq!(reflect(5, 5), 3);
        assert_eq!(reflect(6, 5), 2);
        assert_eq!(reflect(2, 5), 2);
        assert_eq!(reflect(-1, 1), 0);
    }

    #[test]
    fn single_pixel_image() {
        let image = RgbImage::from_pixel(1, 1, Rgb([50, 100, 150]));
        let magnitude = gradient_magnitude(&image);
        assert_eq!(magnitude.dimensions(), (1, 1));
        assert_eq!(magnitude.get_pixel(0, 0)[0], 0);
    }
}
