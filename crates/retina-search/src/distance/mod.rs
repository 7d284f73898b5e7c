//! Distance functions for descriptor similarity.
//!
//! All primitive metrics require equal-length inputs and return the
//! [`LENGTH_MISMATCH`] sentinel (-1.0) instead of panicking on a mismatch, so
//! one malformed entry can never take down a whole query scan.
//!
//! [`for_kind`] is the fixed kind-to-metric dispatch the query path uses;
//! composite metrics slice the flat vector into sub-ranges by fixed offsets
//! and combine sub-distances with fixed weights. Every distance returned here
//! reads "lower is better": similarity-flavored metrics are negated or
//! inverted before being returned.

use retina_core::FeatureKind;

/// Sentinel returned by every primitive metric when the inputs differ in
/// length.
pub const LENGTH_MISMATCH: f32 = -1.0;

/// Element offset separating the color and texture parts of a
/// `texture_color` descriptor. Must stay in lockstep with the extractor's
/// default color bin count (8^3).
pub const COLOR_TEXTURE_SPLIT: usize = 512;

/// Sum of squared differences: `sum((a[i] - b[i])^2)`.
#[must_use]
pub fn sum_squared_difference(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return LENGTH_MISMATCH;
    }
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// Histogram intersection similarity: `sum(min(a[i], b[i]))`.
///
/// Higher is more similar; use
/// [`histogram_intersection_distance`] on the query path.
#[must_use]
pub fn histogram_intersection(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return LENGTH_MISMATCH;
    }
    a.iter().zip(b).map(|(x, y)| x.min(*y)).sum()
}

/// Negated histogram intersection, so that smaller values are better
/// matches. Identical unit-sum histograms score exactly -1.0.
#[must_use]
pub fn histogram_intersection_distance(a: &[f32], b: &[f32]) -> f32 {
    -histogram_intersection(a, b)
}

/// Cosine similarity: `dot(a, b) / (|a| * |b|)`.
///
/// Defined as 0.0 when either vector has zero norm; never divides by zero.
#[must_use]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return LENGTH_MISMATCH;
    }

    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Cosine distance: `1 - cosine_similarity`.
#[must_use]
pub fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
    1.0 - cosine_similarity(a, b)
}

/// Manhattan (L1) distance.
#[must_use]
pub fn l1_distance(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return LENGTH_MISMATCH;
    }
    a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum()
}

/// Euclidean (L2) distance.
#[must_use]
pub fn l2_distance(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return LENGTH_MISMATCH;
    }
    sum_squared_difference(a, b).sqrt()
}

/// Weighted mean of parallel distance and weight sequences.
///
/// When the weights total zero or less the weighted sum is returned
/// undivided; returns the sentinel when the sequences differ in length.
#[must_use]
pub fn weighted_distance(distances: &[f32], weights: &[f32]) -> f32 {
    if distances.len() != weights.len() {
        return LENGTH_MISMATCH;
    }

    let sum: f32 = distances.iter().zip(weights).map(|(d, w)| d * w).sum();
    let weight_sum: f32 = weights.iter().sum();

    if weight_sum > 0.0 {
        sum / weight_sum
    } else {
        sum
    }
}

/// Weights of the four blue-sky sub-distances.
const SKY_WEIGHTS: [f32; 4] = [0.35, 0.25, 0.20, 0.20];

/// Compute the distance between two descriptors using the metric fixed for
/// their kind.
///
/// Returns the [`LENGTH_MISMATCH`] sentinel when the vectors differ in
/// length, or when a composite metric's fixed sub-ranges do not fit. A
/// `texture_color` vector must be strictly longer than
/// [`COLOR_TEXTURE_SPLIT`]; one of exactly 512 elements (an empty texture
/// part, which the shipped extractor never produces) also gets the sentinel
/// rather than a color-only comparison.
#[must_use]
pub fn for_kind(kind: FeatureKind, a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return LENGTH_MISMATCH;
    }

    match kind {
        FeatureKind::Baseline => sum_squared_difference(a, b),
        FeatureKind::Histogram => histogram_intersection_distance(a, b),
        FeatureKind::MultiHistogram => {
            let half = a.len() / 2;
            let first = histogram_intersection_distance(&a[..half], &b[..half]);
            let second =
                histogram_intersection_distance(&a[half..half * 2], &b[half..half * 2]);
            (first + second) / 2.0
        }
        FeatureKind::TextureColor => {
            if a.len() <= COLOR_TEXTURE_SPLIT {
                return LENGTH_MISMATCH;
            }
            let color = histogram_intersection_distance(
                &a[..COLOR_TEXTURE_SPLIT],
                &b[..COLOR_TEXTURE_SPLIT],
            );
            let texture = histogram_intersection_distance(
                &a[COLOR_TEXTURE_SPLIT..],
                &b[COLOR_TEXTURE_SPLIT..],
            );
            (color + texture) / 2.0
        }
        FeatureKind::DnnEmbedding => cosine_distance(a, b),
        FeatureKind::Custom => sky_distance(a, b),
    }
}

/// Composite metric for the 30-dim blue-sky descriptor.
///
/// Sub-ranges: blue hue histogram `[0..16)`, spatial stripes `[16..24)`,
/// brightness bins `[24..28)`, sky position scalars `[28..30)`. The spatial
/// SSD weights the four top-half stripes 3x the bottom-half stripes.
fn sky_distance(a: &[f32], b: &[f32]) -> f32 {
    if a.len() < 30 {
        return LENGTH_MISMATCH;
    }

    let blue = histogram_intersection_distance(&a[..16], &b[..16]);

    let mut spatial = 0.0;
    let mut weight_sum = 0.0;
    for i in 16..24 {
        let weight = if i < 20 { 3.0 } else { 1.0 };
        let diff = a[i] - b[i];
        spatial += weight * diff * diff;
        weight_sum += weight;
    }
    spatial /= weight_sum;

    let brightness = histogram_intersection_distance(&a[24..28], &b[24..28]);
    let position = ((a[28] - b[28]).abs() + (a[29] - b[29]).abs()) / 2.0;

    weighted_distance(&[blue, spatial, brightness, position], &SKY_WEIGHTS)
}
