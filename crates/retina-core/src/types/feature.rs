//! Feature vector descriptor type.

use std::ops::Deref;

use super::FeatureKind;

/// A fixed-length numeric descriptor of an image's visual content.
///
/// The vector length is fully determined by the [`FeatureKind`] that produced
/// it (and the extractor's fixed bin counts). The `source` identifier is an
/// opaque string, typically the originating image path; it is carried through
/// the system but never interpreted.
///
/// Feature vectors are immutable after extraction except for the explicit,
/// opt-in [`normalize`](Self::normalize) operation. The shipped extractors
/// normalize histograms by pixel count, not by L2 norm.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    values: Vec<f32>,
    source: String,
    kind: FeatureKind,
}

impl FeatureVector {
    /// Create a feature vector from extracted values.
    #[must_use]
    pub fn new(kind: FeatureKind, source: impl Into<String>, values: Vec<f32>) -> Self {
        Self { values, source: source.into(), kind }
    }

    /// Create a zero-filled vector of the given length.
    #[must_use]
    pub fn zeros(kind: FeatureKind, len: usize) -> Self {
        Self { values: vec![0.0; len], source: String::new(), kind }
    }

    /// The descriptor kind that produced this vector.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> FeatureKind {
        self.kind
    }

    /// The opaque source identifier, usually an image path.
    #[inline]
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Replace the source identifier.
    pub fn set_source(&mut self, source: impl Into<String>) {
        self.source = source.into();
    }

    /// The vector length.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the vector holds no values.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The values as a slice.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    /// Mutable access to the values, for extractors filling bins in place.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.values
    }

    /// Consume the vector and return the underlying values.
    #[inline]
    #[must_use]
    pub fn into_values(self) -> Vec<f32> {
        self.values
    }

    /// The L2 (Euclidean) norm of the vector.
    #[must_use]
    pub fn l2_norm(&self) -> f32 {
        self.values.iter().map(|v| v * v).sum::<f32>().sqrt()
    }

    /// Normalize the vector to unit L2 length, in place.
    ///
    /// A zero vector is left unchanged.
    pub fn normalize(&mut self) {
        let norm = self.l2_norm();
        if norm > 0.0 {
            for value in &mut self.values {
                *value /= norm;
            }
        }
    }
}

impl Deref for FeatureVector {
    type Target = [f32];

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.values
    }
}

impl AsRef<[f32]> for FeatureVector {
    #[inline]
    fn as_ref(&self) -> &[f32] {
        &self.values
    }
}
