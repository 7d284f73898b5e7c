//! Descriptor kind enumeration.

use std::fmt;

/// The kind of descriptor stored in a [`FeatureVector`](super::FeatureVector).
///
/// The kind determines which extraction algorithm produced the vector, the
/// vector's length, and which distance metric the query path uses. Parsing a
/// kind from a string is total: unrecognized names map to [`Baseline`], since
/// persisted databases written by older builds may carry names this version
/// does not know.
///
/// [`Baseline`]: FeatureKind::Baseline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FeatureKind {
    /// 7x7 center patch, raw channel values (147 dims).
    #[default]
    Baseline,
    /// Joint RGB color histogram, 16 bins per channel (4096 dims).
    Histogram,
    /// Per-region color histograms over two image halves (1024 dims).
    MultiHistogram,
    /// Whole-image color histogram plus gradient-magnitude histogram (520 dims).
    TextureColor,
    /// Precomputed 512-dim embedding read from an external table.
    DnnEmbedding,
    /// Hand-designed blue-sky descriptor (30 dims).
    Custom,
}

impl FeatureKind {
    /// All kinds, in a fixed order.
    pub const ALL: [Self; 6] = [
        Self::Baseline,
        Self::Histogram,
        Self::MultiHistogram,
        Self::TextureColor,
        Self::DnnEmbedding,
        Self::Custom,
    ];

    /// The canonical name used in persisted databases and on the CLI.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Baseline => "baseline",
            Self::Histogram => "histogram",
            Self::MultiHistogram => "multi_histogram",
            Self::TextureColor => "texture_color",
            Self::DnnEmbedding => "dnn_embedding",
            Self::Custom => "custom",
        }
    }

    /// Parse a kind name, falling back to [`Baseline`](Self::Baseline) for
    /// anything unrecognized.
    ///
    /// Used when reading persisted database headers, which tolerate unknown
    /// names. Callers that must reject unknown names use
    /// [`try_from_name`](Self::try_from_name).
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        Self::try_from_name(name).unwrap_or_default()
    }

    /// Parse a kind name, returning `None` for anything unrecognized.
    #[must_use]
    pub fn try_from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }

    /// The vector length this kind produces with the default extraction
    /// parameters.
    #[must_use]
    pub const fn default_dimension(self) -> usize {
        match self {
            Self::Baseline => 147,
            Self::Histogram => 4096,
            Self::MultiHistogram => 1024,
            Self::TextureColor => 520,
            Self::DnnEmbedding => 512,
            Self::Custom => 30,
        }
    }
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_roundtrip() {
        for kind in FeatureKind::ALL {
            assert_eq!(FeatureKind::from_name(kind.as_str()), kind);
        }
    }

    #[test]
    fn unknown_name_defaults_to_baseline() {
        assert_eq!(FeatureKind::from_name("resnet50"), FeatureKind::Baseline);
        assert_eq!(FeatureKind::from_name(""), FeatureKind::Baseline);
    }

    #[test]
    fn try_from_name_rejects_unknown() {
        assert_eq!(FeatureKind::try_from_name("histogram"), Some(FeatureKind::Histogram));
        assert_eq!(FeatureKind::try_from_name("resnet50"), None);
    }

    #[test]
    fn default_dimensions() {
        assert_eq!(FeatureKind::Baseline.default_dimension(), 147);
        assert_eq!(FeatureKind::Histogram.default_dimension(), 16 * 16 * 16);
        assert_eq!(FeatureKind::MultiHistogram.default_dimension(), 2 * 8 * 8 * 8);
        assert_eq!(FeatureKind::TextureColor.default_dimension(), 8 * 8 * 8 + 8);
        assert_eq!(FeatureKind::DnnEmbedding.default_dimension(), 512);
        assert_eq!(FeatureKind::Custom.default_dimension(), 30);
    }
}
