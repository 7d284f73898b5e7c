//! Error types for the features crate.

use retina_core::FeatureKind;
use thiserror::Error;

/// Errors that can occur while loading images or extracting descriptors.
#[derive(Debug, Error)]
pub enum FeatureError {
    /// The image could not be decoded.
    #[error("cannot decode image {path}: {source}")]
    Decode {
        /// The path that failed to decode.
        path: String,
        /// The underlying decoder error.
        #[source]
        source: image::ImageError,
    },

    /// A filesystem operation failed.
    #[error("cannot read {path}: {source}")]
    Io {
        /// The path that failed.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The image holds no pixels, so no descriptor can be produced.
    #[error("image has no pixels")]
    EmptyImage,

    /// The requested kind is looked up from an external table, never
    /// computed from pixels.
    #[error("feature kind '{0}' is not extracted from pixels")]
    NotPixelBased(FeatureKind),

    /// No entry in the embedding table matched the requested identifier.
    #[error("embedding for '{0}' not found in table")]
    EmbeddingNotFound(String),
}
