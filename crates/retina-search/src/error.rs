//! Error types for the search crate.

use retina_features::FeatureError;
use thiserror::Error;

/// Errors that can occur while building, persisting or querying a database.
#[derive(Debug, Error)]
pub enum SearchError {
    /// An image could not be loaded or a descriptor could not be produced.
    #[error(transparent)]
    Feature(#[from] FeatureError),

    /// A database file could not be read or written.
    #[error("cannot access database file {path}: {source}")]
    Io {
        /// The database file path.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The `dnn_embedding` kind needs an embedding table path, and none was
    /// configured.
    #[error("embedding table path not set; required for the dnn_embedding kind")]
    MissingEmbeddingTable,
}
