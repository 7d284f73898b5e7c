//! Retrieval engine.
//!
//! Owns the in-memory descriptor database (parallel path and feature arrays,
//! one active kind) and answers exact top-N similarity queries by linear
//! scan. The database is always rebuilt or replaced wholesale; a hard build
//! failure leaves the previous contents untouched.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use retina_core::{FeatureKind, FeatureVector, Match};
use retina_features::{embedding, extract, source, EmbeddingTable};
use tracing::{info, warn};

use crate::distance;
use crate::SearchError;

/// A content-based image retrieval engine.
///
/// One engine instance owns one database. Building and clearing require
/// `&mut self`; queries are read-only and safe to run concurrently against a
/// stable database. Concurrent build-while-query is the caller's problem to
/// serialize.
#[derive(Debug, Default)]
pub struct RetrievalEngine {
    paths: Vec<String>,
    features: Vec<FeatureVector>,
    kind: FeatureKind,
    /// Table path consumed by the `dnn_embedding` kind.
    embedding_csv: Option<PathBuf>,
    /// Name-to-index lookup, populated only when a `dnn_embedding` database
    /// is built from a table.
    embedding_index: HashMap<String, usize>,
}

impl RetrievalEngine {
    /// Create an empty engine.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the external embedding table used by the `dnn_embedding`
    /// kind.
    pub fn set_embedding_table(&mut self, path: impl Into<PathBuf>) {
        self.embedding_csv = Some(path.into());
    }

    /// Number of indexed images.
    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether the database is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// The active descriptor kind.
    #[must_use]
    pub const fn kind(&self) -> FeatureKind {
        self.kind
    }

    /// The stored image identifiers, in database order.
    #[must_use]
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// The stored descriptors, parallel to [`paths`](Self::paths).
    #[must_use]
    pub fn features(&self) -> &[FeatureVector] {
        &self.features
    }

    /// Build the database from scratch, replacing any previous contents.
    ///
    /// For pixel-based kinds, every image file directly inside `image_dir`
    /// is decoded and extracted; images that fail to decode or extract are
    /// skipped with a warning. For [`FeatureKind::DnnEmbedding`] the
    /// configured embedding table is bulk-loaded instead, and a name-to-index
    /// lookup is built.
    ///
    /// Returns the number of indexed images.
    ///
    /// # Errors
    ///
    /// Fails if the directory (or the embedding table) cannot be read at
    /// all; the previous database is left untouched in that case.
    pub fn build_database(
        &mut self,
        image_dir: &Path,
        kind: FeatureKind,
    ) -> Result<usize, SearchError> {
        if kind == FeatureKind::DnnEmbedding {
            return self.build_from_table(kind);
        }

        let image_paths = source::list_images(image_dir)?;

        let mut paths = Vec::with_capacity(image_paths.len());
        let mut features = Vec::with_capacity(image_paths.len());

        for path in &image_paths {
            let image = match source::load_image(path) {
                Ok(image) => image,
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "skipping unreadable image");
                    continue;
                }
            };
            let mut feature = match extract::extract(&image, kind) {
                Ok(feature) => feature,
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "skipping unextractable image");
                    continue;
                }
            };

            let display = path.display().to_string();
            feature.set_source(display.clone());
            paths.push(display);
            features.push(feature);

            if features.len() % 100 == 0 {
                info!(count = features.len(), "processed images");
            }
        }

        let count = features.len();
        self.replace(kind, paths, features, HashMap::new());
        info!(count, kind = %kind, "built feature database");
        Ok(count)
    }

    /// Bulk-load the whole embedding table as the database.
    fn build_from_table(&mut self, kind: FeatureKind) -> Result<usize, SearchError> {
        let csv = self.embedding_csv.as_ref().ok_or(SearchError::MissingEmbeddingTable)?;
        let table = EmbeddingTable::load(csv)?;
        let (paths, features) = table.into_parts();

        let index = paths
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();

        let count = features.len();
        self.replace(kind, paths, features, index);
        info!(count, "loaded embedding database");
        Ok(count)
    }

    /// Query by target image path.
    ///
    /// The target must be decodable. For pixel-based kinds its descriptor is
    /// extracted on the fly; for the embedding kind the file name is resolved
    /// through the in-memory lookup, falling back to a point lookup in the
    /// configured table.
    ///
    /// # Errors
    ///
    /// Fails when the target cannot be decoded, or when its embedding cannot
    /// be found.
    pub fn query_path(&self, target: &Path, top_n: usize) -> Result<Vec<Match>, SearchError> {
        let image = source::load_image(target)?;

        let mut feature = if self.kind == FeatureKind::DnnEmbedding {
            let name = source::file_name(target);
            match self.embedding_index.get(&name) {
                Some(&index) => self.features[index].clone(),
                None => {
                    let csv =
                        self.embedding_csv.as_ref().ok_or(SearchError::MissingEmbeddingTable)?;
                    embedding::lookup_embedding(csv, &name)?
                }
            }
        } else {
            extract::extract(&image, self.kind)?
        };

        feature.set_source(target.display().to_string());
        Ok(self.query_vector(&feature, top_n))
    }

    /// Query by precomputed descriptor.
    ///
    /// Scans every stored descriptor with the active kind's metric and
    /// returns the `top_n` best matches sorted ascending by distance. An
    /// empty database or a `top_n` of zero yields an empty result.
    #[must_use]
    pub fn query_vector(&self, target: &FeatureVector, top_n: usize) -> Vec<Match> {
        if self.features.is_empty() || top_n == 0 {
            return Vec::new();
        }

        let mut results: Vec<Match> = self
            .paths
            .iter()
            .zip(&self.features)
            .map(|(path, feature)| {
                let dist = distance::for_kind(self.kind, target.as_slice(), feature.as_slice());
                Match::new(path.clone(), dist)
            })
            .collect();

        // Ascending by distance; ties may land in any order.
        results.sort_by(|a, b| a.distance.partial_cmp(&b.distance).unwrap_or(Ordering::Equal));
        results.truncate(top_n);
        results
    }

    /// Empty the database. Idempotent.
    pub fn clear(&mut self) {
        self.paths.clear();
        self.features.clear();
        self.embedding_index.clear();
    }

    /// Swap in freshly built contents, used by build and load paths.
    pub(crate) fn replace(
        &mut self,
        kind: FeatureKind,
        paths: Vec<String>,
        features: Vec<FeatureVector>,
        embedding_index: HashMap<String, usize>,
    ) {
        self.kind = kind;
        self.paths = paths;
        self.features = features;
        self.embedding_index = embedding_index;
    }
}
