//! External embedding table.
//!
//! The `dnn_embedding` kind is never computed from pixels. It is read from a
//! precomputed CSV table mapping an image name to a fixed 512-dimensional
//! vector, one `name,v0,v1,...` row per image.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use retina_core::{FeatureKind, FeatureVector};
use tracing::debug;

use crate::FeatureError;

/// Dimension of the externally computed embeddings.
pub const EMBEDDING_DIM: usize = 512;

/// A fully loaded identifier-to-vector table.
///
/// Rows are kept in table order; point lookups return the first row whose
/// name matches by bidirectional substring containment, tolerating
/// path-versus-filename mismatches between the table and the query.
#[derive(Debug, Default)]
pub struct EmbeddingTable {
    names: Vec<String>,
    vectors: Vec<FeatureVector>,
}

impl EmbeddingTable {
    /// Load every row of an embedding CSV file.
    ///
    /// Malformed numeric fields parse to 0.0; rows always produce a full
    /// 512-dimensional vector, zero-padded when the row is short.
    ///
    /// # Errors
    ///
    /// Returns [`FeatureError::Io`] if the file cannot be opened or read.
    pub fn load(path: &Path) -> Result<Self, FeatureError> {
        let file = open(path)?;
        let mut names = Vec::new();
        let mut vectors = Vec::new();

        for line in BufReader::new(file).lines() {
            let line = line.map_err(|source| FeatureError::Io {
                path: path.display().to_string(),
                source,
            })?;
            if let Some((name, vector)) = parse_row(&line) {
                names.push(name);
                vectors.push(vector);
            }
        }

        debug!(count = names.len(), path = %path.display(), "loaded embedding table");
        Ok(Self { names, vectors })
    }

    /// Number of rows in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the table holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// The stored names, in table order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Consume the table into parallel (names, vectors) arrays.
    #[must_use]
    pub fn into_parts(self) -> (Vec<String>, Vec<FeatureVector>) {
        (self.names, self.vectors)
    }

    /// Find the first row matching `image_name` by bidirectional substring
    /// containment.
    #[must_use]
    pub fn find(&self, image_name: &str) -> Option<&FeatureVector> {
        self.names
            .iter()
            .position(|stored| name_matches(stored, image_name))
            .map(|index| &self.vectors[index])
    }
}

/// Look up a single embedding by scanning the CSV file, stopping at the
/// first matching row.
///
/// The returned vector carries `image_name` as its source identifier.
///
/// # Errors
///
/// Returns [`FeatureError::Io`] if the file cannot be read, or
/// [`FeatureError::EmbeddingNotFound`] when no row matches.
pub fn lookup_embedding(path: &Path, image_name: &str) -> Result<FeatureVector, FeatureError> {
    let file = open(path)?;

    for line in BufReader::new(file).lines() {
        let line = line.map_err(|source| FeatureError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let Some((name, mut vector)) = parse_row(&line) else {
            continue;
        };
        if name_matches(&name, image_name) {
            vector.set_source(image_name);
            return Ok(vector);
        }
    }

    Err(FeatureError::EmbeddingNotFound(image_name.to_string()))
}

fn open(path: &Path) -> Result<File, FeatureError> {
    File::open(path).map_err(|source| FeatureError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Either name may be a bare file name while the other is a full path, so
/// containment is checked in both directions. First match in table order wins.
fn name_matches(stored: &str, query: &str) -> bool {
    stored.contains(query) || query.contains(stored)
}

fn parse_row(line: &str) -> Option<(String, FeatureVector)> {
    let mut fields = line.split(',');
    let name = fields.next()?;
    if name.is_empty() {
        return None;
    }

    let mut vector = FeatureVector::zeros(FeatureKind::DnnEmbedding, EMBEDDING_DIM);
    vector.set_source(name);
    let values = vector.as_mut_slice();
    for (slot, field) in values.iter_mut().zip(fields) {
        *slot = field.trim().parse().unwrap_or(0.0);
    }

    Some((name.to_string(), vector))
}
