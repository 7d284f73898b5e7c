//! Database persistence.
//!
//! Serializes the engine's descriptor database to a line-oriented CSV file
//! and loads it back. The format is deliberately forgiving on load: header
//! fields and values that fail to parse fall back to defaults rather than
//! aborting, so a partially damaged file still yields a usable database.
//!
//! Layout:
//!
//! ```text
//! # Retina Feature Database
//! # Feature Type: histogram
//! # Feature Dimension: 4096
//! # Number of Images: 1106
//! pic.0001.jpg,0.0012,0.0,0.0034,...
//! ```

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use retina_core::{FeatureKind, FeatureVector};
use retina_features::source;
use tracing::info;

use crate::{RetrievalEngine, SearchError};

impl RetrievalEngine {
    /// Write the database to `path`, overwriting any existing file.
    ///
    /// Each row stores the image's file-name component, not its full path,
    /// so a database built on one machine loads cleanly on another.
    ///
    /// # Errors
    ///
    /// Fails on any I/O error while creating or writing the file.
    pub fn save_features(&self, path: &Path) -> Result<(), SearchError> {
        let io_err = |source| SearchError::Io { path: path.display().to_string(), source };

        let file = File::create(path).map_err(io_err)?;
        let mut writer = BufWriter::new(file);

        let dimension = self.features().first().map_or(0, FeatureVector::len);
        writeln!(writer, "# Retina Feature Database").map_err(io_err)?;
        writeln!(writer, "# Feature Type: {}", self.kind()).map_err(io_err)?;
        writeln!(writer, "# Feature Dimension: {dimension}").map_err(io_err)?;
        writeln!(writer, "# Number of Images: {}", self.len()).map_err(io_err)?;

        for (stored_path, feature) in self.paths().iter().zip(self.features()) {
            write!(writer, "{}", source::file_name(Path::new(stored_path))).map_err(io_err)?;
            for value in feature.as_slice() {
                write!(writer, ",{value}").map_err(io_err)?;
            }
            writeln!(writer).map_err(io_err)?;
        }

        writer.flush().map_err(io_err)?;
        info!(path = %path.display(), count = self.len(), "saved feature database");
        Ok(())
    }

    /// Replace the database with the contents of a previously saved file.
    ///
    /// Parsing is total: an unrecognized feature type falls back to
    /// `baseline`, and unparsable values become `0.0`. Returns the number of
    /// loaded descriptors.
    ///
    /// # Errors
    ///
    /// Fails only when the file itself cannot be opened or read.
    pub fn load_features(&mut self, path: &Path) -> Result<usize, SearchError> {
        let io_err = |source| SearchError::Io { path: path.display().to_string(), source };

        let file = File::open(path).map_err(io_err)?;
        let reader = BufReader::new(file);

        let mut kind = FeatureKind::default();
        let mut rows: Vec<(String, Vec<f32>)> = Vec::new();

        for line in reader.lines() {
            let line = line.map_err(io_err)?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(header) = line.strip_prefix('#') {
                if let Some(value) = header_value(header, "Feature Type") {
                    kind = FeatureKind::from_name(value);
                }
                // Dimension and count headers are informational; the rows
                // themselves are authoritative.
                continue;
            }

            let mut fields = line.split(',');
            let name = match fields.next() {
                Some(name) if !name.is_empty() => name.to_string(),
                _ => continue,
            };
            let values: Vec<f32> =
                fields.map(|field| field.trim().parse().unwrap_or(0.0)).collect();
            rows.push((name, values));
        }

        let count = rows.len();
        let mut paths = Vec::with_capacity(count);
        let mut features = Vec::with_capacity(count);
        for (name, values) in rows {
            features.push(FeatureVector::new(kind, name.clone(), values));
            paths.push(name);
        }

        self.replace(kind, paths, features, HashMap::new());
        info!(path = %path.display(), count, kind = %kind, "loaded feature database");
        Ok(count)
    }
}

/// Extract the value of a `Key: value` header field, if present.
fn header_value<'a>(header: &'a str, key: &str) -> Option<&'a str> {
    let (name, value) = header.split_once(':')?;
    (name.trim() == key).then(|| value.trim())
}
